use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dto::ws::{ClientRole, ServerMessage},
    error::EventError,
    services::broadcast,
    state::SharedState,
};

/// Record the role a connection declared and push it a full state snapshot.
///
/// Registration is unconditionally accepted; the declared role is only
/// consulted later, when the connection attempts a control event.
pub async fn handle_register(
    state: &SharedState,
    session_id: Uuid,
    role: ClientRole,
    tid: Option<Uuid>,
) -> Result<(), EventError> {
    let tx = {
        let Some(mut session) = state.sessions().get_mut(&session_id) else {
            return Err(EventError::ConnectionClosed);
        };
        session.role = role;
        session.team_id = if role == ClientRole::Team { tid } else { None };
        session.tx.clone()
    };

    info!(id = %session_id, role = ?role, team_id = ?tid, "session registered");

    // Sending while the guard is held keeps the snapshot ordered against
    // concurrent mutations' broadcasts; pushes never block.
    state
        .read_quiz(|quiz| {
            for message in &broadcast::snapshot_messages(quiz) {
                broadcast::send_message(&tx, message)?;
            }
            Ok(())
        })
        .await
}

/// Create a new team and broadcast the updated team list.
///
/// The color falls back to the first palette entry not already in use.
pub async fn handle_add_team(
    state: &SharedState,
    session_id: Uuid,
    name: String,
    color: Option<String>,
) -> Result<(), EventError> {
    ensure_admin(state, &session_id)?;

    let config = state.config();
    state
        .with_quiz_mut(move |quiz| {
            let color =
                color.unwrap_or_else(|| config.first_unused_color(&quiz.teams().used_colors()));
            let team = quiz.add_team(name, color);
            info!(team_id = %team.id, name = %team.name, "team created");
            broadcast::broadcast_message(state, &broadcast::team_list_update(quiz));
        })
        .await;
    Ok(())
}

/// Wipe the team registry, reset the round, and broadcast both snapshots.
pub async fn handle_clear_all_teams(
    state: &SharedState,
    session_id: Uuid,
) -> Result<(), EventError> {
    ensure_admin(state, &session_id)?;

    state
        .with_quiz_mut(|quiz| {
            quiz.clear_all_teams();
            info!("all teams cleared, round reset");
            broadcast::broadcast_message(state, &broadcast::team_list_update(quiz));
            broadcast::broadcast_message(state, &ServerMessage::QuestionReset);
            broadcast::broadcast_message(state, &broadcast::buzzer_result(quiz));
        })
        .await;
    Ok(())
}

/// Open a fresh question round and broadcast the (empty) ranking.
pub async fn handle_start_question(
    state: &SharedState,
    session_id: Uuid,
) -> Result<(), EventError> {
    ensure_admin(state, &session_id)?;

    state
        .with_quiz_mut(|quiz| {
            quiz.start_round();
            info!("question round started");
            broadcast::broadcast_message(state, &ServerMessage::QuestionStarted);
            broadcast::broadcast_message(state, &broadcast::buzzer_result(quiz));
        })
        .await;
    Ok(())
}

/// Close the question round and broadcast the (empty) ranking.
pub async fn handle_reset_question(
    state: &SharedState,
    session_id: Uuid,
) -> Result<(), EventError> {
    ensure_admin(state, &session_id)?;

    state
        .with_quiz_mut(|quiz| {
            quiz.reset_round();
            info!("question round reset");
            broadcast::broadcast_message(state, &ServerMessage::QuestionReset);
            broadcast::broadcast_message(state, &broadcast::buzzer_result(quiz));
        })
        .await;
    Ok(())
}

/// Submit a buzz for team `tid` and broadcast the full updated ranking.
///
/// When the connection registered with a team id, a buzz for a different
/// team is dropped before touching the quiz state.
pub async fn handle_buzzer_press(
    state: &SharedState,
    session_id: Uuid,
    tid: Uuid,
) -> Result<(), EventError> {
    if let Some(session) = state.sessions().get(&session_id)
        && let Some(expected) = session.team_id
        && expected != tid
    {
        return Err(EventError::MismatchedTeam { expected, got: tid });
    }

    state
        .with_quiz_mut(|quiz| {
            let entry = quiz.submit_buzz(tid)?;
            debug!(team_id = %tid, position = entry.position, "buzz accepted");
            broadcast::broadcast_message(state, &broadcast::buzzer_result(quiz));
            Ok(())
        })
        .await
}

/// Gate control events on the role the session registered with.
fn ensure_admin(state: &SharedState, session_id: &Uuid) -> Result<(), EventError> {
    let role = state
        .sessions()
        .get(session_id)
        .map(|session| session.role)
        .unwrap_or(ClientRole::Guest);

    if role == ClientRole::Admin {
        Ok(())
    } else {
        Err(EventError::Unauthorized { role })
    }
}
