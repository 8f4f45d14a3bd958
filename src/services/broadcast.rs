use axum::extract::ws::Message;
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::{
        game::{BuzzEntrySnapshot, TeamSummary},
        ws::ServerMessage,
    },
    error::EventError,
    state::{SharedState, quiz::QuizState, round::RoundPhase},
};

/// Build the `teamListUpdate` snapshot for the current registry.
pub fn team_list_update(quiz: &QuizState) -> ServerMessage {
    ServerMessage::TeamListUpdate {
        teams: quiz.teams().iter().map(TeamSummary::from).collect(),
    }
}

/// Build the `buzzerResult` snapshot for the current round.
pub fn buzzer_result(quiz: &QuizState) -> ServerMessage {
    ServerMessage::BuzzerResult {
        ranked: quiz
            .round()
            .entries()
            .iter()
            .map(BuzzEntrySnapshot::from)
            .collect(),
    }
}

/// Build the round-phase signal matching the current phase.
pub fn phase_signal(quiz: &QuizState) -> ServerMessage {
    match quiz.round_phase() {
        RoundPhase::Active => ServerMessage::QuestionStarted,
        RoundPhase::Idle => ServerMessage::QuestionReset,
    }
}

/// Full state snapshot pushed to a single connection when it registers, so
/// late joiners reconcile to present state without waiting for a mutation.
pub fn snapshot_messages(quiz: &QuizState) -> [ServerMessage; 3] {
    [team_list_update(quiz), phase_signal(quiz), buzzer_result(quiz)]
}

/// Serialize a payload and push it onto the provided writer channel.
///
/// Serialization failure is a permanent error (bug in code): it is logged
/// and swallowed. A closed writer is transient and reported so the caller
/// can drop the session.
pub fn send_message(
    tx: &mpsc::UnboundedSender<Message>,
    message: &ServerMessage,
) -> Result<(), EventError> {
    let payload = match serde_json::to_string(message) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to serialize message `{message:?}`");
            return Ok(());
        }
    };

    tx.send(Message::Text(payload.into()))
        .map_err(|_| EventError::ConnectionClosed)
}

/// Fan a message out to every live connection, unfiltered.
///
/// Callers hold the quiz guard while fanning out, so snapshots reach every
/// observer in mutation order; sends are unbounded pushes and never block.
/// Sessions whose writer is gone are pruned afterwards; iteration must not
/// remove entries in place.
pub fn broadcast_message(state: &SharedState, message: &ServerMessage) {
    let mut dead: Vec<Uuid> = Vec::new();
    for session in state.sessions().iter() {
        if send_message(&session.tx, message).is_err() {
            dead.push(*session.key());
        }
    }

    for id in dead {
        warn!(id = %id, "dropping session with closed writer");
        state.sessions().remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_idle_empty_state() {
        let quiz = QuizState::new();
        let [teams, phase, ranking] = snapshot_messages(&quiz);

        assert!(matches!(teams, ServerMessage::TeamListUpdate { teams } if teams.is_empty()));
        assert!(matches!(phase, ServerMessage::QuestionReset));
        assert!(matches!(ranking, ServerMessage::BuzzerResult { ranked } if ranked.is_empty()));
    }

    #[test]
    fn snapshot_carries_current_ranking_for_late_joiners() {
        let mut quiz = QuizState::new();
        let a = quiz.add_team("A".into(), "red".into());
        let b = quiz.add_team("B".into(), "blue".into());
        quiz.start_round();
        quiz.submit_buzz(b.id).unwrap();
        quiz.submit_buzz(a.id).unwrap();

        let [teams, phase, ranking] = snapshot_messages(&quiz);

        assert!(matches!(teams, ServerMessage::TeamListUpdate { teams } if teams.len() == 2));
        assert!(matches!(phase, ServerMessage::QuestionStarted));
        match ranking {
            ServerMessage::BuzzerResult { ranked } => {
                assert_eq!(ranked.len(), 2);
                assert_eq!(ranked[0].tid, b.id);
                assert_eq!(ranked[0].position, 1);
                assert_eq!(ranked[1].tid, a.id);
                assert_eq!(ranked[1].position, 2);
            }
            other => panic!("expected buzzerResult, got {other:?}"),
        }
    }
}
