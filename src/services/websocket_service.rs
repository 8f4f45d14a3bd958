use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dto::ws::{ClientMessage, ClientRole},
    error::EventError,
    services::quiz_service,
    state::{ClientSession, SharedState},
};

/// Handle the full lifecycle for an individual quiz WebSocket connection.
///
/// A session record is created as soon as the socket is accepted (role
/// guest) so broadcasts reach the connection immediately; the `register`
/// event only upgrades its metadata.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let session_id = Uuid::new_v4();
    state.sessions().insert(
        session_id,
        ClientSession {
            role: ClientRole::Guest,
            team_id: None,
            tx: outbound_tx.clone(),
        },
    );
    info!(id = %session_id, "client connected");

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match ClientMessage::from_json_str(&text) {
                Ok(event) => {
                    if let Err(err) = dispatch(&state, session_id, event).await {
                        if matches!(err, EventError::ConnectionClosed) {
                            info!(id = %session_id, "connection closed during event handling, terminating");
                            break;
                        }
                        // Rejections are silent towards the client by design.
                        warn!(id = %session_id, error = %err, "client event dropped");
                    }
                }
                Err(err) => {
                    warn!(id = %session_id, error = %err, "failed to parse or validate client message");
                }
            },
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(id = %session_id, "client closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {}
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(id = %session_id, error = %err, "websocket error");
                break;
            }
        }
    }

    state.sessions().remove(&session_id);
    info!(id = %session_id, "client disconnected");

    finalize(writer_task, outbound_tx).await;
}

/// Route a parsed client event to its handler.
async fn dispatch(
    state: &SharedState,
    session_id: Uuid,
    event: ClientMessage,
) -> Result<(), EventError> {
    match event {
        ClientMessage::Register { role, tid } => {
            quiz_service::handle_register(state, session_id, role, tid).await
        }
        ClientMessage::AddTeam { name, color } => {
            quiz_service::handle_add_team(state, session_id, name, color).await
        }
        ClientMessage::ClearAllTeams => {
            quiz_service::handle_clear_all_teams(state, session_id).await
        }
        ClientMessage::StartQuestion => {
            quiz_service::handle_start_question(state, session_id).await
        }
        ClientMessage::ResetQuestion => {
            quiz_service::handle_reset_question(state, session_id).await
        }
        ClientMessage::BuzzerPress { tid } => {
            quiz_service::handle_buzzer_press(state, session_id, tid).await
        }
        ClientMessage::Unknown => {
            debug!(id = %session_id, "ignoring unknown message type");
            Ok(())
        }
    }
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
