pub mod quiz;
pub mod round;
pub mod teams;

use std::sync::Arc;

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::{config::AppConfig, dto::ws::ClientRole, state::quiz::QuizState};

/// Shared handle to the central application state.
pub type SharedState = Arc<AppState>;

#[derive(Clone)]
/// Per-connection session metadata plus the handle used to push messages to it.
///
/// Sessions are a view index only: they hold no authoritative quiz data and
/// are discarded wholesale on disconnect.
pub struct ClientSession {
    /// Role the connection registered with (guest until it registers).
    pub role: ClientRole,
    /// Team bound to the connection when the role is `team`.
    pub team_id: Option<Uuid>,
    /// Writer channel feeding the connection's outbound socket task.
    pub tx: mpsc::UnboundedSender<Message>,
}

/// Central application state storing live sessions and the quiz data.
///
/// Constructed once in `main` and passed to every handler through axum
/// state; there are no ambient globals, so tests can spin up isolated
/// instances.
pub struct AppState {
    config: AppConfig,
    quiz: RwLock<QuizState>,
    sessions: DashMap<Uuid, ClientSession>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            config,
            quiz: RwLock::new(QuizState::new()),
            sessions: DashMap::new(),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registry of live sessions keyed by their connection identifier.
    pub fn sessions(&self) -> &DashMap<Uuid, ClientSession> {
        &self.sessions
    }

    /// Run `f` with read access to the quiz state.
    pub async fn read_quiz<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&QuizState) -> T,
    {
        let guard = self.quiz.read().await;
        f(&guard)
    }

    /// Run `f` with exclusive access to the quiz state.
    ///
    /// This is the single-writer path: every authoritative mutation executes
    /// to completion inside one such closure, which is what guarantees the
    /// race-free, gapless position assignment in the ranking engine.
    /// Broadcast fan-out runs inside the closure too, so snapshot delivery
    /// order matches mutation order.
    pub async fn with_quiz_mut<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut QuizState) -> T,
    {
        let mut guard = self.quiz.write().await;
        f(&mut guard)
    }
}
