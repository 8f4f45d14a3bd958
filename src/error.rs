use thiserror::Error;
use uuid::Uuid;

use crate::{dto::ws::ClientRole, state::round::BuzzRejection};

/// Reasons an inbound client event is dropped.
///
/// The event channel never replies with errors: a rejected event only
/// produces a diagnostic log on the server, so a false "nothing happened" is
/// all a misbehaving client observes.
#[derive(Debug, Error)]
pub enum EventError {
    /// A control event arrived from a connection that is not an admin.
    #[error("event requires the admin role (connection role is {role:?})")]
    Unauthorized {
        /// Role the connection registered with.
        role: ClientRole,
    },
    /// A buzz carried a team id other than the one the connection registered.
    #[error("buzz ignored: mismatched team id (expected {expected}, got {got})")]
    MismatchedTeam {
        /// Team id bound to the connection.
        expected: Uuid,
        /// Team id carried by the buzz payload.
        got: Uuid,
    },
    /// The ranking engine rejected the buzz.
    #[error(transparent)]
    Buzz(#[from] BuzzRejection),
    /// The connection's writer channel is gone; the socket is being torn down.
    #[error("connection closed")]
    ConnectionClosed,
}
