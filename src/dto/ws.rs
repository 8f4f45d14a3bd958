use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::dto::{
    game::{BuzzEntrySnapshot, TeamSummary},
    validation::{validate_team_color, validate_team_name},
};

/// Role a connection declares for itself when registering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClientRole {
    /// Controls teams and rounds.
    Admin,
    /// Buzzes on behalf of a team.
    Team,
    /// Observes only.
    Guest,
}

/// Failure to turn a raw text frame into a usable [`ClientMessage`].
#[derive(Debug, Error)]
pub enum MessageParseError {
    /// The frame was not valid JSON for any known message shape.
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    /// The frame parsed but carried invalid field values.
    #[error("invalid message: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Messages accepted from quiz WebSocket clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Declare the connection's role and, for teams, its team id.
    #[serde(rename = "register")]
    Register {
        /// Self-declared role for this connection.
        role: ClientRole,
        /// Team identifier, expected when `role` is `team`.
        #[serde(default)]
        tid: Option<Uuid>,
    },
    /// Create a new team (admin control event).
    #[serde(rename = "addTeam")]
    AddTeam {
        /// Display name for the new team.
        name: String,
        /// Optional display color; the server picks one when omitted.
        #[serde(default)]
        color: Option<String>,
    },
    /// Wipe all teams and reset the round (admin control event).
    #[serde(rename = "clearAllTeams")]
    ClearAllTeams,
    /// Open a fresh question round (admin control event).
    #[serde(rename = "startQuestion")]
    StartQuestion,
    /// Close the question round (admin control event).
    #[serde(rename = "resetQuestion")]
    ResetQuestion,
    /// Buzz in for team `tid` during an active round.
    #[serde(rename = "buzzerPress")]
    BuzzerPress {
        /// Team the buzz is submitted for.
        tid: Uuid,
    },
    /// Any message type this server does not understand.
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    /// Parse and validate a raw text frame.
    pub fn from_json_str(raw: &str) -> Result<Self, MessageParseError> {
        let message: Self = serde_json::from_str(raw)?;
        message.validate()?;
        Ok(message)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Self::AddTeam { name, color } = self {
            if let Err(err) = validate_team_name(name) {
                errors.add("name", err);
            }
            if let Some(color) = color
                && let Err(err) = validate_team_color(color)
            {
                errors.add("color", err);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Messages broadcast to quiz WebSocket clients.
///
/// Every payload is a full snapshot, never a delta, so observers reconcile
/// without client-side merge logic.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Full team mapping after any registry change.
    #[serde(rename = "teamListUpdate")]
    TeamListUpdate {
        /// All known teams in creation order.
        teams: Vec<TeamSummary>,
    },
    /// Full buzz ranking after any round change.
    #[serde(rename = "buzzerResult")]
    BuzzerResult {
        /// Accepted buzzes in rank order.
        ranked: Vec<BuzzEntrySnapshot>,
    },
    /// A question round just opened.
    #[serde(rename = "questionStarted")]
    QuestionStarted,
    /// The question round was reset to idle.
    #[serde(rename = "questionReset")]
    QuestionReset,
}
