use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::{round::BuzzEntry, teams::Team};

/// Public projection of a team exposed to WebSocket clients.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct TeamSummary {
    /// Team identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            color: team.color.clone(),
        }
    }
}

/// One ranked buzz as carried by the `buzzerResult` broadcast.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct BuzzEntrySnapshot {
    /// Team the buzz was accepted for.
    pub tid: Uuid,
    /// Team name captured at buzz time.
    pub name: String,
    /// Team color captured at buzz time.
    pub color: String,
    /// 1-based rank within the round.
    pub position: u32,
}

impl From<&BuzzEntry> for BuzzEntrySnapshot {
    fn from(entry: &BuzzEntry) -> Self {
        Self {
            tid: entry.team_id,
            name: entry.team_name.clone(),
            color: entry.color.clone(),
            position: entry.position,
        }
    }
}
