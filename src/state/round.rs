use thiserror::Error;
use uuid::Uuid;

use crate::state::teams::Team;

/// Phase of the single shared question round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundPhase {
    /// No question is open; buzzes are ignored.
    #[default]
    Idle,
    /// A question is open and teams may buzz in.
    Active,
}

/// One accepted buzz within a round.
///
/// Name and color are copies of the team record at buzz time, so later
/// registry changes do not rewrite the ranking history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuzzEntry {
    /// Identifier of the team that buzzed.
    pub team_id: Uuid,
    /// Team name captured when the buzz was accepted.
    pub team_name: String,
    /// Team color captured when the buzz was accepted.
    pub color: String,
    /// 1-based rank of this buzz within the round.
    pub position: u32,
}

/// Reasons a buzz is dropped without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuzzRejection {
    /// The team id does not resolve in the registry.
    #[error("unknown team `{0}`")]
    UnknownTeam(Uuid),
    /// No question round is currently open.
    #[error("round is not active")]
    RoundNotActive,
    /// The team already holds a position in the current round.
    #[error("team `{0}` already buzzed this round")]
    DuplicateBuzz(Uuid),
}

/// State machine for the single process-wide question round, owning the
/// ordered buzz-in list.
///
/// Acceptance order under the serialized mutation path is the ranking key;
/// there is no wall-clock comparison anywhere, so network jitter and clock
/// skew cannot reorder positions.
#[derive(Debug, Default)]
pub struct RoundState {
    phase: RoundPhase,
    entries: Vec<BuzzEntry>,
}

impl RoundState {
    /// Create a round state machine in the idle phase with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Accepted buzzes for the current round, in rank order.
    pub fn entries(&self) -> &[BuzzEntry] {
        &self.entries
    }

    /// Begin a fresh round, discarding any prior entries.
    pub fn start(&mut self) {
        self.phase = RoundPhase::Active;
        self.entries.clear();
    }

    /// End the current round and discard its entries.
    pub fn reset(&mut self) {
        self.phase = RoundPhase::Idle;
        self.entries.clear();
    }

    /// Record a buzz for `team`, assigning the next free position.
    ///
    /// Rejections are terminal and leave the round untouched. Callers resolve
    /// the team against the registry first, so only phase and duplicate
    /// checks happen here.
    pub fn accept_buzz(&mut self, team: &Team) -> Result<BuzzEntry, BuzzRejection> {
        if self.phase != RoundPhase::Active {
            return Err(BuzzRejection::RoundNotActive);
        }
        if self.entries.iter().any(|entry| entry.team_id == team.id) {
            return Err(BuzzRejection::DuplicateBuzz(team.id));
        }

        let entry = BuzzEntry {
            team_id: team.id,
            team_name: team.name.clone(),
            color: team.color.clone(),
            position: self.entries.len() as u32 + 1,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, color: &str) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
        }
    }

    #[test]
    fn initial_state_is_idle_and_empty() {
        let round = RoundState::new();
        assert_eq!(round.phase(), RoundPhase::Idle);
        assert!(round.entries().is_empty());
    }

    #[test]
    fn buzz_while_idle_is_rejected() {
        let mut round = RoundState::new();
        let err = round.accept_buzz(&team("A", "red")).unwrap_err();
        assert_eq!(err, BuzzRejection::RoundNotActive);
        assert!(round.entries().is_empty());
    }

    #[test]
    fn positions_are_gapless_and_start_at_one() {
        let mut round = RoundState::new();
        round.start();

        for (index, name) in ["A", "B", "C"].iter().enumerate() {
            let entry = round.accept_buzz(&team(name, "red")).unwrap();
            assert_eq!(entry.position, index as u32 + 1);
        }

        let positions: Vec<u32> = round.entries().iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_buzz_is_rejected_without_side_effects() {
        let mut round = RoundState::new();
        round.start();

        let racer = team("A", "red");
        round.accept_buzz(&racer).unwrap();
        let err = round.accept_buzz(&racer).unwrap_err();

        assert_eq!(err, BuzzRejection::DuplicateBuzz(racer.id));
        assert_eq!(round.entries().len(), 1);
    }

    #[test]
    fn start_discards_previous_entries() {
        let mut round = RoundState::new();
        round.start();
        round.accept_buzz(&team("A", "red")).unwrap();

        round.start();
        assert_eq!(round.phase(), RoundPhase::Active);
        assert!(round.entries().is_empty());
    }

    #[test]
    fn reset_returns_to_idle_with_no_entries() {
        let mut round = RoundState::new();
        round.start();
        round.accept_buzz(&team("A", "red")).unwrap();

        round.reset();
        assert_eq!(round.phase(), RoundPhase::Idle);
        assert!(round.entries().is_empty());
    }

    #[test]
    fn entry_snapshots_team_name_and_color() {
        let mut round = RoundState::new();
        round.start();

        let mut racer = team("Original", "red");
        round.accept_buzz(&racer).unwrap();

        // Mutating the caller's copy must not rewrite the recorded entry.
        racer.name = "Renamed".into();
        assert_eq!(round.entries()[0].team_name, "Original");
        assert_eq!(round.entries()[0].color, "red");
    }
}
