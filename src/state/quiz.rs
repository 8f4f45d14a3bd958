use uuid::Uuid;

use crate::state::{
    round::{BuzzEntry, BuzzRejection, RoundPhase, RoundState},
    teams::{Team, TeamRegistry},
};

/// The authoritative quiz state: team registry plus the shared question
/// round.
///
/// Exactly one instance exists per process, behind the write lock in
/// [`crate::state::AppState`]; every mutation runs to completion under that
/// lock, which is what makes position assignment race-free.
#[derive(Debug, Default)]
pub struct QuizState {
    teams: TeamRegistry,
    round: RoundState,
}

impl QuizState {
    /// Create an empty quiz state with an idle round.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the team registry.
    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    /// Read access to the current round.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Create and register a new team.
    pub fn add_team(&mut self, name: String, color: String) -> Team {
        self.teams.add(name, color)
    }

    /// Wipe the registry and force the round back to idle.
    ///
    /// Clearing teams mid-round would invalidate any in-flight ranking, so
    /// the round is reset in the same mutation.
    pub fn clear_all_teams(&mut self) {
        self.teams.clear();
        self.round.reset();
    }

    /// Open a fresh question round, discarding prior entries.
    pub fn start_round(&mut self) {
        self.round.start();
    }

    /// Close the question round, discarding its entries.
    pub fn reset_round(&mut self) {
        self.round.reset();
    }

    /// Submit a buzz for `team_id`, assigning the next position on success.
    ///
    /// Checks run in a fixed order and each rejection is terminal with no
    /// side effects: unknown team, inactive round, duplicate buzz.
    pub fn submit_buzz(&mut self, team_id: Uuid) -> Result<BuzzEntry, BuzzRejection> {
        let team = self
            .teams
            .get(&team_id)
            .ok_or(BuzzRejection::UnknownTeam(team_id))?;
        self.round.accept_buzz(team)
    }

    /// Whether the round is currently accepting buzzes.
    pub fn round_phase(&self) -> RoundPhase {
        self.round.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buzz_for_unknown_team_is_rejected() {
        let mut quiz = QuizState::new();
        quiz.start_round();

        let stranger = Uuid::new_v4();
        let err = quiz.submit_buzz(stranger).unwrap_err();
        assert_eq!(err, BuzzRejection::UnknownTeam(stranger));
        assert!(quiz.round().entries().is_empty());
    }

    #[test]
    fn unknown_team_check_precedes_phase_check() {
        // An unresolved id must report UnknownTeam even while idle.
        let mut quiz = QuizState::new();
        let err = quiz.submit_buzz(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, BuzzRejection::UnknownTeam(_)));
    }

    #[test]
    fn buzz_race_ranks_in_processing_order() {
        let mut quiz = QuizState::new();
        let a = quiz.add_team("A".into(), "red".into());
        let b = quiz.add_team("B".into(), "blue".into());
        quiz.start_round();

        assert_eq!(quiz.submit_buzz(b.id).unwrap().position, 1);
        assert_eq!(quiz.submit_buzz(a.id).unwrap().position, 2);
        // Second buzz from B is ignored and changes nothing.
        assert_eq!(
            quiz.submit_buzz(b.id).unwrap_err(),
            BuzzRejection::DuplicateBuzz(b.id)
        );

        let ranked: Vec<(Uuid, u32)> = quiz
            .round()
            .entries()
            .iter()
            .map(|entry| (entry.team_id, entry.position))
            .collect();
        assert_eq!(ranked, vec![(b.id, 1), (a.id, 2)]);
    }

    #[test]
    fn buzz_after_reset_is_dropped() {
        let mut quiz = QuizState::new();
        let a = quiz.add_team("A".into(), "red".into());

        quiz.start_round();
        quiz.reset_round();

        let err = quiz.submit_buzz(a.id).unwrap_err();
        assert_eq!(err, BuzzRejection::RoundNotActive);
        assert!(quiz.round().entries().is_empty());
    }

    #[test]
    fn clear_all_teams_resets_everything() {
        let mut quiz = QuizState::new();
        let a = quiz.add_team("A".into(), "red".into());
        quiz.start_round();
        quiz.submit_buzz(a.id).unwrap();

        quiz.clear_all_teams();

        assert!(quiz.teams().is_empty());
        assert_eq!(quiz.round_phase(), RoundPhase::Idle);
        assert!(quiz.round().entries().is_empty());
    }

    #[test]
    fn cleared_team_id_becomes_unknown() {
        let mut quiz = QuizState::new();
        let a = quiz.add_team("A".into(), "red".into());
        quiz.clear_all_teams();
        quiz.start_round();

        let err = quiz.submit_buzz(a.id).unwrap_err();
        assert_eq!(err, BuzzRejection::UnknownTeam(a.id));
    }

    #[test]
    fn entries_are_empty_whenever_idle() {
        let mut quiz = QuizState::new();
        let a = quiz.add_team("A".into(), "red".into());

        assert!(quiz.round().entries().is_empty());

        quiz.start_round();
        quiz.submit_buzz(a.id).unwrap();
        quiz.reset_round();
        assert_eq!(quiz.round_phase(), RoundPhase::Idle);
        assert!(quiz.round().entries().is_empty());

        quiz.start_round();
        quiz.submit_buzz(a.id).unwrap();
        quiz.clear_all_teams();
        assert_eq!(quiz.round_phase(), RoundPhase::Idle);
        assert!(quiz.round().entries().is_empty());
    }

    #[test]
    fn ranking_keeps_snapshot_of_team_data_at_buzz_time() {
        let mut quiz = QuizState::new();
        let a = quiz.add_team("A".into(), "red".into());
        quiz.start_round();

        let entry = quiz.submit_buzz(a.id).unwrap();
        assert_eq!(entry.team_name, "A");
        assert_eq!(entry.color, "red");
    }
}
