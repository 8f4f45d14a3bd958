use indexmap::IndexMap;
use uuid::Uuid;

/// A registered team as tracked by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Stable identifier allocated when the team is created.
    pub id: Uuid,
    /// Display name chosen by the admin (not required to be unique).
    pub name: String,
    /// Display color (hex string or CSS color name).
    pub color: String,
}

/// Registry owning every known team, kept in creation order.
///
/// This is the single source of truth for "is this a known team"; no other
/// component mutates team records.
#[derive(Debug, Default)]
pub struct TeamRegistry {
    teams: IndexMap<Uuid, Team>,
}

impl TeamRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a team with a fresh unique identifier and insert it.
    ///
    /// Returns a copy of the stored record so callers can broadcast it.
    pub fn add(&mut self, name: String, color: String) -> Team {
        let team = Team {
            id: Uuid::new_v4(),
            name,
            color,
        };
        self.teams.insert(team.id, team.clone());
        team
    }

    /// Remove every team from the registry.
    pub fn clear(&mut self) {
        self.teams.clear();
    }

    /// Look up a team by identifier. Absence is not an error.
    pub fn get(&self, id: &Uuid) -> Option<&Team> {
        self.teams.get(id)
    }

    /// Iterate over the teams in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Number of registered teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether the registry holds no teams.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Colors currently in use, in creation order.
    pub fn used_colors(&self) -> Vec<String> {
        self.teams.values().map(|team| team.color.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_add_allocates_a_unique_id() {
        let mut registry = TeamRegistry::new();
        let a = registry.add("Alpha".into(), "#e6194b".into());
        let b = registry.add("Alpha".into(), "#3cb44b".into());

        assert_ne!(a.id, b.id);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&a.id), Some(&a));
        assert_eq!(registry.get(&b.id), Some(&b));
    }

    #[test]
    fn iteration_preserves_creation_order() {
        let mut registry = TeamRegistry::new();
        let first = registry.add("First".into(), "red".into());
        let second = registry.add("Second".into(), "blue".into());
        let third = registry.add("Third".into(), "green".into());

        let ids: Vec<Uuid> = registry.iter().map(|team| team.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn clear_empties_the_registry() {
        let mut registry = TeamRegistry::new();
        let team = registry.add("Gone".into(), "red".into());
        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.get(&team.id), None);
    }

    #[test]
    fn used_colors_reflects_current_teams() {
        let mut registry = TeamRegistry::new();
        registry.add("A".into(), "#e6194b".into());
        registry.add("B".into(), "#3cb44b".into());

        assert_eq!(registry.used_colors(), vec!["#e6194b", "#3cb44b"]);
    }
}
