use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::scoring::Placements;

/// Cumulative season points per player name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonLedger(IndexMap<String, i64>);

impl SeasonLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points for a player; untracked players have none.
    pub fn get(&self, player: &str) -> Option<i64> {
        self.0.get(player).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(p, pts)| (p.as_str(), *pts))
    }

    /// Add point deltas, starting missing players at zero.
    pub fn apply_points<'a, I>(&mut self, deltas: I)
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        for (player, delta) in deltas {
            *self.0.entry(player.to_string()).or_insert(0) += delta;
        }
    }

    /// Credit every entrant of a scored game.
    pub fn apply_placements(&mut self, placements: &Placements) {
        self.apply_points(placements.iter().map(|(p, pl)| (p.as_str(), pl.points)));
    }

    /// Make sure every roster member has an entry without touching existing totals.
    pub fn ensure_tracked<S: AsRef<str>>(&mut self, roster: &[S]) {
        for player in roster {
            self.0.entry(player.as_ref().to_string()).or_insert(0);
        }
    }

    /// Zero every tracked entry, then track the roster.
    ///
    /// Players no longer on the roster are zeroed too rather than dropped.
    pub fn reset_season<S: AsRef<str>>(&mut self, roster: &[S]) {
        for points in self.0.values_mut() {
            *points = 0;
        }
        self.ensure_tracked(roster);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_points_initializes_missing() {
        let mut ledger = SeasonLedger::new();
        ledger.apply_points([("Alice", 4), ("Bob", 5)]);
        ledger.apply_points([("Alice", 2)]);

        assert_eq!(ledger.get("Alice"), Some(6));
        assert_eq!(ledger.get("Bob"), Some(5));
        assert_eq!(ledger.get("Carol"), None);
    }

    #[test]
    fn test_ensure_tracked_is_idempotent() {
        let mut ledger = SeasonLedger::new();
        ledger.apply_points([("Alice", 7)]);

        let roster = ["Alice", "Bob"];
        ledger.ensure_tracked(&roster);
        let once = ledger.clone();
        ledger.ensure_tracked(&roster);

        assert_eq!(ledger, once);
        assert_eq!(ledger.get("Alice"), Some(7));
        assert_eq!(ledger.get("Bob"), Some(0));
    }

    #[test]
    fn test_reset_zeroes_roster_and_stragglers() {
        let mut ledger = SeasonLedger::new();
        ledger.apply_points([("Alice", 9), ("Gone", 3)]);

        ledger.reset_season(&["Alice", "Bob"]);

        let entries: Vec<(&str, i64)> = ledger.iter().collect();
        assert_eq!(entries, vec![("Alice", 0), ("Gone", 0), ("Bob", 0)]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut ledger = SeasonLedger::new();
        ledger.apply_points([("Bob", 5), ("Alice", 4)]);

        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"Bob":5,"Alice":4}"#);
    }
}
