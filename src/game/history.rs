use serde::{Deserialize, Serialize};

use super::scoring::Placements;

/// Most recent games kept in the history.
pub const HISTORY_CAP: usize = 100;

/// A scored game as stored in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Submission time in epoch milliseconds
    pub id: i64,
    pub name: String,
    pub places: Placements,
    /// ISO-8601 submission time
    pub date: String,
}

/// Recorded games, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameHistory(Vec<GameResult>);

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest(&self) -> Option<&GameResult> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameResult> {
        self.0.iter()
    }

    /// Insert at the front and evict the oldest entries beyond the cap.
    pub fn record_game(&mut self, result: GameResult) {
        self.0.insert(0, result);
        self.enforce_cap();
    }

    pub fn clear_history(&mut self) {
        self.0.clear();
    }

    /// Trim to the cap; loaded snapshots may predate it.
    pub fn enforce_cap(&mut self) {
        self.0.truncate(HISTORY_CAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i64) -> GameResult {
        GameResult {
            id,
            name: format!("Game {}", id),
            places: Placements::new(),
            date: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_newest_first() {
        let mut history = GameHistory::new();
        history.record_game(result(1));
        history.record_game(result(2));

        let ids: Vec<i64> = history.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(history.latest().map(|g| g.id), Some(2));
    }

    #[test]
    fn test_capacity_keeps_most_recent() {
        let mut history = GameHistory::new();
        for id in 1..=250 {
            history.record_game(result(id));
        }

        assert_eq!(history.len(), HISTORY_CAP);
        let ids: Vec<i64> = history.iter().map(|g| g.id).collect();
        let expected: Vec<i64> = (151..=250).rev().collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_clear() {
        let mut history = GameHistory::new();
        history.record_game(result(1));
        history.clear_history();
        assert!(history.is_empty());
    }
}
