use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;

/// Default marker for games where the lowest score wins.
pub const DEFAULT_LOWER_IS_BETTER: &str = "Mini-Golf";

/// A single player's outcome in one recorded game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Raw score as submitted; whole numbers serialize without a fraction
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
    /// 1-based rank within the game
    pub place: u32,
    /// Season points awarded for the rank
    pub points: i64,
}

/// Placements keyed by player, in rank order.
pub type Placements = IndexMap<String, Placement>;

/// Which way a game is ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
    /// Highest score takes first place
    HigherIsBetter,
    /// Lowest score takes first place
    LowerIsBetter,
}

/// Ranking rules shared by every game submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRules {
    lower_is_better: Vec<String>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::new(vec![DEFAULT_LOWER_IS_BETTER.to_string()])
    }
}

impl ScoringRules {
    /// Build rules from marker substrings; blank markers are ignored.
    pub fn new(markers: Vec<String>) -> Self {
        let lower_is_better = markers
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        Self { lower_is_better }
    }

    pub fn direction(&self, game_name: &str) -> RankDirection {
        if self
            .lower_is_better
            .iter()
            .any(|marker| game_name.contains(marker.as_str()))
        {
            RankDirection::LowerIsBetter
        } else {
            RankDirection::HigherIsBetter
        }
    }

    /// Rank the entrants of one game and award points by place.
    ///
    /// Entrants with equal scores keep the order in which they appear in
    /// `scores`, so every entrant gets a distinct place.
    pub fn compute_placements(&self, game_name: &str, scores: &IndexMap<String, f64>) -> Placements {
        let direction = self.direction(game_name);

        let mut ranked: Vec<(&String, f64)> = scores.iter().map(|(p, s)| (p, *s)).collect();
        // sort_by is stable
        ranked.sort_by(|(_, a), (_, b)| {
            let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
            match direction {
                RankDirection::LowerIsBetter => ord,
                RankDirection::HigherIsBetter => ord.reverse(),
            }
        });

        ranked
            .into_iter()
            .enumerate()
            .map(|(i, (player, score))| {
                let place = i as u32 + 1;
                (
                    player.clone(),
                    Placement {
                        score,
                        place,
                        points: points_for_place(place),
                    },
                )
            })
            .collect()
    }
}

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if score.fract() == 0.0 && score.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*score as i64)
    } else {
        serializer.serialize_f64(*score)
    }
}

/// Fixed points table: 5, 4, 3, then 2 for everyone else.
pub fn points_for_place(place: u32) -> i64 {
    match place {
        1 => 5,
        2 => 4,
        3 => 3,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
        entries.iter().map(|(p, s)| (p.to_string(), *s)).collect()
    }

    #[test]
    fn test_highest_score_wins_by_default() {
        let rules = ScoringRules::default();
        let placements = rules.compute_placements(
            "Bowling",
            &scores(&[("Alice", 120.0), ("Bob", 150.0), ("Carol", 90.0)]),
        );

        assert_eq!(placements["Bob"].place, 1);
        assert_eq!(placements["Bob"].points, 5);
        assert_eq!(placements["Alice"].place, 2);
        assert_eq!(placements["Alice"].points, 4);
        assert_eq!(placements["Carol"].place, 3);
        assert_eq!(placements["Carol"].points, 3);
        assert_eq!(placements["Carol"].score, 90.0);
    }

    #[test]
    fn test_mini_golf_lowest_wins() {
        let rules = ScoringRules::default();
        let placements = rules.compute_placements(
            "Mini-Golf Classic",
            &scores(&[("Alice", 72.0), ("Bob", 68.0), ("Carol", 75.0)]),
        );

        assert_eq!(placements["Bob"].place, 1);
        assert_eq!(placements["Bob"].points, 5);
        assert_eq!(placements["Alice"].place, 2);
        assert_eq!(placements["Carol"].place, 3);
    }

    #[test]
    fn test_placements_are_in_rank_order() {
        let rules = ScoringRules::default();
        let placements =
            rules.compute_placements("Darts", &scores(&[("A", 1.0), ("B", 3.0), ("C", 2.0)]));

        let order: Vec<&str> = placements.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let rules = ScoringRules::default();
        let placements = rules.compute_placements(
            "Mini-Golf",
            &scores(&[("Zed", 40.0), ("Amy", 40.0), ("Max", 40.0)]),
        );

        assert_eq!(placements["Zed"].place, 1);
        assert_eq!(placements["Amy"].place, 2);
        assert_eq!(placements["Max"].place, 3);
    }

    #[test]
    fn test_places_are_contiguous_for_many_entrants() {
        let rules = ScoringRules::default();
        let entrants: IndexMap<String, f64> =
            (0..12).map(|i| (format!("p{}", i), (i % 4) as f64)).collect();
        let placements = rules.compute_placements("Bowling", &entrants);

        let mut places: Vec<u32> = placements.values().map(|p| p.place).collect();
        places.sort_unstable();
        assert_eq!(places, (1..=12).collect::<Vec<u32>>());

        for placement in placements.values() {
            assert_eq!(placement.points, points_for_place(placement.place));
        }
    }

    #[test]
    fn test_points_table() {
        assert_eq!(points_for_place(1), 5);
        assert_eq!(points_for_place(2), 4);
        assert_eq!(points_for_place(3), 3);
        assert_eq!(points_for_place(4), 2);
        assert_eq!(points_for_place(17), 2);
    }

    #[test]
    fn test_empty_scores_produce_no_placements() {
        let rules = ScoringRules::default();
        assert!(rules.compute_placements("Bowling", &IndexMap::new()).is_empty());
    }

    #[test]
    fn test_custom_markers() {
        let rules = ScoringRules::new(vec!["Golf".to_string(), "  ".to_string()]);
        assert_eq!(rules.direction("Disc Golf"), RankDirection::LowerIsBetter);
        assert_eq!(rules.direction("Bowling"), RankDirection::HigherIsBetter);
        // a blank marker would otherwise match everything
        assert_eq!(rules.direction(""), RankDirection::HigherIsBetter);
    }

    #[test]
    fn test_whole_scores_serialize_as_integers() {
        let rules = ScoringRules::default();
        let placements =
            rules.compute_placements("Bowling", &scores(&[("Alice", 120.0), ("Bob", 72.5)]));

        let json = serde_json::to_string(&placements).unwrap();
        assert_eq!(
            json,
            r#"{"Alice":{"score":120,"place":1,"points":5},"Bob":{"score":72.5,"place":2,"points":4}}"#
        );

        let back: Placements = serde_json::from_str(&json).unwrap();
        assert_eq!(back, placements);
    }

    #[test]
    fn test_single_entrant_wins() {
        let rules = ScoringRules::default();
        let placements = rules.compute_placements("Bowling", &scores(&[("Solo", -3.5)]));
        assert_eq!(placements["Solo"].place, 1);
        assert_eq!(placements["Solo"].points, 5);
    }
}
