use crate::game::{
    CustomGameCatalog, GameHistory, GameResult, Roster, ScoringRules, SeasonLedger,
};
use crate::websocket::timestamp::TimestampManager;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The whole scoreboard: the unit of broadcast and persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedState {
    pub players: Roster,
    pub games: GameHistory,
    pub season: SeasonLedger,
    pub custom_games: CustomGameCatalog,
}

/// A raw game submission from a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameSubmission {
    pub name: String,
    #[serde(default)]
    pub scores: IndexMap<String, f64>,
}

/// A state-mutating request, already parsed and validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetPlayers(Vec<String>),
    AddGame(GameSubmission),
    AddCustomGame(String),
    ResetSeason,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetPlayers(_) => "setPlayers",
            Action::AddGame(_) => "addGame",
            Action::AddCustomGame(_) => "addCustomGame",
            Action::ResetSeason => "resetSeason",
        }
    }
}

/// Label carried by a snapshot frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Init,
    Update,
}

impl SnapshotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKind::Init => "init",
            SnapshotKind::Update => "update",
        }
    }
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore invariants on a snapshot loaded from the backing store.
    pub fn normalize(&mut self) {
        self.season.ensure_tracked(self.players.names());
        self.games.enforce_cap();
    }

    /// Apply one action at time `now` (epoch ms) and report how to label the broadcast.
    pub fn apply(&mut self, action: Action, rules: &ScoringRules, now: i64) -> SnapshotKind {
        match action {
            Action::SetPlayers(names) => {
                self.players.set_players(names);
                self.season.ensure_tracked(self.players.names());
                SnapshotKind::Init
            }
            Action::AddCustomGame(name) => {
                // stored verbatim; only all-blank names are dropped
                if !name.trim().is_empty() {
                    self.custom_games.add_custom_game(&name);
                }
                SnapshotKind::Init
            }
            Action::AddGame(submission) => {
                self.add_game(submission, rules, now);
                SnapshotKind::Update
            }
            Action::ResetSeason => {
                self.season.reset_season(self.players.names());
                self.games.clear_history();
                SnapshotKind::Update
            }
        }
    }

    fn add_game(&mut self, submission: GameSubmission, rules: &ScoringRules, now: i64) {
        let scores: IndexMap<String, f64> = submission
            .scores
            .into_iter()
            .filter_map(|(player, score)| {
                let player = player.trim();
                (!player.is_empty()).then(|| (player.to_string(), score))
            })
            .collect();

        let places = rules.compute_placements(&submission.name, &scores);
        self.season.apply_placements(&places);

        let id = TimestampManager::game_id(now, self.games.latest().map(|g| g.id));
        self.games.record_game(GameResult {
            id,
            name: submission.name,
            places,
            date: TimestampManager::iso_date(now),
        });
    }
}
