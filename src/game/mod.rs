pub mod catalog;
pub mod history;
pub mod roster;
pub mod scoring;
pub mod season;

pub use catalog::CustomGameCatalog;
pub use history::{GameHistory, GameResult, HISTORY_CAP};
pub use roster::Roster;
pub use scoring::{Placement, Placements, ScoringRules};
pub use season::SeasonLedger;
