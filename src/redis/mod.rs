pub mod scoreboard_state;
pub mod store;

pub use store::RedisStateStore;
