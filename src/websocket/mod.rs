pub mod coordinator;
pub mod handler;
pub mod routes;
pub mod timestamp;
pub mod types;

pub use coordinator::{Command, Coordinator, CoordinatorHandle};
pub use types::GameMessage;
