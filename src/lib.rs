//! Realtime scoreboard server.
//!
//! One shared scoreboard (roster, recent games, season points and custom game
//! names) is owned by a coordinator task. Clients connect over a websocket,
//! receive the full snapshot, and every action any client submits is applied
//! in arrival order and re-broadcast to everyone. The snapshot is optionally
//! mirrored into Redis under a single key.

pub mod config;
pub mod error;
pub mod game;
pub mod persistence;
pub mod redis;
pub mod state;
pub mod websocket;

use config::Config;
use error::StartupError;
use persistence::StateStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Open the configured backing store, if any.
pub async fn open_store(config: &Config) -> Result<Option<Arc<dyn StateStore>>, StartupError> {
    let Some(url) = config.redis_url.as_deref() else {
        if config.require_store {
            return Err(StartupError::StoreRequired);
        }
        info!("no backing store configured, scoreboard lives in memory only");
        return Ok(None);
    };

    let store = crate::redis::RedisStateStore::connect(url, config.redis_token.as_deref())?;
    match store.ping().await {
        Ok(()) => info!("connected to backing store"),
        Err(e) if config.require_store => return Err(e.into()),
        Err(e) => warn!(error = %e, "backing store unreachable, will keep retrying on writes"),
    }

    Ok(Some(Arc::new(store)))
}
