use crate::error::{StartupError, StoreError};
use crate::state::SharedState;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Opaque blob storage for the whole scoreboard.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, blob: &str) -> Result<(), StoreError>;
}

/// Process-local store; snapshots live only as long as the process.
#[derive(Default)]
pub struct MemoryStateStore {
    blobs: DashMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: &str, blob: &str) -> Self {
        let store = Self::new();
        store.blobs.insert(key.to_string(), blob.to_string());
        store
    }

    pub fn blob(&self, key: &str) -> Option<String> {
        self.blobs.get(key).map(|b| b.value().clone())
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blob(key))
    }

    async fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Load the snapshot stored under `key`.
///
/// With `strict` unset, an unreachable store or an undecodable blob falls back to
/// an empty scoreboard with a warning.
pub async fn load_state(
    store: &dyn StateStore,
    key: &str,
    strict: bool,
) -> Result<SharedState, StartupError> {
    let blob = match store.get(key).await {
        Ok(blob) => blob,
        Err(e) if !strict => {
            warn!(error = %e, "could not load saved scoreboard, starting empty");
            return Ok(SharedState::new());
        }
        Err(e) => return Err(e.into()),
    };

    let Some(blob) = blob else {
        info!(key, "no saved scoreboard, starting empty");
        return Ok(SharedState::new());
    };

    match serde_json::from_str::<SharedState>(&blob) {
        Ok(mut state) => {
            state.normalize();
            info!(
                players = state.players.len(),
                games = state.games.len(),
                "loaded saved scoreboard"
            );
            Ok(state)
        }
        Err(e) if !strict => {
            warn!(error = %e, "saved scoreboard is unreadable, starting empty");
            Ok(SharedState::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle used by the coordinator to hand snapshots to the writer task.
#[derive(Clone)]
pub struct PersistenceHandle {
    tx: Arc<watch::Sender<Option<Arc<str>>>>,
}

impl PersistenceHandle {
    /// Queue a snapshot; an unwritten older one is replaced.
    pub fn publish(&self, blob: Arc<str>) {
        self.tx.send_replace(Some(blob));
    }
}

/// Spawn the background writer. Only the newest snapshot is ever written.
pub fn spawn_writer(
    store: Arc<dyn StateStore>,
    key: String,
) -> (PersistenceHandle, JoinHandle<()>) {
    let (tx, mut rx) = watch::channel::<Option<Arc<str>>>(None);

    let task = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let blob = rx.borrow_and_update().clone();
            let Some(blob) = blob else { continue };

            match store.set(&key, &blob).await {
                Ok(()) => debug!(key = %key, bytes = blob.len(), "scoreboard persisted"),
                Err(e) => warn!(key = %key, error = %e, "failed to persist scoreboard"),
            }
        }
        debug!("persistence writer stopped");
    });

    (PersistenceHandle { tx: Arc::new(tx) }, task)
}

/// Store that rejects every call.
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
#[async_trait]
impl StateStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Config("unreachable".to_string()))
    }

    async fn set(&self, _key: &str, _blob: &str) -> Result<(), StoreError> {
        Err(StoreError::Config("unreachable".to_string()))
    }
}
