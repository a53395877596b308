use thiserror::Error;

/// Failures talking to the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to build redis pool: {0}")]
    PoolCreate(#[from] deadpool_redis::CreatePoolError),
    #[error("failed to get redis connection: {0}")]
    Pool(#[from] deadpool_redis::PoolError),
    #[error("redis command failed: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("invalid store configuration: {0}")]
    Config(String),
}

/// A client frame that could not be turned into an action.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame is not a valid message envelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),
    #[error("unknown event type: {0}")]
    UnknownEvent(String),
    #[error("invalid payload for {event}: {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that stop the process before it starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored snapshot could not be decoded: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("backing store is required but no endpoint is configured")]
    StoreRequired,
}
