use super::scoreboard_state::repository::ScoreboardStateRepository;
use crate::error::StoreError;
use crate::persistence::StateStore;
use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};

/// Backing store on a Redis server, one string key for the whole scoreboard.
pub struct RedisStateStore {
    pool: Pool,
}

impl RedisStateStore {
    /// Build a pool for `url`, using `token` as the password when the URL has none.
    pub fn connect(url: &str, token: Option<&str>) -> Result<Self, StoreError> {
        let url = connection_url(url, token)?;
        let pool = Config::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        ScoreboardStateRepository::ping(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(ScoreboardStateRepository::get(&mut conn, key).await?)
    }

    async fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(ScoreboardStateRepository::set(&mut conn, key, blob).await?)
    }
}

/// Merge an access token into a `redis://` or `rediss://` URL.
fn connection_url(url: &str, token: Option<&str>) -> Result<String, StoreError> {
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| StoreError::Config(format!("missing scheme in store url: {}", url)))?;
    if scheme != "redis" && scheme != "rediss" {
        return Err(StoreError::Config(format!(
            "unsupported store scheme: {}",
            scheme
        )));
    }

    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(url.to_string()),
    };

    let authority = rest.split('/').next().unwrap_or_default();
    if authority.contains('@') {
        return Ok(url.to_string());
    }

    Ok(format!("{}://:{}@{}", scheme, encode_userinfo(token), rest))
}

fn encode_userinfo(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}
