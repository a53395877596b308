use deadpool_redis::Connection;

pub struct ScoreboardStateRepository;

impl ScoreboardStateRepository {
    /// Fetch the serialized scoreboard stored under `key`
    pub async fn get(conn: &mut Connection, key: &str) -> Result<Option<String>, redis::RedisError> {
        redis::cmd("GET").arg(key).query_async(&mut *conn).await
    }

    /// Overwrite the serialized scoreboard stored under `key`
    pub async fn set(conn: &mut Connection, key: &str, blob: &str) -> Result<(), redis::RedisError> {
        redis::cmd("SET")
            .arg(key)
            .arg(blob)
            .query_async::<_, ()>(&mut *conn)
            .await
    }

    /// Check that the server answers before we rely on it
    pub async fn ping(conn: &mut Connection) -> Result<(), redis::RedisError> {
        redis::cmd("PING").query_async::<_, String>(&mut *conn).await?;
        Ok(())
    }
}
