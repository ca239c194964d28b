use async_trait::async_trait;
use redis::AsyncCommands;
use skyfare_core::repository::KeyValueStore;
use skyfare_core::{CoreError, CoreResult};
use tracing::debug;

/// Redis-backed session storage. Every write carries the session TTL.
#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
    ttl_seconds: u64,
}

impl RedisClient {
    pub fn new(connection_string: &str, ttl_seconds: u64) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client, ttl_seconds })
    }

    async fn connection(&self) -> CoreResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(storage_error)
    }
}

fn storage_error(e: redis::RedisError) -> CoreError {
    CoreError::StorageError(e.to_string())
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let mut conn = self.connection().await?;
        conn.get(key).await.map_err(storage_error)
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, value, self.ttl_seconds)
            .await
            .map_err(storage_error)?;
        debug!("Stored {} (ttl {}s)", key, self.ttl_seconds);
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key).await.map_err(storage_error)
    }
}
