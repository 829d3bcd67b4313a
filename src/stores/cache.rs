use super::{Pingable, StoreError};
use crate::configuration::RedisSettings;
use redis::aio::ConnectionManager;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Cache store handle. The connection manager reconnects on its own and is
/// cheap to clone, so every caller gets its own clone.
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    #[tracing::instrument(name = "Connect to Redis", skip(settings), fields(host = %settings.host, db = settings.db))]
    pub async fn connect(settings: &RedisSettings) -> Result<Self, StoreError> {
        let client = redis::Client::open(settings.connection_string())?;

        let manager = tokio::time::timeout(CONNECT_TIMEOUT, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout("redis", CONNECT_TIMEOUT))??;

        let redis_client = Self { manager };
        tokio::time::timeout(CONNECT_TIMEOUT, Pingable::ping(&redis_client))
            .await
            .map_err(|_| StoreError::Timeout("redis", CONNECT_TIMEOUT))?
            .map_err(|err| {
                tracing::error!("Failed to connect to Redis: {:?}", err);
                err
            })?;

        tracing::info!(host = %settings.host, db = settings.db, "Redis connection established");

        Ok(redis_client)
    }

    pub fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

#[async_trait::async_trait]
impl Pingable for RedisClient {
    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection();
        let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
