//! Backing-store handles and their liveness contract.
//!
//! Every store the service depends on is constructed once at startup and
//! shared read-only behind an `Arc`. The health checker only needs to know
//! how to ping each one, which is what [`Pingable`] captures.

mod cache;
mod mongo;
mod mysql;
mod postgres;

pub use cache::RedisClient;
pub use mongo::init_mongodb;
pub use mysql::init_mysql;
pub use postgres::init_postgres;

use crate::configuration::Settings;
use crate::health::Dependency;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
    #[error("{0} did not answer within {1:?}")]
    Timeout(&'static str, std::time::Duration),
    #[error("{0}")]
    Other(String),
}

/// A minimal round trip proving the store is reachable.
#[async_trait::async_trait]
pub trait Pingable: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// The fixed set of stores probed by the health checker.
#[derive(Clone)]
pub struct BackingStores {
    pub mysql: Arc<dyn Pingable>,
    pub postgres: Arc<dyn Pingable>,
    pub mongodb: Arc<dyn Pingable>,
    pub redis: Arc<dyn Pingable>,
}

impl BackingStores {
    pub fn new(
        mysql: Arc<dyn Pingable>,
        postgres: Arc<dyn Pingable>,
        mongodb: Arc<dyn Pingable>,
        redis: Arc<dyn Pingable>,
    ) -> Self {
        Self {
            mysql,
            postgres,
            mongodb,
            redis,
        }
    }

    /// Connects every store, failing on the first one that cannot be reached.
    pub async fn connect(settings: &Settings) -> Result<Self, StoreError> {
        tracing::info!("Initializing database connections");

        let mysql = init_mysql(&settings.databases.mysql, settings.server.debug).await?;
        let postgres = init_postgres(&settings.databases.postgres, settings.server.debug).await?;
        let mongodb = init_mongodb(&settings.databases.mongodb, &settings.app.name).await?;

        tracing::debug!("Initializing Redis client");
        let redis = RedisClient::connect(&settings.redis).await?;

        Ok(Self::new(
            Arc::new(mysql),
            Arc::new(postgres),
            Arc::new(mongodb),
            Arc::new(redis),
        ))
    }

    pub fn get(&self, dependency: Dependency) -> Arc<dyn Pingable> {
        match dependency {
            Dependency::MySql => self.mysql.clone(),
            Dependency::Postgres => self.postgres.clone(),
            Dependency::MongoDb => self.mongodb.clone(),
            Dependency::Redis => self.redis.clone(),
        }
    }
}
