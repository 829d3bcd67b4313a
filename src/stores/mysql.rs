use super::{Pingable, StoreError};
use crate::configuration::SqlSettings;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::ConnectOptions;
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[tracing::instrument(name = "Connect to MySQL", skip(settings), fields(host = %settings.host, database = %settings.database))]
pub async fn init_mysql(settings: &SqlSettings, log_statements: bool) -> Result<MySqlPool, StoreError> {
    let mut connect_options = MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.username)
        .password(&settings.password)
        .database(&settings.database)
        .charset("utf8mb4");

    if !log_statements {
        connect_options = connect_options.disable_statement_logging();
    }

    let pool = MySqlPoolOptions::new()
        .max_connections(settings.max_open_conns)
        .min_connections(settings.max_idle_conns.min(settings.max_open_conns))
        .max_lifetime(Duration::from_secs(settings.conn_max_lifetime * 60))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(connect_options)
        .await
        .map_err(|err| {
            tracing::error!("MySQL connection failed: {:?}", err);
            err
        })?;

    tokio::time::timeout(ACQUIRE_TIMEOUT, Pingable::ping(&pool))
        .await
        .map_err(|_| StoreError::Timeout("mysql", ACQUIRE_TIMEOUT))??;

    tracing::info!(
        host = %settings.host,
        database = %settings.database,
        "MySQL connection established"
    );

    Ok(pool)
}

#[async_trait::async_trait]
impl Pingable for MySqlPool {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self).await?;
        Ok(())
    }
}
