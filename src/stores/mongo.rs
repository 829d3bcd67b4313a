use super::{Pingable, StoreError};
use crate::configuration::MongoSettings;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[tracing::instrument(name = "Connect to MongoDB", skip(settings), fields(host = %settings.host, database = %settings.database))]
pub async fn init_mongodb(settings: &MongoSettings, app_name: &str) -> Result<Client, StoreError> {
    let mut options = ClientOptions::parse(settings.connection_string()).await?;
    options.app_name = Some(app_name.to_string());
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(CONNECT_TIMEOUT);

    let client = Client::with_options(options)?;

    // the driver connects lazily, so force a round trip before serving
    tokio::time::timeout(CONNECT_TIMEOUT, Pingable::ping(&client))
        .await
        .map_err(|_| StoreError::Timeout("mongodb", CONNECT_TIMEOUT))?
        .map_err(|err| {
            tracing::error!("Failed to ping MongoDB: {:?}", err);
            err
        })?;

    tracing::info!(
        host = %settings.host,
        database = %settings.database,
        "MongoDB connection established"
    );

    Ok(client)
}

#[async_trait::async_trait]
impl Pingable for Client {
    async fn ping(&self) -> Result<(), StoreError> {
        self.database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}
