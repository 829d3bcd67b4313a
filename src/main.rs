use anyhow::Context;
use gorbit::configuration::get_configuration;
use gorbit::startup::run;
use gorbit::stores::BackingStores;
use gorbit::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = get_configuration().context("Failed to read configuration")?;

    let subscriber = get_subscriber("gorbit".into(), settings.server.debug);
    init_subscriber(subscriber)?;

    let stores = BackingStores::connect(&settings)
        .await
        .context("Failed to initialize backing stores")?;

    let address = settings.address();
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind to {address}"))?;

    tracing::info!(
        address = %address,
        version = %settings.app.version,
        env = %settings.app.env,
        mode = settings.environment_label(),
        "Starting server"
    );

    run(listener, stores, settings).await?.await?;

    Ok(())
}
