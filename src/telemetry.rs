use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Debug mode logs human-readable lines at `debug`; otherwise bunyan JSON at
/// `info`. `RUST_LOG` takes precedence over both.
pub fn get_subscriber(name: String, debug: bool) -> impl Subscriber + Send + Sync {
    let default_filter = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let pretty_layer = debug.then(|| fmt::layer().with_target(true));
    let (storage_layer, formatting_layer) = if debug {
        (None, None)
    } else {
        (
            Some(JsonStorageLayer),
            Some(BunyanFormattingLayer::new(name, std::io::stdout)),
        )
    };

    Registry::default()
        .with(env_filter)
        .with(pretty_layer)
        .with(storage_layer)
        .with(formatting_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync + 'static) -> anyhow::Result<()> {
    // redirect all `log` records (sqlx, mongodb) to the tracing subscriber
    LogTracer::init().map_err(|err| anyhow::anyhow!("failed to set logger: {err}"))?;
    set_global_default(subscriber)
        .map_err(|err| anyhow::anyhow!("failed to set subscriber: {err}"))?;
    Ok(())
}
