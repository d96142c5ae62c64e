use anyhow::{Error, Result};
use fcm_notifier::{FcmNotifier, config::Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let notifier: FcmNotifier = FcmNotifier::from_config(&config)?;

    info!(
        service_url = %notifier.service_url(),
        timeout_seconds = config.fcm_request_timeout_seconds,
        "Configuration validated. Notifier is ready to send."
    );

    Ok(())
}
