//! Widget Listener Binary
//!
//! Subscribes to a Monobank widget and logs every update until the channel
//! closes or Ctrl+C is pressed.
//!
//! Usage:
//!   WIDGET_URL="https://send.monobank.ua/jar/...?..." ./widget_listener
//!   ./widget_listener config/widget.yaml
//!
//! `WIDGET_CONFIG_PATH` takes precedence over the CLI argument.

use anyhow::Result;
use monobank_base_ws::bin_common::{
    init_tracing, load_config_from_env, parse_args, ConfigType, ListenerConfig,
};
use monobank_base_ws::monosockets::Session;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv::dotenv().ok();

    // Load config
    let config_type = match parse_args().into_iter().next() {
        Some(path) => ConfigType::Custom(path),
        None => ConfigType::Widget,
    };
    let config_path = load_config_from_env(config_type);
    let config = ListenerConfig::load(&config_path)?;

    // Initialize logging
    init_tracing(&config.log_level);
    config.log();

    let mut builder = Session::builder()
        .locator(config.widget_url.clone())
        .ping_interval(config.ping_interval())
        .headers(config.headers.clone())
        .on_open(|| info!("Listening for widget updates"))
        .on_message(|msg| match msg.as_text() {
            Some(text) => info!("Widget update: {}", text),
            None => info!("Widget update: {} bytes", msg.as_bytes().len()),
        })
        .on_error(|err| error!("Widget channel error: {}", err))
        .on_close(|code, reason| info!("Widget channel closed ({:?}): {}", code, reason));

    if let Some(endpoint) = &config.endpoint {
        builder = builder.endpoint(endpoint.clone());
    }

    let session = Arc::new(builder.build()?);

    let mut run = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.start().await })
    };

    let outcome = tokio::select! {
        joined = &mut run => joined?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal (Ctrl+C)");
            if let Err(e) = session.close().await {
                warn!("Close failed: {}", e);
            }
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut run).await {
                Ok(joined) => joined?,
                Err(_) => {
                    warn!("Channel did not close within {:?}", SHUTDOWN_TIMEOUT);
                    run.abort();
                    Ok(())
                }
            }
        }
    };

    session.stop_ping().await;

    let metrics = session.metrics();
    info!(
        "Session finished: sent={} received={} pings={} pongs={}",
        metrics.messages_sent, metrics.messages_received, metrics.pings_sent, metrics.pongs_received
    );

    outcome?;
    Ok(())
}
