mod api;
mod bootstrap;
mod config;
mod dom;
mod error;
mod format;
mod metrics;
mod render;
mod state;
mod theme;
mod ticker;

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use api::gemini::GeminiClient;
use bootstrap::{Settings, bootstrap};
use config::Config;
use dom::{Document, MemoryElement, WIDGET_CLASS};
use error::TickerError;

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .init();
}

/// The hosting page: a single widget element carrying the configured
/// data attributes.
fn build_document(config: &Config) -> Document {
    let document = Document::new();
    if config.host_attributes.is_empty() {
        return document;
    }

    let mut element = MemoryElement::new("div", WIDGET_CLASS);
    for (name, value) in &config.host_attributes {
        element = element.with_attribute(name, value);
    }
    if let Some(path) = &config.output_path {
        element = element.with_mirror(path.clone());
    }
    document.insert(Arc::new(element));
    document
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    if let Some(addr) = config.metrics_addr {
        metrics::init_metrics_server(addr)?;
        info!(%addr, "metrics exporter listening");
    }

    info!("dom content loaded");

    let source = Arc::new(GeminiClient::new(
        &config.price_feed_url,
        &config.volume_url,
        config.http_timeout,
    )?);
    let settings = Settings {
        poll_interval: config.poll_interval,
        cycle_policy: config.cycle_policy,
    };

    let document = build_document(&config);
    let handle = match bootstrap(&document, source, &settings).await {
        Ok(handle) => handle,
        Err(err @ TickerError::HostElementMissing) => {
            error!("{err}; set TICKER_COIN and TICKER_BASE to host one");
            return Ok(());
        }
        Err(err) => {
            error!(error = %err, "ticker could not start");
            return Ok(());
        }
    };

    if !handle.is_polling() {
        info!(state = handle.ticker().render_state().label(), "polling disabled, rendered once");
        return Ok(());
    }

    tokio::signal::ctrl_c().await?;
    info!(
        state = handle.ticker().render_state().label(),
        "received Ctrl-C, shutting down"
    );
    handle.stop().await;

    Ok(())
}
