use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::api::PriceSource;
use crate::dom::{Document, locate_widget};
use crate::error::TickerError;
use crate::state::widget::WidgetConfig;
use crate::theme::apply_theme;
use crate::ticker::poller::{PollHandle, spawn_poller};
use crate::ticker::{CyclePolicy, Ticker};

/// Polling cadence of the hosted widget.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub poll_interval: Duration,
    pub cycle_policy: CyclePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            cycle_policy: CyclePolicy::default(),
        }
    }
}

/// A started widget. Polling, if enabled, runs until `stop`.
pub struct TickerHandle {
    ticker: Arc<Ticker>,
    poller: Option<PollHandle>,
}

impl TickerHandle {
    pub fn ticker(&self) -> &Arc<Ticker> {
        &self.ticker
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    pub async fn stop(self) {
        if let Some(poller) = self.poller {
            poller.stop().await;
        }
    }
}

/// Locates the widget, reads its attributes, applies the theme, starts
/// polling when `data-ticker="true"` and runs the first cycle.
pub async fn bootstrap(
    document: &Document,
    source: Arc<dyn PriceSource>,
    settings: &Settings,
) -> Result<TickerHandle, TickerError> {
    let host = locate_widget(document).ok_or(TickerError::HostElementMissing)?;
    let config = WidgetConfig::from_host(host.as_ref())?;

    info!(
        pair = %config.pair(),
        theme = ?config.theme,
        polling = config.enable_polling,
        "ticker started"
    );

    apply_theme(host.as_ref(), config.theme);

    let enable_polling = config.enable_polling;
    let ticker = Arc::new(Ticker::new(config, host, source, settings.cycle_policy));

    let poller = enable_polling.then(|| spawn_poller(ticker.clone(), settings.poll_interval));
    ticker.run_cycle().await;

    Ok(TickerHandle { ticker, poller })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryElement, WIDGET_CLASS};
    use crate::state::render_state::RenderState;
    use crate::ticker::test_support::{ScriptedSource, entry};

    fn document(attrs: &[(&str, &str)]) -> (Document, Arc<MemoryElement>) {
        let element = attrs
            .iter()
            .fold(MemoryElement::new("div", WIDGET_CLASS), |el, (k, v)| {
                el.with_attribute(k, v)
            });
        let element = Arc::new(element);
        let document = Document::new();
        document.insert(element.clone());
        (document, element)
    }

    #[tokio::test]
    async fn missing_host_is_fatal() {
        let source = Arc::new(ScriptedSource::default());
        let result = bootstrap(&Document::new(), source.clone(), &Settings::default()).await;

        assert!(matches!(result, Err(TickerError::HostElementMissing)));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn renders_once_without_polling() {
        let (document, host) = document(&[
            ("data-coin", "BTC"),
            ("data-base", "USD"),
            ("data-theme", "dark"),
        ]);
        let source = Arc::new(ScriptedSource::default());
        source.push().send(Ok(vec![entry("BTCUSD", "42000", 0.5)])).unwrap();

        let handle = bootstrap(&document, source.clone(), &Settings::default()).await.unwrap();

        assert!(!handle.is_polling());
        assert_eq!(source.calls(), 1);
        assert_eq!(host.style("background-color").as_deref(), Some("#333"));
        assert!(host.inner_html().contains("$42,000.00"));
        assert!(matches!(handle.ticker().render_state(), RenderState::Rendered(_)));
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn polls_when_enabled_until_stopped() {
        let (document, _host) = document(&[
            ("data-coin", "BTC"),
            ("data-base", "USD"),
            ("data-ticker", "true"),
        ]);
        let source = Arc::new(ScriptedSource::default());

        let handle = bootstrap(&document, source.clone(), &Settings::default()).await.unwrap();
        assert!(handle.is_polling());
        assert_eq!(source.calls(), 1);

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(source.calls(), 3);

        handle.stop().await;
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(source.calls(), 3);
    }
}
