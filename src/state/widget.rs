use crate::dom::HostElement;
use crate::error::TickerError;
use crate::theme::Theme;

/// Widget settings, read once from the host element's data attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub coin: String,
    pub base_currency: String,
    pub show_percent_change_24h: bool,
    pub theme: Theme,
    pub enable_polling: bool,
}

impl WidgetConfig {
    pub fn from_host(host: &dyn HostElement) -> Result<Self, TickerError> {
        let coin = host
            .attribute("data-coin")
            .ok_or(TickerError::MissingAttribute("data-coin"))?;
        let base_currency = host
            .attribute("data-base")
            .ok_or(TickerError::MissingAttribute("data-base"))?;

        Ok(Self {
            coin,
            base_currency,
            show_percent_change_24h: is_true(host, "data-percentChange24h"),
            theme: Theme::from_attribute(host.attribute("data-theme").as_deref()),
            enable_polling: is_true(host, "data-ticker"),
        })
    }

    /// Market identifier in the price feed, e.g. "BTCUSD".
    pub fn pair(&self) -> String {
        format!("{}{}", self.coin, self.base_currency)
    }
}

fn is_true(host: &dyn HostElement, name: &str) -> bool {
    host.attribute(name).as_deref() == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryElement, WIDGET_CLASS};

    #[test]
    fn reads_attributes_with_defaults() {
        let host = MemoryElement::new("div", WIDGET_CLASS)
            .with_attribute("data-coin", "BTC")
            .with_attribute("data-base", "USD")
            .with_attribute("data-ticker", "TRUE");

        let config = WidgetConfig::from_host(&host).unwrap();
        assert_eq!(config.pair(), "BTCUSD");
        assert_eq!(config.theme, Theme::Light);
        assert!(!config.show_percent_change_24h);
        // Only the exact string "true" enables a flag
        assert!(!config.enable_polling);
    }

    #[test]
    fn reads_flags_and_theme() {
        let host = MemoryElement::new("div", WIDGET_CLASS)
            .with_attribute("data-coin", "ETH")
            .with_attribute("data-base", "BTC")
            .with_attribute("data-ticker", "true")
            .with_attribute("data-percentChange24h", "true")
            .with_attribute("data-theme", "dark");

        let config = WidgetConfig::from_host(&host).unwrap();
        assert!(config.enable_polling);
        assert!(config.show_percent_change_24h);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn coin_and_base_are_required() {
        let host = MemoryElement::new("div", WIDGET_CLASS).with_attribute("data-coin", "BTC");
        assert!(matches!(
            WidgetConfig::from_host(&host),
            Err(TickerError::MissingAttribute("data-base"))
        ));
    }
}
