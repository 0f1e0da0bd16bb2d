use crate::format::{format_currency, format_percentage, format_supply};
use crate::state::render_state::TickerSnapshot;
use crate::state::widget::WidgetConfig;

const PRICES_URL: &str = "https://www.gemini.com/prices";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn color(self) -> &'static str {
        match self {
            Trend::Up => "green",
            Trend::Down => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PercentChangeView {
    pub text: Option<String>,
    pub trend: Trend,
}

/// Everything the data fragment shows, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerView {
    pub coin: String,
    pub base_currency: String,
    pub coin_url: String,
    pub price: Option<String>,
    pub volume: String,
    /// `None` when the percent column is switched off.
    pub percent_change: Option<PercentChangeView>,
}

impl TickerView {
    pub fn build(config: &WidgetConfig, snapshot: &TickerSnapshot) -> Self {
        let percent_change = config.show_percent_change_24h.then(|| {
            let change = snapshot.entry.percent_change_24h;
            // Missing or NaN change is not ">= 0", so it shows red
            let trend = match change {
                Some(c) if c >= 0.0 => Trend::Up,
                _ => Trend::Down,
            };
            PercentChangeView {
                text: format_percentage(change),
                trend,
            }
        });

        Self {
            coin: config.coin.clone(),
            base_currency: config.base_currency.clone(),
            coin_url: format!("{PRICES_URL}/{}", config.coin),
            price: format_currency(snapshot.entry.price_decimal()),
            volume: format_supply(snapshot.volume.volume_in(&config.base_currency)),
            percent_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{PriceFeedEntry, VolumeSnapshot};
    use crate::theme::Theme;
    use serde_json::json;

    fn config(show_percent: bool) -> WidgetConfig {
        WidgetConfig {
            coin: "BTC".into(),
            base_currency: "USD".into(),
            show_percent_change_24h: show_percent,
            theme: Theme::Light,
            enable_polling: false,
        }
    }

    fn snapshot(price: &str, change: Option<f64>) -> TickerSnapshot {
        TickerSnapshot {
            entry: PriceFeedEntry {
                pair: "BTCUSD".into(),
                price: price.into(),
                percent_change_24h: change,
            },
            volume: VolumeSnapshot {
                volume: [("USD".to_string(), json!("1234567.8"))].into_iter().collect(),
            },
        }
    }

    #[test]
    fn formats_every_field() {
        let view = TickerView::build(&config(true), &snapshot("9500.5", Some(-1.5)));

        assert_eq!(view.coin_url, "https://www.gemini.com/prices/BTC");
        assert_eq!(view.price.as_deref(), Some("$9,500.50"));
        assert_eq!(view.volume, "1.235M");
        let percent = view.percent_change.unwrap();
        assert_eq!(percent.text.as_deref(), Some("-1.5%"));
        assert_eq!(percent.trend, Trend::Down);
    }

    #[test]
    fn zero_values_render_as_nothing() {
        let view = TickerView::build(&config(true), &snapshot("0", Some(0.0)));
        assert_eq!(view.price, None);
        let percent = view.percent_change.unwrap();
        assert_eq!(percent.text, None);
        assert_eq!(percent.trend, Trend::Up);
    }

    #[test]
    fn missing_change_reads_as_down() {
        let view = TickerView::build(&config(true), &snapshot("1", None));
        assert_eq!(view.percent_change.unwrap().trend, Trend::Down);
    }

    #[test]
    fn percent_column_follows_flag() {
        let view = TickerView::build(&config(false), &snapshot("1", Some(3.0)));
        assert!(view.percent_change.is_none());
    }
}
