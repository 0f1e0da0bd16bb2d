use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// One record of the price-feed array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceFeedEntry {
    pub pair: String,
    /// Decimal text exactly as the feed sent it.
    #[serde(deserialize_with = "de_decimal_text")]
    pub price: String,
    #[serde(rename = "percentChange24h", default, deserialize_with = "de_opt_f64")]
    pub percent_change_24h: Option<f64>,
}

impl PriceFeedEntry {
    pub fn price_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.price.trim()).ok()
    }
}

/// Volume for one trading pair, keyed by currency code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VolumeSnapshot {
    // Also carries a numeric "timestamp" next to the currency codes
    pub volume: HashMap<String, Value>,
}

impl VolumeSnapshot {
    /// Volume in `currency`; `NaN` when absent or not numeric.
    pub fn volume_in(&self, currency: &str) -> f64 {
        match self.volume.get(currency) {
            Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }
}

/// Types each raw feed record on its own. Records that don't fit
/// `PriceFeedEntry` are dropped, so one odd record can't hide the rest.
pub fn parse_price_feed(records: Vec<Value>) -> Vec<PriceFeedEntry> {
    records
        .into_iter()
        .filter_map(|record| {
            let pair = record.get("pair").and_then(Value::as_str).map(str::to_string);
            match serde_json::from_value::<PriceFeedEntry>(record) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!(pair = ?pair, error = %err, "skipping malformed price feed entry");
                    None
                }
            }
        })
        .collect()
}

/// Linear, case-sensitive search; the first matching pair wins.
pub fn find_pair<'a>(feed: &'a [PriceFeedEntry], pair: &str) -> Option<&'a PriceFeedEntry> {
    feed.iter().find(|entry| entry.pair == pair)
}

fn de_decimal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected decimal string or number, got: {other}"
        ))),
    }
}

fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    match v {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.trim().parse::<f64>().map(Some).map_err(|_| {
                    de::Error::custom(format!("could not parse f64 from string: {s}"))
                })
            }
        }
        Some(other) => Err(de::Error::custom(format!(
            "expected number or string, got: {other}"
        ))),
    }
}
