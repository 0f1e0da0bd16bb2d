use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

use super::types::{PriceFeedEntry, VolumeSnapshot, parse_price_feed};
use super::{FetchError, PriceSource, fetch_json};
use crate::metrics::prometheus::record_fetch_latency;

/// Gemini public market-data endpoints.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    price_feed_url: String,
    volume_url: String,
}

impl GeminiClient {
    pub fn new(price_feed_url: &str, volume_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, price_feed_url, volume_url))
    }

    pub fn with_client(http: Client, price_feed_url: &str, volume_url: &str) -> Self {
        Self {
            http,
            price_feed_url: price_feed_url.to_string(),
            volume_url: volume_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{volume_url}/{coin}{base}`, lower-cased.
    pub fn volume_endpoint(&self, coin: &str, base: &str) -> String {
        format!(
            "{}/{}{}",
            self.volume_url,
            coin.to_lowercase(),
            base.to_lowercase()
        )
    }
}

#[async_trait]
impl PriceSource for GeminiClient {
    async fn price_feed(&self) -> Result<Vec<PriceFeedEntry>, FetchError> {
        let started = Instant::now();
        // Only the envelope is strict; records are typed one by one
        let result = fetch_json::<Vec<Value>>(&self.http, &self.price_feed_url).await;
        record_fetch_latency("price_feed", started.elapsed().as_secs_f64() * 1_000.0);
        result.map(parse_price_feed)
    }

    async fn volume(&self, coin: &str, base: &str) -> Result<VolumeSnapshot, FetchError> {
        let url = self.volume_endpoint(coin, base);
        let started = Instant::now();
        let result = fetch_json(&self.http, &url).await;
        record_fetch_latency("volume", started.elapsed().as_secs_f64() * 1_000.0);
        result
    }
}
