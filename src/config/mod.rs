use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};

use crate::ticker::CyclePolicy;

pub const DEFAULT_PRICE_FEED_URL: &str = "https://api.gemini.com/v1/pricefeed";
pub const DEFAULT_VOLUME_URL: &str = "https://api.gemini.com/v1/pubticker";

/// Upper bound for interval and timeout settings: one day.
const MAX_SECS: u64 = 86_400;

/// Env var → host element attribute. The binary has no real page, so the
/// widget's data attributes are supplied through the environment.
const HOST_ATTRIBUTE_VARS: [(&str, &str); 5] = [
    ("TICKER_POLL", "data-ticker"),
    ("TICKER_COIN", "data-coin"),
    ("TICKER_BASE", "data-base"),
    ("TICKER_PERCENT_CHANGE_24H", "data-percentChange24h"),
    ("TICKER_THEME", "data-theme"),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub price_feed_url: String,
    pub volume_url: String,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
    pub cycle_policy: CyclePolicy,
    pub metrics_addr: Option<SocketAddr>,
    pub output_path: Option<PathBuf>,
    pub host_attributes: Vec<(String, String)>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // dotenvy loads .env, but doesn't override already-set env vars
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let price_feed_url =
            lookup("TICKER_PRICE_FEED_URL").unwrap_or_else(|| DEFAULT_PRICE_FEED_URL.to_string());
        let volume_url =
            lookup("TICKER_VOLUME_URL").unwrap_or_else(|| DEFAULT_VOLUME_URL.to_string());

        let poll_interval = Duration::from_secs(parse_secs(&lookup, "TICKER_POLL_INTERVAL_SECS", 5)?);
        let http_timeout = Duration::from_secs(parse_secs(&lookup, "TICKER_HTTP_TIMEOUT_SECS", 10)?);

        let cycle_policy = match lookup("TICKER_CYCLE_POLICY").as_deref() {
            None | Some("latest-started") => CyclePolicy::LatestStarted,
            Some("last-resolved") => CyclePolicy::LastResolved,
            Some(other) => bail!("unknown TICKER_CYCLE_POLICY: {other}"),
        };

        let metrics_addr = lookup("TICKER_METRICS_ADDR")
            .map(|raw| raw.parse::<SocketAddr>().with_context(|| format!("invalid TICKER_METRICS_ADDR: {raw}")))
            .transpose()?;

        let output_path = lookup("TICKER_OUTPUT").map(PathBuf::from);

        let host_attributes = HOST_ATTRIBUTE_VARS
            .iter()
            .filter_map(|(var, attr)| lookup(var).map(|value| (attr.to_string(), value)))
            .collect();

        Ok(Self {
            log_level,
            price_feed_url,
            volume_url,
            poll_interval,
            http_timeout,
            cycle_policy,
            metrics_addr,
            output_path,
            host_attributes,
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> anyhow::Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds, got {raw:?}"))?;
    if secs == 0 {
        bail!("{key} must be greater than zero");
    }
    if secs > MAX_SECS {
        bail!("{key} must be at most {MAX_SECS} seconds, got {secs}");
    }
    Ok(secs)
}
