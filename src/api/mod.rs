pub mod gemini;
pub mod types;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use types::{PriceFeedEntry, VolumeSnapshot};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network response was not ok: {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Where a ticker cycle gets its data from.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Every pair the feed currently quotes.
    async fn price_feed(&self) -> Result<Vec<PriceFeedEntry>, FetchError>;

    /// Volume snapshot for the `coin`/`base` pair.
    async fn volume(&self, coin: &str, base: &str) -> Result<VolumeSnapshot, FetchError>;
}

/// GET `url` and parse a 2xx body as JSON. Failures are logged here and
/// returned to the caller.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    let result = fetch_json_inner(client, url).await;
    if let Err(err) = &result {
        warn!(url, error = %err, "error fetching data");
    }
    result
}

async fn fetch_json_inner<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    let transport = |source| FetchError::Transport { url: url.to_string(), source };

    let resp = client
        .get(url)
        .header("accept", "application/json")
        .send()
        .await
        .map_err(transport)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { status, url: url.to_string() });
    }

    let bytes = resp.bytes().await.map_err(transport)?;
    serde_json::from_slice(&bytes).map_err(|source| FetchError::Parse {
        url: url.to_string(),
        source,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn parses_success_body() {
        let url = test_server::serve("200 OK", r#"{"pair":"BTCUSD"}"#).await;
        let value: Value = fetch_json(&Client::new(), &url).await.unwrap();
        assert_eq!(value["pair"], "BTCUSD");
    }

    #[tokio::test]
    async fn non_success_status_is_network_error() {
        let url = test_server::serve("503 Service Unavailable", "{}").await;
        let err = fetch_json::<Value>(&Client::new(), &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 503));
    }

    #[tokio::test]
    async fn invalid_body_is_parse_error() {
        let url = test_server::serve("200 OK", "<html>nope</html>").await;
        let err = fetch_json::<Value>(&Client::new(), &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch_json::<Value>(&Client::new(), &format!("http://{addr}"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
