use thiserror::Error;

use crate::api::FetchError;

#[derive(Debug, Error)]
pub enum TickerError {
    #[error("ticker widget element not found")]
    HostElementMissing,

    #[error("ticker widget is missing required attribute {0}")]
    MissingAttribute(&'static str),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("data for {pair} not found")]
    PairNotFound { pair: String },
}
