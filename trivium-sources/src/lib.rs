//! Clients for the external services Trivium aggregates.
//!
//! - DuckDuckGo HTML-vertical search (`search`)
//! - MediaWiki opensearch + intro summaries (`wikipedia`)
//! - Wikimedia on-this-day feed (`onthisday`)
//! - Arbitrary-page visible-text extraction (`page`)
//!
//! Every client is a concrete struct constructed from a base URL so tests
//! can substitute a local mock server. Failures surface as [`SourceError`];
//! callers decide whether to degrade a section or report the error. None of
//! the upstreams require credentials.

pub mod onthisday;
pub mod page;
pub mod search;
pub mod wikipedia;

pub use onthisday::{HistoricalRecord, OnThisDayClient, OnThisDayFeed, PageRef};
pub use page::PageFetcher;
pub use search::{SearchClient, SearchHit};
pub use wikipedia::{PageHit, WikipediaClient};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Http(#[from] trivium_http::HttpError),

    #[error("invalid URL: {0}")]
    Url(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("server returned error {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}
