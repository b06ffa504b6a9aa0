//! Client for the Wikimedia REST v1 on-this-day feed.
//!
//! One GET per calendar day returns every recorded event, birth and death
//! for that date across history. The filter layer downstream decides what
//! is worth keeping; this module only models the wire shape.

use crate::SourceError;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use trivium_http::{HttpClient, RequestOpts};

/// A reference article attached to a historical record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One event/birth/death record. `year` is absent for a handful of
/// undated entries; it renders as an empty string downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalRecord {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pages: Vec<PageRef>,
}

/// The raw day feed. Unknown sections (holidays, selected) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnThisDayFeed {
    #[serde(default)]
    pub events: Vec<HistoricalRecord>,
    #[serde(default)]
    pub births: Vec<HistoricalRecord>,
    #[serde(default)]
    pub deaths: Vec<HistoricalRecord>,
}

#[derive(Clone)]
pub struct OnThisDayClient {
    http: HttpClient,
    user_agent: String,
}

impl OnThisDayClient {
    pub fn new(base: &str, user_agent: &str) -> Result<Self, SourceError> {
        let http = HttpClient::new(base)?;
        Ok(Self {
            http,
            user_agent: user_agent.to_string(),
        })
    }

    /// Fetch the full feed for a calendar day. The endpoint requires an
    /// identifying User-Agent and zero-padded date segments.
    pub async fn day_feed(&self, month: u32, day: u32) -> Result<OnThisDayFeed, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| SourceError::Shape(format!("bad user agent: {e}")))?,
        );

        let path = format!("api/rest_v1/feed/onthisday/all/{month:02}/{day:02}");
        let feed: OnThisDayFeed = self
            .http
            .get_json(
                &path,
                RequestOpts {
                    headers: Some(headers),
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(
            month,
            day,
            events = feed.events.len(),
            births = feed.births.len(),
            deaths = feed.deaths.len(),
            "onthisday.feed"
        );
        Ok(feed)
    }
}
