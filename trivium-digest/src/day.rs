//! The day filter: raw on-this-day feed in, bounded rendered digest out.
//!
//! Events use a coarser two-tier score than births/deaths: any Western
//! indicator in the event text or its page descriptions scores 5, any
//! general notability keyword scores 3, anything else is excluded. Births
//! and deaths run the full classifier. All three sections sort by score
//! descending with a stable sort; the feed's own order carries implicit
//! recency/importance, so ties must keep it.

use crate::keywords::{any_notable_keyword, contains_any, WESTERN_INDICATORS};
use crate::notability::classify_notability;
use trivium_common::TriviumError;
use trivium_sources::{HistoricalRecord, OnThisDayClient, OnThisDayFeed};

pub const MAX_EVENTS: usize = 10;
pub const MAX_BIRTHS: usize = 12;
pub const MAX_DEATHS: usize = 6;

pub const DAY_FORMAT_MESSAGE: &str = "Date format should be MM-DD (e.g., 12-25)";

/// Whether a digest was built from live feed data or synthesised empty
/// after an upstream failure. Keeps "the feed had nothing notable" and
/// "the feed was unreachable" distinguishable to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Fresh,
    Degraded,
}

/// Rendered, length-bounded digest for one calendar day.
#[derive(Debug, Clone)]
pub struct DayDigest {
    pub events: Vec<String>,
    pub births: Vec<String>,
    pub deaths: Vec<String>,
    pub status: FeedStatus,
}

impl DayDigest {
    /// The empty digest served when the feed is unreachable.
    pub fn degraded() -> Self {
        Self {
            events: Vec::new(),
            births: Vec::new(),
            deaths: Vec::new(),
            status: FeedStatus::Degraded,
        }
    }
}

/// Fetch and filter one day, absorbing upstream failure into an empty
/// degraded digest. Never returns an error.
pub async fn fetch_day_digest(client: &OnThisDayClient, month: u32, day: u32) -> DayDigest {
    match client.day_feed(month, day).await {
        Ok(feed) => digest_feed(&feed),
        Err(err) => {
            tracing::warn!(
                month,
                day,
                error = %err,
                "on-this-day feed unavailable, serving empty digest"
            );
            DayDigest::degraded()
        }
    }
}

/// Pure filtering/ranking step over an already-fetched feed.
pub fn digest_feed(feed: &OnThisDayFeed) -> DayDigest {
    DayDigest {
        events: filter_events(&feed.events),
        births: filter_people(&feed.births, MAX_BIRTHS),
        deaths: filter_people(&feed.deaths, MAX_DEATHS),
        status: FeedStatus::Fresh,
    }
}

fn filter_events(events: &[HistoricalRecord]) -> Vec<String> {
    let mut scored: Vec<(u32, String)> = events
        .iter()
        .filter_map(|rec| {
            score_event(rec).map(|score| (score, format!("{}: {}", render_year(rec), rec.text)))
        })
        .collect();
    take_top(&mut scored, MAX_EVENTS)
}

/// Two-tier event score; `None` excludes the event entirely.
fn score_event(rec: &HistoricalRecord) -> Option<u32> {
    let mut combined = rec.text.to_lowercase();
    for page in &rec.pages {
        combined.push(' ');
        combined.push_str(&page.description.to_lowercase());
    }
    if contains_any(&combined, WESTERN_INDICATORS) {
        Some(5)
    } else if any_notable_keyword(&combined) {
        Some(3)
    } else {
        None
    }
}

fn filter_people(records: &[HistoricalRecord], cap: usize) -> Vec<String> {
    let mut scored: Vec<(u32, String)> = records
        .iter()
        .filter_map(|rec| {
            let n = classify_notability(&rec.text, &rec.pages);
            n.notable.then(|| {
                (
                    n.score,
                    format!("{}: {} [{}]", render_year(rec), rec.text, n.category.tag()),
                )
            })
        })
        .collect();
    take_top(&mut scored, cap)
}

/// Stable descending sort, then keep the first `cap` rendered lines.
fn take_top(scored: &mut Vec<(u32, String)>, cap: usize) -> Vec<String> {
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(cap);
    scored.drain(..).map(|(_, line)| line).collect()
}

fn render_year(rec: &HistoricalRecord) -> String {
    rec.year.map(|y| y.to_string()).unwrap_or_default()
}

/// Parse a `MM-DD` override. Month and day ranges are checked up front so
/// nonsense like `13-45` fails here, before any network call is issued.
pub fn parse_month_day(raw: &str) -> Result<(u32, u32), TriviumError> {
    let invalid = || TriviumError::InvalidInput(DAY_FORMAT_MESSAGE.to_string());

    let parts: Vec<&str> = raw.trim().split('-').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }
    let month: u32 = parts[0].parse().map_err(|_| invalid())?;
    let day: u32 = parts[1].parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(invalid());
    }
    Ok((month, day))
}
