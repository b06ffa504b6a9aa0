//! Weekly aggregation: the day filter applied to seven consecutive days.
//!
//! Each day contributes at most its top two births and top one event,
//! tagged with the source date. There is no cross-day re-ranking; the
//! per-day ordering already encodes relevance.

use crate::day::{fetch_day_digest, DayDigest};
use chrono::{Datelike, Days, NaiveDate};
use trivium_common::TriviumError;
use trivium_sources::OnThisDayClient;

pub const WEEK_BIRTHS_PER_DAY: usize = 2;
pub const WEEK_EVENTS_PER_DAY: usize = 1;

pub const WEEK_FORMAT_MESSAGE: &str = "Date format should be YYYY-MM-DD (e.g., 2025-01-15)";

/// Flat, date-tagged highlights for one week.
#[derive(Debug, Clone, Default)]
pub struct WeekDigest {
    pub births: Vec<String>,
    pub events: Vec<String>,
}

/// Parse an explicit `YYYY-MM-DD` anchor. Calendar validity is checked via
/// chrono, so `2025-02-30` fails the same way `garbage` does.
pub fn parse_week_start(raw: &str) -> Result<NaiveDate, TriviumError> {
    let invalid = || TriviumError::InvalidInput(WEEK_FORMAT_MESSAGE.to_string());

    let parts: Vec<&str> = raw.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let year: i32 = parts[0].parse().map_err(|_| invalid())?;
    let month: u32 = parts[1].parse().map_err(|_| invalid())?;
    let day: u32 = parts[2].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// The most recent Monday, counting today as part of the current week.
pub fn recent_monday(today: NaiveDate) -> NaiveDate {
    let back = today.weekday().num_days_from_monday();
    today - Days::new(back as u64)
}

/// Fetch seven days starting at `start` and collect the per-day highlights.
pub async fn fetch_week_digest(client: &OnThisDayClient, start: NaiveDate) -> WeekDigest {
    let mut digests = Vec::with_capacity(7);
    for offset in 0..7u64 {
        // NaiveDate::MAX is unreachable for any sane anchor; fall back to
        // the anchor itself rather than panic.
        let date = start.checked_add_days(Days::new(offset)).unwrap_or(start);
        let digest = fetch_day_digest(client, date.month(), date.day()).await;
        digests.push((date, digest));
    }
    collect_week(&digests)
}

/// Pure composition step over already-filtered days.
pub fn collect_week(days: &[(NaiveDate, DayDigest)]) -> WeekDigest {
    let mut week = WeekDigest::default();
    for (date, digest) in days {
        let tag = date.format("%m/%d (%a)").to_string();
        for birth in digest.births.iter().take(WEEK_BIRTHS_PER_DAY) {
            week.births.push(format!("[{tag}] {birth}"));
        }
        for event in digest.events.iter().take(WEEK_EVENTS_PER_DAY) {
            week.events.push(format!("[{tag}] {event}"));
        }
    }
    week
}
