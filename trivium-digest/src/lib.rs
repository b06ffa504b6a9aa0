//! The Trivium core: notability scoring, day/week filtering, and the
//! per-tool digest composer.
//!
//! # Overview
//!
//! - [`keywords`]: the flat rule tables behind the relevance heuristic
//! - [`notability`]: category classification and scoring for people records
//! - [`day`]: the day filter, raw feed in, bounded rendered digest out
//! - [`week`]: seven-day aggregation over the day filter
//! - [`compose`]: per-tool report assembly over the live collaborators
//!
//! The scoring arithmetic is deliberately rigid: the inclusion threshold
//! (3) is tuned to the point values in [`keywords::CATEGORY_RULES`], so the
//! two must move together.

pub mod compose;
pub mod day;
pub mod keywords;
pub mod notability;
pub mod week;

pub use compose::Composer;
pub use day::{digest_feed, fetch_day_digest, DayDigest, FeedStatus};
pub use notability::{classify_notability, Category, Notability};
pub use week::{fetch_week_digest, WeekDigest};
