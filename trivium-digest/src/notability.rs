//! The notability classifier for births and deaths.
//!
//! A record scores points from three independent signals: Western
//! indicators in its own text (+2), the highest-priority category table it
//! matches (+3, or +2 for sports), and each attached reference page whose
//! description/title carries notability (+2) or Western (+1) keywords.
//! Records at or above [`NOTABILITY_THRESHOLD`] survive the filter.

use crate::keywords::{any_notable_keyword, contains_any, CATEGORY_RULES, WESTERN_INDICATORS};
use serde::{Deserialize, Serialize};
use trivium_sources::PageRef;

/// Inclusion floor. Sits exactly one Western match plus one sports match
/// above zero, so single weak signals never qualify on their own.
pub const NOTABILITY_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entertainment,
    Politics,
    Science,
    Sports,
    Other,
}

impl Category {
    /// Uppercase tag rendered after births/deaths, e.g. `[ENTERTAINMENT]`.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Entertainment => "ENTERTAINMENT",
            Category::Politics => "POLITICS",
            Category::Science => "SCIENCE",
            Category::Sports => "SPORTS",
            Category::Other => "OTHER",
        }
    }
}

/// Outcome of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notability {
    pub notable: bool,
    pub category: Category,
    pub score: u32,
}

/// Score a record's free text plus its attached reference pages.
pub fn classify_notability(text: &str, pages: &[PageRef]) -> Notability {
    let text = text.to_lowercase();
    let mut score = 0;

    if contains_any(&text, WESTERN_INDICATORS) {
        score += 2;
    }

    let mut category = Category::Other;
    for (cat, table, points) in CATEGORY_RULES {
        if contains_any(&text, table) {
            category = *cat;
            score += points;
            break;
        }
    }

    for page in pages {
        let combined = format!(
            "{} {}",
            page.description.to_lowercase(),
            page.title.to_lowercase()
        );
        if any_notable_keyword(&combined) {
            score += 2;
        }
        if contains_any(&combined, WESTERN_INDICATORS) {
            score += 1;
        }
    }

    Notability {
        notable: score >= NOTABILITY_THRESHOLD,
        category,
        score,
    }
}
