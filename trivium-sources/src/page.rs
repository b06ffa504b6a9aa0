//! Visible-text extraction for arbitrary web pages.
//!
//! Fetches a URL with a browser User-Agent (redirects followed), parses the
//! document with `scraper`, drops the subtrees that never carry article
//! content, and collapses the remaining text into one whitespace-normalised
//! string under a caller-supplied character budget.

use crate::SourceError;
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use trivium_common::truncate_chars;
use url::Url;

/// Subtrees that carry chrome or code rather than page content.
const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "aside"];

/// Standard extraction budget; the direct-URL tool raises it to 6000.
pub const DEFAULT_MAX_CHARS: usize = 5000;

#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Retrieve `url` and return its visible text, truncated to `max_chars`
    /// characters.
    pub async fn fetch(&self, url: &str, max_chars: usize) -> Result<String, SourceError> {
        let parsed = Url::parse(url).map_err(|e| SourceError::Url(e.to_string()))?;

        let resp = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %url, %status, "page.fetch.http_error");
            return Err(SourceError::Status(status));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let text = visible_text(&html);
        tracing::debug!(url = %url, chars = text.chars().count(), "page.fetch.extracted");
        Ok(truncate_chars(&text, max_chars).to_string())
    }
}

/// Extract whitespace-collapsed visible text, skipping [`STRIPPED_TAGS`]
/// subtrees entirely.
pub fn visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let body_sel = Selector::parse("body").expect("static selector");
    let root = doc
        .select(&body_sel)
        .next()
        .unwrap_or_else(|| doc.root_element());

    let mut raw = String::new();
    collect_text(root, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    if STRIPPED_TAGS.contains(&el.value().name()) {
        return;
    }
    for child in el.children() {
        if let Some(nested) = ElementRef::wrap(child) {
            collect_text(nested, out);
        } else if let Node::Text(text) = child.value() {
            out.push_str(text);
            out.push(' ');
        }
    }
}
