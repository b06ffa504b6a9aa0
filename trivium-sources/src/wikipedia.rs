//! Wrapper around the MediaWiki action API for title lookup and intro
//! summaries.
//!
//! Both calls go through `w/api.php` with `format=json`. Responses are
//! decoded as loose JSON first; the opensearch payload in particular is a
//! positional array, not an object.

use crate::SourceError;
use serde_json::Value;
use std::time::Duration;
use trivium_http::{HttpClient, RequestOpts};
use trivium_common::truncate_chars;

/// Intro summaries are clipped to keep a single article from dominating a
/// digest.
const SUMMARY_MAX_CHARS: usize = 2000;

const API_TIMEOUT: Duration = Duration::from_secs(10);

/// One candidate article from a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHit {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Clone)]
pub struct WikipediaClient {
    http: HttpClient,
}

impl WikipediaClient {
    pub fn new(base: &str) -> Result<Self, SourceError> {
        let http = HttpClient::new(base)?;
        Ok(Self { http })
    }

    /// Title lookup via `action=opensearch`. The response is a positional
    /// array: `[query, [titles], [descriptions], [links]]`.
    pub async fn opensearch(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PageHit>, SourceError> {
        let data: Value = self
            .http
            .get_json(
                "w/api.php",
                RequestOpts {
                    timeout: Some(API_TIMEOUT),
                    retries: Some(0),
                    query: Some(vec![
                        ("action", "opensearch".into()),
                        ("search", query.into()),
                        ("limit", limit.to_string().into()),
                        ("format", "json".into()),
                    ]),
                    ..Default::default()
                },
            )
            .await?;

        let arr = data
            .as_array()
            .filter(|a| a.len() >= 4)
            .ok_or_else(|| SourceError::Shape("opensearch payload is not a 4-tuple".into()))?;

        let titles = string_list(&arr[1]);
        let descriptions = string_list(&arr[2]);
        let links = string_list(&arr[3]);

        let hits = titles
            .into_iter()
            .enumerate()
            .map(|(i, title)| PageHit {
                title,
                description: descriptions.get(i).cloned().unwrap_or_default(),
                url: links.get(i).cloned().unwrap_or_default(),
            })
            .collect();
        Ok(hits)
    }

    /// Plain-text intro extract for `title`, following redirects. `None`
    /// means the title does not resolve to a page, as opposed to a
    /// transport failure, which is an `Err`.
    pub async fn summary(&self, title: &str) -> Result<Option<String>, SourceError> {
        let data: Value = self
            .http
            .get_json(
                "w/api.php",
                RequestOpts {
                    timeout: Some(API_TIMEOUT),
                    retries: Some(0),
                    query: Some(vec![
                        ("action", "query".into()),
                        ("titles", title.into()),
                        ("prop", "extracts".into()),
                        ("exintro", "1".into()),
                        ("explaintext", "1".into()),
                        ("redirects", "1".into()),
                        ("format", "json".into()),
                    ]),
                    ..Default::default()
                },
            )
            .await?;

        let pages = data
            .get("query")
            .and_then(|q| q.get("pages"))
            .and_then(|p| p.as_object())
            .ok_or_else(|| SourceError::Shape("summary payload missing query.pages".into()))?;

        // Page id "-1" marks a missing title.
        for (page_id, page) in pages {
            if page_id.as_str() == "-1" {
                continue;
            }
            let extract = page
                .get("extract")
                .and_then(|e| e.as_str())
                .unwrap_or("No summary available.");
            return Ok(Some(truncate_chars(extract, SUMMARY_MAX_CHARS).to_string()));
        }
        tracing::debug!(title = %title, "wikipedia.summary.missing_page");
        Ok(None)
    }
}

fn string_list(v: &Value) -> Vec<String> {
    v.as_array()
        .map(|a| {
            a.iter()
                .map(|x| x.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_list_handles_mixed_values() {
        let v = json!(["a", 3, "c"]);
        assert_eq!(string_list(&v), vec!["a", "", "c"]);
        assert!(string_list(&json!("not a list")).is_empty());
    }
}
