//! Minimal client for the DuckDuckGo HTML vertical.
//!
//! The HTML endpoint needs no key, so this scrapes the result list with
//! static selectors instead of calling a JSON API. Request shaping (browser
//! User-Agent, single attempt, 15 s budget) matches what the endpoint
//! tolerates without rate-limiting anonymous callers.

use crate::SourceError;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use scraper::{Html, Selector};
use trivium_http::{HttpClient, RequestOpts};

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Clone)]
pub struct SearchClient {
    http: HttpClient,
    user_agent: String,
}

impl SearchClient {
    pub fn new(base: &str, user_agent: &str) -> Result<Self, SourceError> {
        let http = HttpClient::new(base)?;
        Ok(Self {
            http,
            user_agent: user_agent.to_string(),
        })
    }

    /// Run a keyword query and return up to `max_results` hits in display
    /// order. A page that parses to zero results is a legitimate empty set,
    /// not an error.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| SourceError::Shape(format!("bad user agent: {e}")))?,
        );

        let html = self
            .http
            .get_text(
                "html/",
                RequestOpts {
                    headers: Some(headers),
                    query: Some(vec![("q", query.into())]),
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await?;

        let hits = parse_results(&html, max_results);
        tracing::debug!(query = %query, hit_count = hits.len(), "search.page");
        Ok(hits)
    }
}

fn parse_results(html: &str, max_results: usize) -> Vec<SearchHit> {
    let doc = Html::parse_document(html);
    let result_sel = Selector::parse("div.result").expect("static selector");
    let title_sel = Selector::parse("a.result__a").expect("static selector");
    let snippet_sel = Selector::parse("a.result__snippet").expect("static selector");

    let mut hits = Vec::new();
    for div in doc.select(&result_sel).take(max_results) {
        let Some(title_el) = div.select(&title_sel).next() else {
            continue;
        };
        let title = collapse(title_el.text());
        if title.is_empty() {
            continue;
        }
        let link = title_el.value().attr("href").unwrap_or_default().to_string();
        let snippet = div
            .select(&snippet_sel)
            .next()
            .map(|el| collapse(el.text()))
            .unwrap_or_default();
        hits.push(SearchHit {
            title,
            link,
            snippet,
        });
    }
    hits
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="result">
            <a class="result__a" href="https://example.com/tng">Star Trek: <b>TNG</b> facts</a>
            <a class="result__snippet">Seven seasons,
               aired 1987.</a>
          </div>
          <div class="result">
            <a class="result__a" href="https://example.com/bare">Bare result</a>
          </div>
          <div class="result"><span>no anchor here</span></div>
        </body></html>"#;

    #[test]
    fn parses_title_link_and_snippet() {
        let hits = parse_results(PAGE, 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Star Trek: TNG facts");
        assert_eq!(hits[0].link, "https://example.com/tng");
        assert_eq!(hits[0].snippet, "Seven seasons, aired 1987.");
    }

    #[test]
    fn missing_snippet_defaults_to_empty() {
        let hits = parse_results(PAGE, 10);
        assert_eq!(hits[1].title, "Bare result");
        assert_eq!(hits[1].snippet, "");
    }

    #[test]
    fn respects_max_results() {
        let hits = parse_results(PAGE, 1);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn divs_without_title_anchor_are_skipped() {
        let hits = parse_results(r#"<div class="result"><p>ad</p></div>"#, 5);
        assert!(hits.is_empty());
    }
}
