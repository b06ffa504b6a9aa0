//! Wire-level tests for the collaborator clients against a local mock
//! server. Each test stands up its own `MockServer` so fixtures stay
//! independent.

use serde_json::json;
use trivium_sources::{
    OnThisDayClient, PageFetcher, SearchClient, SourceError, WikipediaClient,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UA: &str = "trivium-tests/1.0";

#[tokio::test]
async fn search_parses_results_in_display_order() {
    let server = MockServer::start().await;
    let body = r#"
        <div class="result">
          <a class="result__a" href="https://a.example">Alpha title</a>
          <a class="result__snippet">first snippet</a>
        </div>
        <div class="result">
          <a class="result__a" href="https://b.example">Beta title</a>
          <a class="result__snippet">second snippet</a>
        </div>"#;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "moon landing trivia"))
        .and(header("user-agent", UA))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = SearchClient::new(&server.uri(), UA).unwrap();
    let hits = client.search("moon landing trivia", 5).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Alpha title");
    assert_eq!(hits[0].link, "https://a.example");
    assert_eq!(hits[1].snippet, "second snippet");
}

#[tokio::test]
async fn search_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = SearchClient::new(&server.uri(), UA).unwrap();
    let err = client.search("anything", 3).await.unwrap_err();
    assert!(matches!(err, SourceError::Http(_)));
}

#[tokio::test]
async fn opensearch_zips_the_positional_arrays() {
    let server = MockServer::start().await;
    let body = json!([
        "apollo",
        ["Apollo 11", "Apollo 13"],
        ["1969 Moon mission", ""],
        ["https://en.wikipedia.org/wiki/Apollo_11"]
    ]);
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "opensearch"))
        .and(query_param("search", "apollo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = WikipediaClient::new(&server.uri()).unwrap();
    let hits = client.opensearch("apollo", 5).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Apollo 11");
    assert_eq!(hits[0].description, "1969 Moon mission");
    assert_eq!(hits[0].url, "https://en.wikipedia.org/wiki/Apollo_11");
    // Shorter trailing arrays pad with empties rather than failing.
    assert_eq!(hits[1].url, "");
}

#[tokio::test]
async fn opensearch_rejects_malformed_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a tuple"})))
        .mount(&server)
        .await;

    let client = WikipediaClient::new(&server.uri()).unwrap();
    let err = client.opensearch("apollo", 5).await.unwrap_err();
    assert!(matches!(err, SourceError::Shape(_)));
}

#[tokio::test]
async fn summary_returns_extract_for_resolved_pages() {
    let server = MockServer::start().await;
    let body = json!({
        "query": { "pages": { "736": {
            "title": "Apollo 11",
            "extract": "Apollo 11 was the first crewed Moon landing."
        }}}
    });
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("titles", "Apollo 11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = WikipediaClient::new(&server.uri()).unwrap();
    let summary = client.summary("Apollo 11").await.unwrap();
    assert_eq!(
        summary.as_deref(),
        Some("Apollo 11 was the first crewed Moon landing.")
    );
}

#[tokio::test]
async fn summary_distinguishes_missing_pages_from_failures() {
    let server = MockServer::start().await;
    let body = json!({ "query": { "pages": { "-1": { "missing": "" } } } });
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = WikipediaClient::new(&server.uri()).unwrap();
    let summary = client.summary("No Such Page").await.unwrap();
    assert_eq!(summary, None);
}

#[tokio::test]
async fn day_feed_decodes_records_and_pads_dates() {
    let server = MockServer::start().await;
    let body = json!({
        "events": [
            { "year": 1969, "text": "Apollo 11 lands on the Moon.",
              "pages": [{ "title": "Apollo 11", "description": "American spaceflight" }] }
        ],
        "births": [],
        "deaths": []
    });
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/feed/onthisday/all/07/04"))
        .and(header("user-agent", UA))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = OnThisDayClient::new(&server.uri(), UA).unwrap();
    let feed = client.day_feed(7, 4).await.unwrap();

    assert_eq!(feed.events.len(), 1);
    assert_eq!(feed.events[0].year, Some(1969));
    assert_eq!(feed.events[0].pages[0].description, "American spaceflight");
}

#[tokio::test]
async fn page_fetch_extracts_and_budgets_text() {
    let server = MockServer::start().await;
    let html = "<html><body>\
        <nav>menu</nav>\
        <p>Lincoln delivered the address in 1863.</p>\
        <footer>foot</footer>\
        </body></html>";
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(UA).unwrap();
    let url = format!("{}/article", server.uri());

    let full = fetcher
        .fetch(&url, trivium_sources::page::DEFAULT_MAX_CHARS)
        .await
        .unwrap();
    assert_eq!(full, "Lincoln delivered the address in 1863.");

    let clipped = fetcher.fetch(&url, 7).await.unwrap();
    assert_eq!(clipped, "Lincoln");
}

#[tokio::test]
async fn page_fetch_maps_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(UA).unwrap();
    let err = fetcher
        .fetch(&format!("{}/gone", server.uri()), 5000)
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Status(_)));

    let err = fetcher.fetch("not a url", 5000).await.unwrap_err();
    assert!(matches!(err, SourceError::Url(_)));
}
