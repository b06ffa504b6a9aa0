//! End-to-end composer tests against a mock upstream. One MockServer
//! stands in for every collaborator; the clients only differ by path.

use trivium_digest::Composer;
use trivium_sources::{OnThisDayClient, PageFetcher, SearchClient, WikipediaClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use serde_json::json;

const UA: &str = "trivium-tests/1.0";

fn composer_for(server_uri: &str) -> Composer {
    Composer::new(
        SearchClient::new(server_uri, UA).expect("search client"),
        WikipediaClient::new(server_uri).expect("wikipedia client"),
        OnThisDayClient::new(server_uri, UA).expect("feed client"),
        PageFetcher::new(UA).expect("page fetcher"),
    )
}

const SEARCH_PAGE: &str = r#"
    <div class="result">
      <a class="result__a" href="https://a.example">Alpha title</a>
      <a class="result__snippet">alpha snippet</a>
    </div>"#;

#[tokio::test]
async fn malformed_daily_date_fails_before_any_network_call() {
    let server = MockServer::start().await;
    let composer = composer_for(&server.uri());

    let report = composer.daily_digest("13-45").await;

    assert_eq!(report, "❌ Error: Date format should be MM-DD (e.g., 12-25)");
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no upstream call may be issued");
}

#[tokio::test]
async fn malformed_weekly_date_fails_before_any_network_call() {
    let server = MockServer::start().await;
    let composer = composer_for(&server.uri());

    let report = composer.weekly_digest("2025-02-30").await;

    assert_eq!(
        report,
        "❌ Error: Date format should be YYYY-MM-DD (e.g., 2025-01-15)"
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_inputs_fail_before_any_network_call() {
    let server = MockServer::start().await;
    let composer = composer_for(&server.uri());

    assert_eq!(
        composer.research_topic("  ", "normal").await,
        "❌ Error: Please provide a topic to research"
    );
    assert_eq!(
        composer.entertainment("movie", "").await,
        "❌ Error: Please provide a search query"
    );
    assert_eq!(
        composer.geography("", "").await,
        "❌ Error: Please provide a geography query"
    );
    assert_eq!(
        composer.science("", "").await,
        "❌ Error: Please provide a science query"
    );
    assert_eq!(
        composer.fetch_url("   ").await,
        "❌ Error: Please provide a URL to fetch"
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn daily_digest_renders_filtered_sections() {
    let server = MockServer::start().await;

    let feed = json!({
        "events": [
            { "year": 1903, "text": "First powered flight by American inventors", "pages": [] },
            { "year": 800, "text": "A harvest festival is held", "pages": [] }
        ],
        "births": [
            { "year": 1926, "text": "Marilyn Monroe, American actress", "pages": [] },
            { "year": 1700, "text": "an unremarkable merchant", "pages": [] }
        ],
        "deaths": []
    });
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/feed/onthisday/all/06/01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(&server)
        .await;

    let composer = composer_for(&server.uri());
    let report = composer.daily_digest("06-01").await;

    assert!(report.starts_with("📅 TRIVIA FOR JUNE 1"));
    assert!(report.contains("🎂 CELEBRITY & NOTABLE BIRTHDAYS:"));
    assert!(report.contains("• 1926: Marilyn Monroe, American actress [ENTERTAINMENT]"));
    assert!(!report.contains("unremarkable merchant"));
    assert!(report.contains("🏛️ MAJOR HISTORICAL EVENTS:"));
    assert!(report.contains("• 1903: First powered flight by American inventors"));
    assert!(!report.contains("harvest festival"));
    // Deaths were empty, so the section is absent entirely.
    assert!(!report.contains("🕯️ NOTABLE DEATHS:"));
    // Supplemental searches still render.
    assert!(report.contains("🌟 ADDITIONAL CELEBRITY BIRTHDAYS (Web Search):"));
    assert!(report.contains("• Alpha title: alpha snippet"));
    assert!(report.contains("🎬 ENTERTAINMENT ON THIS DATE:"));
    assert!(report.ends_with("✅ Daily trivia loaded!"));
}

#[tokio::test]
async fn failed_feed_yields_empty_degraded_day_digest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/feed/onthisday/all/06/01"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OnThisDayClient::new(&server.uri(), UA).unwrap();
    let digest = trivium_digest::fetch_day_digest(&client, 6, 1).await;

    assert!(digest.events.is_empty());
    assert!(digest.births.is_empty());
    assert!(digest.deaths.is_empty());
    assert_eq!(digest.status, trivium_digest::FeedStatus::Degraded);
}

#[tokio::test]
async fn daily_digest_degrades_to_web_sections_when_feed_is_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest_v1/feed/onthisday/all/06/01"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(&server)
        .await;

    let composer = composer_for(&server.uri());
    let report = composer.daily_digest("06-01").await;

    // Feed-driven sections vanish without any error surfacing in the body.
    assert!(!report.contains("🎂 CELEBRITY & NOTABLE BIRTHDAYS:"));
    assert!(!report.contains("🏛️ MAJOR HISTORICAL EVENTS:"));
    assert!(!report.contains("❌"));
    // Web-driven sections still carry the digest.
    assert!(report.contains("🌟 ADDITIONAL CELEBRITY BIRTHDAYS (Web Search):"));
    assert!(report.ends_with("✅ Daily trivia loaded!"));
}

#[tokio::test]
async fn research_topic_interleaves_wikipedia_and_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "opensearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "apollo",
            ["Apollo 11"],
            ["1969 Moon mission"],
            ["https://en.wikipedia.org/wiki/Apollo_11"]
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "pages": { "736": { "extract": "Apollo 11 landed in 1969." } } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(&server)
        .await;

    let composer = composer_for(&server.uri());
    let report = composer.research_topic("apollo", "normal").await;

    assert!(report.starts_with("🔍 TRIVIA RESEARCH: APOLLO"));
    assert!(report.contains("📚 WIKIPEDIA FINDINGS:"));
    assert!(report.contains("**Apollo 11**"));
    assert!(report.contains("   1969 Moon mission"));
    assert!(report.contains("   Summary: Apollo 11 landed in 1969...."));
    assert!(report.contains("🌐 WEB SEARCH RESULTS:"));
    assert!(report.contains("• Alpha title"));
    assert!(report.ends_with("✅ Research complete! Use these facts for your trivia questions."));
}

#[tokio::test]
async fn themed_report_survives_wikipedia_outage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(&server)
        .await;

    let composer = composer_for(&server.uri());
    let report = composer.sports("nfl", "packers").await;

    assert!(report.starts_with("🏆 SPORTS TRIVIA: PACKERS"));
    assert!(!report.contains("📚 WIKIPEDIA:"));
    assert!(report.contains("🌐 SPORTS FACTS:"));
    assert!(report.contains("• Alpha title"));
    assert!(report.ends_with("✅ Sports trivia compiled!"));
}
