//! Per-request report composition.
//!
//! Each tool issues its fixed sequence of encyclopedia and search lookups,
//! awaited one after another, and interleaves the results with section
//! headers into a single newline-joined report. No ranking happens here:
//! ordering is call order. Upstream failures degrade the affected section
//! to empty and are logged; malformed input short-circuits to a user-facing
//! error line before any network call.

use crate::day::{fetch_day_digest, parse_month_day};
use crate::week::{fetch_week_digest, parse_week_start, recent_monday};
use chrono::{Datelike, Local};
use trivium_common::{truncate_chars, TriviumError};
use trivium_sources::{
    OnThisDayClient, PageFetcher, PageHit, SearchClient, SearchHit, WikipediaClient,
};

/// Daily digests show fewer events than the filter keeps.
const DAILY_EVENT_DISPLAY: usize = 8;
/// Cap on the supplemental web-searched birthday list.
const CELEBRITY_RESULTS: usize = 8;
/// Character budget for the direct-URL tool.
const URL_FETCH_MAX_CHARS: usize = 6000;

const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Everything a themed category report needs besides the client set.
struct ThemedReport {
    banner: String,
    wiki_query: String,
    searches: [String; 2],
    facts_header: &'static str,
    summary_chars: usize,
    footer: &'static str,
}

/// Holds the collaborator clients and renders one report per tool call.
pub struct Composer {
    search: SearchClient,
    wikipedia: WikipediaClient,
    onthisday: OnThisDayClient,
    pages: PageFetcher,
}

impl Composer {
    pub fn new(
        search: SearchClient,
        wikipedia: WikipediaClient,
        onthisday: OnThisDayClient,
        pages: PageFetcher,
    ) -> Self {
        Self {
            search,
            wikipedia,
            onthisday,
            pages,
        }
    }

    /// Research a trivia topic via Wikipedia plus two web queries.
    pub async fn research_topic(&self, topic: &str, depth: &str) -> String {
        let topic = topic.trim();
        if topic.is_empty() {
            return "❌ Error: Please provide a topic to research".to_string();
        }
        tracing::info!(topic = %topic, "researching trivia topic");

        let mut out = vec![
            format!("🔍 TRIVIA RESEARCH: {}", topic.to_uppercase()),
            "=".repeat(50),
            String::new(),
        ];

        let wiki = self.opensearch_or_empty(topic, 3).await;
        if !wiki.is_empty() {
            out.push("📚 WIKIPEDIA FINDINGS:".to_string());
            out.push("-".repeat(30));
            for hit in &wiki {
                out.push(String::new());
                out.push(format!("**{}**", hit.title));
                if !hit.description.is_empty() {
                    out.push(format!("   {}", hit.description));
                }
                if let Some(summary) = self.summary_or_none(&hit.title).await {
                    out.push(format!("   Summary: {}...", truncate_chars(&summary, 800)));
                }
            }
            out.push(String::new());
        }

        let ddg_limit = if depth.trim().eq_ignore_ascii_case("deep") {
            5
        } else {
            3
        };
        out.push("🌐 WEB SEARCH RESULTS:".to_string());
        out.push("-".repeat(30));
        for query in [
            format!("{topic} trivia facts"),
            format!("{topic} interesting facts history"),
        ] {
            for hit in self.search_or_empty(&query, ddg_limit).await {
                out.push(String::new());
                out.push(format!("• {}", hit.title));
                if !hit.snippet.is_empty() {
                    out.push(format!("  {}", hit.snippet));
                }
            }
        }

        out.push(String::new());
        out.push("=".repeat(50));
        out.push("✅ Research complete! Use these facts for your trivia questions.".to_string());
        out.join("\n")
    }

    /// Daily digest: filtered feed sections plus supplemental web searches.
    pub async fn daily_digest(&self, date_override: &str) -> String {
        let (month, day) = if date_override.trim().is_empty() {
            let today = Local::now().date_naive();
            (today.month(), today.day())
        } else {
            match parse_month_day(date_override) {
                Ok(parsed) => parsed,
                Err(err) => return user_error(&err),
            }
        };
        let month_name = MONTH_NAMES[month as usize];
        tracing::info!(month, day, "fetching daily trivia digest");

        let mut out = vec![
            format!("📅 TRIVIA FOR {} {}", month_name.to_uppercase(), day),
            "=".repeat(50),
            "Filtered for Western celebrities, entertainment, politics & science".to_string(),
            String::new(),
        ];

        let otd = fetch_day_digest(&self.onthisday, month, day).await;

        if !otd.births.is_empty() {
            out.push("🎂 CELEBRITY & NOTABLE BIRTHDAYS:".to_string());
            out.push("-".repeat(30));
            for birth in &otd.births {
                out.push(format!("• {birth}"));
            }
            out.push(String::new());
        }

        if !otd.events.is_empty() {
            out.push("🏛️ MAJOR HISTORICAL EVENTS:".to_string());
            out.push("-".repeat(30));
            for event in otd.events.iter().take(DAILY_EVENT_DISPLAY) {
                out.push(format!("• {event}"));
            }
            out.push(String::new());
        }

        if !otd.deaths.is_empty() {
            out.push("🕯️ NOTABLE DEATHS:".to_string());
            out.push("-".repeat(30));
            for death in &otd.deaths {
                out.push(format!("• {death}"));
            }
            out.push(String::new());
        }

        out.push("🌟 ADDITIONAL CELEBRITY BIRTHDAYS (Web Search):".to_string());
        out.push("-".repeat(30));
        for celeb in self.celebrity_birthdays(month_name, day).await {
            out.push(format!("• {celeb}"));
        }
        out.push(String::new());

        let date_str = format!("{month_name} {day}");
        out.push("🎬 ENTERTAINMENT ON THIS DATE:".to_string());
        out.push("-".repeat(30));
        let releases = self
            .search_or_empty(&format!("movies released {date_str} history famous films"), 4)
            .await;
        for hit in releases {
            out.push(format!("• {}", hit.title));
            if !hit.snippet.is_empty() {
                out.push(format!("  {}", truncate_chars(&hit.snippet, 150)));
            }
        }

        out.push(String::new());
        out.push("=".repeat(50));
        out.push("✅ Daily trivia loaded!".to_string());
        out.join("\n")
    }

    /// Weekly digest: seven filtered days plus an entertainment search.
    pub async fn weekly_digest(&self, start_date: &str) -> String {
        let start = if start_date.trim().is_empty() {
            recent_monday(Local::now().date_naive())
        } else {
            match parse_week_start(start_date) {
                Ok(date) => date,
                Err(err) => return user_error(&err),
            }
        };
        tracing::info!(start = %start, "fetching weekly trivia digest");

        let mut out = vec![
            format!("📆 WEEKLY TRIVIA: Week of {}", start.format("%B %d, %Y")),
            "=".repeat(50),
            "Filtered for Western celebrities, entertainment, politics & science".to_string(),
            String::new(),
        ];

        let week = fetch_week_digest(&self.onthisday, start).await;

        if !week.births.is_empty() {
            out.push("🎂 CELEBRITY BIRTHDAYS THIS WEEK:".to_string());
            out.push("-".repeat(30));
            for birth in &week.births {
                out.push(format!("• {birth}"));
            }
            out.push(String::new());
        }

        if !week.events.is_empty() {
            out.push("🏛️ KEY HISTORICAL EVENTS THIS WEEK:".to_string());
            out.push("-".repeat(30));
            for event in &week.events {
                out.push(format!("• {event}"));
            }
            out.push(String::new());
        }

        out.push("🎬 ENTERTAINMENT HIGHLIGHTS:".to_string());
        out.push("-".repeat(30));
        let week_str = start.format("%B %Y").to_string();
        for hit in self
            .search_or_empty(&format!("new movies tv shows {week_str}"), 5)
            .await
        {
            out.push(format!("• {}", hit.title));
        }

        out.push(String::new());
        out.push("=".repeat(50));
        out.push("✅ Weekly trivia compiled!".to_string());
        out.join("\n")
    }

    /// Movie/TV/music/awards trivia with a category-mapped query set.
    pub async fn entertainment(&self, category: &str, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "❌ Error: Please provide a search query".to_string();
        }
        tracing::info!(category = %category, query = %query, "searching entertainment trivia");

        let (searches, wiki_query) = match category.trim().to_lowercase().as_str() {
            "movie" | "movies" | "film" => (
                [
                    format!("{query} movie trivia facts"),
                    format!("{query} film behind the scenes"),
                ],
                format!("{query} film"),
            ),
            "tv" | "television" | "show" => (
                [
                    format!("{query} tv show trivia"),
                    format!("{query} television series facts"),
                ],
                format!("{query} TV series"),
            ),
            "music" | "song" | "album" => (
                [
                    format!("{query} music trivia facts"),
                    format!("{query} song history"),
                ],
                query.to_string(),
            ),
            "oscar" | "oscars" | "academy" | "awards" => (
                [
                    format!("{query} Oscar Academy Award trivia"),
                    format!("{query} award winning"),
                ],
                format!("{query} Academy Award"),
            ),
            "emmy" | "emmys" => (
                [
                    format!("{query} Emmy Award trivia"),
                    format!("{query} Emmy winning"),
                ],
                format!("{query} Emmy Award"),
            ),
            _ => (
                [
                    format!("{query} entertainment trivia"),
                    format!("{query} pop culture facts"),
                ],
                query.to_string(),
            ),
        };

        self.themed_report(ThemedReport {
            banner: format!("🎬 ENTERTAINMENT TRIVIA: {}", query.to_uppercase()),
            wiki_query,
            searches,
            facts_header: "🌐 TRIVIA FACTS:",
            summary_chars: 600,
            footer: "✅ Entertainment trivia found!",
        })
        .await
    }

    /// Teams, players, records and championships.
    pub async fn sports(&self, sport: &str, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "❌ Error: Please provide a search query".to_string();
        }
        tracing::info!(sport = %sport, query = %query, "searching sports trivia");

        let searches = match sport.trim().to_lowercase().as_str() {
            "nfl" | "football" => [
                format!("{query} NFL football trivia"),
                format!("{query} Super Bowl history"),
            ],
            "nba" | "basketball" => [
                format!("{query} NBA basketball trivia"),
                format!("{query} NBA championship"),
            ],
            "mlb" | "baseball" => [
                format!("{query} MLB baseball trivia"),
                format!("{query} World Series"),
            ],
            "nhl" | "hockey" => [
                format!("{query} NHL hockey trivia"),
                format!("{query} Stanley Cup"),
            ],
            "soccer" | "mls" | "premier" => [
                format!("{query} soccer football trivia"),
                format!("{query} World Cup"),
            ],
            "olympics" | "olympic" => [
                format!("{query} Olympic trivia"),
                format!("{query} Olympic medal history"),
            ],
            _ => [
                format!("{query} sports trivia facts"),
                format!("{query} sports history records"),
            ],
        };

        self.themed_report(ThemedReport {
            banner: format!("🏆 SPORTS TRIVIA: {}", query.to_uppercase()),
            wiki_query: query.to_string(),
            searches,
            facts_header: "🌐 SPORTS FACTS:",
            summary_chars: 600,
            footer: "✅ Sports trivia compiled!",
        })
        .await
    }

    /// Countries, capitals, landmarks and world facts.
    pub async fn geography(&self, query: &str, category: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "❌ Error: Please provide a geography query".to_string();
        }
        tracing::info!(query = %query, "searching geography trivia");

        let searches = match category.trim().to_lowercase().as_str() {
            "capital" | "capitals" => [
                format!("{query} capital city trivia"),
                format!("{query} capital facts"),
            ],
            "landmark" | "landmarks" | "wonder" => [
                format!("{query} landmark trivia facts"),
                format!("{query} famous places"),
            ],
            "country" | "countries" | "nation" => [
                format!("{query} country facts trivia"),
                format!("{query} nation history"),
            ],
            "flag" | "flags" => [
                format!("{query} flag trivia facts"),
                format!("{query} flag history meaning"),
            ],
            _ => [
                format!("{query} geography trivia"),
                format!("{query} world facts"),
            ],
        };

        self.themed_report(ThemedReport {
            banner: format!("🌍 GEOGRAPHY TRIVIA: {}", query.to_uppercase()),
            wiki_query: query.to_string(),
            searches,
            facts_header: "🌐 GEOGRAPHY FACTS:",
            summary_chars: 700,
            footer: "✅ Geography trivia compiled!",
        })
        .await
    }

    /// Discoveries, inventions and science facts.
    pub async fn science(&self, field: &str, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "❌ Error: Please provide a science query".to_string();
        }
        tracing::info!(field = %field, query = %query, "searching science trivia");

        let searches = match field.trim().to_lowercase().as_str() {
            "space" | "astronomy" | "nasa" => [
                format!("{query} space astronomy trivia"),
                format!("{query} NASA facts"),
            ],
            "biology" | "nature" | "animal" => [
                format!("{query} biology nature trivia"),
                format!("{query} animal facts"),
            ],
            "chemistry" | "element" => [
                format!("{query} chemistry trivia"),
                format!("{query} element facts"),
            ],
            "physics" => [
                format!("{query} physics trivia facts"),
                format!("{query} science discovery"),
            ],
            "tech" | "technology" | "computer" => [
                format!("{query} technology trivia"),
                format!("{query} invention history"),
            ],
            _ => [
                format!("{query} science trivia facts"),
                format!("{query} scientific discovery"),
            ],
        };

        self.themed_report(ThemedReport {
            banner: format!("🔬 SCIENCE TRIVIA: {}", query.to_uppercase()),
            wiki_query: query.to_string(),
            searches,
            facts_header: "🌐 SCIENCE FACTS:",
            summary_chars: 700,
            footer: "✅ Science trivia compiled!",
        })
        .await
    }

    /// Extract trivia-relevant content from one URL.
    pub async fn fetch_url(&self, url: &str) -> String {
        let url = url.trim();
        if url.is_empty() {
            return "❌ Error: Please provide a URL to fetch".to_string();
        }
        tracing::info!(url = %url, "fetching trivia from url");

        match self.pages.fetch(url, URL_FETCH_MAX_CHARS).await {
            Ok(content) => {
                let out = vec![
                    "📄 CONTENT FROM URL".to_string(),
                    "=".repeat(50),
                    format!("Source: {url}"),
                    "-".repeat(50),
                    String::new(),
                    content,
                    String::new(),
                    "=".repeat(50),
                    "✅ Content extracted! Review for trivia-worthy facts.".to_string(),
                ];
                out.join("\n")
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "url fetch failed");
                format!("❌ Error fetching URL: {err}")
            }
        }
    }

    // ==============================
    // Shared pieces
    // ==============================

    /// The common skeleton of the four themed category reports.
    async fn themed_report(&self, spec: ThemedReport) -> String {
        let mut out = vec![spec.banner, "=".repeat(50), String::new()];

        let wiki = self.opensearch_or_empty(&spec.wiki_query, 3).await;
        if !wiki.is_empty() {
            out.push("📚 WIKIPEDIA:".to_string());
            out.push("-".repeat(30));
            for hit in wiki.iter().take(2) {
                out.push(String::new());
                out.push(format!("**{}**", hit.title));
                if let Some(summary) = self.summary_or_none(&hit.title).await {
                    out.push(format!(
                        "   {}...",
                        truncate_chars(&summary, spec.summary_chars)
                    ));
                }
            }
            out.push(String::new());
        }

        out.push(spec.facts_header.to_string());
        out.push("-".repeat(30));
        for query in &spec.searches {
            for hit in self.search_or_empty(query, 4).await {
                out.push(format!("• {}", hit.title));
                if !hit.snippet.is_empty() {
                    out.push(format!("  {}", truncate_chars(&hit.snippet, 200)));
                }
            }
        }

        out.push(String::new());
        out.push("=".repeat(50));
        out.push(spec.footer.to_string());
        out.join("\n")
    }

    /// Three birthday-flavored searches, flattened and capped.
    async fn celebrity_birthdays(&self, month_name: &str, day: u32) -> Vec<String> {
        let date_str = format!("{month_name} {day}");
        let queries = [
            format!("famous celebrity birthdays {date_str}"),
            format!("actors actresses born {date_str}"),
            format!("famous people born {date_str} actors singers"),
        ];

        let mut celebrities = Vec::new();
        for query in &queries {
            for hit in self.search_or_empty(query, 5).await {
                if hit.snippet.is_empty() {
                    celebrities.push(hit.title);
                } else {
                    celebrities.push(format!(
                        "{}: {}",
                        hit.title,
                        truncate_chars(&hit.snippet, 150)
                    ));
                }
            }
        }
        celebrities.truncate(CELEBRITY_RESULTS);
        celebrities
    }

    async fn search_or_empty(&self, query: &str, max_results: usize) -> Vec<SearchHit> {
        match self.search.search(query, max_results).await {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(query = %query, error = %err, "web search degraded to empty");
                Vec::new()
            }
        }
    }

    async fn opensearch_or_empty(&self, query: &str, limit: usize) -> Vec<PageHit> {
        match self.wikipedia.opensearch(query, limit).await {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(query = %query, error = %err, "wikipedia search degraded to empty");
                Vec::new()
            }
        }
    }

    async fn summary_or_none(&self, title: &str) -> Option<String> {
        match self.wikipedia.summary(title).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(title = %title, error = %err, "wikipedia summary degraded to empty");
                None
            }
        }
    }
}

fn user_error(err: &TriviumError) -> String {
    format!("❌ Error: {err}")
}
