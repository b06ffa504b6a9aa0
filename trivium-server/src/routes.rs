//! The tool surface: one POST route per request type.
//!
//! Every handler takes a JSON body of free-text parameters and answers
//! `200 { "text": ... }`, including for malformed input, where the text is
//! the user-facing error line. The composer absorbs upstream failures, so
//! no handler path can surface a 5xx of its own.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use trivium_digest::Composer;

#[derive(Clone)]
pub struct AppState {
    composer: Arc<Composer>,
}

#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResearchParams {
    pub topic: String,
    pub depth: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DailyParams {
    pub date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeeklyParams {
    pub start_date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryParams {
    pub category: String,
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SportsParams {
    pub sport: String,
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScienceParams {
    pub field: String,
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UrlParams {
    pub url: String,
}

pub fn router(composer: Composer) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/tools/research_topic", post(research_topic))
        .route("/tools/daily_digest", post(daily_digest))
        .route("/tools/weekly_digest", post(weekly_digest))
        .route("/tools/entertainment", post(entertainment))
        .route("/tools/sports", post(sports))
        .route("/tools/geography", post(geography))
        .route("/tools/science", post(science))
        .route("/tools/fetch_url", post(fetch_url))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            composer: Arc::new(composer),
        })
}

async fn healthz() -> &'static str {
    "ok"
}

async fn research_topic(
    State(state): State<AppState>,
    Json(params): Json<ResearchParams>,
) -> Json<ToolResponse> {
    let text = state
        .composer
        .research_topic(&params.topic, &params.depth)
        .await;
    Json(ToolResponse { text })
}

async fn daily_digest(
    State(state): State<AppState>,
    Json(params): Json<DailyParams>,
) -> Json<ToolResponse> {
    let text = state.composer.daily_digest(&params.date).await;
    Json(ToolResponse { text })
}

async fn weekly_digest(
    State(state): State<AppState>,
    Json(params): Json<WeeklyParams>,
) -> Json<ToolResponse> {
    let text = state.composer.weekly_digest(&params.start_date).await;
    Json(ToolResponse { text })
}

async fn entertainment(
    State(state): State<AppState>,
    Json(params): Json<CategoryParams>,
) -> Json<ToolResponse> {
    let text = state
        .composer
        .entertainment(&params.category, &params.query)
        .await;
    Json(ToolResponse { text })
}

async fn sports(
    State(state): State<AppState>,
    Json(params): Json<SportsParams>,
) -> Json<ToolResponse> {
    let text = state.composer.sports(&params.sport, &params.query).await;
    Json(ToolResponse { text })
}

async fn geography(
    State(state): State<AppState>,
    Json(params): Json<CategoryParams>,
) -> Json<ToolResponse> {
    let text = state
        .composer
        .geography(&params.query, &params.category)
        .await;
    Json(ToolResponse { text })
}

async fn science(
    State(state): State<AppState>,
    Json(params): Json<ScienceParams>,
) -> Json<ToolResponse> {
    let text = state.composer.science(&params.field, &params.query).await;
    Json(ToolResponse { text })
}

async fn fetch_url(
    State(state): State<AppState>,
    Json(params): Json<UrlParams>,
) -> Json<ToolResponse> {
    let text = state.composer.fetch_url(&params.url).await;
    Json(ToolResponse { text })
}
