//! API route handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{ApiError, AppState};
use crate::article::Article;
use crate::consts::DEFAULT_HISTORY_LIMIT;
use crate::export;
use crate::sources::SourceEntry;

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub message: String,
    pub results: Vec<Article>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticlesQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

fn processing_error(e: impl std::fmt::Display) -> String {
    format!("Error processing URL: {e}")
}

async fn completed(state: &AppState, results: Vec<Article>) -> Result<Json<ProcessResponse>, ApiError> {
    state
        .store
        .store(&results)
        .await
        .map_err(|e| ApiError::internal(format!("Error storing articles: {e:#}")))?;
    Ok(Json(ProcessResponse {
        message: "Processing completed".to_string(),
        results,
    }))
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the newsreel API" }))
}

pub async fn process(
    State(state): State<AppState>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    Url::parse(req.url.trim()).map_err(|e| ApiError::bad_request(processing_error(e)))?;
    let results = state
        .engine
        .process(&req.url)
        .await
        .map_err(|e| ApiError::internal(processing_error(format!("{e:#}"))))?;
    completed(&state, results).await
}

pub async fn run(State(state): State<AppState>) -> Result<Json<ProcessResponse>, ApiError> {
    let results = state
        .engine
        .run()
        .await
        .map_err(|e| ApiError::internal(format!("Error running sources: {e:#}")))?;
    completed(&state, results).await
}

pub async fn sources(State(state): State<AppState>) -> Json<Vec<SourceEntry>> {
    Json(state.entries.as_ref().clone())
}

pub async fn articles(
    State(state): State<AppState>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let found = match query.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => state.store.recall(q).await,
        _ => {
            state
                .store
                .history(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
                .await
        }
    };
    found
        .map(Json)
        .map_err(|e| ApiError::internal(format!("Error reading articles: {e:#}")))
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let articles = state
        .store
        .history(usize::MAX)
        .await
        .map_err(|e| ApiError::internal(format!("Error reading articles: {e:#}")))?;
    let body = export::to_csv(&articles)
        .map_err(|e| ApiError::internal(format!("Error writing CSV: {e:#}")))?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=articles.csv",
            ),
        ],
        body,
    ))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
