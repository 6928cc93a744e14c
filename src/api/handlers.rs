//! Axum request handlers for the HTTP API.
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::ollama::OllamaStatus;
use crate::prompt::{GenerationRequest, GenerationResult};
use crate::utils::params::{from_body, from_query};
use crate::vocabulary::Category;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn generate_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<GenerationResult> {
    let request = GenerationRequest::from_params(&from_query(params));
    generate(&state, request).await
}

pub async fn generate_post(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Json<GenerationResult> {
    let request = GenerationRequest::from_params(&from_body(&body));
    generate(&state, request).await
}

async fn generate(state: &AppState, request: GenerationRequest) -> Json<GenerationResult> {
    tracing::debug!(?request, "Generating prompt");
    Json(state.generator.generate_result(&request).await)
}

pub async fn styles(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "styles": state.generator.vocabulary().terms(Category::Styles) }))
}

pub async fn subjects(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "subjects": state.generator.vocabulary().terms(Category::Subjects) }))
}

pub async fn vocabulary_categories() -> Json<Value> {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    Json(json!({ "categories": names }))
}

pub async fn vocabulary_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> AppResult<Json<Value>> {
    let terms = state
        .generator
        .vocabulary()
        .get(&category)
        .ok_or_else(|| AppError::NotFound(format!("Unknown vocabulary category '{}'", category)))?;
    Ok(Json(json!({ "category": category, "terms": terms })))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let llm_enabled = state.llm_enabled();
    let ollama_status = if llm_enabled {
        state.ollama.probe().await
    } else {
        OllamaStatus::Unknown
    };
    Json(json!({
        "status": "healthy",
        "llm_enabled": llm_enabled,
        "ollama_status": ollama_status.as_str(),
        "ollama_url": state.ollama.base_url(),
        "ollama_model": state.ollama.model()
    }))
}
