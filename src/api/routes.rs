//! Shared state and router construction.
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::config::Config;
use crate::ollama::OllamaClient;
use crate::prompt::{PromptGenerator, PromptSource};
use crate::vocabulary::Vocabulary;

pub struct AppState {
    pub generator: PromptGenerator,
    pub ollama: OllamaClient,
}

impl AppState {
    /// Wire the Ollama client into the generator only when `USE_LLM` is on.
    pub fn new(config: &Config, vocabulary: Vocabulary) -> Self {
        let ollama = OllamaClient::new(config.ollama_url.clone(), config.ollama_model.clone())
            .with_timeout(config.ollama_timeout);
        let source: Option<Arc<dyn PromptSource>> = if config.use_llm {
            Some(Arc::new(ollama.clone()))
        } else {
            None
        };
        AppState {
            generator: PromptGenerator::new(Arc::new(vocabulary), source),
            ollama,
        }
    }

    pub fn from_parts(generator: PromptGenerator, ollama: OllamaClient) -> Self {
        AppState { generator, ollama }
    }

    pub fn llm_enabled(&self) -> bool {
        self.generator.llm_enabled()
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/generate", get(handlers::generate_get).post(handlers::generate_post))
        .route("/api/styles", get(handlers::styles))
        .route("/api/subjects", get(handlers::subjects))
        .route("/api/vocabulary", get(handlers::vocabulary_categories))
        .route("/api/vocabulary/:category", get(handlers::vocabulary_category))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
