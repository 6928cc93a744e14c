//! Stable Diffusion prompt generator library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `ollama`: Thin client for an Ollama inference endpoint.
//! - `prompt`: Request types, random composition and the LLM/fallback policy.
//! - `vocabulary`: Fixed term lists sampled by the composer.
//! - `utils`: Loose request-parameter parsing.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `OllamaClient`,
//! `PromptGenerator`, and `Vocabulary`.
pub mod api;
pub mod ollama;
pub mod prompt;
pub mod vocabulary;
pub mod utils;
pub mod config;
pub mod error;

pub use config::Config;
pub use ollama::client::OllamaClient;
pub use prompt::policy::PromptGenerator;
pub use vocabulary::tables::Vocabulary;
