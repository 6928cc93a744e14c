//! Thin HTTP client for an Ollama inference endpoint.
//!
//! - `generate` posts a non-streaming request to `/api/generate`.
//! - `probe` checks reachability via `/api/tags`.
//! - `try_generate` wraps `generate` and turns every failure into `None`.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::prompt::policy::PromptSource;
use crate::prompt::request::GenerationRequest;

pub const SYSTEM_PROMPT: &str = "You are a creative prompt generator for Stable Diffusion AI image generation.
Generate detailed, descriptive prompts that will create beautiful images.
Format your response as a comma-separated list of descriptive terms, similar to Stable Diffusion prompts.
Be specific and creative. Include details about lighting, mood, atmosphere, and visual style.
Keep the prompt under 150 words.";

pub const ANY_STYLE: &str = "any artistic style";
pub const ANY_SUBJECT: &str = "a creative subject";

pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(30);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions { temperature: 0.9, top_p: 0.95, max_tokens: 200 }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateBody<'a> {
    pub model: &'a str,
    pub prompt: String,
    pub system: &'a str,
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: Option<serde_json::Value>,
}

/// Reachability of the inference endpoint as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OllamaStatus {
    Connected,
    Disconnected,
    Unknown,
}

impl OllamaStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OllamaStatus::Connected => "connected",
            OllamaStatus::Disconnected => "disconnected",
            OllamaStatus::Unknown => "unknown",
        }
    }
}

/// Requirement phrases in fixed order, or `"none"` when no flag is set.
pub fn requirements_clause(request: &GenerationRequest) -> String {
    let mut requirements = Vec::new();
    if request.include_quality {
        requirements.push("high quality and detailed");
    }
    if request.include_composition {
        requirements.push("good composition");
    }
    if request.include_colors {
        requirements.push("vibrant colors");
    }
    if request.include_artist {
        requirements.push("inspired by famous artists");
    }
    if requirements.is_empty() {
        "none".to_string()
    } else {
        requirements.join(", ")
    }
}

pub fn user_prompt(request: &GenerationRequest) -> String {
    let style = if request.random_style() { ANY_STYLE } else { request.style.as_str() };
    let subject = if request.random_subject() { ANY_SUBJECT } else { request.subject.as_str() };
    format!(
        "Generate a Stable Diffusion prompt for: {} in {} style.\nRequirements: {}\nMake it detailed, creative, and visually descriptive.",
        subject,
        style,
        requirements_clause(request)
    )
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
    options: GenerateOptions,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        OllamaClient {
            client: Client::new(),
            base_url: base,
            model,
            timeout: DEFAULT_GENERATE_TIMEOUT,
            options: GenerateOptions::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a prompt.
    ///
    /// A 2xx reply yields the trimmed `response` field, or an empty string when
    /// that field is missing or not text. Anything else is an error.
    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateBody {
            model: &self.model,
            prompt: user_prompt(request),
            system: SYSTEM_PROMPT,
            stream: false,
            options: self.options,
        };
        tracing::debug!(url = %url, prompt = %body.prompt, "Sending generate request to Ollama");

        let response = self.client.post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            let reply: GenerateReply = response.json().await.map_err(AppError::HttpClient)?;
            let text = reply
                .response
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .trim()
                .to_string();
            Ok(text)
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            Err(AppError::Ollama(format!("Generate failed. Status: {}, Body: {}", status, error_body)))
        }
    }

    /// Lightweight reachability check against `/api/tags`.
    pub async fn probe(&self) -> OllamaStatus {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => OllamaStatus::Connected,
            Ok(response) => {
                tracing::warn!("Ollama probe returned status {}", response.status());
                OllamaStatus::Disconnected
            }
            Err(e) => {
                tracing::warn!("Ollama probe failed: {}", e);
                OllamaStatus::Disconnected
            }
        }
    }
}

#[async_trait]
impl PromptSource for OllamaClient {
    async fn try_generate(&self, request: &GenerationRequest) -> Option<String> {
        match self.generate(request).await {
            Ok(text) => Some(text),
            Err(AppError::HttpClient(e)) if e.is_timeout() => {
                tracing::warn!("Ollama request timed out after {:?}", self.timeout);
                None
            }
            Err(e) => {
                tracing::warn!("Error generating prompt with Ollama: {}", e);
                None
            }
        }
    }
}
