//! Request and result value types for prompt generation.
use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::params::{flag, text};

/// Sentinel meaning "let the generator choose".
pub const RANDOM: &str = "random";

/// Line separating the positive and negative halves of `full_prompt`.
pub const NEGATIVE_DELIMITER: &str = "\nNegative prompt: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub style: String,
    pub subject: String,
    pub include_artist: bool,
    pub include_quality: bool,
    pub include_composition: bool,
    pub include_colors: bool,
    pub include_negative: bool,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            style: RANDOM.to_string(),
            subject: RANDOM.to_string(),
            include_artist: false,
            include_quality: true,
            include_composition: true,
            include_colors: true,
            include_negative: true,
        }
    }
}

impl GenerationRequest {
    /// Build a request from loosely typed parameters, defaulting anything missing.
    pub fn from_params(params: &Map<String, Value>) -> Self {
        let d = GenerationRequest::default();
        GenerationRequest {
            style: text(params, "style", &d.style),
            subject: text(params, "subject", &d.subject),
            include_artist: flag(params, "include_artist", d.include_artist),
            include_quality: flag(params, "include_quality", d.include_quality),
            include_composition: flag(params, "include_composition", d.include_composition),
            include_colors: flag(params, "include_colors", d.include_colors),
            include_negative: flag(params, "include_negative", d.include_negative),
        }
    }

    pub fn random_style(&self) -> bool {
        self.style == RANDOM
    }

    pub fn random_subject(&self) -> bool {
        self.subject == RANDOM
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub prompt: String,
    pub negative_prompt: String,
    pub full_prompt: String,
}

impl GenerationResult {
    pub fn new(prompt: String, negative_prompt: String) -> Self {
        let full_prompt = if negative_prompt.is_empty() {
            prompt.clone()
        } else {
            format!("{}{}{}", prompt, NEGATIVE_DELIMITER, negative_prompt)
        };
        GenerationResult { prompt, negative_prompt, full_prompt }
    }
}
