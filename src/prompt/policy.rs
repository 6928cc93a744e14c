//! Primary/fallback selection between the LLM and local composition.
//!
//! `PromptGenerator` asks its `PromptSource` first when one is configured and
//! uses the answer verbatim if it is non-empty. Otherwise it composes a prompt
//! from the vocabulary tables. Negative prompts are always composed locally.
use async_trait::async_trait;
use std::sync::Arc;

use crate::prompt::composer::RandomComposer;
use crate::prompt::request::{GenerationRequest, GenerationResult};
use crate::vocabulary::Vocabulary;

/// Something that may produce a positive prompt, or nothing.
#[async_trait]
pub trait PromptSource: Send + Sync {
    async fn try_generate(&self, request: &GenerationRequest) -> Option<String>;
}

#[derive(Clone)]
pub struct PromptGenerator {
    composer: RandomComposer,
    source: Option<Arc<dyn PromptSource>>,
}

impl PromptGenerator {
    /// `source` is `None` when the LLM path is disabled.
    pub fn new(vocabulary: Arc<Vocabulary>, source: Option<Arc<dyn PromptSource>>) -> Self {
        PromptGenerator { composer: RandomComposer::new(vocabulary), source }
    }

    pub fn llm_enabled(&self) -> bool {
        self.source.is_some()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.composer.vocabulary()
    }

    pub async fn generate(&self, request: &GenerationRequest) -> String {
        if let Some(source) = &self.source {
            match source.try_generate(request).await {
                Some(text) if !text.is_empty() => {
                    tracing::info!("Generated prompt via LLM");
                    return text;
                }
                Some(_) => tracing::warn!("LLM returned an empty prompt, falling back to random composition"),
                None => tracing::warn!("LLM unavailable, falling back to random composition"),
            }
        }
        let prompt = self.composer.compose(request, &mut rand::thread_rng());
        tracing::debug!(prompt = %prompt, "Composed prompt locally");
        prompt
    }

    pub fn generate_negative(&self, request: &GenerationRequest) -> String {
        if request.include_negative {
            self.composer.compose_negative(&mut rand::thread_rng())
        } else {
            String::new()
        }
    }

    pub async fn generate_result(&self, request: &GenerationRequest) -> GenerationResult {
        let prompt = self.generate(request).await;
        let negative_prompt = self.generate_negative(request);
        GenerationResult::new(prompt, negative_prompt)
    }
}
