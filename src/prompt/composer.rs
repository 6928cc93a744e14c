//! Local prompt composition by random sampling from the vocabulary tables.
//!
//! Every function takes the random source explicitly so callers can seed it;
//! production code passes `rand::thread_rng()`.
use rand::Rng;
use std::sync::Arc;

use crate::prompt::request::GenerationRequest;
use crate::vocabulary::{Category, Vocabulary};

pub const PART_SEPARATOR: &str = ", ";
pub const NEGATIVE_MIN: usize = 3;
pub const NEGATIVE_MAX: usize = 6;

#[derive(Debug, Clone)]
pub struct RandomComposer {
    vocabulary: Arc<Vocabulary>,
}

impl RandomComposer {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        RandomComposer { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Compose a positive prompt: subject, style, then the enabled optional
    /// parts in the order quality, composition, colors, artist.
    pub fn compose<R: Rng + ?Sized>(&self, request: &GenerationRequest, rng: &mut R) -> String {
        let vocab = &self.vocabulary;
        let mut parts: Vec<&str> = Vec::with_capacity(6);

        parts.push(if request.random_subject() {
            vocab.pick(Category::Subjects, rng)
        } else {
            request.subject.as_str()
        });
        parts.push(if request.random_style() {
            vocab.pick(Category::Styles, rng)
        } else {
            request.style.as_str()
        });

        let optional = [
            (request.include_quality, Category::QualityModifiers),
            (request.include_composition, Category::Composition),
            (request.include_colors, Category::Colors),
            (request.include_artist, Category::ArtistStyles),
        ];
        for (enabled, category) in optional {
            if enabled {
                parts.push(vocab.pick(category, rng));
            }
        }

        parts.join(PART_SEPARATOR)
    }

    /// Compose a negative prompt of 3 to 6 distinct negative terms.
    pub fn compose_negative<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let count = rng.gen_range(NEGATIVE_MIN..=NEGATIVE_MAX);
        self.vocabulary
            .sample(Category::NegativeTerms, count, rng)
            .join(PART_SEPARATOR)
    }
}
