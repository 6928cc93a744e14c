//! Fixed vocabulary tables used for random prompt composition.
//!
//! A `Vocabulary` is built once at startup, either from the built-in lists or
//! from a JSON file, and is read-only afterwards. Construction validates every
//! category so that sampling never has to deal with an empty list.
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{AppError, AppResult};

/// Smallest negative-term list that can satisfy the largest negative sample.
pub const MIN_NEGATIVE_TERMS: usize = 6;

const SUBJECTS: &[&str] = &[
    "a beautiful woman", "a handsome man", "a cute cat", "a majestic dragon",
    "a futuristic robot", "an ancient warrior", "a mystical forest", "a cyberpunk city",
    "a serene landscape", "a magical creature", "a vintage car", "a space station",
    "a steampunk machine", "a fantasy castle", "a modern building", "a peaceful village",
];

const STYLES: &[&str] = &[
    "photorealistic", "digital art", "oil painting", "watercolor", "sketch",
    "anime", "manga", "concept art", "3D render", "pixel art",
    "impressionist", "surrealist", "abstract", "minimalist", "baroque",
    "art nouveau", "vintage", "retro", "cyberpunk", "steampunk",
];

const QUALITY_MODIFIERS: &[&str] = &[
    "high quality", "detailed", "sharp focus", "8k", "4k", "ultra detailed",
    "masterpiece", "best quality", "professional", "award winning",
    "cinematic lighting", "dramatic lighting", "soft lighting", "studio lighting",
];

const ARTIST_STYLES: &[&str] = &[
    "by Greg Rutkowski", "by Artgerm", "by WLOP", "by Alphonse Mucha",
    "by H.R. Giger", "by Zdzisław Beksiński", "by John William Waterhouse",
    "by Leonardo da Vinci", "by Van Gogh", "by Monet", "by Picasso",
];

const COLORS: &[&str] = &[
    "vibrant colors", "muted colors", "monochrome", "pastel colors",
    "dark and moody", "bright and cheerful", "warm tones", "cool tones",
    "golden hour", "blue hour", "sunset colors", "neon colors",
];

const COMPOSITION: &[&str] = &[
    "close-up", "wide shot", "portrait", "landscape", "full body",
    "centered composition", "rule of thirds", "symmetrical", "dynamic angle",
    "bird's eye view", "low angle", "dutch angle", "panoramic",
];

const NEGATIVE_TERMS: &[&str] = &[
    "blurry", "low quality", "jpeg artifacts", "watermark", "text",
    "deformed", "ugly", "bad anatomy", "bad proportions", "extra limbs",
    "mutated", "disfigured", "gross proportions", "malformed", "out of focus",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Subjects,
    Styles,
    QualityModifiers,
    ArtistStyles,
    Colors,
    Composition,
    NegativeTerms,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Subjects,
        Category::Styles,
        Category::QualityModifiers,
        Category::ArtistStyles,
        Category::Colors,
        Category::Composition,
        Category::NegativeTerms,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Subjects => "subjects",
            Category::Styles => "styles",
            Category::QualityModifiers => "quality_modifiers",
            Category::ArtistStyles => "artist_styles",
            Category::Colors => "colors",
            Category::Composition => "composition",
            Category::NegativeTerms => "negative_terms",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// On-disk shape of a vocabulary override file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyFile {
    pub subjects: Vec<String>,
    pub styles: Vec<String>,
    pub quality_modifiers: Vec<String>,
    pub artist_styles: Vec<String>,
    pub colors: Vec<String>,
    pub composition: Vec<String>,
    pub negative_terms: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    subjects: Vec<String>,
    styles: Vec<String>,
    quality_modifiers: Vec<String>,
    artist_styles: Vec<String>,
    colors: Vec<String>,
    composition: Vec<String>,
    negative_terms: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Vocabulary {
    /// Build and validate a vocabulary from explicit lists.
    pub fn new(file: VocabularyFile) -> AppResult<Self> {
        let vocab = Vocabulary {
            subjects: file.subjects,
            styles: file.styles,
            quality_modifiers: file.quality_modifiers,
            artist_styles: file.artist_styles,
            colors: file.colors,
            composition: file.composition,
            negative_terms: file.negative_terms,
        };
        vocab.validate()?;
        Ok(vocab)
    }

    /// The lists shipped with the service.
    pub fn builtin() -> Self {
        Vocabulary {
            subjects: owned(SUBJECTS),
            styles: owned(STYLES),
            quality_modifiers: owned(QUALITY_MODIFIERS),
            artist_styles: owned(ARTIST_STYLES),
            colors: owned(COLORS),
            composition: owned(COMPOSITION),
            negative_terms: owned(NEGATIVE_TERMS),
        }
    }

    /// Load a vocabulary override from a JSON file.
    pub async fn load_from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).await.map_err(|e| {
            AppError::Vocabulary(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file: VocabularyFile = serde_json::from_str(&data).map_err(|e| {
            AppError::Vocabulary(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let vocab = Vocabulary::new(file)?;
        tracing::info!(path = %path.display(), "Loaded vocabulary override");
        Ok(vocab)
    }

    fn validate(&self) -> AppResult<()> {
        for category in Category::ALL {
            let terms = self.terms(category);
            if terms.is_empty() {
                return Err(AppError::Vocabulary(format!(
                    "Category '{}' must not be empty",
                    category.name()
                )));
            }
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(AppError::Vocabulary(format!(
                    "Category '{}' contains an empty term",
                    category.name()
                )));
            }
        }
        if self.negative_terms.len() < MIN_NEGATIVE_TERMS {
            return Err(AppError::Vocabulary(format!(
                "Category 'negative_terms' needs at least {} entries, has {}",
                MIN_NEGATIVE_TERMS,
                self.negative_terms.len()
            )));
        }
        Ok(())
    }

    pub fn terms(&self, category: Category) -> &[String] {
        match category {
            Category::Subjects => &self.subjects,
            Category::Styles => &self.styles,
            Category::QualityModifiers => &self.quality_modifiers,
            Category::ArtistStyles => &self.artist_styles,
            Category::Colors => &self.colors,
            Category::Composition => &self.composition,
            Category::NegativeTerms => &self.negative_terms,
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        Category::from_name(name).map(|c| self.terms(c))
    }

    /// Uniformly pick one term from `category`.
    pub fn pick<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> &str {
        self.terms(category)
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Pick `count` distinct terms from `category`, capped at the category size.
    pub fn sample<R: Rng + ?Sized>(&self, category: Category, count: usize, rng: &mut R) -> Vec<&str> {
        self.terms(category)
            .choose_multiple(rng, count)
            .map(String::as_str)
            .collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::io::Write;

    fn file_from_builtin() -> VocabularyFile {
        let b = Vocabulary::builtin();
        VocabularyFile {
            subjects: b.subjects.clone(),
            styles: b.styles.clone(),
            quality_modifiers: b.quality_modifiers.clone(),
            artist_styles: b.artist_styles.clone(),
            colors: b.colors.clone(),
            composition: b.composition.clone(),
            negative_terms: b.negative_terms.clone(),
        }
    }

    #[test]
    fn builtin_tables_are_valid() {
        let vocab = Vocabulary::builtin();
        vocab.validate().unwrap();
        assert_eq!(vocab.terms(Category::Styles).len(), 20);
        assert_eq!(vocab.terms(Category::Subjects).len(), 16);
        assert_eq!(vocab.terms(Category::NegativeTerms).len(), 15);
    }

    #[test]
    fn lookup_by_name_covers_every_category() {
        let vocab = Vocabulary::builtin();
        for category in Category::ALL {
            assert_eq!(vocab.get(category.name()), Some(vocab.terms(category)));
        }
        assert!(vocab.get("moods").is_none());
    }

    #[test]
    fn rejects_empty_category() {
        let mut file = file_from_builtin();
        file.colors.clear();
        let err = Vocabulary::new(file).unwrap_err();
        assert!(err.to_string().contains("colors"));
    }

    #[test]
    fn rejects_blank_term() {
        let mut file = file_from_builtin();
        file.styles.push("  ".to_string());
        assert!(matches!(Vocabulary::new(file), Err(AppError::Vocabulary(_))));
    }

    #[test]
    fn rejects_short_negative_list() {
        let mut file = file_from_builtin();
        file.negative_terms.truncate(5);
        let err = Vocabulary::new(file).unwrap_err();
        assert!(err.to_string().contains("at least 6"));
    }

    #[test]
    fn sample_returns_distinct_terms() {
        let vocab = Vocabulary::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        for count in 0..=15 {
            let picked = vocab.sample(Category::NegativeTerms, count, &mut rng);
            assert_eq!(picked.len(), count);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), count);
        }
        assert_eq!(vocab.sample(Category::NegativeTerms, 99, &mut rng).len(), 15);
    }

    #[test]
    fn pick_stays_inside_category() {
        let vocab = Vocabulary::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let term = vocab.pick(Category::Composition, &mut rng);
            assert!(vocab.terms(Category::Composition).iter().any(|t| t == term));
        }
    }

    #[tokio::test]
    async fn loads_override_file() {
        let mut file = file_from_builtin();
        file.styles = vec!["ink wash".to_string(), "ukiyo-e".to_string()];
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{}", serde_json::to_string(&file).unwrap()).unwrap();

        let vocab = Vocabulary::load_from_file(tmp.path()).await.unwrap();
        assert_eq!(vocab.terms(Category::Styles), ["ink wash", "ukiyo-e"]);
    }

    #[tokio::test]
    async fn malformed_override_file_is_an_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{{\"styles\": [\"only styles\"]}}").unwrap();
        let err = Vocabulary::load_from_file(tmp.path()).await.unwrap_err();
        assert!(matches!(err, AppError::Vocabulary(_)));
    }
}
