pub mod tables;

pub use tables::{Category, Vocabulary, VocabularyFile};
