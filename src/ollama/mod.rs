pub mod client;

pub use client::{OllamaClient, OllamaStatus};
