//! # Language Model Module
//!
//! The classifier only needs one capability from a language model: turn a
//! prompt into a text completion. [`LanguageModel`] captures exactly that, so
//! the classifier can run against the Groq client in production and against
//! scripted fakes in tests.

mod groq;

use async_trait::async_trait;

use crate::Res;

pub use groq::GroqClient;

/// A single-shot text completion provider.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Res<String>;
}
