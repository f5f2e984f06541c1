//! AI query backend

pub mod gemini;

use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiError};

/// Free-form question answering. Always yields speakable text: either the
/// model's answer or a human-readable description of what went wrong.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn query(&self, prompt: &str) -> String;
}
