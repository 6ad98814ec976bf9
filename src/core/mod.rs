//! Core completion modules
//!
//! Contains the completion backend trait and the OpenAI client.

pub mod openai;

use crate::error::TweakResult;
use async_trait::async_trait;

/// Interface to a remote completion service.
///
/// Implementors encapsulate transport and endpoint schemas; the
/// executor stays decoupled from any particular provider.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Rewrite `input` per `instruction` and return the replacement text
    async fn edit(&self, input: &str, instruction: &str) -> TweakResult<String>;

    /// Answer a free-form prompt and return the response text
    async fn complete(&self, prompt: &str) -> TweakResult<String>;
}
