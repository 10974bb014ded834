pub mod local;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// The text and usage accounting returned by one completion call.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    /// The raw message content. For enhancement tasks this is expected to be
    /// a JSON object, but the provider does not parse it.
    pub content: String,
    /// Total tokens consumed, or 0 when the provider omits usage accounting.
    pub tokens_used: u64,
}

/// A trait for interacting with an AI completion provider.
///
/// This defines a common interface for executing one structured-output
/// completion against different backends (an OpenAI-compatible endpoint in
/// production, mocks in tests).
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Performs exactly one completion request with the given system and user
    /// prompts as two ordered messages, requesting a JSON object response
    /// bounded by `max_tokens`.
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        max_tokens: u32,
    ) -> Result<ChatCompletion, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
