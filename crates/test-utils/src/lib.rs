//! # Shared Test Utilities
//!
//! A programmable [`AiProvider`] mock for testing the dispatcher, merger, and
//! policy behavior without a network. Responses are keyed by a unique
//! substring of the system prompt; unmatched prompts fail, which doubles as
//! the partial-failure path in tests.

use async_trait::async_trait;
use pageforge::errors::PromptError;
use pageforge::providers::ai::{AiProvider, ChatCompletion};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Scripted {
    Success {
        content: String,
        tokens_used: u64,
        latency_ms: u64,
    },
    Failure {
        error: String,
    },
}

/// A mock AI provider with pre-programmed responses and a call history.
#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<Vec<(String, Scripted)>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a successful JSON response for a specific task.
    /// The key should be a unique substring of the task's system prompt.
    pub fn add_response(&self, key: &str, content: &str) {
        self.add_response_with(key, content, 0, 0);
    }

    /// Like [`MockAiProvider::add_response`], with token accounting and an
    /// artificial latency for response-ordering tests.
    pub fn add_response_with(&self, key: &str, content: &str, tokens_used: u64, latency_ms: u64) {
        self.responses.lock().unwrap().push((
            key.to_string(),
            Scripted::Success {
                content: content.to_string(),
                tokens_used,
                latency_ms,
            },
        ));
    }

    /// Pre-programs a provider-level failure for a specific task.
    pub fn add_failure(&self, key: &str, error: &str) {
        self.responses.lock().unwrap().push((
            key.to_string(),
            Scripted::Failure {
                error: error.to_string(),
            },
        ));
    }

    /// Retrieves the recorded (system, user) prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        _model: &str,
        _max_tokens: u32,
    ) -> Result<ChatCompletion, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| system_prompt.contains(key))
            .map(|(_, scripted)| scripted.clone());

        match scripted {
            Some(Scripted::Success {
                content,
                tokens_used,
                latency_ms,
            }) => {
                if latency_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(latency_ms)).await;
                }
                Ok(ChatCompletion {
                    content,
                    tokens_used,
                })
            }
            Some(Scripted::Failure { error }) => Err(PromptError::AiApi(error)),
            None => Err(PromptError::AiApi(format!(
                "no mock response configured for system prompt: {}",
                system_prompt.chars().take(60).collect::<String>()
            ))),
        }
    }
}
