#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared helpers for the integration tests: tracing setup and shorthand
//! constructors for settlements fed to the merger.

use pageforge::{PromptType, SettlementRecord, TaskDescriptor, TaskOutcome, TaskPayload};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

/// A minimal descriptor for merger-level tests, where prompts don't matter.
pub fn descriptor(prompt_type: PromptType) -> TaskDescriptor {
    TaskDescriptor {
        prompt_type,
        system_prompt: String::new(),
        user_prompt: String::new(),
        model: "test-model".to_string(),
        max_tokens: 512,
        required_keys: prompt_type.required_keys(),
    }
}

/// Builds a successful settlement from a raw payload value.
pub fn success(
    prompt_type: PromptType,
    payload: serde_json::Value,
    processing_time_ms: u64,
    tokens_used: u64,
) -> SettlementRecord {
    let payload: TaskPayload =
        serde_json::from_value(payload).expect("test payload must deserialize");
    SettlementRecord {
        descriptor: descriptor(prompt_type),
        outcome: TaskOutcome {
            prompt_type,
            success: true,
            result: Some(payload),
            error: None,
            processing_time_ms,
            tokens_used,
            model_used: "test-model".to_string(),
            fallback: false,
        },
    }
}

/// Builds a failed settlement.
pub fn failure(prompt_type: PromptType, error: &str, processing_time_ms: u64) -> SettlementRecord {
    SettlementRecord {
        descriptor: descriptor(prompt_type),
        outcome: TaskOutcome {
            prompt_type,
            success: false,
            result: None,
            error: Some(error.to_string()),
            processing_time_ms,
            tokens_used: 0,
            model_used: "test-model".to_string(),
            fallback: false,
        },
    }
}
