//! # Fallback Generator
//!
//! Produces a uniform degraded outcome for a task that could not even be
//! attempted (e.g., its spawned execution panicked before reaching the
//! provider). The merger then never has to special-case a missing slot.

use crate::types::{PromptType, TaskOutcome, TaskPayload};

/// Confidence reported for a task that never produced a real result.
const FALLBACK_CONFIDENCE: f64 = 0.1;

/// Builds a settled failure outcome for a task with no real result.
///
/// The `result` payload is populated (low confidence, one explanatory note)
/// so the outcome has the same shape as every other settlement, but since
/// `success` is false the merger will not take any content from it.
pub fn fallback_outcome(prompt_type: PromptType, error: &str) -> TaskOutcome {
    let payload = TaskPayload {
        confidence: FALLBACK_CONFIDENCE,
        notes: vec![format!(
            "The {prompt_type} enhancement could not be attempted: {error}"
        )],
        ..Default::default()
    };
    TaskOutcome {
        prompt_type,
        success: false,
        result: Some(payload),
        error: Some(error.to_string()),
        processing_time_ms: 0,
        tokens_used: 0,
        model_used: String::new(),
        fallback: true,
    }
}
