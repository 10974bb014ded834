//! # Result Merger
//!
//! Combines the ordered settlement list into one [`MergedDocument`]. The
//! merge replays settlements in dispatch order, never in network-arrival
//! order, so the output is deterministic for a fixed input: head-key
//! collisions and schema replacement always resolve to the last task in
//! catalog order. The merge is infallible; an all-failed batch produces a
//! structurally valid, empty-content document with zero confidence.

use crate::types::{
    EnhancementMetadata, MergedDocument, PromptType, SettlementRecord, TaskSummary,
};
use tracing::info;

/// Running aggregate for per-task confidences.
///
/// Keeping sum and count explicit makes the zero-successful-tasks case a
/// branch of [`ConfidenceAggregate::average`] instead of a divide guard
/// scattered at the call site.
#[derive(Debug, Default)]
struct ConfidenceAggregate {
    sum: f64,
    count: u64,
}

impl ConfidenceAggregate {
    fn add(&mut self, confidence: f64) {
        self.sum += confidence;
        self.count += 1;
    }

    /// Mean of the observed confidences, clamped to [0, 1]; 0 when nothing
    /// was observed.
    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.sum / self.count as f64).clamp(0.0, 1.0)
        }
    }
}

/// Merges all settled task outcomes into the final document.
pub fn merge_outcomes(settlements: &[SettlementRecord]) -> MergedDocument {
    let mut document = MergedDocument::default();
    let mut aggregate = ConfidenceAggregate::default();
    document.metadata.prompt_count = settlements.len() as u64;

    for record in settlements {
        let outcome = &record.outcome;
        match (&outcome.result, outcome.success) {
            (Some(payload), true) => {
                document.metadata.successful_prompts += 1;

                let changes_count = match outcome.prompt_type {
                    PromptType::Head => {
                        for (key, value) in &payload.head {
                            document.head.insert(key.clone(), value.clone());
                        }
                        payload.head.len() as u64
                    }
                    PromptType::Deeplinks => {
                        document.links.extend(payload.links.iter().cloned());
                        payload.links.len() as u64
                    }
                    PromptType::Content => {
                        document.blocks.extend(payload.blocks.iter().cloned());
                        payload.blocks.len() as u64
                    }
                    PromptType::Images => {
                        document.alts.extend(payload.alts.iter().cloned());
                        payload.alts.len() as u64
                    }
                    PromptType::Schema => {
                        // Wholesale replace: the last successful schema task
                        // wins, no per-key merge.
                        document.schema = payload.schema.clone();
                        u64::from(!payload.schema.is_empty())
                    }
                };

                aggregate.add(payload.confidence);
                for note in &payload.notes {
                    document
                        .notes
                        .push(format!("[{}] {note}", outcome.prompt_type));
                }

                document.metadata.individual_results.push(TaskSummary {
                    prompt_type: outcome.prompt_type,
                    success: true,
                    confidence: Some(payload.confidence),
                    error: None,
                    processing_time_ms: outcome.processing_time_ms,
                    tokens_used: outcome.tokens_used,
                    changes_count,
                });
            }
            _ => {
                document.metadata.failed_prompts += 1;
                let error = outcome
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string());
                document
                    .notes
                    .push(format!("[{}] Failed: {error}", outcome.prompt_type));
                document.metadata.individual_results.push(TaskSummary {
                    prompt_type: outcome.prompt_type,
                    success: false,
                    confidence: None,
                    error: Some(error),
                    processing_time_ms: outcome.processing_time_ms,
                    tokens_used: outcome.tokens_used,
                    changes_count: 0,
                });
            }
        }
    }

    document.confidence = aggregate.average();
    document.metadata.total_changes = document.blocks.len() as u64
        + document.links.len() as u64
        + document.alts.len() as u64
        + document.head.len() as u64
        + u64::from(!document.schema.is_empty());
    document.metadata.total_processing_time = document
        .metadata
        .individual_results
        .iter()
        .map(|summary| summary.processing_time_ms)
        .sum();
    document.metadata.total_tokens = document
        .metadata
        .individual_results
        .iter()
        .map(|summary| summary.tokens_used)
        .sum();

    info!(
        successful = document.metadata.successful_prompts,
        failed = document.metadata.failed_prompts,
        confidence = document.confidence,
        total_changes = document.metadata.total_changes,
        "Merged enhancement outcomes"
    );

    document
}
