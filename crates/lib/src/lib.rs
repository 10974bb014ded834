//! # Page Enhancement Orchestrator
//!
//! This crate splits one "enhance this page" request into independent
//! generative-text tasks (page metadata, deep links, body content, image alt
//! text, structured schema), executes them concurrently against a completion
//! provider, and deterministically combines their outcomes — including
//! partial failures — into one coherent [`MergedDocument`].
//!
//! The caller-visible contract is best-effort: no single task failure aborts
//! a request. A failed task surfaces as a degraded overall confidence plus an
//! explanatory per-task note identifying exactly which section failed and why.

pub mod catalog;
pub mod dispatch;
pub mod errors;
pub mod executor;
pub mod fallback;
pub mod merge;
pub mod prompts;
pub mod providers;
pub mod types;
pub mod validate;

pub use errors::PromptError;
pub use types::{
    BusinessProfile, Directive, EnhanceRequest, Enhancer, EnhancerBuilder, EnhancementMetadata,
    MergedDocument, PageContent, PromptType, SettlementRecord, TaskDescriptor, TaskOutcome,
    TaskPayload, TaskSummary,
};
pub use validate::ValidationPolicy;

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

impl Enhancer {
    /// Runs one full enhancement request: builds the task catalog, dispatches
    /// every task concurrently, waits for all of them to settle, and merges
    /// the settlements in catalog order.
    ///
    /// This never fails for per-task reasons; an all-failed batch still
    /// yields a structurally valid document with `confidence == 0`.
    pub async fn enhance_page(
        &self,
        content: &PageContent,
        profile: &BusinessProfile,
        directive: &Directive,
    ) -> MergedDocument {
        info!(brand = %profile.brand, "[enhance_page] starting enhancement request");
        let descriptors = catalog::build_catalog(content, profile, directive, &self.default_model);
        let settlements = dispatch::dispatch_tasks(
            Arc::clone(&self.ai_provider),
            descriptors,
            self.policy,
        )
        .await;
        merge::merge_outcomes(&settlements)
    }

    /// Runs an enhancement request from a single JSON payload.
    ///
    /// This allows for easy integration with APIs that receive JSON bodies.
    pub async fn enhance_from_value(&self, value: Value) -> Result<MergedDocument, PromptError> {
        let request: EnhanceRequest = serde_json::from_value(value)?;
        Ok(self
            .enhance_page(&request.content, &request.profile, &request.directive)
            .await)
    }
}
