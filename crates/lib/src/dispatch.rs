//! # Task Dispatcher
//!
//! Fans one request's tasks out as independent tokio tasks and joins on all
//! of them. The join is a true wait-all: no short-circuit on the first
//! failure or the first success, no cancellation of in-flight tasks, and the
//! settlement list is index-aligned with the input list regardless of
//! completion order.

use crate::executor::execute_task;
use crate::fallback::fallback_outcome;
use crate::providers::ai::AiProvider;
use crate::types::{SettlementRecord, TaskDescriptor};
use crate::validate::ValidationPolicy;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info};

/// Executes every descriptor concurrently and waits for all of them.
///
/// A task whose execution could not even complete (a panicked join) still
/// yields a settlement, produced via the fallback generator, so the merger
/// never sees a missing slot.
pub async fn dispatch_tasks(
    provider: Arc<dyn AiProvider>,
    descriptors: Vec<TaskDescriptor>,
    policy: ValidationPolicy,
) -> Vec<SettlementRecord> {
    info!("Dispatching {} enhancement tasks", descriptors.len());

    let mut handles = Vec::with_capacity(descriptors.len());
    for descriptor in &descriptors {
        let provider = Arc::clone(&provider);
        let descriptor = descriptor.clone();
        handles.push(tokio::spawn(async move {
            execute_task(provider.as_ref(), &descriptor, policy).await
        }));
    }

    let joined = join_all(handles).await;

    descriptors
        .into_iter()
        .zip(joined)
        .map(|(descriptor, joined)| {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(
                        prompt_type = %descriptor.prompt_type,
                        "Task execution did not settle: {e}"
                    );
                    fallback_outcome(
                        descriptor.prompt_type,
                        &format!("task execution panicked: {e}"),
                    )
                }
            };
            SettlementRecord {
                descriptor,
                outcome,
            }
        })
        .collect()
}
