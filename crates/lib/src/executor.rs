//! # AI Invocation Adapter
//!
//! Executes one task against the completion provider and converts every
//! failure mode into a settled [`TaskOutcome`]. Nothing escapes this boundary
//! as an error: transport faults, non-success statuses, empty bodies, and
//! unparseable output all become `success = false` outcomes with a
//! human-readable message.

use crate::providers::ai::AiProvider;
use crate::types::{TaskDescriptor, TaskOutcome, TaskPayload};
use crate::validate::{validate_payload, ValidationPolicy};
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, warn};

/// Runs one enhancement task. Exactly one provider call is made; no retries.
///
/// `processing_time_ms` is wall-clock time around the provider call, measured
/// on the success and the failure path alike.
pub async fn execute_task(
    provider: &dyn AiProvider,
    descriptor: &TaskDescriptor,
    policy: ValidationPolicy,
) -> TaskOutcome {
    let started = Instant::now();
    debug!(
        prompt_type = %descriptor.prompt_type,
        model = %descriptor.model,
        "--> Executing enhancement task"
    );

    let completion = match provider
        .generate_structured(
            &descriptor.system_prompt,
            &descriptor.user_prompt,
            &descriptor.model,
            descriptor.max_tokens,
        )
        .await
    {
        Ok(completion) => completion,
        Err(e) => {
            warn!(prompt_type = %descriptor.prompt_type, "Provider call failed: {e}");
            return failure(descriptor, started, 0, e.to_string());
        }
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;

    let raw: Value = match serde_json::from_str(&completion.content) {
        Ok(value) => value,
        Err(e) => {
            warn!(prompt_type = %descriptor.prompt_type, "Model output was not valid JSON: {e}");
            return failure(
                descriptor,
                started,
                completion.tokens_used,
                format!("Model output was not valid JSON: {e}"),
            );
        }
    };

    let violations = validate_payload(&raw, descriptor.required_keys);
    if !violations.is_empty() {
        match policy {
            ValidationPolicy::Strict => {
                return failure(
                    descriptor,
                    started,
                    completion.tokens_used,
                    format!("Result failed validation: {}", violations.join("; ")),
                );
            }
            ValidationPolicy::Lenient => {
                warn!(
                    prompt_type = %descriptor.prompt_type,
                    "Merging result despite validation violations: {}",
                    violations.join("; ")
                );
            }
        }
    }

    TaskOutcome {
        prompt_type: descriptor.prompt_type,
        success: true,
        result: Some(payload_from_value(raw)),
        error: None,
        processing_time_ms: elapsed_ms,
        tokens_used: completion.tokens_used,
        model_used: descriptor.model.clone(),
        fallback: false,
    }
}

fn failure(
    descriptor: &TaskDescriptor,
    started: Instant,
    tokens_used: u64,
    error: String,
) -> TaskOutcome {
    TaskOutcome {
        prompt_type: descriptor.prompt_type,
        success: false,
        result: None,
        error: Some(error),
        processing_time_ms: started.elapsed().as_millis() as u64,
        tokens_used,
        model_used: descriptor.model.clone(),
        fallback: false,
    }
}

/// Decodes the raw payload field by field, tolerating wrong-typed fields by
/// falling back to their defaults. Under the lenient policy a payload can
/// reach this point with shape violations, and decoding must still settle.
fn payload_from_value(value: Value) -> TaskPayload {
    let Value::Object(mut object) = value else {
        return TaskPayload::default();
    };

    fn take_map(object: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
        match object.remove(key) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    fn take_array(object: &mut Map<String, Value>, key: &str) -> Vec<Value> {
        match object.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }

    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let notes = match object.remove("notes") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    TaskPayload {
        confidence,
        notes,
        head: take_map(&mut object, "head"),
        links: take_array(&mut object, "links"),
        blocks: take_array(&mut object, "blocks"),
        alts: take_array(&mut object, "alts"),
        schema: take_map(&mut object, "schema"),
    }
}
