//! # Task Dispatcher Tests
//!
//! Verifies the wait-all join: every task settles, settlement order follows
//! catalog order regardless of which response arrives first, and a failing
//! task never blocks or aborts the rest of the batch.

mod common;

use common::setup_tracing;
use pageforge::catalog::build_catalog;
use pageforge::dispatch::dispatch_tasks;
use pageforge::{
    BusinessProfile, Directive, EnhancerBuilder, PageContent, PromptType, ValidationPolicy,
};
use pageforge_test_utils::MockAiProvider;
use serde_json::json;
use std::sync::Arc;

// Unique substrings of each task's system prompt, used as mock keys.
const HEAD_KEY: &str = "SEO copywriter";
const DEEPLINKS_KEY: &str = "information architect";
const CONTENT_KEY: &str = "content editor";
const IMAGES_KEY: &str = "accessibility auditor";
const SCHEMA_KEY: &str = "schema.org";

fn catalog() -> Vec<pageforge::TaskDescriptor> {
    build_catalog(
        &PageContent::default(),
        &BusinessProfile::default(),
        &Directive::default(),
        "test-model",
    )
}

fn payload_for(prompt_type: PromptType) -> String {
    let content_value = match prompt_type {
        PromptType::Head => json!({"title": "A"}),
        PromptType::Schema => json!({"@type": "LocalBusiness"}),
        _ => json!([{"value": prompt_type.as_str()}]),
    };
    let mut payload = serde_json::Map::new();
    payload.insert("confidence".to_string(), json!(0.9));
    payload.insert("notes".to_string(), json!([format!("{prompt_type} done")]));
    payload.insert(prompt_type.content_key().to_string(), content_value);
    serde_json::Value::Object(payload).to_string()
}

fn mock_with_all_tasks(provider: &MockAiProvider, latencies: [u64; 5]) {
    let keys = [HEAD_KEY, DEEPLINKS_KEY, CONTENT_KEY, IMAGES_KEY, SCHEMA_KEY];
    for ((key, prompt_type), latency_ms) in keys.iter().zip(PromptType::ALL).zip(latencies) {
        provider.add_response_with(key, &payload_for(prompt_type), 10, latency_ms);
    }
}

#[tokio::test]
async fn settlement_order_follows_catalog_order_under_staggered_latency() {
    // --- 1. Arrange ---
    setup_tracing();
    let provider = MockAiProvider::new();
    // Earlier catalog entries respond slowest.
    mock_with_all_tasks(&provider, [120, 90, 60, 30, 0]);

    // --- 2. Act ---
    let settlements = dispatch_tasks(Arc::new(provider), catalog(), ValidationPolicy::Strict).await;

    // --- 3. Assert ---
    assert_eq!(settlements.len(), 5);
    let order: Vec<PromptType> = settlements.iter().map(|s| s.outcome.prompt_type).collect();
    assert_eq!(order, PromptType::ALL.to_vec());
    assert!(settlements.iter().all(|s| s.outcome.success));
    for settlement in &settlements {
        assert_eq!(
            settlement.descriptor.prompt_type,
            settlement.outcome.prompt_type
        );
    }
}

#[tokio::test]
async fn one_failing_task_does_not_abort_the_batch() {
    // --- 1. Arrange ---
    setup_tracing();
    let failing = MockAiProvider::new();
    // Content fails at the provider, everything else succeeds.
    for (key, prompt_type) in [
        (HEAD_KEY, PromptType::Head),
        (DEEPLINKS_KEY, PromptType::Deeplinks),
        (IMAGES_KEY, PromptType::Images),
        (SCHEMA_KEY, PromptType::Schema),
    ] {
        failing.add_response(key, &payload_for(prompt_type));
    }
    failing.add_failure(CONTENT_KEY, "upstream timeout");

    // --- 2. Act ---
    let settlements = dispatch_tasks(Arc::new(failing), catalog(), ValidationPolicy::Strict).await;

    // --- 3. Assert ---
    assert_eq!(settlements.len(), 5);
    let content = &settlements[2].outcome;
    assert_eq!(content.prompt_type, PromptType::Content);
    assert!(!content.success);
    assert!(content.error.as_deref().unwrap().contains("upstream timeout"));
    let successes = settlements.iter().filter(|s| s.outcome.success).count();
    assert_eq!(successes, 4);
}

#[tokio::test]
async fn unprogrammed_provider_still_settles_every_slot() {
    setup_tracing();
    let provider = MockAiProvider::new();

    let settlements = dispatch_tasks(Arc::new(provider), catalog(), ValidationPolicy::Strict).await;

    assert_eq!(settlements.len(), 5);
    assert!(settlements.iter().all(|s| !s.outcome.success));
    assert!(settlements.iter().all(|s| s.outcome.error.is_some()));
}

#[tokio::test]
async fn enhance_page_runs_all_tasks_and_merges() {
    // --- 1. Arrange ---
    setup_tracing();
    let provider = MockAiProvider::new();
    mock_with_all_tasks(&provider, [0; 5]);
    let provider_handle = provider.clone();
    let enhancer = EnhancerBuilder::new()
        .ai_provider(Arc::new(provider))
        .default_model("test-model")
        .build()
        .expect("builder with provider must succeed");

    // --- 2. Act ---
    let document = enhancer
        .enhance_page(
            &PageContent::default(),
            &BusinessProfile {
                brand: "Acme Plumbing".to_string(),
                ..Default::default()
            },
            &Directive::default(),
        )
        .await;

    // --- 3. Assert ---
    assert_eq!(provider_handle.get_calls().len(), 5);
    assert_eq!(document.metadata.prompt_count, 5);
    assert_eq!(document.metadata.successful_prompts, 5);
    assert!((document.confidence - 0.9).abs() < 1e-9);
    assert_eq!(document.head.get("title"), Some(&json!("A")));
    assert_eq!(document.blocks.len(), 1);
    assert_eq!(document.links.len(), 1);
    assert_eq!(document.alts.len(), 1);
    assert_eq!(document.schema.get("@type"), Some(&json!("LocalBusiness")));
    assert_eq!(document.metadata.total_tokens, 50);
    // Every task's note arrives prefixed with its own tag.
    for prompt_type in PromptType::ALL {
        assert!(document
            .notes
            .iter()
            .any(|n| n == &format!("[{prompt_type}] {prompt_type} done")));
    }
}

#[tokio::test]
async fn enhance_from_value_accepts_a_json_body() -> anyhow::Result<()> {
    setup_tracing();
    let provider = MockAiProvider::new();
    mock_with_all_tasks(&provider, [0; 5]);
    let enhancer = EnhancerBuilder::new()
        .ai_provider(Arc::new(provider))
        .build()?;

    let document = enhancer
        .enhance_from_value(json!({
            "content": {"head": {"title": "Old"}},
            "profile": {"brand": "Acme"},
            "directive": {"tone": "friendly"}
        }))
        .await?;

    assert_eq!(document.metadata.prompt_count, 5);
    assert_eq!(document.metadata.failed_prompts, 0);
    Ok(())
}
