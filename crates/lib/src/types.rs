use crate::errors::PromptError;
use crate::providers::ai::{local::LocalAiProvider, AiProvider};
use crate::validate::ValidationPolicy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Identifies which slice of a page an enhancement task targets.
///
/// The set is closed on purpose: the merger dispatches on this tag with an
/// exhaustive `match`, so adding a new task type is a compile-time-visible
/// change rather than a silent runtime fallthrough.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    Head,
    Deeplinks,
    Content,
    Images,
    Schema,
}

impl PromptType {
    /// All task types, in catalog dispatch order.
    pub const ALL: [PromptType; 5] = [
        PromptType::Head,
        PromptType::Deeplinks,
        PromptType::Content,
        PromptType::Images,
        PromptType::Schema,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::Head => "head",
            PromptType::Deeplinks => "deeplinks",
            PromptType::Content => "content",
            PromptType::Images => "images",
            PromptType::Schema => "schema",
        }
    }

    /// The key under which this task's content payload must appear.
    pub fn content_key(&self) -> &'static str {
        match self {
            PromptType::Head => "head",
            PromptType::Deeplinks => "links",
            PromptType::Content => "blocks",
            PromptType::Images => "alts",
            PromptType::Schema => "schema",
        }
    }

    /// The keys a well-formed result payload for this task must contain.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            PromptType::Head => &["confidence", "notes", "head"],
            PromptType::Deeplinks => &["confidence", "notes", "links"],
            PromptType::Content => &["confidence", "notes", "blocks"],
            PromptType::Images => &["confidence", "notes", "alts"],
            PromptType::Schema => &["confidence", "notes", "schema"],
        }
    }
}

impl fmt::Display for PromptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One independent unit of enhancement work, bound to a prompt pair and an
/// expected output shape. Created fresh per request by the catalog and
/// discarded after dispatch.
#[derive(Debug, Clone)]
pub struct TaskDescriptor {
    pub prompt_type: PromptType,
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub required_keys: &'static [&'static str],
}

/// The structured payload a task produces, decoded from the provider's JSON.
///
/// Every field defaults so that a payload which passed (or was exempted from)
/// validation still decodes without panicking on absent keys.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TaskPayload {
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub head: Map<String, Value>,
    #[serde(default)]
    pub links: Vec<Value>,
    #[serde(default)]
    pub blocks: Vec<Value>,
    #[serde(default)]
    pub alts: Vec<Value>,
    #[serde(default)]
    pub schema: Map<String, Value>,
}

/// The resolved result of executing one task: success payload or failure
/// detail. Exactly one is produced per dispatched task, never retried here.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TaskOutcome {
    pub prompt_type: PromptType,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub processing_time_ms: u64,
    #[serde(default)]
    pub tokens_used: u64,
    pub model_used: String,
    #[serde(default)]
    pub fallback: bool,
}

/// Pairing of a task descriptor with its outcome, index-aligned 1:1 with
/// the dispatch order.
#[derive(Debug, Clone)]
pub struct SettlementRecord {
    pub descriptor: TaskDescriptor,
    pub outcome: TaskOutcome,
}

/// Per-task summary recorded in the merged document's metadata.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TaskSummary {
    pub prompt_type: PromptType,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub processing_time_ms: u64,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub changes_count: u64,
}

/// Aggregate bookkeeping over all settled tasks of one request.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EnhancementMetadata {
    pub prompt_count: u64,
    pub successful_prompts: u64,
    pub failed_prompts: u64,
    pub individual_results: Vec<TaskSummary>,
    pub total_changes: u64,
    pub total_processing_time: u64,
    pub total_tokens: u64,
}

/// The unified, caller-facing result of one enhancement request.
///
/// Assembled exactly once, after every dispatched task has settled. A task
/// that failed never contributes to `head`, `blocks`, `links`, `alts`, or
/// `schema`; it surfaces only through `notes` and the metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MergedDocument {
    pub head: Map<String, Value>,
    pub blocks: Vec<Value>,
    pub links: Vec<Value>,
    pub alts: Vec<Value>,
    pub schema: Map<String, Value>,
    pub confidence: f64,
    pub notes: Vec<String>,
    pub metadata: EnhancementMetadata,
}

// --- Upstream input types ---
//
// Supplied by the content pipeline. Opaque to this core beyond being
// interpolated into prompts; no validation is performed on them here.

/// The page as the upstream pipeline sees it.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PageContent {
    #[serde(default)]
    pub head: Map<String, Value>,
    #[serde(default)]
    pub blocks: Vec<Value>,
    #[serde(default)]
    pub links: Vec<Value>,
    #[serde(default)]
    pub images: Vec<Value>,
}

/// Business context interpolated into every prompt.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BusinessProfile {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub trust_signals: Vec<String>,
}

/// Caller instructions for this enhancement run.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Directive {
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub schema_types: Vec<String>,
    /// Optional per-request model override; falls back to the client default.
    #[serde(default)]
    pub model: Option<String>,
}

/// A full enhancement request as a single deserializable payload, for
/// integration with APIs that receive JSON bodies.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub content: PageContent,
    #[serde(default)]
    pub profile: BusinessProfile,
    #[serde(default)]
    pub directive: Directive,
}

// --- Client ---

/// A client that orchestrates one enhancement request end to end:
/// catalog → concurrent dispatch → merge.
#[derive(Clone)]
pub struct Enhancer {
    pub(crate) ai_provider: Arc<dyn AiProvider>,
    pub(crate) default_model: String,
    pub(crate) policy: ValidationPolicy,
}

impl fmt::Debug for Enhancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enhancer")
            .field("default_model", &self.default_model)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `Enhancer` instances.
///
/// Either supply a ready-made [`AiProvider`] or an API URL (plus optional key)
/// from which a [`LocalAiProvider`] is constructed at build time.
#[derive(Default)]
pub struct EnhancerBuilder {
    ai_provider: Option<Arc<dyn AiProvider>>,
    api_url: Option<String>,
    api_key: Option<String>,
    default_model: Option<String>,
    policy: ValidationPolicy,
}

impl EnhancerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a pre-constructed AI provider.
    pub fn ai_provider(mut self, provider: Arc<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Sets the OpenAI-compatible completions endpoint URL.
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Sets the bearer token for the completions endpoint.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the model used when the directive does not override it.
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Sets how validation violations are treated (default: strict).
    pub fn validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the `Enhancer`.
    ///
    /// Fails with [`PromptError::MissingApiUrl`] when neither a provider nor
    /// an API URL was supplied.
    pub fn build(self) -> Result<Enhancer, PromptError> {
        let ai_provider = match self.ai_provider {
            Some(provider) => provider,
            None => {
                let api_url = self.api_url.ok_or(PromptError::MissingApiUrl)?;
                Arc::new(LocalAiProvider::new(api_url, self.api_key)?) as Arc<dyn AiProvider>
            }
        };
        Ok(Enhancer {
            ai_provider,
            default_model: self
                .default_model
                .unwrap_or_else(|| "gpt-4o-mini".to_string()),
            policy: self.policy,
        })
    }
}
