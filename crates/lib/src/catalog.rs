//! # Task Catalog
//!
//! Static definition of the enhancement tasks for one request: which prompt
//! pair each task sends, which model it runs on, how large its output may be,
//! and which keys its result must contain. Descriptors are built fresh per
//! request from the upstream content map, profile, and directive, and are
//! discarded after dispatch.

use crate::prompts::tasks::{
    CONTENT_SYSTEM_PROMPT, CONTENT_USER_PROMPT, DEEPLINKS_SYSTEM_PROMPT, DEEPLINKS_USER_PROMPT,
    HEAD_SYSTEM_PROMPT, HEAD_USER_PROMPT, IMAGES_SYSTEM_PROMPT, IMAGES_USER_PROMPT,
    SCHEMA_SYSTEM_PROMPT, SCHEMA_USER_PROMPT,
};
use crate::types::{BusinessProfile, Directive, PageContent, PromptType, TaskDescriptor};
use serde_json::Value;

/// Output bound for one task, scaled to how much text it is expected to emit.
fn max_tokens_for(prompt_type: PromptType) -> u32 {
    match prompt_type {
        PromptType::Head => 1000,
        PromptType::Deeplinks => 1500,
        PromptType::Content => 4000,
        PromptType::Images => 1500,
        PromptType::Schema => 2000,
    }
}

fn pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Builds the ordered task list for one enhancement request.
///
/// The order is fixed ([head, deeplinks, content, images, schema]) and is the
/// order the merger later replays settlements in, so "later task wins"
/// collision rules are stable across runs.
pub fn build_catalog(
    content: &PageContent,
    profile: &BusinessProfile,
    directive: &Directive,
    default_model: &str,
) -> Vec<TaskDescriptor> {
    let model = directive.model.as_deref().unwrap_or(default_model);
    let profile_json = pretty(profile);
    let head_json = pretty(&Value::Object(content.head.clone()));
    let blocks_json = pretty(&content.blocks);
    let links_json = pretty(&content.links);
    let images_json = pretty(&content.images);
    let schema_types = if directive.schema_types.is_empty() {
        "LocalBusiness".to_string()
    } else {
        directive.schema_types.join(", ")
    };
    let tone = if directive.tone.is_empty() {
        "professional"
    } else {
        directive.tone.as_str()
    };

    PromptType::ALL
        .iter()
        .map(|&prompt_type| {
            let (system_prompt, user_prompt) = match prompt_type {
                PromptType::Head => (
                    HEAD_SYSTEM_PROMPT.to_string(),
                    HEAD_USER_PROMPT
                        .replace("{profile}", &profile_json)
                        .replace("{tone}", tone)
                        .replace("{head}", &head_json),
                ),
                PromptType::Deeplinks => (
                    DEEPLINKS_SYSTEM_PROMPT.to_string(),
                    DEEPLINKS_USER_PROMPT
                        .replace("{profile}", &profile_json)
                        .replace("{links}", &links_json)
                        .replace("{blocks}", &blocks_json),
                ),
                PromptType::Content => (
                    CONTENT_SYSTEM_PROMPT.to_string(),
                    CONTENT_USER_PROMPT
                        .replace("{profile}", &profile_json)
                        .replace("{tone}", tone)
                        .replace("{blocks}", &blocks_json),
                ),
                PromptType::Images => (
                    IMAGES_SYSTEM_PROMPT.to_string(),
                    IMAGES_USER_PROMPT
                        .replace("{profile}", &profile_json)
                        .replace("{images}", &images_json),
                ),
                PromptType::Schema => (
                    SCHEMA_SYSTEM_PROMPT.to_string(),
                    SCHEMA_USER_PROMPT
                        .replace("{profile}", &profile_json)
                        .replace("{schema_types}", &schema_types)
                        .replace("{head}", &head_json),
                ),
            };
            TaskDescriptor {
                prompt_type,
                system_prompt,
                user_prompt,
                model: model.to_string(),
                max_tokens: max_tokens_for(prompt_type),
                required_keys: prompt_type.required_keys(),
            }
        })
        .collect()
}
