//! # Enhancement Task Prompts
//!
//! This module contains the hardcoded prompt templates for the five standard
//! enhancement tasks. Each system prompt demands a single valid JSON object
//! whose keys match the task's required output shape; the user prompts carry
//! `{placeholder}` slots that the catalog fills per request.

// --- Page Metadata (head) ---
pub const HEAD_SYSTEM_PROMPT: &str = r#"You are an expert SEO copywriter. Your task is to rewrite the page's head metadata (title, meta description, Open Graph fields) for the given business. Respond ONLY with a valid JSON object with three keys: `head` (an object mapping head field names to their improved string values), `confidence` (a number between 0 and 1), and `notes` (an array of strings describing each change you made). Do not include any other text or explanations."#;
pub const HEAD_USER_PROMPT: &str = r#"# Business Profile
{profile}

# Desired Tone
{tone}

# Current Head Fields
{head}"#;

// --- Deep Links ---
pub const DEEPLINKS_SYSTEM_PROMPT: &str = r#"You are an expert information architect. Your task is to propose internal deep links that connect the page to the business's services. Respond ONLY with a valid JSON object with three keys: `links` (an array of objects, each with `anchor`, `href`, and `reason` fields), `confidence` (a number between 0 and 1), and `notes` (an array of strings). Do not invent URLs that are not derivable from the provided links. Do not include any other text or explanations."#;
pub const DEEPLINKS_USER_PROMPT: &str = r#"# Business Profile
{profile}

# Existing Links
{links}

# Page Blocks
{blocks}"#;

// --- Body Content ---
pub const CONTENT_SYSTEM_PROMPT: &str = r#"You are an expert content editor. Your task is to rewrite the page's content blocks to be clearer and more persuasive for the given business, preserving factual claims and block order. Respond ONLY with a valid JSON object with three keys: `blocks` (an array of rewritten block objects, each with `type` and `text` fields), `confidence` (a number between 0 and 1), and `notes` (an array of strings describing each change). Do not include any other text or explanations."#;
pub const CONTENT_USER_PROMPT: &str = r#"# Business Profile
{profile}

# Desired Tone
{tone}

# Current Blocks
{blocks}"#;

// --- Image Alt Text ---
pub const IMAGES_SYSTEM_PROMPT: &str = r#"You are an expert accessibility auditor. Your task is to write descriptive alt text for the page's images. Respond ONLY with a valid JSON object with three keys: `alts` (an array of objects, each with `src` and `alt` fields, in the same order as the input images), `confidence` (a number between 0 and 1), and `notes` (an array of strings). Do not include any other text or explanations."#;
pub const IMAGES_USER_PROMPT: &str = r#"# Business Profile
{profile}

# Images
{images}"#;

// --- Structured Schema ---
pub const SCHEMA_SYSTEM_PROMPT: &str = r#"You are an expert in schema.org structured data. Your task is to produce one JSON-LD object describing the business and this page, using the requested schema types. Respond ONLY with a valid JSON object with three keys: `schema` (the JSON-LD object, including `@context` and `@type`), `confidence` (a number between 0 and 1), and `notes` (an array of strings). Do not include any other text or explanations."#;
pub const SCHEMA_USER_PROMPT: &str = r#"# Business Profile
{profile}

# Requested Schema Types
{schema_types}

# Page Head
{head}"#;
