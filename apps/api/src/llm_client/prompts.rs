// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Closing instruction for every generation prompt. Providers are sent a
/// single user message, so JSON-only output is requested inline.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only, matching the schema above exactly. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
