// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Setting shared by every prompt so generated content stays in-universe.
pub const UNIVERSE_NAME: &str = "NEBULA ODYSSEY";
