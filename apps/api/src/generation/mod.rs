// Generation engine: quest recommendations and reflection analysis.
// Both domains share the three-tier contract in `service`.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod handlers;
pub mod prompts;
pub mod quests;
pub mod reflections;
pub mod service;
