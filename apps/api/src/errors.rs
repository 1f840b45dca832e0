use std::time::Duration;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Why a generation tier failed to produce a result.
///
/// None of these ever reach an API caller: the generation service logs them
/// and degrades to the static fallback instead.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("remote generator failed: {0}")]
    Transport(#[from] LlmError),

    #[error("remote generator timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("could not decode generated content: {0}")]
    Decode(String),

    #[error("invalid generation input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        GenerationError::Decode(e.to_string())
    }
}
