//! Generation Service — the three-tier contract shared by every domain.
//!
//! Flow per call:
//!   remote enabled → remote generator + response parser, else static fallback
//!   remote disabled → heuristic generator, else static fallback
//!
//! Each tier runs at most once. Nothing here returns an error to the caller:
//! tier failures are logged and absorbed into the static fallback.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::GenerationSettings;
use crate::errors::GenerationError;
use crate::llm_client::RemoteGenerator;

/// The tier that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Remote,
    Heuristic,
    Fallback,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Remote => "remote",
            Tier::Heuristic => "heuristic",
            Tier::Fallback => "fallback",
        }
    }
}

/// A generated result tagged with the tier that produced it.
#[derive(Debug, Clone)]
pub struct Generated<T> {
    pub tier: Tier,
    pub output: T,
}

impl<T> Generated<T> {
    pub fn into_output(self) -> T {
        self.output
    }
}

/// The domain-specific parts of a generation service.
///
/// Implement this to add a domain without touching the tier logic.
pub trait GenerationDomain: Send + Sync {
    type Input: Send + Sync;
    type Output: Send;

    /// Short name used in logs.
    const NAME: &'static str;

    fn system_prompt(&self) -> String;

    fn build_prompt(&self, input: &Self::Input) -> String;

    /// Decodes raw remote text into the domain shape.
    fn parse(&self, raw: &str) -> Result<Self::Output, GenerationError>;

    /// Deterministic, offline substitute for the remote call.
    fn heuristic(&self, input: &Self::Input) -> Result<Self::Output, GenerationError>;

    /// Input-independent result. Must not fail.
    fn fallback(&self) -> Self::Output;
}

/// Three-tier generation over one domain.
#[derive(Clone)]
pub struct GenerationService<D> {
    domain: D,
    remote: Arc<dyn RemoteGenerator>,
    settings: GenerationSettings,
}

impl<D: GenerationDomain> GenerationService<D> {
    pub fn new(domain: D, remote: Arc<dyn RemoteGenerator>, settings: GenerationSettings) -> Self {
        Self {
            domain,
            remote,
            settings,
        }
    }

    /// Produces a result for `input`, degrading tier by tier. Never fails.
    pub async fn generate(&self, user_id: &str, input: &D::Input) -> Generated<D::Output> {
        if self.settings.remote_enabled() {
            info!("{} generation for user {user_id}: remote tier", D::NAME);
            match self.remote_tier(input).await {
                Ok(output) => Generated {
                    tier: Tier::Remote,
                    output,
                },
                Err(e) => {
                    warn!(
                        "{} remote tier failed for user {user_id}, using static fallback: {e}",
                        D::NAME
                    );
                    self.fallback()
                }
            }
        } else {
            info!("{} generation for user {user_id}: heuristic tier", D::NAME);
            match self.domain.heuristic(input) {
                Ok(output) => Generated {
                    tier: Tier::Heuristic,
                    output,
                },
                Err(e) => {
                    warn!(
                        "{} heuristic tier failed for user {user_id}, using static fallback: {e}",
                        D::NAME
                    );
                    self.fallback()
                }
            }
        }
    }

    /// The static fallback, for callers that could not even build an input.
    pub fn fallback(&self) -> Generated<D::Output> {
        Generated {
            tier: Tier::Fallback,
            output: self.domain.fallback(),
        }
    }

    async fn remote_tier(&self, input: &D::Input) -> Result<D::Output, GenerationError> {
        let prompt = self.domain.build_prompt(input);
        let system = self.domain.system_prompt();

        let raw = tokio::time::timeout(
            self.settings.timeout,
            self.remote.complete(&system, &prompt),
        )
        .await
        .map_err(|_| GenerationError::Timeout(self.settings.timeout))??;

        self.domain.parse(&raw)
    }
}
