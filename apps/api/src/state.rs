use std::sync::Arc;

use crate::config::Config;
use crate::generation::quests::{QuestDomain, QuestService};
use crate::generation::reflections::{ReflectionDomain, ReflectionService};
use crate::llm_client::RemoteGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub quests: QuestService,
    pub reflections: ReflectionService,
}

impl AppState {
    /// Builds both generation services over one remote generator.
    pub fn new(config: Config, remote: Arc<dyn RemoteGenerator>) -> Self {
        let settings = config.generation_settings();
        Self {
            quests: QuestService::new(QuestDomain, remote.clone(), settings.clone()),
            reflections: ReflectionService::new(ReflectionDomain, remote, settings),
            config,
        }
    }
}
