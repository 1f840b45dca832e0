use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Credential value meaning "no real API key configured".
pub const PLACEHOLDER_API_KEY: &str = "mock-api-key";

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub use_real_api: bool,
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = match std::env::var("LLM_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            use_real_api: std::env::var("USE_REAL_API")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| PLACEHOLDER_API_KEY.to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            llm_timeout: Duration::from_secs(timeout_secs),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The slice of configuration each generation service needs.
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            use_real_api: self.use_real_api,
            api_key: self.openai_api_key.clone(),
            timeout: self.llm_timeout,
        }
    }
}

/// Routing inputs for the three-tier generation contract.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub use_real_api: bool,
    pub api_key: String,
    pub timeout: Duration,
}

impl GenerationSettings {
    /// Remote generation runs only when switched on AND a real credential is present.
    pub fn remote_enabled(&self) -> bool {
        let key = self.api_key.trim();
        self.use_real_api && !key.is_empty() && key != PLACEHOLDER_API_KEY
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            use_real_api: false,
            api_key: PLACEHOLDER_API_KEY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}
