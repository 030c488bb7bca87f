//! Application configuration. Storage backend, paths, coach API.

use serde::Deserialize;
use std::str::FromStr;

/// Default request timeout for the coach API, seconds.
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 15;

/// Where profile and logs are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Single JSON file in the data directory.
    #[default]
    Json,
    /// SQLite key-value table in the data directory.
    Sqlite,
    /// Process memory only (nothing is saved).
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StoreBackend::Json),
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "unknown store backend '{}' (expected json, sqlite or memory)",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Data directory. Read from HYDRATE_DATA_DIR.
    pub data_dir: Option<String>,

    /// Storage backend name. Read from HYDRATE_STORE.
    #[serde(default)]
    pub store: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Coach (AI advice) Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// AI API key (e.g., OpenAI). Read from HYDRATE_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from HYDRATE_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// AI model name. Defaults to "gpt-4o-mini". Read from HYDRATE_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Coach request timeout in seconds. Read from HYDRATE_AI_TIMEOUT_SECS.
    #[serde(default)]
    pub ai_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("HYDRATE"));
        if let Ok(path) = std::env::var("HYDRATE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Environment values arrive as strings; parse the numeric one explicitly.
        if let Ok(s) = std::env::var("HYDRATE_AI_TIMEOUT_SECS") {
            if let Ok(n) = s.parse::<u64>() {
                cfg.ai_timeout_secs = Some(n);
            }
        }
        Ok(cfg)
    }

    /// Returns the data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns the configured backend. Defaults to JSON; unknown names are an error.
    pub fn store_backend(&self) -> Result<StoreBackend, String> {
        match &self.store {
            Some(name) => name.parse(),
            None => Ok(StoreBackend::default()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Coach Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the AI API key if configured. Reads from config or HYDRATE_AI_API_KEY env.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("HYDRATE_AI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .or_else(|| std::env::var("HYDRATE_AI_API_URL").ok())
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the AI model name. Defaults to "gpt-4o-mini".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .or_else(|| std::env::var("HYDRATE_AI_MODEL").ok())
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    /// Returns the coach request timeout in seconds. Defaults to 15.
    pub fn ai_timeout_secs_or_default(&self) -> u64 {
        self.ai_timeout_secs.unwrap_or(DEFAULT_AI_TIMEOUT_SECS)
    }
}
