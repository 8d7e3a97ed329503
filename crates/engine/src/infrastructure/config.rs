//! Application configuration

use std::env;

use anyhow::{Context, Result};

use crate::infrastructure::openai_compat::{
    DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT_SECS,
};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Narration service credential (`OPENROUTER_API_KEY`, then `API_KEY`)
    pub llm_api_key: Option<String>,
    /// OpenAI-compatible API base URL
    pub llm_base_url: String,
    /// Model used for narration
    pub llm_model: String,
    /// Upper bound on one narration call (seconds)
    pub llm_timeout_secs: u64,

    /// SQLite database path for compendium and player data
    pub database_path: String,
    /// Optional JSON seed imported into the compendium at startup
    pub compendium_seed_path: Option<String>,

    pub server_host: String,
    pub server_port: u16,

    /// CORS allowed origins (comma-separated, or "*" for any)
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            llm_api_key: non_empty("OPENROUTER_API_KEY").or_else(|| non_empty("API_KEY")),
            llm_base_url: non_empty("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_model: non_empty("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout_secs: non_empty("LLM_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?
                .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),

            database_path: non_empty("DATABASE_PATH")
                .unwrap_or_else(|| "./data/questscribe.db".to_string()),
            compendium_seed_path: non_empty("COMPENDIUM_SEED_PATH"),

            server_host: non_empty("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: non_empty("SERVER_PORT")
                .or_else(|| non_empty("PORT"))
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5173,http://127.0.0.1:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}
