use anyhow::{Context, Result};
use dotenvy::dotenv;
use ideation::{ApiCredentials, SecretString};
use std::env;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_SEMANTIC_RATE_LIMIT_MS: u64 = 1000;

/// Runner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means ideas come from templates only.
    pub gemini: Option<ApiCredentials>,
    pub semantic_scholar_api_key: Option<SecretString>,
    pub semantic_rate_limit_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let model = env::var("GEMINI_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        Ok(Self {
            gemini: env::var("GEMINI_API_KEY")
                .ok()
                .and_then(SecretString::non_blank)
                .map(|key| ApiCredentials::new(key.expose()).with_model(model)),
            semantic_scholar_api_key: env::var("SEMANTIC_SCHOLAR_API_KEY")
                .ok()
                .and_then(SecretString::non_blank),
            semantic_rate_limit_ms: match env::var("SEMANTIC_RATE_LIMIT_MS") {
                Ok(value) => value
                    .trim()
                    .parse()
                    .context("SEMANTIC_RATE_LIMIT_MS must be a number of milliseconds")?,
                Err(_) => DEFAULT_SEMANTIC_RATE_LIMIT_MS,
            },
        })
    }
}
