//! Pure Gemini REST API client
//!
//! A minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateContentRequest};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let text = client
//!     .generate_text(
//!         "gemini-1.5-flash-latest",
//!         GenerateContentRequest::user("Hello!").temperature(0.6),
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Abort requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Call `generateContent` for a model.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let mut builder = self
            .http_client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            // reqwest errors carry the URL, which carries the key.
            let e = e.without_url();
            warn!(error = %e, "Gemini request failed");
            GeminiError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.without_url().to_string()))?;

        debug!(
            model = %model,
            candidates = body.candidates.len(),
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(body)
    }

    /// Call `generateContent` and return the first candidate's text.
    pub async fn generate_text(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String> {
        Ok(self.generate_content(model, request).await?.text())
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("AIza-test")
            .with_base_url("https://proxy.example.com/v1beta/")
            .with_timeout(Duration::from_secs(15));

        assert_eq!(client.base_url(), "https://proxy.example.com/v1beta");
        assert_eq!(client.timeout, Some(Duration::from_secs(15)));
        assert_eq!(
            client.endpoint("gemini-1.5-flash-latest"),
            "https://proxy.example.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = GeminiClient::new("AIza-secret");
        assert!(!format!("{:?}", client).contains("AIza"));
    }

    #[test]
    fn test_network_error_is_reported() {
        let client = GeminiClient::new("k").with_base_url("http://127.0.0.1:9");
        let request = GenerateContentRequest::user("hola");

        let result = tokio_test::block_on(client.generate_text("m", &request));
        assert!(matches!(result, Err(GeminiError::Network(_))));
    }
}
