//! Gemini-backed idea generator.

use std::time::Duration;

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateContentRequest};
use tracing::debug;

use crate::error::Result;
use crate::security::ApiCredentials;
use crate::traits::idea_source::{IdeaBatch, IdeaSource};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

const TEMPERATURE: f32 = 0.6;
const MAX_OUTPUT_TOKENS: u32 = 900;
const TIMEOUT: Duration = Duration::from_secs(15);

/// Prompt asking for three differentiated ideas as JSON.
pub fn idea_prompt(topic: &str) -> String {
    format!(
        r#"You are a senior innovation strategist and startup mentor.
The user wants to explore opportunities around: "{topic}".

Return JSON with an "ideas" array of EXACTLY 3 objects, each with the keys:
{{
  "ideaTitle": "...",
  "ideaSummary": "...",
  "innovationAngle": "...",
  "validationFocus": ["...", "..."],
  "actionSteps": ["...", "..."],
  "targetPersona": "...",
  "trendSignals": ["...", "..."]
}}

Write every value in Spanish. Each idea must be specific, viable for a startup and clearly different from the others in focus, segment, business model or technology, with a Latin American angle where it applies."#
    )
}

/// Idea source that asks a Gemini model for ideas.
pub struct GeminiIdeaSource {
    client: GeminiClient,
    model: String,
}

impl GeminiIdeaSource {
    /// Create a source for a model, with the default request timeout.
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client: client.with_timeout(TIMEOUT),
            model: model.into(),
        }
    }

    /// Create a source from credentials; the model defaults to [`DEFAULT_MODEL`].
    pub fn from_credentials(credentials: &ApiCredentials) -> Self {
        let model = credentials
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self::new(GeminiClient::new(credentials.api_key.expose()), model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl IdeaSource for GeminiIdeaSource {
    async fn generate(&self, topic: &str) -> Result<IdeaBatch> {
        let request = GenerateContentRequest::user(idea_prompt(topic))
            .temperature(TEMPERATURE)
            .max_output_tokens(MAX_OUTPUT_TOKENS);

        let text = self.client.generate_text(&self.model, &request).await?;
        if text.is_empty() {
            debug!(model = %self.model, "Gemini returned no text");
            return Ok(IdeaBatch::empty());
        }

        IdeaBatch::parse(&text)
    }
}
