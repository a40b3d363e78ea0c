//! Idea generator trait.
//!
//! The core never trusts a generator: a failed call, an unparsable payload
//! and an empty batch all mean "zero ideas this attempt", and the aggregator
//! decides whether to retry or backfill.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IdeationError, Result};
use crate::types::idea::RawIdea;

/// One generator response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaBatch {
    #[serde(default)]
    pub ideas: Vec<RawIdea>,
}

impl IdeaBatch {
    /// Create a batch from raw ideas.
    pub fn new(ideas: Vec<RawIdea>) -> Self {
        Self { ideas }
    }

    /// A batch with no ideas.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    /// Parse generator text output.
    ///
    /// Accepts `{"ideas": [...]}`, a bare idea object or a bare array, with
    /// optional markdown code fences around the JSON. Array elements that
    /// are not objects are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let cleaned = text
            .trim()
            .replace("```json", "")
            .replace("```", "");
        let value: Value = serde_json::from_str(cleaned.trim())?;

        match value {
            Value::Object(mut object) => match object.remove("ideas") {
                Some(Value::Array(items)) => Ok(Self::new(collect_ideas(items))),
                Some(other) => {
                    object.insert("ideas".to_string(), other);
                    Ok(Self::new(vec![serde_json::from_value(Value::Object(object))?]))
                }
                None => Ok(Self::new(vec![serde_json::from_value(Value::Object(object))?])),
            },
            Value::Array(items) => Ok(Self::new(collect_ideas(items))),
            other => Err(IdeationError::Malformed(format!(
                "expected idea object or list, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn collect_ideas(items: Vec<Value>) -> Vec<RawIdea> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Source of idea candidates for a topic.
///
/// # Implementations
///
/// - `GeminiIdeaSource` - generative-language model (feature `gemini`)
/// - `EmptyIdeaSource` - never produces ideas; everything is backfilled
/// - `MockIdeaSource` - for testing
#[async_trait]
pub trait IdeaSource: Send + Sync {
    /// Request a batch of idea candidates for the topic.
    async fn generate(&self, topic: &str) -> Result<IdeaBatch>;
}

#[async_trait]
impl<T: IdeaSource + ?Sized> IdeaSource for Box<T> {
    async fn generate(&self, topic: &str) -> Result<IdeaBatch> {
        (**self).generate(topic).await
    }
}

/// Idea source used when no generator is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyIdeaSource;

#[async_trait]
impl IdeaSource for EmptyIdeaSource {
    async fn generate(&self, _topic: &str) -> Result<IdeaBatch> {
        Ok(IdeaBatch::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ideas_object() {
        let batch = IdeaBatch::parse(
            r#"{"ideas": [{"ideaTitle": "A"}, {"ideaTitle": "B"}, "junk"]}"#,
        )
        .unwrap();

        assert_eq!(batch.ideas.len(), 2);
        assert_eq!(batch.ideas[1].idea_title.as_deref(), Some("B"));
    }

    #[test]
    fn test_parse_strips_code_fences() {
        let text = "```json\n{\"ideas\": [{\"ideaTitle\": \"Fenced\"}]}\n```";
        let batch = IdeaBatch::parse(text).unwrap();
        assert_eq!(batch.ideas[0].idea_title.as_deref(), Some("Fenced"));
    }

    #[test]
    fn test_parse_bare_idea_object() {
        let batch = IdeaBatch::parse(r#"{"ideaTitle": "Solo", "ideaSummary": "S"}"#).unwrap();
        assert_eq!(batch.ideas.len(), 1);
        assert_eq!(batch.ideas[0].idea_title.as_deref(), Some("Solo"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(IdeaBatch::parse("not json at all").is_err());
        assert!(matches!(
            IdeaBatch::parse("42"),
            Err(IdeationError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_idea_source() {
        let batch = EmptyIdeaSource.generate("anything").await.unwrap();
        assert!(batch.is_empty());
    }
}
