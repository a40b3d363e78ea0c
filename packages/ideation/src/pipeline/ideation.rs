//! Topic-to-report orchestration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{IdeationError, Result};
use crate::pipeline::{aggregate::aggregate_ideas, evidence::gather_evidence, scoring::score_idea};
use crate::traits::{evidence_source::EvidenceSource, idea_source::IdeaSource};
use crate::types::{
    config::IdeationConfig,
    document::Document,
    idea::IdeaContext,
    score::ScoringResult,
};

/// Topics shorter than this (in characters, after trimming) are rejected.
pub const MIN_TOPIC_CHARS: usize = 5;

/// Reject blank or too-short topics.
pub fn validate_topic(topic: &str) -> Result<()> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(IdeationError::invalid_topic("topic is required"));
    }
    if trimmed.chars().count() < MIN_TOPIC_CHARS {
        return Err(IdeationError::invalid_topic(format!(
            "topic must be at least {MIN_TOPIC_CHARS} characters"
        )));
    }
    Ok(())
}

/// Everything produced for one topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaReport {
    pub topic: String,

    /// The idea the evidence and score belong to.
    pub idea: IdeaContext,

    /// All aggregated ideas, `idea` first.
    pub ideas: Vec<IdeaContext>,

    pub articles: Vec<Document>,

    pub scoring: ScoringResult,

    pub generated_at: DateTime<Utc>,
}

/// The ideation pipeline over an idea source and an evidence source.
pub struct Ideation<I, E> {
    ideas: I,
    evidence: E,
    config: IdeationConfig,
}

impl<I: IdeaSource, E: EvidenceSource> Ideation<I, E> {
    /// Create a pipeline with default configuration.
    pub fn new(ideas: I, evidence: E) -> Self {
        Self {
            ideas,
            evidence,
            config: IdeationConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: IdeationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &IdeationConfig {
        &self.config
    }

    /// Aggregate ideas for the topic, gather evidence for the first one and
    /// score it.
    ///
    /// Only topic validation can fail; upstream trouble degrades the report.
    pub async fn run(&self, topic: &str) -> Result<IdeaReport> {
        validate_topic(topic)?;
        let topic = topic.trim();

        let ideas = aggregate_ideas(
            &self.ideas,
            topic,
            self.config.aggregator.desired_ideas.max(1),
            &self.config.aggregator,
        )
        .await;
        let idea = ideas[0].clone();

        let articles = gather_evidence(
            &self.evidence,
            &idea.search_query(),
            &idea.broad_query(),
            &idea,
            &self.config.evidence,
        )
        .await;

        let scoring = score_idea(&idea, &articles, &self.config.scoring);

        info!(
            topic = %topic,
            idea = %idea.title,
            articles = articles.len(),
            total_score = scoring.total_score,
            verdict = scoring.verdict.label(),
            "Generated idea report"
        );

        Ok(IdeaReport {
            topic: topic.to_string(),
            idea,
            ideas,
            articles,
            scoring,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_topic() {
        assert!(validate_topic("salud digital").is_ok());
        assert!(validate_topic("agua!").is_ok());
        assert!(matches!(
            validate_topic("   "),
            Err(IdeationError::InvalidTopic { .. })
        ));
        assert!(matches!(
            validate_topic("  IA "),
            Err(IdeationError::InvalidTopic { .. })
        ));
    }
}
