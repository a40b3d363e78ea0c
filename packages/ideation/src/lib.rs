//! Evidence-Backed Idea Generation Library
//!
//! Turns a topic into startup ideas, finds recent scholarly evidence for the
//! lead idea and scores it as an opportunity.
//!
//! # Design Philosophy
//!
//! - Never trust the generator: normalize, deduplicate, backfill
//! - Recent and relevant evidence only, ranked deterministically
//! - Scores are transparent rubrics built from keyword signals
//! - Library handles mechanics, app supplies the sources
//!
//! # Usage
//!
//! ```rust,ignore
//! use ideation::{Ideation, SemanticScholarSource};
//! use ideation::testing::MockIdeaSource;
//!
//! let pipeline = Ideation::new(MockIdeaSource::new(), SemanticScholarSource::new());
//! let report = pipeline.run("salud digital rural").await?;
//!
//! println!("{} -> {}", report.idea.title, report.scoring.total_label);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Source abstractions (IdeaSource, EvidenceSource)
//! - [`types`] - Ideas, documents, scores and configuration
//! - [`pipeline`] - Relevance, ranking, scoring, aggregation and orchestration
//! - [`sources`] - HTTP sources and call scheduling
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod security;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{IdeationError, Result};
pub use traits::{
    evidence_source::EvidenceSource,
    idea_source::{EmptyIdeaSource, IdeaBatch, IdeaSource},
};
pub use types::{
    config::{
        AggregatorConfig, EvidenceConfig, IdeationConfig, RecencyBonus, RelevanceConfig,
        ScoringConfig,
    },
    document::{Document, Relevance},
    idea::{IdeaContext, IdeaKey, RawIdea},
    score::{DimensionId, RubricDimension, ScoringResult, Verdict},
};

// Re-export pipeline components
pub use pipeline::{
    aggregate_ideas, build_semantic_query, context_keywords, filter_and_rank, gather_evidence,
    score_idea, score_relevance, support_rationale, validate_topic, IdeaReport, Ideation,
};

// Re-export sources
pub use sources::{CallScheduler, CrossRefSource, EvidenceSourceExt, RateLimitedSource, SemanticScholarSource};

#[cfg(feature = "gemini")]
pub use sources::GeminiIdeaSource;

pub use security::{ApiCredentials, SecretString};
