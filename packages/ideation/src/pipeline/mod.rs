//! The ideation pipeline.
//!
//! - Relevance scoring of one document against one idea
//! - Evidence filtering, ranking and fallback search
//! - Opportunity scoring over the idea and its evidence
//! - Idea aggregation with template backfill
//! - Search query building and support rationales
//! - Topic-to-report orchestration

pub mod aggregate;
pub mod evidence;
pub mod ideation;
pub mod query;
pub mod rationale;
pub mod relevance;
pub mod scoring;

pub use aggregate::aggregate_ideas;
pub use evidence::{dedupe, filter_and_rank, filter_recent, gather_evidence, post_process};
pub use ideation::{validate_topic, IdeaReport, Ideation};
pub use query::build_semantic_query;
pub use rationale::support_rationale;
pub use relevance::{context_keywords, score as score_relevance};
pub use scoring::{build_corpus, recency_boost, score_idea};
