//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the ideation library
//! without calling a real generator or search API.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{IdeationError, Result};
use crate::traits::{
    evidence_source::EvidenceSource,
    idea_source::{IdeaBatch, IdeaSource},
};
use crate::types::{document::Document, idea::RawIdea};

/// What the mock generator does on one call.
#[derive(Debug, Clone)]
enum ScriptedResponse {
    Batch(IdeaBatch),
    Malformed(String),
    Fail(String),
}

/// A mock idea generator for testing.
///
/// Replays scripted responses in call order. Once the script runs out,
/// every call returns an empty batch, or an error when built with
/// [`MockIdeaSource::always_failing`].
#[derive(Default)]
pub struct MockIdeaSource {
    /// Responses still to be returned
    script: Arc<RwLock<VecDeque<ScriptedResponse>>>,

    /// Fail every call after the script is exhausted
    fail_when_exhausted: bool,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockIdeaCall>>>,
}

/// Record of a call made to the mock generator.
#[derive(Debug, Clone, PartialEq)]
pub enum MockIdeaCall {
    Generate { topic: String },
}

impl MockIdeaSource {
    /// Create a mock that returns empty batches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose every call fails.
    pub fn always_failing() -> Self {
        Self {
            fail_when_exhausted: true,
            ..Default::default()
        }
    }

    /// Queue a batch of raw ideas.
    pub fn with_batch(self, ideas: Vec<RawIdea>) -> Self {
        self.push(ScriptedResponse::Batch(IdeaBatch::new(ideas)))
    }

    /// Queue a response whose text must go through the batch parser.
    pub fn with_malformed(self, text: impl Into<String>) -> Self {
        self.push(ScriptedResponse::Malformed(text.into()))
    }

    /// Queue a failed call.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(ScriptedResponse::Fail(message.into()))
    }

    fn push(self, response: ScriptedResponse) -> Self {
        self.script.write().unwrap().push_back(response);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockIdeaCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl IdeaSource for MockIdeaSource {
    async fn generate(&self, topic: &str) -> Result<IdeaBatch> {
        self.calls.write().unwrap().push(MockIdeaCall::Generate {
            topic: topic.to_string(),
        });

        let next = self.script.write().unwrap().pop_front();
        match next {
            Some(ScriptedResponse::Batch(batch)) => Ok(batch),
            Some(ScriptedResponse::Malformed(text)) => IdeaBatch::parse(&text),
            Some(ScriptedResponse::Fail(message)) => Err(mock_failure(message)),
            None if self.fail_when_exhausted => Err(mock_failure("Mock generator unavailable")),
            None => Ok(IdeaBatch::empty()),
        }
    }
}

/// A mock evidence source for testing.
///
/// Returns predefined documents per exact query string; unknown queries
/// return no documents. Clones share state, so a clone handed to a
/// pipeline still reports its calls here.
#[derive(Default, Clone)]
pub struct MockEvidenceSource {
    /// Predefined documents by query
    documents: Arc<RwLock<HashMap<String, Vec<Document>>>>,

    /// Queries that should fail
    fail_queries: Arc<RwLock<Vec<String>>>,

    /// Call tracking
    calls: Arc<RwLock<Vec<MockEvidenceCall>>>,
}

/// Record of a call made to the mock evidence source.
#[derive(Debug, Clone, PartialEq)]
pub enum MockEvidenceCall {
    Search { query: String },
}

impl MockEvidenceSource {
    /// Create a new mock evidence source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add predefined documents for a query.
    pub fn with_documents(self, query: impl Into<String>, documents: Vec<Document>) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(query.into(), documents);
        self
    }

    /// Mark a query as failing.
    pub fn fail_query(self, query: impl Into<String>) -> Self {
        self.fail_queries.write().unwrap().push(query.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockEvidenceCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl EvidenceSource for MockEvidenceSource {
    async fn search(&self, query: &str) -> Result<Vec<Document>> {
        self.calls.write().unwrap().push(MockEvidenceCall::Search {
            query: query.to_string(),
        });

        if self.fail_queries.read().unwrap().iter().any(|q| q == query) {
            return Err(mock_failure("Mock connection refused"));
        }

        Ok(self
            .documents
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

fn mock_failure(message: impl Into<String>) -> IdeationError {
    IdeationError::Upstream(Box::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        message.into(),
    )))
}

/// Builder for creating test scenarios.
pub struct TestScenario {
    ideas: MockIdeaSource,
    evidence: MockEvidenceSource,
}

impl TestScenario {
    /// Create a new test scenario.
    pub fn new() -> Self {
        Self {
            ideas: MockIdeaSource::new(),
            evidence: MockEvidenceSource::new(),
        }
    }

    /// Queue one generator batch built from `(title, summary, persona)` rows.
    pub fn with_ideas(mut self, ideas: Vec<(&str, &str, &str)>) -> Self {
        let batch = ideas
            .into_iter()
            .map(|(title, summary, persona)| RawIdea {
                idea_title: Some(title.to_string()),
                idea_summary: Some(summary.to_string()),
                target_persona: Some(persona.to_string()),
                ..Default::default()
            })
            .collect();
        self.ideas = self.ideas.with_batch(batch);
        self
    }

    /// Add `(title, abstract, year)` papers for a query.
    pub fn with_papers(mut self, query: &str, papers: Vec<(&str, &str, i32)>) -> Self {
        let documents = papers
            .into_iter()
            .enumerate()
            .map(|(i, (title, abstract_text, year))| {
                Document::new(format!("{query}-{i}"), title, abstract_text)
                    .with_year(year)
                    .with_venue("Mock Journal")
                    .with_source("Mock")
            })
            .collect();
        self.evidence = self.evidence.with_documents(query, documents);
        self
    }

    /// Get the mock generator.
    pub fn ideas(self) -> MockIdeaSource {
        self.ideas
    }

    /// Get the mock evidence source.
    pub fn evidence(self) -> MockEvidenceSource {
        self.evidence
    }

    /// Get both mocks.
    pub fn build(self) -> (MockIdeaSource, MockEvidenceSource) {
        (self.ideas, self.evidence)
    }
}

impl Default for TestScenario {
    fn default() -> Self {
        Self::new()
    }
}
