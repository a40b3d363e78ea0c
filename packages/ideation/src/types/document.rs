//! Candidate evidence documents and their relevance annotation.

use serde::{Deserialize, Serialize};

/// A candidate piece of scholarly evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Origin identifier (paper id, DOI).
    pub id: String,

    pub title: String,

    #[serde(rename = "abstract")]
    pub abstract_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication year, when the source knows it.
    #[serde(default)]
    pub year: Option<i32>,

    /// Journal or venue label.
    #[serde(default)]
    pub venue: String,

    /// Search backend the document came from.
    #[serde(default)]
    pub source: String,

    /// Added by the ranker, never by a source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<Relevance>,

    /// Added when the document is attached to an idea as evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_rationale: Option<String>,
}

impl Document {
    /// Create a document with the required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            abstract_text: abstract_text.into(),
            url: None,
            authors: Vec::new(),
            year: None,
            venue: String::new(),
            source: String::new(),
            relevance: None,
            support_rationale: None,
        }
    }

    /// Set the publication year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Set the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the authors.
    pub fn with_authors(mut self, authors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Deduplication key: lowercased title and year.
    pub fn dedup_key(&self) -> (String, Option<i32>) {
        (self.title.to_lowercase(), self.year)
    }

    /// Title and abstract joined by a space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.abstract_text)
    }

    /// Whether the year is known and not older than `min_year`.
    pub fn is_recent(&self, min_year: i32) -> bool {
        self.year.is_some_and(|year| year >= min_year)
    }

    /// Relevance score, zero when not yet annotated.
    pub fn relevance_score(&self) -> u32 {
        self.relevance.map(|r| r.score).unwrap_or(0)
    }
}

/// How well a document supports an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relevance {
    /// Heuristic score in `[0, 100]`.
    pub score: u32,

    /// Whether the document crossed at least one match threshold.
    pub is_relevant: bool,

    pub keyword_matches: usize,

    pub total_keywords: usize,

    pub phrase_matches: usize,

    pub technical_matches: usize,
}

impl Relevance {
    /// Relevant and scoring at least `min_score`.
    pub fn passes(&self, min_score: u32) -> bool {
        self.is_relevant && self.score >= min_score
    }
}
