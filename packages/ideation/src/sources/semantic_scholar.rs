//! Semantic Scholar Graph API evidence source.
//!
//! Tries the bulk search endpoint first (newest first, recent years only)
//! and falls back to the relevance endpoint when bulk returns nothing.
//! Every HTTP call waits on the injected [`CallScheduler`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{IdeationError, Result};
use crate::pipeline::query::build_semantic_query;
use crate::security::SecretString;
use crate::sources::normalize::{abstract_or_default, format_authors, non_blank, year_from, RawAuthor};
use crate::sources::rate_limited::CallScheduler;
use crate::traits::evidence_source::EvidenceSource;
use crate::types::{config::EvidenceConfig, document::Document};

pub const DEFAULT_BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";

pub const SOURCE_LABEL: &str = "Semantic Scholar";

const FIELDS: &str = "title,abstract,url,authors,year,venue,journal,publicationDate,openAccessPdf";

const RELEVANCE_LIMIT: &str = "20";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<Paper>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paper {
    #[serde(default)]
    paper_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    authors: Option<Vec<RawAuthor>>,
    #[serde(default)]
    year: Option<Value>,
    #[serde(default)]
    venue: Option<String>,
    #[serde(default)]
    journal: Option<Journal>,
    #[serde(default)]
    publication_date: Option<String>,
    #[serde(default)]
    open_access_pdf: Option<OpenAccessPdf>,
}

#[derive(Debug, Deserialize)]
struct Journal {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAccessPdf {
    #[serde(default)]
    url: Option<String>,
}

impl Paper {
    /// Papers without a title carry nothing to score.
    fn into_document(self) -> Option<Document> {
        let title = non_blank(self.title.as_deref())?;

        let venue = self
            .journal
            .as_ref()
            .and_then(|j| non_blank(j.name.as_deref()))
            .or_else(|| non_blank(self.venue.as_deref()))
            .unwrap_or_else(|| SOURCE_LABEL.to_string());

        let url = non_blank(self.url.as_deref())
            .or_else(|| self.open_access_pdf.as_ref().and_then(|p| non_blank(p.url.as_deref())));

        Some(Document {
            id: self.paper_id.unwrap_or_default(),
            title,
            abstract_text: abstract_or_default(self.abstract_text.as_deref()),
            url,
            authors: format_authors(self.authors.as_deref().unwrap_or_default()),
            year: year_from(self.year.as_ref(), self.publication_date.as_deref()),
            venue,
            source: SOURCE_LABEL.to_string(),
            relevance: None,
            support_rationale: None,
        })
    }
}

fn normalize(response: SearchResponse) -> Vec<Document> {
    response
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(Paper::into_document)
        .collect()
}

/// Evidence source backed by the Semantic Scholar Graph API.
pub struct SemanticScholarSource {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    min_year: i32,
    timeout: Duration,
    scheduler: CallScheduler,
}

impl SemanticScholarSource {
    /// Create a source with the default one-call-per-second schedule.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            min_year: EvidenceConfig::default().min_year(),
            timeout: Duration::from_secs(15),
            scheduler: CallScheduler::from_millis(1000),
        }
    }

    /// Send the key as `x-api-key`. Blank keys are ignored.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = SecretString::non_blank(key);
        self
    }

    /// Share a scheduler with other clients of the same API.
    pub fn with_scheduler(mut self, scheduler: CallScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Only ask for papers published in or after this year.
    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Newest-first bulk search restricted to recent years.
    pub async fn search_bulk(&self, query: &str) -> Result<Vec<Document>> {
        let year = format!("{}-", self.min_year);
        self.get(
            "paper/search/bulk",
            &[
                ("query", query),
                ("fields", FIELDS),
                ("year", year.as_str()),
                ("sort", "publicationDate:desc"),
            ],
        )
        .await
    }

    /// Relevance-ordered search, first page only.
    pub async fn search_relevance(&self, query: &str) -> Result<Vec<Document>> {
        let year = format!("{}-", self.min_year);
        self.get(
            "paper/search",
            &[
                ("query", query),
                ("limit", RELEVANCE_LIMIT),
                ("offset", "0"),
                ("fields", FIELDS),
                ("year", year.as_str()),
            ],
        )
        .await
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Document>> {
        self.scheduler.acquire().await;

        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.client.get(&url).query(params).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key.expose());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdeationError::Api {
                status: status.as_u16(),
                message: format!("Semantic Scholar unavailable: {message}"),
            });
        }

        let body: SearchResponse = response.json().await?;
        let documents = normalize(body);
        debug!(path, count = documents.len(), "Semantic Scholar results");
        Ok(documents)
    }
}

impl Default for SemanticScholarSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvidenceSource for SemanticScholarSource {
    async fn search(&self, query: &str) -> Result<Vec<Document>> {
        let query = build_semantic_query(query);
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let bulk = self.search_bulk(&query).await?;
        if !bulk.is_empty() {
            return Ok(bulk);
        }

        debug!(query = %query, "Bulk search empty, trying relevance search");
        self.search_relevance(&query).await
    }
}
