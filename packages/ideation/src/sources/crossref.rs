//! CrossRef works API evidence source.
//!
//! CrossRef has no recency filter of its own and returns JATS-tagged
//! abstracts; the tags are stripped here and recency is left to the ranker.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{IdeationError, Result};
use crate::sources::normalize::{abstract_or_default, format_authors, non_blank, numeric_year, RawAuthor};
use crate::sources::rate_limited::CallScheduler;
use crate::traits::evidence_source::EvidenceSource;
use crate::types::document::Document;

pub const DEFAULT_BASE_URL: &str = "https://api.crossref.org";

pub const SOURCE_LABEL: &str = "CrossRef";

const DEFAULT_ROWS: usize = 5;

static JATS_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?jats:p>").expect("JATS pattern is valid"));

#[derive(Debug, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    message: Option<WorksMessage>,
}

#[derive(Debug, Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<Work>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Work {
    #[serde(default, rename = "DOI")]
    doi: Option<String>,
    #[serde(default)]
    title: Vec<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default, rename = "URL")]
    url: Option<String>,
    #[serde(default)]
    author: Vec<RawAuthor>,
    #[serde(default)]
    created: Option<DateParts>,
    #[serde(default)]
    issued: Option<DateParts>,
    #[serde(default)]
    container_title: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DateParts {
    #[serde(default, rename = "date-parts")]
    date_parts: Vec<Vec<Value>>,
}

impl DateParts {
    fn year(&self) -> Option<i32> {
        self.date_parts.first()?.first().and_then(numeric_year)
    }
}

/// Remove JATS paragraph tags from an abstract.
pub fn strip_jats(text: &str) -> String {
    JATS_PARAGRAPH.replace_all(text, "").into_owned()
}

impl Work {
    fn into_document(self) -> Option<Document> {
        let title = non_blank(self.title.first().map(String::as_str))?;
        let year = self
            .created
            .as_ref()
            .and_then(DateParts::year)
            .or_else(|| self.issued.as_ref().and_then(DateParts::year));
        let abstract_text = self.abstract_text.as_deref().map(strip_jats);

        Some(Document {
            id: self.doi.unwrap_or_default(),
            title,
            abstract_text: abstract_or_default(abstract_text.as_deref()),
            url: non_blank(self.url.as_deref()),
            authors: format_authors(&self.author),
            year,
            venue: self.container_title.into_iter().next().unwrap_or_default(),
            source: SOURCE_LABEL.to_string(),
            relevance: None,
            support_rationale: None,
        })
    }
}

fn normalize(response: WorksResponse) -> Vec<Document> {
    response
        .message
        .map(|m| m.items)
        .unwrap_or_default()
        .into_iter()
        .filter_map(Work::into_document)
        .collect()
}

/// Evidence source backed by the CrossRef works API.
pub struct CrossRefSource {
    client: reqwest::Client,
    base_url: String,
    rows: usize,
    timeout: Duration,
    scheduler: CallScheduler,
}

impl CrossRefSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            rows: DEFAULT_ROWS,
            timeout: Duration::from_secs(15),
            scheduler: CallScheduler::unlimited(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Number of works to request per query.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_scheduler(mut self, scheduler: CallScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }
}

impl Default for CrossRefSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvidenceSource for CrossRefSource {
    async fn search(&self, query: &str) -> Result<Vec<Document>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.scheduler.acquire().await;

        let url = format!("{}/works", self.base_url);
        let rows = self.rows.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("query", query), ("rows", rows.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdeationError::Api {
                status: status.as_u16(),
                message: "CrossRef unavailable".to_string(),
            });
        }

        let body: WorksResponse = response.json().await?;
        let documents = normalize(body);
        debug!(count = documents.len(), "CrossRef results");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Vec<Document> {
        normalize(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_strip_jats() {
        assert_eq!(
            strip_jats("<jats:p>First.</jats:p><jats:p>Second.</jats:p>"),
            "First.Second."
        );
    }

    #[test]
    fn test_normalizes_work() {
        let docs = parse(json!({
            "status": "ok",
            "message": {
                "items": [{
                    "DOI": "10.1000/xyz",
                    "title": ["Community water monitoring"],
                    "abstract": "<jats:p>Sensors in rural towns.</jats:p>",
                    "URL": "https://doi.org/10.1000/xyz",
                    "author": [{"given": "Ana", "family": "Paz"}],
                    "created": {"date-parts": [[2022, 4, 1]]},
                    "issued": {"date-parts": [[2021]]},
                    "container-title": ["Water Research"]
                }]
            }
        }));

        let doc = &docs[0];
        assert_eq!(doc.id, "10.1000/xyz");
        assert_eq!(doc.abstract_text, "Sensors in rural towns.");
        assert_eq!(doc.authors, vec!["Ana Paz"]);
        assert_eq!(doc.year, Some(2022));
        assert_eq!(doc.venue, "Water Research");
        assert_eq!(doc.source, "CrossRef");
    }

    #[test]
    fn test_year_falls_back_to_issued() {
        let docs = parse(json!({
            "message": {"items": [{
                "title": ["T"],
                "created": {"date-parts": [[null]]},
                "issued": {"date-parts": [[2019, 2]]}
            }]}
        }));
        assert_eq!(docs[0].year, Some(2019));
        assert_eq!(docs[0].abstract_text, "Resumen no disponible.");
    }

    #[test]
    fn test_untitled_and_missing_message() {
        assert!(parse(json!({"message": {"items": [{"DOI": "10.1/x"}]}})).is_empty());
        assert!(parse(json!({"status": "failed"})).is_empty());
    }
}
