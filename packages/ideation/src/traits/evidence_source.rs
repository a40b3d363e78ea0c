//! Evidence source trait for scholarly search.
//!
//! Sources return raw documents; recency filtering, deduplication and
//! relevance ranking are the core's job. A source error is never fatal: the
//! ranker treats it as zero evidence for that query.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::document::Document;

/// Scholarly search backend.
///
/// # Implementations
///
/// - `SemanticScholarSource` - Semantic Scholar Graph API
/// - `CrossRefSource` - CrossRef works API
/// - `RateLimitedSource` - wrapper that spaces out calls
/// - `MockEvidenceSource` - for testing
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Search for documents matching the query, in the backend's order.
    async fn search(&self, query: &str) -> Result<Vec<Document>>;
}

#[async_trait]
impl<T: EvidenceSource + ?Sized> EvidenceSource for Box<T> {
    async fn search(&self, query: &str) -> Result<Vec<Document>> {
        (**self).search(query).await
    }
}
