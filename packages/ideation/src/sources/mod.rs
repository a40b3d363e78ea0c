//! Reference implementations of the source traits.
//!
//! - `SemanticScholarSource` / `CrossRefSource` - scholarly search over HTTP
//! - `RateLimitedSource` / `CallScheduler` - FIFO call spacing
//! - `GeminiIdeaSource` - LLM idea generator (feature `gemini`)

pub mod crossref;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod normalize;
pub mod rate_limited;
pub mod semantic_scholar;

pub use crossref::CrossRefSource;
#[cfg(feature = "gemini")]
pub use gemini::GeminiIdeaSource;
pub use rate_limited::{CallScheduler, EvidenceSourceExt, RateLimitedSource};
pub use semantic_scholar::SemanticScholarSource;
