//! Evidence filter and ranker.
//!
//! recency window → dedup → relevance annotation → threshold → stable sort
//! → cap. [`gather_evidence`] adds the single-shot fallback query and the
//! support rationale on top.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::pipeline::{rationale::support_rationale, relevance};
use crate::traits::evidence_source::EvidenceSource;
use crate::types::{config::EvidenceConfig, document::Document, idea::IdeaContext};

/// Documents logged individually per ranking pass.
const LOGGED_DOCUMENTS: usize = 15;

/// Keep documents with a known year no older than `min_year`.
pub fn filter_recent(documents: &[Document], min_year: i32) -> Vec<Document> {
    documents
        .iter()
        .filter(|doc| doc.is_recent(min_year))
        .cloned()
        .collect()
}

/// Drop documents whose (lowercased title, year) was already seen.
///
/// The first occurrence wins, in input order.
pub fn dedupe(documents: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .filter(|doc| seen.insert(doc.dedup_key()))
        .collect()
}

/// Recency filter followed by dedup.
pub fn post_process(documents: &[Document], config: &EvidenceConfig) -> Vec<Document> {
    dedupe(filter_recent(documents, config.min_year()))
}

/// Filter, annotate and sort without capping.
fn rank(
    documents: &[Document],
    idea: &IdeaContext,
    min_score: u32,
    config: &EvidenceConfig,
) -> Vec<Document> {
    let relevance_config = config.relevance();
    let annotated: Vec<Document> = post_process(documents, config)
        .iter()
        .map(|doc| relevance::annotate(doc, idea, &relevance_config))
        .collect();

    for doc in annotated.iter().take(LOGGED_DOCUMENTS) {
        if let Some(relevance) = doc.relevance {
            debug!(
                title = %doc.title.chars().take(60).collect::<String>(),
                score = relevance.score,
                phrases = relevance.phrase_matches,
                technical = relevance.technical_matches,
                accepted = relevance.passes(min_score),
                "Scored document relevance"
            );
        }
    }

    let mut relevant: Vec<Document> = annotated
        .into_iter()
        .filter(|doc| doc.relevance.is_some_and(|r| r.passes(min_score)))
        .collect();

    // Vec::sort_by_key is stable, so ties keep fetch order.
    relevant.sort_by_key(|doc| std::cmp::Reverse(doc.relevance_score()));

    info!(
        idea = %idea.title,
        fetched = documents.len(),
        relevant = relevant.len(),
        min_score,
        "Filtered evidence by relevance"
    );

    relevant
}

/// Recency filter, dedup, relevance threshold, descending sort and cap.
///
/// Returns annotated copies; the input is not modified.
pub fn filter_and_rank(
    documents: &[Document],
    idea: &IdeaContext,
    min_score: u32,
    config: &EvidenceConfig,
) -> Vec<Document> {
    let mut ranked = rank(documents, idea, min_score, config);
    ranked.truncate(config.max_results);
    ranked
}

async fn fetch<S: EvidenceSource + ?Sized>(source: &S, query: &str) -> Vec<Document> {
    match source.search(query).await {
        Ok(documents) => documents,
        Err(e) => {
            warn!(query = %query, error = %e, "Evidence search failed, continuing without results");
            Vec::new()
        }
    }
}

/// Search, rank and annotate evidence for an idea.
///
/// Runs the primary query at `min_relevance_score`. When fewer than
/// `fallback_trigger` documents survive and the fallback query differs from
/// the primary, runs the fallback once at `fallback_min_relevance_score`
/// and appends its survivors. Search failures yield fewer documents, never
/// an error.
pub async fn gather_evidence<S: EvidenceSource + ?Sized>(
    source: &S,
    primary_query: &str,
    fallback_query: &str,
    idea: &IdeaContext,
    config: &EvidenceConfig,
) -> Vec<Document> {
    let primary_query = primary_query.trim();
    let fallback_query = fallback_query.trim();

    let query = if primary_query.is_empty() {
        fallback_query
    } else {
        primary_query
    };
    if query.is_empty() {
        return Vec::new();
    }

    let fetched = fetch(source, query).await;
    let mut evidence = filter_and_rank(&fetched, idea, config.min_relevance_score, config);

    if evidence.len() < config.fallback_trigger
        && !fallback_query.is_empty()
        && fallback_query != query
    {
        debug!(
            found = evidence.len(),
            fallback = %fallback_query,
            "Too little evidence, broadening search"
        );
        let fallback = fetch(source, fallback_query).await;
        let extra = filter_and_rank(&fallback, idea, config.fallback_min_relevance_score, config);

        let mut seen: HashSet<_> = evidence.iter().map(Document::dedup_key).collect();
        evidence.extend(extra.into_iter().filter(|doc| seen.insert(doc.dedup_key())));
        evidence.truncate(config.max_results);
    }

    evidence
        .into_iter()
        .map(|mut doc| {
            doc.support_rationale = Some(support_rationale(&doc, idea));
            doc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockEvidenceCall, MockEvidenceSource};

    const YEAR: i32 = 2026;

    fn config() -> EvidenceConfig {
        EvidenceConfig::new().with_current_year(YEAR)
    }

    fn idea() -> IdeaContext {
        IdeaContext::new("Telehealth Triage AI", "", "IA generativa", "Rural clinics")
    }

    /// Relevant via the title phrase; score 45 when published last year.
    fn relevant_doc(id: &str, title_suffix: &str, year: i32) -> Document {
        Document::new(id, format!("AI-based rural telehealth triage {title_suffix}"), "...")
            .with_year(year)
    }

    #[test]
    fn test_stale_documents_are_dropped() {
        let docs: Vec<_> = (0..10)
            .map(|i| relevant_doc(&i.to_string(), &i.to_string(), YEAR - 10))
            .collect();

        assert!(filter_and_rank(&docs, &idea(), 40, &config()).is_empty());
    }

    #[test]
    fn test_missing_year_is_dropped() {
        let docs = vec![Document::new("1", "AI-based rural telehealth triage", "...")];
        assert!(filter_and_rank(&docs, &idea(), 0, &config()).is_empty());
    }

    #[test]
    fn test_window_edge_is_kept() {
        let docs = vec![relevant_doc("1", "edge", YEAR - 6), relevant_doc("2", "out", YEAR - 7)];
        let ranked = filter_and_rank(&docs, &idea(), 0, &config());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "1");
    }

    #[test]
    fn test_duplicates_keep_first_seen() {
        let docs = vec![
            Document::new("first", "Study X", "virtual therapy").with_year(2023),
            Document::new("second", "study x", "virtual therapy").with_year(2023),
        ];
        let ranked = filter_and_rank(&docs, &idea(), 0, &config());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "first");
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let docs = vec![
            Document::new("low", "virtual therapy", "").with_year(YEAR - 6),
            relevant_doc("tie-a", "a", YEAR - 1),
            relevant_doc("tie-b", "b", YEAR - 1),
            relevant_doc("older", "c", YEAR - 5),
        ];
        let ranked = filter_and_rank(&docs, &idea(), 0, &config());
        let ids: Vec<_> = ranked.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["tie-a", "tie-b", "older", "low"]);
    }

    #[test]
    fn test_min_score_threshold() {
        let docs = vec![relevant_doc("recent", "a", YEAR - 1), relevant_doc("old", "b", YEAR - 5)];
        // 45 and 40
        assert_eq!(filter_and_rank(&docs, &idea(), 41, &config()).len(), 1);
        assert_eq!(filter_and_rank(&docs, &idea(), 40, &config()).len(), 2);
    }

    #[test]
    fn test_output_is_capped() {
        let docs: Vec<_> = (0..12)
            .map(|i| relevant_doc(&i.to_string(), &i.to_string(), YEAR))
            .collect();
        assert_eq!(filter_and_rank(&docs, &idea(), 40, &config()).len(), 8);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let docs = vec![relevant_doc("1", "a", YEAR)];
        let _ = filter_and_rank(&docs, &idea(), 0, &config());
        assert!(docs[0].relevance.is_none());
    }

    #[tokio::test]
    async fn test_gather_skips_fallback_when_primary_suffices() {
        let source = MockEvidenceSource::new().with_documents(
            "primary",
            vec![
                relevant_doc("1", "a", YEAR),
                relevant_doc("2", "b", YEAR),
                relevant_doc("3", "c", YEAR),
            ],
        );

        let evidence = gather_evidence(&source, "primary", "fallback", &idea(), &config()).await;

        assert_eq!(evidence.len(), 3);
        assert_eq!(source.calls(), vec![MockEvidenceCall::Search { query: "primary".into() }]);
        assert!(evidence.iter().all(|d| d.support_rationale.is_some()));
    }

    #[tokio::test]
    async fn test_gather_runs_fallback_with_lower_threshold() {
        // Three keywords, two domain terms and a four-year-old date: 36.
        let fallback_doc =
            Document::new("fb", "Generativa models for rural telehealth", "virtual therapy")
                .with_year(YEAR - 4);
        let source = MockEvidenceSource::new()
            .with_documents("primary", vec![relevant_doc("1", "a", YEAR)])
            .with_documents("fallback", vec![fallback_doc, relevant_doc("1-dup", "a", YEAR)]);

        let evidence = gather_evidence(&source, "primary", "fallback", &idea(), &config()).await;
        let ids: Vec<_> = evidence.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "fb"]);
        assert_eq!(evidence[1].relevance_score(), 36);
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_gather_merge_is_capped() {
        let fallback: Vec<_> = (0..12)
            .map(|i| relevant_doc(&format!("fb-{i}"), &format!("fb {i}"), YEAR))
            .collect();
        let source = MockEvidenceSource::new()
            .with_documents("primary", vec![relevant_doc("primary", "a", YEAR - 5)])
            .with_documents("fallback", fallback);

        let evidence = gather_evidence(&source, "primary", "fallback", &idea(), &config()).await;

        assert_eq!(evidence.len(), 8);
        assert_eq!(evidence[0].id, "primary");
        assert!(evidence[1..].iter().all(|d| d.id.starts_with("fb-")));
    }

    #[tokio::test]
    async fn test_gather_skips_fallback_when_queries_match() {
        let source = MockEvidenceSource::new().with_documents("same", vec![]);

        let evidence = gather_evidence(&source, "same", "same", &idea(), &config()).await;

        assert!(evidence.is_empty());
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_gather_survives_source_errors() {
        let source = MockEvidenceSource::new()
            .fail_query("primary")
            .with_documents("fallback", vec![relevant_doc("1", "a", YEAR)]);

        let evidence = gather_evidence(&source, "primary", "fallback", &idea(), &config()).await;
        assert_eq!(evidence.len(), 1);
    }

    #[tokio::test]
    async fn test_gather_uses_fallback_when_primary_blank() {
        let source = MockEvidenceSource::new()
            .with_documents("fallback", vec![relevant_doc("1", "a", YEAR)]);

        let evidence = gather_evidence(&source, "  ", "fallback", &idea(), &config()).await;

        assert_eq!(evidence.len(), 1);
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_gather_with_no_queries() {
        let source = MockEvidenceSource::new();
        let evidence = gather_evidence(&source, "", "", &idea(), &config()).await;
        assert!(evidence.is_empty());
        assert!(source.calls().is_empty());
    }
}
