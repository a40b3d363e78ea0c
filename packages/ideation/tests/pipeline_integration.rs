//! Integration tests for the topic-to-report pipeline.
//!
//! These tests drive the public API with mock sources:
//! 1. Relevance of a single document
//! 2. Evidence filtering and ranking
//! 3. Opportunity scoring with and without evidence
//! 4. The full `Ideation::run` flow, including degraded upstreams

use std::time::Duration;

use ideation::{
    filter_and_rank, score_idea, score_relevance,
    pipeline::recency_boost,
    testing::{MockEvidenceCall, MockEvidenceSource, MockIdeaSource, TestScenario},
    DimensionId, Document, EvidenceConfig, EvidenceSourceExt, IdeaContext, Ideation,
    IdeationConfig, IdeationError, RawIdea, RelevanceConfig, ScoringConfig,
};

const YEAR: i32 = 2026;

fn telehealth_idea() -> IdeaContext {
    IdeaContext::normalize(RawIdea {
        idea_title: Some("Telehealth Triage AI".into()),
        target_persona: Some("Rural clinics".into()),
        innovation_angle: Some("IA generativa".into()),
        ..Default::default()
    })
}

fn evidence_config() -> EvidenceConfig {
    EvidenceConfig::new().with_current_year(YEAR)
}

#[test]
fn test_telehealth_document_is_relevant() {
    let doc = Document::new("1", "AI-based rural telehealth triage", "...").with_year(YEAR - 1);

    let relevance = score_relevance(&doc, &telehealth_idea(), &RelevanceConfig::for_year(YEAR));

    assert!(relevance.phrase_matches >= 1);
    assert!(relevance.is_relevant);
    assert!(relevance.score >= 40);
}

#[test]
fn test_decade_old_documents_are_filtered_out() {
    let docs: Vec<_> = (0..10)
        .map(|i| {
            Document::new(i.to_string(), format!("AI-based rural telehealth triage {i}"), "...")
                .with_year(YEAR - 10)
        })
        .collect();

    assert!(filter_and_rank(&docs, &telehealth_idea(), 0, &evidence_config()).is_empty());
}

#[test]
fn test_duplicate_titles_collapse() {
    let docs = vec![
        Document::new("a", "Study X", "rural telehealth triage").with_year(2023),
        Document::new("b", "Study X", "rural telehealth triage").with_year(2023),
    ];

    let ranked = filter_and_rank(&docs, &telehealth_idea(), 0, &evidence_config());

    assert_eq!(ranked.iter().filter(|d| d.title == "Study X").count(), 1);
}

#[test]
fn test_scoring_twice_gives_identical_results() {
    let idea = telehealth_idea();
    let docs = vec![Document::new("1", "Rural telehealth", "clinics").with_year(YEAR - 2)];
    let config = ScoringConfig::for_year(YEAR);

    assert_eq!(score_idea(&idea, &docs, &config), score_idea(&idea, &docs, &config));
}

#[test]
fn test_scoring_without_evidence() {
    let result = score_idea(&telehealth_idea(), &[], &ScoringConfig::for_year(YEAR));

    assert_eq!(result.rubric.len(), 6);
    assert_eq!(recency_boost(&[], YEAR), 0.5);

    // Scarcity bonus pushes neglect above its base of 3.
    let neglect = result.dimension(DimensionId::MarketNeglect).unwrap();
    assert!(neglect.score >= 5, "neglect was {}", neglect.score);
    assert!(result.total_score <= 50);
}

#[tokio::test]
async fn test_full_pipeline_with_mocks() {
    let expected = IdeaContext::normalize(RawIdea {
        idea_title: Some("Telehealth Triage AI".into()),
        idea_summary: Some("Triage for rural clinics".into()),
        target_persona: Some("Rural clinics".into()),
        ..Default::default()
    });

    let (ideas, evidence) = TestScenario::new()
        .with_ideas(vec![(
            "Telehealth Triage AI",
            "Triage for rural clinics",
            "Rural clinics",
        )])
        .with_papers(
            &expected.search_query(),
            vec![
                ("AI-based rural telehealth triage", "...", YEAR - 1),
                ("Medieval pottery", "kilns", YEAR - 1),
                ("AI-based rural telehealth triage", "...", YEAR - 20),
            ],
        )
        .build();

    let pipeline = Ideation::new(ideas, evidence)
        .with_config(IdeationConfig::new().with_current_year(YEAR));
    let report = pipeline.run("  telemedicina rural  ").await.unwrap();

    assert_eq!(report.topic, "telemedicina rural");
    assert_eq!(report.idea, expected);
    assert_eq!(report.ideas.len(), 3);
    assert_eq!(report.ideas[0], expected);

    assert_eq!(report.articles.len(), 1);
    let article = &report.articles[0];
    assert_eq!(article.relevance_score(), 45);
    assert!(article
        .support_rationale
        .as_deref()
        .is_some_and(|r| r.contains("rural clinics")));

    assert_eq!(report.scoring.rubric.len(), 6);
    assert_eq!(report.scoring.scale, "0-50");
}

#[tokio::test]
async fn test_pipeline_searches_broad_query_when_starved() {
    let evidence = MockEvidenceSource::new();
    let pipeline = Ideation::new(MockIdeaSource::always_failing(), evidence.clone())
        .with_config(IdeationConfig::new().with_current_year(YEAR));

    let report = pipeline.run("movilidad urbana").await.unwrap();

    assert!(report.articles.is_empty());
    assert_eq!(report.ideas.len(), 3);
    assert!(report.idea.title.contains("movilidad urbana"));
    assert_ne!(report.idea.search_query(), report.idea.broad_query());
    assert_eq!(
        evidence.calls(),
        vec![
            MockEvidenceCall::Search { query: report.idea.search_query() },
            MockEvidenceCall::Search { query: report.idea.broad_query() },
        ]
    );
}

#[tokio::test]
async fn test_pipeline_survives_failing_sources() {
    let idea = IdeaContext::normalize(RawIdea::default());
    let evidence = MockEvidenceSource::new()
        .fail_query(idea.search_query())
        .fail_query(idea.broad_query());
    let ideas = MockIdeaSource::new()
        .with_malformed("not json at all")
        .with_batch(vec![RawIdea::default()]);

    let report = Ideation::new(ideas, evidence).run("energia solar").await.unwrap();

    // The all-default idea survives normalization and leads the report.
    assert_eq!(report.idea, idea);
    assert!(report.articles.is_empty());
    assert_eq!(report.ideas.len(), 3);
}

#[tokio::test]
async fn test_invalid_topic_is_rejected_before_any_call() {
    let ideas = MockIdeaSource::new();
    let pipeline = Ideation::new(ideas, MockEvidenceSource::new());

    let err = pipeline.run(" abc ").await.unwrap_err();

    assert!(matches!(err, IdeationError::InvalidTopic { .. }));
}

#[tokio::test]
async fn test_rate_limited_source_in_pipeline() {
    let source = MockEvidenceSource::new().rate_limited(Duration::from_millis(100));
    let idea = telehealth_idea();

    let start = std::time::Instant::now();
    let docs = ideation::gather_evidence(
        &source,
        &idea.search_query(),
        &idea.broad_query(),
        &idea,
        &evidence_config(),
    )
    .await;

    assert!(docs.is_empty());
    assert!(start.elapsed() >= Duration::from_millis(80));
    assert_eq!(
        source.inner().calls(),
        vec![
            MockEvidenceCall::Search { query: idea.search_query() },
            MockEvidenceCall::Search { query: idea.broad_query() },
        ]
    );
}
