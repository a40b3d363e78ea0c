//! Opportunity scorer.
//!
//! Six independent rubric criteria computed from one lowercase corpus (idea
//! text plus evidence titles and abstracts). Each criterion starts from a
//! base, adds weighted vocabulary hits and bonuses, then is rounded and
//! clamped to `[1, 10]`.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{
    config::ScoringConfig,
    document::Document,
    idea::{join_non_empty, IdeaContext},
    score::{DimensionId, RubricDimension, ScoringResult},
};

const POPULARITY_KEYWORDS: &[&str] = &[
    "latinoam", "regional", "masivo", "millones", "comunidad", "inclusi", "social",
];
const PRIORITY_KEYWORDS: &[&str] = &[
    "salud", "medic", "financ", "fraude", "seguridad", "clim", "aliment", "urgente",
];
const DISSATISFACTION_KEYWORDS: &[&str] = &[
    "informal", "sin acceso", "brecha", "dolor", "invisible", "ineficiente", "manual",
];
const TANGIBILITY_KEYWORDS: &[&str] = &[
    "plataforma", "app", "prototipo", "piloto", "dashboard", "sistema",
];
const INEVITABILITY_KEYWORDS: &[&str] = &[
    "regulator", "tendencia", "crecimiento", "obligatorio", "compliance", "sostenible",
];
const NEGLECT_KEYWORDS: &[&str] = &[
    "desatendido", "informal", "rural", "nicho", "no bancarizado", "underserved",
];

static URGENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("urgente|crítico|must-have|imprescindible").expect("urgency pattern is valid")
});

static ABSENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("sin|falta|ausencia|informal").expect("absence pattern is valid")
});

/// Summaries longer than this read as less clear.
const LONG_SUMMARY_CHARS: usize = 320;

/// Recency boost when there is no evidence at all.
pub const NO_EVIDENCE_RECENCY_BOOST: f64 = 0.5;

/// Recency boost when no evidence document has a year.
pub const UNDATED_RECENCY_BOOST: f64 = 0.7;

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(1.0, 10.0) as u8
}

fn keyword_hits(text: &str, keywords: &[&str]) -> f64 {
    keywords.iter().filter(|k| text.contains(**k)).count() as f64
}

fn capped(count: usize, weight: f64, cap: f64) -> f64 {
    (count as f64 * weight).min(cap)
}

/// Lowercase corpus of idea text fields and document texts.
pub fn build_corpus(idea: &IdeaContext, documents: &[Document]) -> String {
    let document_texts: Vec<String> = documents.iter().map(Document::text).collect();
    join_non_empty(
        idea.text_fields()
            .chain(document_texts.iter().map(String::as_str)),
    )
    .to_lowercase()
}

/// How fresh the evidence is, in `[0, 2]`.
///
/// 0.5 without documents, 0.7 when none has a year, otherwise
/// `max(0, 2 - 0.2 * age)` with `age` measured from the mean year.
pub fn recency_boost(documents: &[Document], current_year: i32) -> f64 {
    if documents.is_empty() {
        return NO_EVIDENCE_RECENCY_BOOST;
    }

    let years: Vec<f64> = documents
        .iter()
        .filter_map(|doc| doc.year)
        .filter(|year| *year != 0)
        .map(f64::from)
        .collect();
    if years.is_empty() {
        return UNDATED_RECENCY_BOOST;
    }

    let mean_year = years.iter().sum::<f64>() / years.len() as f64;
    let age = f64::from(current_year) - mean_year;
    (2.0 - age * 0.2).max(0.0)
}

fn score_popularity(corpus: &str, idea: &IdeaContext, documents: &[Document]) -> u8 {
    let base = 4.0 + keyword_hits(corpus, POPULARITY_KEYWORDS);
    let persona_bonus = if idea.target_persona.to_lowercase().contains("latino") {
        1.5
    } else {
        0.0
    };
    let evidence_bonus = capped(documents.len(), 0.7, 2.0);
    let signal_bonus = capped(idea.trend_signals.len(), 0.5, 2.0);
    clamp_score(base + persona_bonus + evidence_bonus + signal_bonus)
}

fn score_priority(corpus: &str, idea: &IdeaContext) -> u8 {
    let base = 3.0 + keyword_hits(corpus, PRIORITY_KEYWORDS) * 1.2;
    let urgency = if URGENCY.is_match(corpus) { 2.0 } else { 0.0 };
    let validation_bonus = capped(idea.validation_focus.len(), 0.6, 2.0);
    clamp_score(base + urgency + validation_bonus)
}

fn score_dissatisfaction(corpus: &str, idea: &IdeaContext) -> u8 {
    let base = 3.0 + keyword_hits(corpus, DISSATISFACTION_KEYWORDS) * 1.3;
    let pain = if ABSENCE.is_match(corpus) { 1.5 } else { 0.0 };
    let action_bonus = capped(idea.action_steps.len(), 0.4, 2.0);
    clamp_score(base + pain + action_bonus)
}

fn score_tangibility(corpus: &str, idea: &IdeaContext) -> u8 {
    let base = 4.0 + keyword_hits(corpus, TANGIBILITY_KEYWORDS);
    let steps_bonus = capped(idea.action_steps.len(), 0.8, 3.0);
    let clarity_bonus = if idea.summary.chars().count() > LONG_SUMMARY_CHARS {
        1.0
    } else {
        2.0
    };
    clamp_score(base + steps_bonus + clarity_bonus)
}

fn score_inevitability(corpus: &str, documents: &[Document], current_year: i32) -> u8 {
    let base = 3.0 + keyword_hits(corpus, INEVITABILITY_KEYWORDS);
    let recency = recency_boost(documents, current_year);
    let evidence_bonus = if documents.len() >= 3 { 1.5 } else { 0.0 };
    clamp_score(base + recency + evidence_bonus)
}

fn score_market_neglect(corpus: &str, documents: &[Document]) -> u8 {
    let base = 3.0 + keyword_hits(corpus, NEGLECT_KEYWORDS) * 1.5;
    let scarcity = if documents.len() <= 1 { 2.5 } else { 1.0 };
    let informal = if corpus.contains("informal") { 1.5 } else { 0.0 };
    clamp_score(base + scarcity + informal)
}

/// Score an idea against its evidence.
pub fn score_idea(idea: &IdeaContext, documents: &[Document], config: &ScoringConfig) -> ScoringResult {
    let corpus = build_corpus(idea, documents);

    let rubric = DimensionId::ALL
        .into_iter()
        .map(|id| {
            let score = match id {
                DimensionId::Popularity => score_popularity(&corpus, idea, documents),
                DimensionId::Priority => score_priority(&corpus, idea),
                DimensionId::Dissatisfaction => score_dissatisfaction(&corpus, idea),
                DimensionId::Tangibility => score_tangibility(&corpus, idea),
                DimensionId::Inevitability => {
                    score_inevitability(&corpus, documents, config.current_year)
                }
                DimensionId::MarketNeglect => score_market_neglect(&corpus, documents),
            };
            RubricDimension::new(id, score)
        })
        .collect();

    ScoringResult::from_rubric(rubric)
}
