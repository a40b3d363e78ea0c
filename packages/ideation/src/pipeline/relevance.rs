//! Relevance scorer.
//!
//! Scores how well one document supports one idea with plain substring
//! matching: context keywords, thematic phrases, a fixed domain vocabulary
//! and a recency bonus. Deterministic for a fixed `current_year`.

use indexmap::IndexSet;

use crate::types::{
    config::RelevanceConfig,
    document::{Document, Relevance},
    idea::IdeaContext,
};

const KEYWORD_POINTS: u32 = 5;
const PHRASE_POINTS: u32 = 20;
const TECHNICAL_POINTS: u32 = 8;
const MAX_SCORE: u32 = 100;

/// Context keywords must be longer than this many characters.
const MIN_KEYWORD_CHARS: usize = 4;

/// Phrases shorter than this (in characters) are ignored.
const MIN_PHRASE_CHARS: usize = 5;

/// Phrase words must be longer than this many characters.
const MIN_PHRASE_WORD_CHARS: usize = 3;

/// Matches needed before a document counts as relevant.
const KEYWORD_THRESHOLD: usize = 3;
const PHRASE_THRESHOLD: usize = 1;
const TECHNICAL_THRESHOLD: usize = 2;

/// Domain vocabulary, lowercase, Spanish and English forms.
pub const DOMAIN_TERMS: &[&str] = &[
    "rehabilitación",
    "rehabilitation",
    "gamificación",
    "gamification",
    "paciente",
    "patient",
    "terapia",
    "therapy",
    "virtual",
    "inteligencia artificial",
    "artificial intelligence",
    "personalización",
    "personalization",
];

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü' | 'ñ')
}

/// Split lowercase text into words.
pub(crate) fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|word| !word.is_empty())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Unique lowercase keywords from the idea's title, summary, angle and persona.
pub fn context_keywords(idea: &IdeaContext) -> Vec<String> {
    let context = format!(
        "{} {} {} {}",
        idea.title, idea.summary, idea.innovation_angle, idea.target_persona
    )
    .to_lowercase();

    words(&context)
        .filter(|word| char_len(word) > MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Whether at least two of the phrase's words appear in the article text.
fn phrase_matches(phrase: &str, article_text: &str) -> bool {
    if char_len(phrase) <= MIN_PHRASE_CHARS {
        return false;
    }

    let lowered = phrase.to_lowercase();
    let phrase_words: Vec<&str> = words(&lowered)
        .filter(|word| char_len(word) > MIN_PHRASE_WORD_CHARS)
        .collect();

    if phrase_words.len() < 2 {
        return false;
    }

    phrase_words
        .iter()
        .filter(|word| article_text.contains(*word))
        .count()
        >= 2
}

/// Score a document against an idea.
///
/// A document with no known year is treated as published this year.
pub fn score(document: &Document, idea: &IdeaContext, config: &RelevanceConfig) -> Relevance {
    let article_text = document.text().to_lowercase();

    let keywords = context_keywords(idea);
    let keyword_matches = keywords
        .iter()
        .filter(|keyword| article_text.contains(keyword.as_str()))
        .count();

    let phrase_matches = [&idea.title, &idea.innovation_angle, &idea.target_persona]
        .into_iter()
        .filter(|phrase| phrase_matches(phrase, &article_text))
        .count();

    let technical_matches = DOMAIN_TERMS
        .iter()
        .filter(|term| article_text.contains(**term))
        .count();

    let age = config
        .current_year
        .saturating_sub(document.year.unwrap_or(config.current_year));
    let recency = config.recency_bonus.points(age);

    let raw = keyword_matches as u32 * KEYWORD_POINTS
        + phrase_matches as u32 * PHRASE_POINTS
        + technical_matches as u32 * TECHNICAL_POINTS
        + recency;

    Relevance {
        score: raw.min(MAX_SCORE),
        is_relevant: keyword_matches >= KEYWORD_THRESHOLD
            || phrase_matches >= PHRASE_THRESHOLD
            || technical_matches >= TECHNICAL_THRESHOLD,
        keyword_matches,
        total_keywords: keywords.len(),
        phrase_matches,
        technical_matches,
    }
}

/// Copy of the document carrying its relevance annotation.
pub fn annotate(document: &Document, idea: &IdeaContext, config: &RelevanceConfig) -> Document {
    let mut annotated = document.clone();
    annotated.relevance = Some(score(document, idea, config));
    annotated
}
