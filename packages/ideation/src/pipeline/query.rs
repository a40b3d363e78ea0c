//! Free-text to scholarly-search query conversion.
//!
//! Long idea descriptions make poor search queries. The builder keeps quoted
//! phrases and long tokens, requires the first term and makes the rest
//! optional: `+first (second | third | (quoted phrase))`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of terms in a built query.
pub const MAX_QUERY_TERMS: usize = 6;

/// Tokens must be longer than this many characters.
const MIN_TOKEN_CHARS: usize = 4;

static QUOTED_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]+)""#).expect("quoted phrase pattern is valid")
});

fn is_query_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "áéíóúüñÁÉÍÓÚÜÑ".contains(c)
}

fn format_term(term: &str) -> String {
    if term.chars().any(char::is_whitespace) {
        format!("({term})")
    } else {
        term.to_string()
    }
}

/// Build a search-engine query from free text.
///
/// Returns an empty string for blank input.
pub fn build_semantic_query(query: &str) -> String {
    let sanitized = query.trim();
    if sanitized.is_empty() {
        return String::new();
    }

    let quoted = QUOTED_PHRASE
        .captures_iter(sanitized)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    let stripped = QUOTED_PHRASE.replace_all(sanitized, " ");
    let tokens: Vec<String> = stripped
        .split(|c: char| !is_query_char(c))
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect();

    let mut seen = HashSet::new();
    let mut terms: Vec<String> = Vec::new();
    for candidate in quoted.chain(tokens).filter(|c| !c.is_empty()) {
        if !seen.insert(candidate.to_lowercase()) {
            continue;
        }
        terms.push(candidate);
        if terms.len() >= MAX_QUERY_TERMS {
            break;
        }
    }

    let Some((required, optional)) = terms.split_first() else {
        return if sanitized.contains(' ') {
            format!("\"{sanitized}\"")
        } else {
            sanitized.to_string()
        };
    };

    let mut built = format!("+{}", format_term(required));
    if !optional.is_empty() {
        let alternatives: Vec<String> = optional.iter().map(|t| format_term(t)).collect();
        built.push_str(&format!(" ({})", alternatives.join(" | ")));
    }
    built
}
