//! Shared normalization for scholarly search payloads.

use serde::Deserialize;
use serde_json::Value;

/// Abstract used when a source returns none.
pub const MISSING_ABSTRACT: &str = "Resumen no disponible.";

/// Abstracts longer than this are shortened.
pub const MAX_ABSTRACT_CHARS: usize = 480;

/// Characters kept from a shortened abstract before the ellipsis.
const KEPT_ABSTRACT_CHARS: usize = 477;

/// At most this many authors are kept per document.
pub const MAX_AUTHORS: usize = 5;

/// Shorten an abstract to at most [`MAX_ABSTRACT_CHARS`] characters.
pub fn summarize_abstract(text: &str) -> String {
    if text.chars().count() > MAX_ABSTRACT_CHARS {
        let kept: String = text.chars().take(KEPT_ABSTRACT_CHARS).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Use the missing-abstract placeholder for absent or blank abstracts.
pub fn abstract_or_default(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(text) if !text.is_empty() => summarize_abstract(text),
        _ => MISSING_ABSTRACT.to_string(),
    }
}

/// An author as either search API reports it.
#[derive(Debug, Default, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub given: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
}

impl RawAuthor {
    fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!(
                "{} {}",
                self.given.as_deref().unwrap_or(""),
                self.family.as_deref().unwrap_or("")
            )
            .trim()
            .to_string(),
        }
    }
}

/// Author display names, blanks dropped, capped at [`MAX_AUTHORS`].
pub fn format_authors(authors: &[RawAuthor]) -> Vec<String> {
    authors
        .iter()
        .map(RawAuthor::display_name)
        .filter(|name| !name.is_empty())
        .take(MAX_AUTHORS)
        .collect()
}

/// A positive year from a JSON number or numeric string.
pub fn numeric_year(value: &Value) -> Option<i32> {
    let year = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(year).ok().filter(|y| *y > 0)
}

/// Year from an explicit field, else the first four characters of a date.
pub fn year_from(year: Option<&Value>, publication_date: Option<&str>) -> Option<i32> {
    year.and_then(numeric_year).or_else(|| {
        let date = publication_date?;
        let prefix: String = date.chars().take(4).collect();
        numeric_year(&Value::String(prefix))
    })
}

/// Trimmed text, or `None` when blank.
pub fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
