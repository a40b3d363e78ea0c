//! Idea context and the loosely-shaped upstream idea it is normalized from.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title used when the generator omits one.
pub const DEFAULT_TITLE: &str = "Concepto MindRaven";

/// Summary used when the generator omits one.
pub const DEFAULT_SUMMARY: &str =
    "Explora combinar datos academicos y senales de mercado para lanzar una propuesta diferenciada.";

/// Innovation angle used when the generator omits one.
pub const DEFAULT_INNOVATION_ANGLE: &str =
    "Uso estrategico de IA generativa y fuentes cientificas para justificar la oportunidad.";

/// Target persona used when the generator omits one.
pub const DEFAULT_TARGET_PERSONA: &str = "Fundadores y equipos de innovacion.";

/// An idea exactly as a generator returned it.
///
/// Every field is optional and tolerant of the wrong JSON type: a list field
/// holding a string, or a title holding a number, is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIdea {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub idea_title: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub idea_summary: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub innovation_angle: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub target_persona: Option<String>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub trend_signals: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub validation_focus: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub action_steps: Option<Vec<String>>,
}

impl RawIdea {
    /// Create a raw idea with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            idea_title: Some(title.into()),
            ..Default::default()
        }
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Fully-populated description of a candidate idea.
///
/// The semantic anchor for evidence matching and opportunity scoring. Build
/// it once with [`IdeaContext::normalize`]; the core only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaContext {
    #[serde(rename = "ideaTitle")]
    pub title: String,

    #[serde(rename = "ideaSummary")]
    pub summary: String,

    pub innovation_angle: String,

    pub target_persona: String,

    #[serde(default)]
    pub trend_signals: Vec<String>,

    #[serde(default)]
    pub validation_focus: Vec<String>,

    #[serde(default)]
    pub action_steps: Vec<String>,
}

/// Identity of an idea for deduplication: lowercased title, summary and persona.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdeaKey {
    pub title: String,
    pub summary: String,
    pub persona: String,
}

impl IdeaContext {
    /// Create an idea with the given text fields and empty lists.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        innovation_angle: impl Into<String>,
        target_persona: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            innovation_angle: innovation_angle.into(),
            target_persona: target_persona.into(),
            trend_signals: Vec::new(),
            validation_focus: Vec::new(),
            action_steps: Vec::new(),
        }
    }

    /// Apply the defaulting rules to an upstream idea.
    ///
    /// Missing or blank text fields take the `DEFAULT_*` values; missing
    /// lists become empty.
    pub fn normalize(raw: RawIdea) -> Self {
        Self {
            title: text_or(raw.idea_title, DEFAULT_TITLE),
            summary: text_or(raw.idea_summary, DEFAULT_SUMMARY),
            innovation_angle: text_or(raw.innovation_angle, DEFAULT_INNOVATION_ANGLE),
            target_persona: text_or(raw.target_persona, DEFAULT_TARGET_PERSONA),
            trend_signals: raw.trend_signals.unwrap_or_default(),
            validation_focus: raw.validation_focus.unwrap_or_default(),
            action_steps: raw.action_steps.unwrap_or_default(),
        }
    }

    /// Set trend signals.
    pub fn with_trend_signals(mut self, signals: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.trend_signals = signals.into_iter().map(Into::into).collect();
        self
    }

    /// Set validation focuses.
    pub fn with_validation_focus(mut self, focus: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.validation_focus = focus.into_iter().map(Into::into).collect();
        self
    }

    /// Set action steps.
    pub fn with_action_steps(mut self, steps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.action_steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Deduplication key (lowercased title, summary, persona).
    pub fn dedup_key(&self) -> IdeaKey {
        IdeaKey {
            title: self.title.to_lowercase(),
            summary: self.summary.to_lowercase(),
            persona: self.target_persona.to_lowercase(),
        }
    }

    /// All text fields in order: title, summary, angle, persona, then the
    /// trend signals, validation focuses and action steps.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.title.as_str(),
            self.summary.as_str(),
            self.innovation_angle.as_str(),
            self.target_persona.as_str(),
        ]
        .into_iter()
        .chain(self.trend_signals.iter().map(String::as_str))
        .chain(self.validation_focus.iter().map(String::as_str))
        .chain(self.action_steps.iter().map(String::as_str))
    }

    /// Primary evidence query: every non-empty text field joined by spaces.
    pub fn search_query(&self) -> String {
        join_non_empty(self.text_fields())
    }

    /// Broader evidence query used when the primary one starves.
    pub fn broad_query(&self) -> String {
        self.title.trim().to_string()
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => default.to_string(),
    }
}

pub(crate) fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
