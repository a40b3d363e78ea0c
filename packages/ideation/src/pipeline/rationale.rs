//! One-sentence explanation of why a document supports an idea.

use crate::types::{document::Document, idea::IdeaContext};

/// Build the support rationale shown next to a piece of evidence.
pub fn support_rationale(document: &Document, idea: &IdeaContext) -> String {
    let venue = if document.venue.is_empty() {
        String::new()
    } else {
        format!(" published in {}", document.venue)
    };
    let year = document
        .year
        .map(|year| format!(" ({year})"))
        .unwrap_or_default();

    let mut hooks = Vec::new();
    if !idea.innovation_angle.is_empty() {
        hooks.push(format!("connects with the \"{}\" approach", idea.innovation_angle));
    }
    if !idea.target_persona.is_empty() {
        hooks.push(format!(
            "provides evidence for {}",
            idea.target_persona.to_lowercase()
        ));
    }
    if hooks.is_empty() && !idea.title.is_empty() {
        hooks.push(format!("reinforces the \"{}\" proposal", idea.title));
    }
    if hooks.is_empty() {
        hooks.push("provides complementary evidence for the idea".to_string());
    }

    format!("The article{venue}{year} {}.", hooks.join(" and "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_rationale() {
        let doc = Document::new("1", "t", "a").with_venue("JMIR").with_year(2024);
        let idea = IdeaContext::new("Title", "", "IA generativa", "Rural Clinics");

        assert_eq!(
            support_rationale(&doc, &idea),
            "The article published in JMIR (2024) connects with the \"IA generativa\" approach and provides evidence for rural clinics."
        );
    }

    #[test]
    fn test_falls_back_to_title() {
        let doc = Document::new("1", "t", "a");
        let idea = IdeaContext::new("Telehealth", "", "", "");
        assert_eq!(
            support_rationale(&doc, &idea),
            "The article reinforces the \"Telehealth\" proposal."
        );
    }

    #[test]
    fn test_generic_rationale() {
        let doc = Document::new("1", "t", "a").with_year(2023);
        let idea = IdeaContext::new("", "", "", "");
        assert_eq!(
            support_rationale(&doc, &idea),
            "The article (2023) provides complementary evidence for the idea."
        );
    }
}
