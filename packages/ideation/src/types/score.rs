//! Opportunity rubric and scoring result types.

use serde::{Deserialize, Serialize};

/// Scale label carried by every [`ScoringResult`].
pub const SCORE_SCALE: &str = "0-50";

/// The six rubric criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionId {
    Popularity,
    Priority,
    Dissatisfaction,
    Tangibility,
    Inevitability,
    MarketNeglect,
}

impl DimensionId {
    /// All dimensions in rubric order.
    pub const ALL: [DimensionId; 6] = [
        Self::Popularity,
        Self::Priority,
        Self::Dissatisfaction,
        Self::Tangibility,
        Self::Inevitability,
        Self::MarketNeglect,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Popularity => "Popularity",
            Self::Priority => "Priority",
            Self::Dissatisfaction => "Dissatisfaction",
            Self::Tangibility => "Tangibility",
            Self::Inevitability => "Inevitability",
            Self::MarketNeglect => "Market neglect",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Popularity => "How many people does it affect and how wide is the target market?",
            Self::Priority => "Is it an urgent or must-have problem for users?",
            Self::Dissatisfaction => "Are current alternatives poor or missing?",
            Self::Tangibility => "How clear is the value and the path to deliver it?",
            Self::Inevitability => {
                "Does the problem grow over time or ride unavoidable trends?"
            }
            Self::MarketNeglect => "How underserved is the segment by current competitors?",
        }
    }
}

/// One scored rubric criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricDimension {
    pub id: DimensionId,
    pub label: String,
    /// Integer score in `[1, 10]`.
    pub score: u8,
    pub description: String,
}

impl RubricDimension {
    pub fn new(id: DimensionId, score: u8) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            score,
            description: id.description().to_string(),
        }
    }
}

/// Verdict band on the 0-50 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Excellent,
    Great,
    Moderate,
    Weak,
}

impl Verdict {
    /// Pick the band for a normalized total. Lower bounds are inclusive.
    pub fn from_total(total: u32) -> Self {
        match total {
            45.. => Self::Excellent,
            37.. => Self::Great,
            30.. => Self::Moderate,
            _ => Self::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent opportunity",
            Self::Great => "Great opportunity",
            Self::Moderate => "Moderate opportunity",
            Self::Weak => "Weak opportunity",
        }
    }
}

/// Rubric and totals for one (idea, evidence set) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub rubric: Vec<RubricDimension>,

    /// Sum of the six scores, `6..=60`.
    pub raw_total: u32,

    /// Raw total rescaled onto `0..=50`.
    pub total_score: u32,

    pub verdict: Verdict,

    pub total_label: String,

    pub scale: String,
}

impl ScoringResult {
    /// Build the result from a scored rubric.
    pub fn from_rubric(rubric: Vec<RubricDimension>) -> Self {
        let raw_total: u32 = rubric.iter().map(|d| u32::from(d.score)).sum();
        let max_total = (rubric.len() * 10).max(1) as f64;
        let total_score = (f64::from(raw_total) / max_total * 50.0).round() as u32;
        let verdict = Verdict::from_total(total_score);

        Self {
            rubric,
            raw_total,
            total_score,
            verdict,
            total_label: verdict.label().to_string(),
            scale: SCORE_SCALE.to_string(),
        }
    }

    /// Look up one dimension.
    pub fn dimension(&self, id: DimensionId) -> Option<&RubricDimension> {
        self.rubric.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_boundaries_are_inclusive() {
        assert_eq!(Verdict::from_total(50), Verdict::Excellent);
        assert_eq!(Verdict::from_total(45), Verdict::Excellent);
        assert_eq!(Verdict::from_total(44), Verdict::Great);
        assert_eq!(Verdict::from_total(37), Verdict::Great);
        assert_eq!(Verdict::from_total(36), Verdict::Moderate);
        assert_eq!(Verdict::from_total(30), Verdict::Moderate);
        assert_eq!(Verdict::from_total(29), Verdict::Weak);
        assert_eq!(Verdict::from_total(0), Verdict::Weak);
    }

    #[test]
    fn test_from_rubric_rescales_to_fifty() {
        let rubric = DimensionId::ALL
            .iter()
            .map(|id| RubricDimension::new(*id, 10))
            .collect();
        let result = ScoringResult::from_rubric(rubric);
        assert_eq!(result.raw_total, 60);
        assert_eq!(result.total_score, 50);
        assert_eq!(result.verdict, Verdict::Excellent);

        let rubric = DimensionId::ALL
            .iter()
            .map(|id| RubricDimension::new(*id, 1))
            .collect();
        let result = ScoringResult::from_rubric(rubric);
        assert_eq!(result.raw_total, 6);
        assert_eq!(result.total_score, 5);
        assert_eq!(result.verdict, Verdict::Weak);
        assert_eq!(result.scale, "0-50");
    }

    #[test]
    fn test_dimension_serializes_camel_case_id() {
        let json = serde_json::to_value(RubricDimension::new(DimensionId::MarketNeglect, 7)).unwrap();
        assert_eq!(json["id"], "marketNeglect");
        assert_eq!(json["score"], 7);
    }
}
