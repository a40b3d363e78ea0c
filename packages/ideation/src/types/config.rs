//! Configuration types for relevance, evidence, scoring and aggregation.
//!
//! Every threshold the pipeline uses lives here rather than as a literal, and
//! the current year is a field so callers (and tests) can pin it.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Calendar year according to the system clock.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// How the relevance scorer rewards recent publications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyBonus {
    /// Mutually exclusive bands: age <= 3 earns 10, age 4-5 earns 5.
    #[default]
    Banded,

    /// Both bands stack, so age <= 3 earns 15.
    Cumulative,
}

impl RecencyBonus {
    /// Points for a publication of the given age in years.
    pub fn points(self, age: i32) -> u32 {
        match self {
            Self::Banded if age <= 3 => 10,
            Self::Banded if age <= 5 => 5,
            Self::Banded => 0,
            Self::Cumulative => {
                let recent = if age <= 3 { 10 } else { 0 };
                let fresh = if age <= 5 { 5 } else { 0 };
                recent + fresh
            }
        }
    }
}

/// Configuration for the relevance scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceConfig {
    /// Year publication ages are measured against.
    pub current_year: i32,

    /// Recency bonus policy.
    pub recency_bonus: RecencyBonus,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            current_year: current_year(),
            recency_bonus: RecencyBonus::default(),
        }
    }
}

impl RelevanceConfig {
    /// Create a config pinned to a year.
    pub fn for_year(year: i32) -> Self {
        Self {
            current_year: year,
            ..Default::default()
        }
    }

    /// Set the recency bonus policy.
    pub fn with_recency_bonus(mut self, policy: RecencyBonus) -> Self {
        self.recency_bonus = policy;
        self
    }
}

/// Configuration for evidence filtering and ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceConfig {
    /// Year the recency window trails from.
    pub current_year: i32,

    /// Documents older than `current_year - recency_window_years` are dropped.
    ///
    /// Default: 6.
    pub recency_window_years: i32,

    /// Minimum relevance score on the primary query. Default: 40.
    pub min_relevance_score: u32,

    /// Minimum relevance score on the fallback query. Default: 35.
    pub fallback_min_relevance_score: u32,

    /// The fallback query runs when fewer primary documents than this survive.
    ///
    /// Default: 3.
    pub fallback_trigger: usize,

    /// Cap on returned documents. Default: 8.
    pub max_results: usize,

    /// Recency bonus policy handed to the relevance scorer.
    pub recency_bonus: RecencyBonus,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            current_year: current_year(),
            recency_window_years: 6,
            min_relevance_score: 40,
            fallback_min_relevance_score: 35,
            fallback_trigger: 3,
            max_results: 8,
            recency_bonus: RecencyBonus::default(),
        }
    }
}

impl EvidenceConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the current year.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Set the primary minimum relevance score.
    pub fn with_min_score(mut self, score: u32) -> Self {
        self.min_relevance_score = score;
        self
    }

    /// Set the fallback minimum relevance score.
    pub fn with_fallback_min_score(mut self, score: u32) -> Self {
        self.fallback_min_relevance_score = score;
        self
    }

    /// Set the result cap.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Set the recency bonus policy.
    pub fn with_recency_bonus(mut self, policy: RecencyBonus) -> Self {
        self.recency_bonus = policy;
        self
    }

    /// Oldest publication year still inside the window.
    pub fn min_year(&self) -> i32 {
        self.current_year - self.recency_window_years
    }

    /// Relevance scorer settings derived from this config.
    pub fn relevance(&self) -> RelevanceConfig {
        RelevanceConfig {
            current_year: self.current_year,
            recency_bonus: self.recency_bonus,
        }
    }
}

/// Configuration for the opportunity scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Year document ages are measured against.
    pub current_year: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            current_year: current_year(),
        }
    }
}

impl ScoringConfig {
    /// Create a config pinned to a year.
    pub fn for_year(year: i32) -> Self {
        Self { current_year: year }
    }
}

/// Configuration for idea aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Number of ideas to return. Default: 3.
    pub desired_ideas: usize,

    /// Generator calls before falling back to templates. Default: 3.
    pub max_attempts: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            desired_ideas: 3,
            max_attempts: 3,
        }
    }
}

impl AggregatorConfig {
    /// Set the number of ideas to return.
    pub fn with_desired_ideas(mut self, count: usize) -> Self {
        self.desired_ideas = count;
        self
    }

    /// Set the attempt cap.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }
}

/// Configuration for the whole topic-to-report pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeationConfig {
    pub evidence: EvidenceConfig,
    pub scoring: ScoringConfig,
    pub aggregator: AggregatorConfig,
}

impl IdeationConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the current year for every stage.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.evidence.current_year = year;
        self.scoring.current_year = year;
        self
    }

    /// Replace the evidence config.
    pub fn with_evidence(mut self, evidence: EvidenceConfig) -> Self {
        self.evidence = evidence;
        self
    }

    /// Replace the aggregator config.
    pub fn with_aggregator(mut self, aggregator: AggregatorConfig) -> Self {
        self.aggregator = aggregator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banded_recency_bonus() {
        let policy = RecencyBonus::Banded;
        assert_eq!(policy.points(0), 10);
        assert_eq!(policy.points(3), 10);
        assert_eq!(policy.points(4), 5);
        assert_eq!(policy.points(5), 5);
        assert_eq!(policy.points(6), 0);
    }

    #[test]
    fn test_cumulative_recency_bonus_stacks() {
        let policy = RecencyBonus::Cumulative;
        assert_eq!(policy.points(1), 15);
        assert_eq!(policy.points(5), 5);
        assert_eq!(policy.points(9), 0);
    }

    #[test]
    fn test_evidence_defaults() {
        let config = EvidenceConfig::new().with_current_year(2026);
        assert_eq!(config.min_year(), 2020);
        assert_eq!(config.min_relevance_score, 40);
        assert_eq!(config.fallback_min_relevance_score, 35);
        assert_eq!(config.max_results, 8);
        assert_eq!(config.relevance().current_year, 2026);
    }

    #[test]
    fn test_ideation_config_pins_year_everywhere() {
        let config = IdeationConfig::new().with_current_year(2030);
        assert_eq!(config.evidence.current_year, 2030);
        assert_eq!(config.scoring.current_year, 2030);
    }
}
