//! Scenario comparison report models.
//!
//! A [`ScenarioReport`] is what the caller presents after evaluating every
//! scenario: the ordered outcomes, which one is best, how each compares to
//! the standard baseline, and the recommendations that follow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AssessmentYear, TaxOutcome};

/// The kind of advice a [`Recommendation`] gives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Salary sacrifice more into superannuation.
    IncreaseSuperContributions,
    /// Review work-related deductions.
    ExploreDeductions,
    /// Check eligibility for family tax benefits.
    CheckFamilyBenefits,
    /// Seek high-income planning advice.
    HighIncomePlanning,
    /// Fallback when nothing more specific applies.
    ConsultProfessional,
}

/// One piece of advice derived from the profile and the best scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What kind of advice this is.
    pub kind: RecommendationKind,
    /// Short heading.
    pub title: String,
    /// Full advice text.
    pub description: String,
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// The evaluated outcome.
    pub outcome: TaxOutcome,
    /// Final position minus the baseline's; `None` for the baseline itself.
    pub difference_from_standard: Option<Decimal>,
    /// True for the row chosen by the selector.
    pub is_best: bool,
}

/// The full comparison of every scenario for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The assessment year every scenario was evaluated against.
    pub assessment_year: AssessmentYear,
    /// Scenarios in generation order; index zero is the baseline.
    pub scenarios: Vec<ScenarioComparison>,
    /// Index of the best scenario within `scenarios`.
    pub best_index: usize,
    /// The best outcome.
    pub best_scenario: TaxOutcome,
    /// Best final position minus the baseline's.
    pub potential_savings: Decimal,
    /// Advice for the taxpayer, never empty.
    pub recommendations: Vec<Recommendation>,
}
