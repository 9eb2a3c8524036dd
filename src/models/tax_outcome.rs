//! Tax outcome models.
//!
//! This module contains the [`TaxOutcome`] value produced for every
//! evaluated scenario, along with the [`TaxAssessment`] that pairs an
//! outcome with its component breakdown and audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The net tax position of one evaluated profile.
///
/// # Example
///
/// ```
/// use tax_engine::models::TaxOutcome;
/// use rust_decimal::Decimal;
///
/// let outcome = TaxOutcome {
///     gross_income: Decimal::new(50_000, 0),
///     taxable_income: Decimal::new(50_000, 0),
///     tax_liability: Decimal::new(7_717, 0),
///     medicare_levy_amount: Decimal::new(1_000, 0),
///     offsets_and_rebates: Decimal::new(450, 0),
///     final_refund_or_payable: Decimal::new(-7_267, 0),
///     scenario_label: "Standard PAYG".to_string(),
/// };
/// assert!(!outcome.is_refund());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxOutcome {
    /// Salary + bonus + other income.
    pub gross_income: Decimal,
    /// Gross income less packaging and deductions, floored at zero.
    pub taxable_income: Decimal,
    /// Base income tax plus Medicare levy.
    pub tax_liability: Decimal,
    /// The Medicare levy component of the liability.
    pub medicare_levy_amount: Decimal,
    /// Tax offsets plus the family benefit estimate.
    pub offsets_and_rebates: Decimal,
    /// Positive for a refund, negative for an amount owed.
    pub final_refund_or_payable: Decimal,
    /// Identifies the scenario that produced this outcome.
    pub scenario_label: String,
}

impl TaxOutcome {
    /// Returns true when the position is a refund (zero counts as a refund).
    pub fn is_refund(&self) -> bool {
        self.final_refund_or_payable >= Decimal::ZERO
    }
}

/// The individual amounts that make up a [`TaxOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponents {
    /// Sum of all claimed deductions.
    pub total_deductions: Decimal,
    /// Salary sacrifice plus novated lease.
    pub salary_packaging: Decimal,
    /// Progressive income tax before the levy.
    pub base_tax: Decimal,
    /// Medicare levy.
    pub medicare_levy: Decimal,
    /// Low Income Tax Offset.
    pub low_income_offset: Decimal,
    /// Low and Middle Income Tax Offset.
    pub low_middle_income_offset: Decimal,
    /// Family benefit estimate.
    pub family_benefit: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during evaluation.
///
/// Warnings indicate input that was adjusted but did not stop the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during evaluation.
    pub warnings: Vec<AuditWarning>,
}

/// An outcome together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    /// The net tax position.
    pub outcome: TaxOutcome,
    /// The component amounts behind the outcome.
    pub components: TaxComponents,
    /// Every rule applied, in order.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_outcome(final_position: &str) -> TaxOutcome {
        TaxOutcome {
            gross_income: dec("80000"),
            taxable_income: dec("80000"),
            tax_liability: dec("19067"),
            medicare_levy_amount: dec("1600"),
            offsets_and_rebates: dec("0"),
            final_refund_or_payable: dec(final_position),
            scenario_label: "Standard PAYG".to_string(),
        }
    }

    #[test]
    fn test_is_refund_for_positive_position() {
        assert!(sample_outcome("120.50").is_refund());
    }

    #[test]
    fn test_is_refund_for_zero_position() {
        assert!(sample_outcome("0").is_refund());
    }

    #[test]
    fn test_is_not_refund_for_negative_position() {
        assert!(!sample_outcome("-19067").is_refund());
    }

    #[test]
    fn test_outcome_serializes_amounts_as_strings() {
        let json = serde_json::to_value(sample_outcome("-19067")).unwrap();

        assert_eq!(json["taxable_income"].as_str().unwrap(), "80000");
        assert_eq!(json["final_refund_or_payable"].as_str().unwrap(), "-19067");
        assert_eq!(json["scenario_label"].as_str().unwrap(), "Standard PAYG");
    }

    #[test]
    fn test_audit_trace_defaults_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }
}
