//! Tax evaluation.
//!
//! Combines the component calculators into one outcome for a profile. The
//! evaluator is a pure function of the profile, the scenario label and the
//! rate tables; it owns no state.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::RateTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, TaxAssessment, TaxComponents, TaxOutcome, TaxpayerProfile,
};

use super::family_benefit::calculate_family_benefit;
use super::income_tax::calculate_income_tax;
use super::medicare_levy::{calculate_medicare_levy, medicare_levy_threshold};
use super::offsets::{calculate_low_income_offset, calculate_low_middle_income_offset};

/// Warning code recorded when a negative amount is clamped to zero.
pub const NEGATIVE_AMOUNT_CLAMPED: &str = "NEGATIVE_AMOUNT_CLAMPED";

/// Largest currency amount accepted in any profile field (1,000,000,000,000,000).
///
/// Sums of every field, the 10% deduction uplift and the bracket rates all
/// stay far inside `Decimal` range below this ceiling.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Brings every currency amount in the profile into the accepted range.
///
/// Negative amounts are replaced with zero, with one warning per amount
/// changed. Amounts above [`MAX_AMOUNT`] are rejected.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::normalize_amounts;
/// use tax_engine::models::TaxpayerProfile;
/// use rust_decimal::Decimal;
///
/// let mut profile = TaxpayerProfile::default();
/// profile.income.bonus = Decimal::new(-500, 0);
///
/// let (clamped, warnings) = normalize_amounts(&profile)?;
/// assert_eq!(clamped.income.bonus, Decimal::ZERO);
/// assert_eq!(warnings.len(), 1);
///
/// profile.income.salary = Decimal::MAX;
/// assert!(normalize_amounts(&profile).is_err());
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
///
/// # Errors
///
/// Returns `AmountOutOfRange` naming the first field above the ceiling.
pub fn normalize_amounts(
    profile: &TaxpayerProfile,
) -> EngineResult<(TaxpayerProfile, Vec<AuditWarning>)> {
    let mut clamped = profile.clone();
    let mut warnings = Vec::new();

    for (field, amount) in clamped.amounts_mut() {
        if *amount > MAX_AMOUNT {
            warn!(field, amount = %amount, "Rejecting amount above the ceiling");
            return Err(EngineError::AmountOutOfRange {
                field: field.to_string(),
                value: amount.to_string(),
                max: MAX_AMOUNT.to_string(),
            });
        }
        if *amount < Decimal::ZERO {
            warn!(field, amount = %amount, "Clamping negative amount to zero");
            warnings.push(AuditWarning {
                code: NEGATIVE_AMOUNT_CLAMPED.to_string(),
                message: format!("{} was {} and has been treated as 0", field, amount),
                severity: "medium".to_string(),
            });
            *amount = Decimal::ZERO;
        }
    }

    Ok((clamped, warnings))
}

/// Evaluates a profile and returns the outcome with its full breakdown.
///
/// # Algorithm
///
/// 1. gross income = salary + bonus + other income
/// 2. total deductions = sum of all eight categories
/// 3. income after packaging = gross income - (salary sacrifice + novated lease)
/// 4. taxable income = max(0, income after packaging - total deductions)
/// 5. base tax, Medicare levy, LITO + LMITO and the family benefit estimate
///    are calculated on taxable income
/// 6. liability = base tax + levy; rebates = offsets + family benefit
/// 7. final position = rebates - liability (positive is a refund)
///
/// Negative amounts in the profile are treated as zero and reported in the
/// audit trace warnings.
///
/// # Errors
///
/// Returns `RateTableNotFound` if `tables` has no table for the profile's year,
/// or `AmountOutOfRange` if any amount is above [`MAX_AMOUNT`].
pub fn assess(
    profile: &TaxpayerProfile,
    scenario_label: &str,
    tables: &RateTables,
) -> EngineResult<TaxAssessment> {
    let table = tables.get(profile.assessment_year)?;
    let (profile, warnings) = normalize_amounts(profile)?;
    let mut steps = Vec::new();

    let gross_income = profile.income.gross_income();
    steps.push(step(
        "gross_income",
        "Gross Income",
        serde_json::json!({
            "salary": profile.income.salary.normalize().to_string(),
            "bonus": profile.income.bonus.normalize().to_string(),
            "other_income": profile.income.other_income.normalize().to_string()
        }),
        serde_json::json!({ "gross_income": gross_income.normalize().to_string() }),
        format!(
            "${} + ${} + ${} = ${} (employer super is not assessable)",
            profile.income.salary.normalize(),
            profile.income.bonus.normalize(),
            profile.income.other_income.normalize(),
            gross_income.normalize()
        ),
    ));

    let total_deductions = profile.deductions.total();
    let salary_packaging = profile.salary_packaging.total();
    let income_after_packaging = gross_income - salary_packaging;
    let taxable_income = (income_after_packaging - total_deductions).max(Decimal::ZERO);
    steps.push(step(
        "taxable_income",
        "Taxable Income",
        serde_json::json!({
            "gross_income": gross_income.normalize().to_string(),
            "salary_packaging": salary_packaging.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        serde_json::json!({ "taxable_income": taxable_income.normalize().to_string() }),
        format!(
            "max(0, ${} - ${} packaging - ${} deductions) = ${}",
            gross_income.normalize(),
            salary_packaging.normalize(),
            total_deductions.normalize(),
            taxable_income.normalize()
        ),
    ));

    let base_tax = calculate_income_tax(taxable_income, table);
    steps.push(step(
        "income_tax",
        "Progressive Income Tax",
        serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "assessment_year": table.assessment_year.as_str()
        }),
        serde_json::json!({ "base_tax": base_tax.normalize().to_string() }),
        format!(
            "{} marginal rates on ${} = ${}",
            table.assessment_year,
            taxable_income.normalize(),
            base_tax.normalize()
        ),
    ));

    let has_dependents = profile.personal.has_dependents();
    let levy_threshold = medicare_levy_threshold(table, has_dependents);
    let medicare_levy = calculate_medicare_levy(taxable_income, table, has_dependents);
    steps.push(step(
        "medicare_levy",
        "Medicare Levy",
        serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "threshold": levy_threshold.normalize().to_string(),
            "has_dependents": has_dependents
        }),
        serde_json::json!({ "medicare_levy": medicare_levy.normalize().to_string() }),
        if medicare_levy.is_zero() {
            format!(
                "${} is at or below the ${} threshold - no levy",
                taxable_income.normalize(),
                levy_threshold.normalize()
            )
        } else {
            format!(
                "${} x 2% = ${}",
                taxable_income.normalize(),
                medicare_levy.normalize()
            )
        },
    ));

    let low_income_offset = calculate_low_income_offset(taxable_income, table);
    let low_middle_income_offset = calculate_low_middle_income_offset(taxable_income, table);
    steps.push(step(
        "tax_offsets",
        "Low and Middle Income Tax Offsets",
        serde_json::json!({ "taxable_income": taxable_income.normalize().to_string() }),
        serde_json::json!({
            "low_income_offset": low_income_offset.normalize().to_string(),
            "low_middle_income_offset": low_middle_income_offset.normalize().to_string()
        }),
        format!(
            "LITO ${} + LMITO ${}",
            low_income_offset.normalize(),
            low_middle_income_offset.normalize()
        ),
    ));

    let family_benefit = calculate_family_benefit(
        taxable_income,
        profile.personal.partner_income,
        profile.personal.dependent_children,
    );
    steps.push(step(
        "family_benefit",
        "Family Benefit Estimate",
        serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "partner_income": profile.personal.partner_income.normalize().to_string(),
            "dependent_children": profile.personal.dependent_children
        }),
        serde_json::json!({ "family_benefit": family_benefit.normalize().to_string() }),
        format!(
            "{} dependent(s), combined income ${} = ${}",
            profile.personal.dependent_children,
            (taxable_income + profile.personal.partner_income).normalize(),
            family_benefit.normalize()
        ),
    ));

    let tax_liability = base_tax + medicare_levy;
    let offsets_and_rebates = low_income_offset + low_middle_income_offset + family_benefit;
    let final_refund_or_payable = offsets_and_rebates - tax_liability;
    steps.push(step(
        "final_position",
        "Final Position",
        serde_json::json!({
            "tax_liability": tax_liability.normalize().to_string(),
            "offsets_and_rebates": offsets_and_rebates.normalize().to_string()
        }),
        serde_json::json!({
            "final_refund_or_payable": final_refund_or_payable.normalize().to_string(),
            "is_refund": final_refund_or_payable >= Decimal::ZERO
        }),
        format!(
            "${} rebates - ${} liability = ${}",
            offsets_and_rebates.normalize(),
            tax_liability.normalize(),
            final_refund_or_payable.normalize()
        ),
    ));

    for (index, audit_step) in steps.iter_mut().enumerate() {
        audit_step.step_number = index as u32 + 1;
    }

    debug!(
        year = %profile.assessment_year,
        scenario = scenario_label,
        taxable_income = %taxable_income,
        final_refund_or_payable = %final_refund_or_payable,
        "Evaluated profile"
    );

    Ok(TaxAssessment {
        outcome: TaxOutcome {
            gross_income,
            taxable_income,
            tax_liability,
            medicare_levy_amount: medicare_levy,
            offsets_and_rebates,
            final_refund_or_payable,
            scenario_label: scenario_label.to_string(),
        },
        components: TaxComponents {
            total_deductions,
            salary_packaging,
            base_tax,
            medicare_levy,
            low_income_offset,
            low_middle_income_offset,
            family_benefit,
        },
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Evaluates a profile under a scenario label.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::evaluate;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::TaxpayerProfile;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::shared()?;
/// let outcome = evaluate(&TaxpayerProfile::default(), "Standard PAYG", config.tables())?;
///
/// assert_eq!(outcome.taxable_income, Decimal::new(80_000, 0));
/// assert_eq!(outcome.scenario_label, "Standard PAYG");
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
pub fn evaluate(
    profile: &TaxpayerProfile,
    scenario_label: &str,
    tables: &RateTables,
) -> EngineResult<TaxOutcome> {
    assess(profile, scenario_label, tables).map(|assessment| assessment.outcome)
}

fn step(
    rule_id: &str,
    rule_name: &str,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number: 0,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input,
        output,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::error::EngineError;
    use crate::models::{AssessmentYear, DeductionDetails, SalaryPackaging};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tables() -> &'static RateTables {
        ConfigLoader::shared().unwrap().tables()
    }

    #[test]
    fn test_default_profile_end_to_end() {
        let outcome = evaluate(&TaxpayerProfile::default(), "Standard PAYG", tables()).unwrap();

        // Base tax: (45,000 - 18,200) x 0.19 + (80,000 - 45,000) x 0.325 = 16,467
        // Levy: 80,000 x 0.02 = 1,600; LITO is fully phased out at 80,000
        assert_eq!(outcome.gross_income, dec("80000"));
        assert_eq!(outcome.taxable_income, dec("80000"));
        assert_eq!(outcome.tax_liability, dec("18067"));
        assert_eq!(outcome.medicare_levy_amount, dec("1600"));
        assert_eq!(outcome.offsets_and_rebates, Decimal::ZERO);
        assert_eq!(outcome.final_refund_or_payable, dec("-18067"));
        assert_eq!(outcome.scenario_label, "Standard PAYG");
    }

    #[test]
    fn test_employer_super_is_not_assessable() {
        let mut profile = TaxpayerProfile::default();
        profile.income.employer_super = dec("20000");

        let outcome = evaluate(&profile, "Standard PAYG", tables()).unwrap();
        assert_eq!(outcome.gross_income, dec("80000"));
    }

    #[test]
    fn test_packaging_and_deductions_reduce_taxable_income() {
        let mut profile = TaxpayerProfile::default();
        profile.income.bonus = dec("5000");
        profile.income.other_income = dec("1000");
        profile.deductions.work_related_expenses = dec("1500");
        profile.deductions.donations = dec("500");
        profile.salary_packaging = SalaryPackaging {
            salary_sacrifice_super: dec("4000"),
            novated_lease: dec("6000"),
        };

        let assessment = assess(&profile, "Standard PAYG", tables()).unwrap();
        assert_eq!(assessment.outcome.gross_income, dec("86000"));
        assert_eq!(assessment.outcome.taxable_income, dec("74000"));
        assert_eq!(assessment.components.total_deductions, dec("2000"));
        assert_eq!(assessment.components.salary_packaging, dec("10000"));
    }

    #[test]
    fn test_taxable_income_floors_at_zero() {
        let mut profile = TaxpayerProfile::default();
        profile.income.salary = dec("10000");
        profile.deductions = DeductionDetails {
            work_related_expenses: dec("25000"),
            ..DeductionDetails::default()
        };

        let outcome = evaluate(&profile, "Standard PAYG", tables()).unwrap();
        assert_eq!(outcome.taxable_income, Decimal::ZERO);
        assert_eq!(outcome.tax_liability, Decimal::ZERO);
        // Full LITO still applies at zero income
        assert_eq!(outcome.offsets_and_rebates, dec("700"));
        assert_eq!(outcome.final_refund_or_payable, dec("700"));
    }

    #[test]
    fn test_low_income_earner_receives_refund() {
        let mut profile = TaxpayerProfile::default();
        profile.income.salary = dec("30000");

        let assessment = assess(&profile, "Standard PAYG", tables()).unwrap();

        // Tax (30,000 - 18,200) x 0.19 = 2,242; levy 600; LITO 700
        assert_eq!(assessment.components.base_tax, dec("2242"));
        assert_eq!(assessment.components.medicare_levy, dec("600"));
        assert_eq!(assessment.components.low_income_offset, dec("700"));
        assert_eq!(assessment.outcome.final_refund_or_payable, dec("-2142"));
    }

    #[test]
    fn test_family_benefit_counts_as_rebate() {
        let mut profile = TaxpayerProfile::default();
        profile.income.salary = dec("50000");
        profile.personal.dependent_children = 2;
        profile.personal.partner_income = dec("20000");

        let assessment = assess(&profile, "Standard PAYG", tables()).unwrap();

        // Combined 70,000 < 80,000: 2 x 5,000
        assert_eq!(assessment.components.family_benefit, dec("10000"));
        // LITO 700 - 12,500 x 0.05 = 75
        assert_eq!(assessment.components.low_income_offset, dec("75"));
        assert_eq!(assessment.outcome.offsets_and_rebates, dec("10075"));
        // Tax 5,092 + 5,000 x 0.325 = 6,717; levy 1,000
        assert_eq!(assessment.outcome.tax_liability, dec("7717"));
        assert_eq!(assessment.outcome.final_refund_or_payable, dec("2358"));
    }

    #[test]
    fn test_lmito_applies_in_2021_22() {
        let mut profile = TaxpayerProfile::default();
        profile.assessment_year = AssessmentYear::Y2021_22;

        let assessment = assess(&profile, "Standard PAYG", tables()).unwrap();
        assert_eq!(assessment.components.low_middle_income_offset, dec("1500"));
        assert_eq!(assessment.outcome.offsets_and_rebates, dec("1500"));
        assert_eq!(assessment.outcome.final_refund_or_payable, dec("-16567"));
    }

    #[test]
    fn test_negative_amounts_are_clamped_with_warnings() {
        let mut profile = TaxpayerProfile::default();
        profile.income.bonus = dec("-5000");
        profile.deductions.donations = dec("-100");

        let assessment = assess(&profile, "Standard PAYG", tables()).unwrap();

        assert_eq!(assessment.outcome.gross_income, dec("80000"));
        assert_eq!(assessment.components.total_deductions, Decimal::ZERO);
        assert_eq!(assessment.audit_trace.warnings.len(), 2);
        assert!(
            assessment
                .audit_trace
                .warnings
                .iter()
                .all(|w| w.code == NEGATIVE_AMOUNT_CLAMPED)
        );
        assert!(assessment.audit_trace.warnings[0].message.contains("income.bonus"));
    }

    #[test]
    fn test_amount_above_ceiling_is_rejected() {
        let mut profile = TaxpayerProfile::default();
        profile.income.salary = Decimal::MAX;
        profile.income.bonus = Decimal::ONE;

        match assess(&profile, "Standard PAYG", tables()) {
            Err(EngineError::AmountOutOfRange { field, value, max }) => {
                assert_eq!(field, "income.salary");
                assert_eq!(value, Decimal::MAX.to_string());
                assert_eq!(max, "1000000000000000");
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_amounts_at_ceiling_are_accepted() {
        let mut profile = TaxpayerProfile::default();
        profile.income.salary = MAX_AMOUNT;
        profile.income.bonus = MAX_AMOUNT;
        profile.deductions.donations = MAX_AMOUNT;
        profile.salary_packaging.novated_lease = MAX_AMOUNT;

        let assessment = assess(&profile, "Standard PAYG", tables()).unwrap();

        assert_eq!(assessment.outcome.gross_income, dec("2000000000000000"));
        assert_eq!(assessment.outcome.taxable_income, Decimal::ZERO);
    }

    #[test]
    fn test_audit_trace_records_every_step_in_order() {
        let assessment = assess(&TaxpayerProfile::default(), "Standard PAYG", tables()).unwrap();
        let rule_ids: Vec<&str> = assessment
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec![
                "gross_income",
                "taxable_income",
                "income_tax",
                "medicare_levy",
                "tax_offsets",
                "family_benefit",
                "final_position"
            ]
        );
        let numbers: Vec<u32> = assessment
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(assessment.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_audit_step_output_values() {
        let assessment = assess(&TaxpayerProfile::default(), "Standard PAYG", tables()).unwrap();
        let levy_step = &assessment.audit_trace.steps[3];

        assert_eq!(levy_step.output["medicare_levy"].as_str().unwrap(), "1600");
        assert_eq!(levy_step.input["threshold"].as_str().unwrap(), "26000");
        assert!(levy_step.reasoning.contains("2%"));
    }

    #[test]
    fn test_missing_rate_table_is_an_error() {
        let partial = RateTables::new(vec![
            tables().get(AssessmentYear::Y2023_24).unwrap().clone(),
        ])
        .unwrap();
        let mut profile = TaxpayerProfile::default();
        profile.assessment_year = AssessmentYear::Y2019_20;

        match evaluate(&profile, "Standard PAYG", &partial) {
            Err(EngineError::RateTableNotFound { year }) => {
                assert_eq!(year, AssessmentYear::Y2019_20);
            }
            other => panic!("Expected RateTableNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let profile = TaxpayerProfile::default();
        let first = assess(&profile, "Standard PAYG", tables()).unwrap();
        let second = assess(&profile, "Standard PAYG", tables()).unwrap();

        assert_eq!(first, second);
    }
}
