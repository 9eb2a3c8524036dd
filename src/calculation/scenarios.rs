//! Scenario generation.
//!
//! Each scenario is a pure transform from the base profile to a derived
//! profile. The transforms are held in a fixed, ordered table and every
//! derived profile is run through the evaluator.

use rust_decimal::Decimal;

use crate::config::{RateTable, RateTables};
use crate::error::EngineResult;
use crate::models::{SalaryPackaging, TaxOutcome, TaxpayerProfile};

use super::evaluator::{evaluate, normalize_amounts};
use super::super_headroom::calculate_super_headroom;

/// Label of the unchanged baseline scenario.
pub const STANDARD_PAYG: &str = "Standard PAYG";

/// Label of the scenario that salary sacrifices the super headroom.
pub const WITH_SUPER_SACRIFICE: &str = "With Super Sacrifice";

/// Label of the scenario with every deduction increased by 10%.
pub const MAX_DEDUCTIONS: &str = "Max Deductions";

/// Label of the scenario combining super sacrifice and increased deductions.
pub const OPTIMIZED_STRATEGY: &str = "Optimized Strategy";

/// Factor applied to each deduction in the increased deduction scenarios.
pub const DEDUCTION_UPLIFT: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

/// A named transform producing one scenario's profile.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioTransform {
    /// Label carried into the resulting `TaxOutcome`.
    pub label: &'static str,
    /// Derives the scenario profile from the base profile.
    pub apply: fn(&TaxpayerProfile, &RateTable) -> TaxpayerProfile,
}

/// The scenarios in the order they are reported.
pub const SCENARIOS: [ScenarioTransform; 4] = [
    ScenarioTransform {
        label: STANDARD_PAYG,
        apply: standard,
    },
    ScenarioTransform {
        label: WITH_SUPER_SACRIFICE,
        apply: with_super_sacrifice,
    },
    ScenarioTransform {
        label: MAX_DEDUCTIONS,
        apply: max_deductions,
    },
    ScenarioTransform {
        label: OPTIMIZED_STRATEGY,
        apply: optimized,
    },
];

fn standard(profile: &TaxpayerProfile, _table: &RateTable) -> TaxpayerProfile {
    profile.clone()
}

fn with_super_sacrifice(profile: &TaxpayerProfile, table: &RateTable) -> TaxpayerProfile {
    let headroom =
        calculate_super_headroom(profile.income.salary, profile.income.employer_super, table);
    TaxpayerProfile {
        salary_packaging: SalaryPackaging {
            salary_sacrifice_super: headroom,
            ..profile.salary_packaging.clone()
        },
        ..profile.clone()
    }
}

fn max_deductions(profile: &TaxpayerProfile, _table: &RateTable) -> TaxpayerProfile {
    TaxpayerProfile {
        deductions: profile.deductions.scaled(DEDUCTION_UPLIFT),
        ..profile.clone()
    }
}

fn optimized(profile: &TaxpayerProfile, table: &RateTable) -> TaxpayerProfile {
    let packaged = with_super_sacrifice(profile, table);
    max_deductions(&packaged, table)
}

/// Evaluates all four scenarios for a profile.
///
/// Outcomes are returned in [`SCENARIOS`] order: "Standard PAYG",
/// "With Super Sacrifice", "Max Deductions", "Optimized Strategy". Negative
/// amounts are clamped before any transform runs.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::generate_scenarios;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::TaxpayerProfile;
///
/// let config = ConfigLoader::shared()?;
/// let outcomes = generate_scenarios(&TaxpayerProfile::default(), config.tables())?;
///
/// assert_eq!(outcomes.len(), 4);
/// assert_eq!(outcomes[0].scenario_label, "Standard PAYG");
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
///
/// # Errors
///
/// Returns `RateTableNotFound` if `tables` has no table for the profile's year,
/// or `AmountOutOfRange` if any amount is above the accepted ceiling.
pub fn generate_scenarios(
    profile: &TaxpayerProfile,
    tables: &RateTables,
) -> EngineResult<Vec<TaxOutcome>> {
    let table = tables.get(profile.assessment_year)?;
    let (base, _) = normalize_amounts(profile)?;

    SCENARIOS
        .iter()
        .map(|scenario| evaluate(&(scenario.apply)(&base, table), scenario.label, tables))
        .collect()
}
