//! Calculation logic for the Tax Position Estimator.
//!
//! This module contains the component calculators (progressive income tax,
//! Medicare levy, tax offsets, family benefit estimate and super headroom),
//! the evaluator that combines them into a single outcome, the scenario
//! generator, the best scenario selector, and the comparison report with its
//! recommendations.

mod evaluator;
mod family_benefit;
mod income_tax;
mod medicare_levy;
mod offsets;
mod recommendations;
mod report;
mod scenarios;
mod selector;
mod super_headroom;

pub use evaluator::{MAX_AMOUNT, NEGATIVE_AMOUNT_CLAMPED, assess, evaluate, normalize_amounts};
pub use family_benefit::{
    FAMILY_BENEFIT_FULL_RATE, FAMILY_BENEFIT_FULL_RATE_LIMIT, FAMILY_BENEFIT_REDUCED_RATE,
    FAMILY_BENEFIT_REDUCED_RATE_LIMIT, calculate_family_benefit,
};
pub use income_tax::calculate_income_tax;
pub use medicare_levy::{
    MEDICARE_DEPENDENT_THRESHOLD_INCREASE, MEDICARE_LEVY_RATE, calculate_medicare_levy,
    medicare_levy_threshold,
};
pub use offsets::{
    LMITO_PHASE_IN_RATE, calculate_low_income_offset, calculate_low_middle_income_offset,
    calculate_tax_offsets,
};
pub use recommendations::{HIGH_INCOME_SALARY, LOW_DEDUCTIONS_THRESHOLD, build_recommendations};
pub use report::build_scenario_report;
pub use scenarios::{
    DEDUCTION_UPLIFT, MAX_DEDUCTIONS, OPTIMIZED_STRATEGY, SCENARIOS, STANDARD_PAYG,
    ScenarioTransform, WITH_SUPER_SACRIFICE, generate_scenarios,
};
pub use selector::{select_best, select_best_index};
pub use super_headroom::{SUPER_HEADROOM_SALARY_SHARE, calculate_super_headroom};
