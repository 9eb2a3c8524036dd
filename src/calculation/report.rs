//! Scenario comparison report.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::config::RateTables;
use crate::error::EngineResult;
use crate::models::{ScenarioComparison, ScenarioReport, TaxpayerProfile};

use super::recommendations::build_recommendations;
use super::scenarios::generate_scenarios;
use super::selector::select_best_index;

/// Evaluates every scenario and assembles the comparison report.
///
/// Differences and potential savings are measured against the first
/// ("Standard PAYG") outcome.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::build_scenario_report;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::TaxpayerProfile;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::shared()?;
/// let report = build_scenario_report(&TaxpayerProfile::default(), config.tables())?;
///
/// assert_eq!(report.scenarios.len(), 4);
/// assert_eq!(report.potential_savings, Decimal::new(2_760, 0));
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
///
/// # Errors
///
/// Returns `RateTableNotFound` if `tables` has no table for the profile's year.
pub fn build_scenario_report(
    profile: &TaxpayerProfile,
    tables: &RateTables,
) -> EngineResult<ScenarioReport> {
    let outcomes = generate_scenarios(profile, tables)?;

    // generate_scenarios always yields one outcome per scenario
    let baseline = outcomes[0].final_refund_or_payable;
    let best_index = select_best_index(&outcomes).unwrap_or(0);
    let best_scenario = outcomes[best_index].clone();
    let potential_savings = best_scenario.final_refund_or_payable - baseline;

    let recommendations = build_recommendations(profile, &best_scenario, potential_savings);

    let scenarios = outcomes
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| ScenarioComparison {
            difference_from_standard: (index != 0)
                .then(|| outcome.final_refund_or_payable - baseline),
            is_best: index == best_index,
            outcome,
        })
        .collect();

    debug!(
        year = %profile.assessment_year,
        best = %best_scenario.scenario_label,
        potential_savings = %potential_savings,
        "Built scenario report"
    );

    Ok(ScenarioReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        assessment_year: profile.assessment_year,
        scenarios,
        best_index,
        best_scenario,
        potential_savings,
        recommendations,
    })
}
