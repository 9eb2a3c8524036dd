//! Best scenario selection.

use crate::models::TaxOutcome;

/// Returns the index of the outcome with the largest final position.
///
/// Ties keep the earliest outcome. `None` for an empty slice.
pub fn select_best_index(outcomes: &[TaxOutcome]) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (index, outcome) in outcomes.iter().enumerate() {
        match best {
            Some(current)
                if outcome.final_refund_or_payable
                    <= outcomes[current].final_refund_or_payable => {}
            _ => best = Some(index),
        }
    }

    best
}

/// Returns the outcome with the largest final position.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::{generate_scenarios, select_best};
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::TaxpayerProfile;
///
/// let config = ConfigLoader::shared()?;
/// let outcomes = generate_scenarios(&TaxpayerProfile::default(), config.tables())?;
///
/// let best = select_best(&outcomes).expect("four scenarios");
/// assert_eq!(best.scenario_label, "With Super Sacrifice");
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
pub fn select_best(outcomes: &[TaxOutcome]) -> Option<&TaxOutcome> {
    select_best_index(outcomes).map(|index| &outcomes[index])
}
