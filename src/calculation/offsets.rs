//! Low Income and Low and Middle Income Tax Offsets.
//!
//! Both offsets are simplified estimates: LITO reduces linearly above its
//! threshold, and LMITO phases in up to its minimum income and then stays
//! flat (no phase-out) until its maximum income.

use rust_decimal::Decimal;

use crate::config::RateTable;

/// LMITO phase-in rate below `min_income` (7.5%).
pub const LMITO_PHASE_IN_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 3);

/// Calculates the Low Income Tax Offset.
///
/// The full offset applies at or below the year's threshold; above it the
/// offset reduces by the reduction rate per dollar, never below zero.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::calculate_low_income_offset;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::AssessmentYear;
/// use rust_decimal::Decimal;
///
/// let table = ConfigLoader::shared().unwrap().rate_table(AssessmentYear::Y2023_24).unwrap();
/// assert_eq!(calculate_low_income_offset(Decimal::new(37_500, 0), table), Decimal::new(700, 0));
/// assert_eq!(calculate_low_income_offset(Decimal::new(45_000, 0), table), Decimal::new(325, 0));
/// ```
pub fn calculate_low_income_offset(taxable_income: Decimal, table: &RateTable) -> Decimal {
    let params = &table.low_income_offset;

    if taxable_income <= params.income_threshold {
        return params.max_offset;
    }

    let offset =
        params.max_offset - (taxable_income - params.income_threshold) * params.reduction_rate;
    offset.max(Decimal::ZERO)
}

/// Calculates the Low and Middle Income Tax Offset.
///
/// Zero when the offset is retired for the year (maximum of zero), for
/// negative income, or above the maximum income. Up to the minimum income
/// the offset is 7.5% of income capped at the maximum; between minimum and
/// maximum income it is the flat maximum.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::calculate_low_middle_income_offset;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::AssessmentYear;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::shared().unwrap();
/// let table = config.rate_table(AssessmentYear::Y2021_22).unwrap();
/// assert_eq!(
///     calculate_low_middle_income_offset(Decimal::new(90_000, 0), table),
///     Decimal::new(1_500, 0)
/// );
///
/// let retired = config.rate_table(AssessmentYear::Y2023_24).unwrap();
/// assert_eq!(calculate_low_middle_income_offset(Decimal::new(90_000, 0), retired), Decimal::ZERO);
/// ```
pub fn calculate_low_middle_income_offset(taxable_income: Decimal, table: &RateTable) -> Decimal {
    let params = &table.low_middle_income_offset;

    if params.max_offset.is_zero()
        || taxable_income < Decimal::ZERO
        || taxable_income > params.max_income
    {
        return Decimal::ZERO;
    }

    if taxable_income <= params.min_income {
        return params.max_offset.min(taxable_income * LMITO_PHASE_IN_RATE);
    }

    params.max_offset
}

/// Sum of LITO and LMITO for the year.
pub fn calculate_tax_offsets(taxable_income: Decimal, table: &RateTable) -> Decimal {
    calculate_low_income_offset(taxable_income, table)
        + calculate_low_middle_income_offset(taxable_income, table)
}
