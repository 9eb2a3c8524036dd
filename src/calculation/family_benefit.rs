//! Family benefit estimate.
//!
//! A three-tier step function of combined family income. It stands in for
//! the full Family Tax Benefit formula and is an estimate only.

use rust_decimal::Decimal;

/// Combined income below which the full per-child estimate applies.
pub const FAMILY_BENEFIT_FULL_RATE_LIMIT: Decimal = Decimal::from_parts(80_000, 0, 0, false, 0);

/// Combined income below which the reduced per-child estimate applies.
pub const FAMILY_BENEFIT_REDUCED_RATE_LIMIT: Decimal =
    Decimal::from_parts(100_000, 0, 0, false, 0);

/// Per-child estimate below the full-rate limit.
pub const FAMILY_BENEFIT_FULL_RATE: Decimal = Decimal::from_parts(5_000, 0, 0, false, 0);

/// Per-child estimate below the reduced-rate limit.
pub const FAMILY_BENEFIT_REDUCED_RATE: Decimal = Decimal::from_parts(2_500, 0, 0, false, 0);

/// Estimates family benefits from taxpayer and partner income.
///
/// Zero without dependent children. Otherwise, with combined income of
/// taxable income plus partner income:
/// - below 80,000: 5,000 per child
/// - below 100,000: 2,500 per child
/// - 100,000 or more: nothing
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::calculate_family_benefit;
/// use rust_decimal::Decimal;
///
/// let benefit = calculate_family_benefit(Decimal::new(50_000, 0), Decimal::new(20_000, 0), 2);
/// assert_eq!(benefit, Decimal::new(10_000, 0));
/// ```
pub fn calculate_family_benefit(
    taxable_income: Decimal,
    partner_income: Decimal,
    dependent_children: u32,
) -> Decimal {
    if dependent_children == 0 {
        return Decimal::ZERO;
    }

    let combined_income = taxable_income + partner_income;
    let per_child = if combined_income < FAMILY_BENEFIT_FULL_RATE_LIMIT {
        FAMILY_BENEFIT_FULL_RATE
    } else if combined_income < FAMILY_BENEFIT_REDUCED_RATE_LIMIT {
        FAMILY_BENEFIT_REDUCED_RATE
    } else {
        Decimal::ZERO
    };

    per_child * Decimal::from(dependent_children)
}
