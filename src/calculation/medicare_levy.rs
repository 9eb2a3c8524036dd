//! Medicare levy calculation.
//!
//! The levy is a flat 2% of taxable income once income exceeds the year's
//! threshold. There is no shading-in band near the threshold.

use rust_decimal::Decimal;

use crate::config::RateTable;

/// The Medicare levy rate (2%).
pub const MEDICARE_LEVY_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Flat increase to the levy threshold for taxpayers with dependents.
///
/// This is a base 2,000 plus 3,000 for having dependents; it does not scale
/// with the number of children.
pub const MEDICARE_DEPENDENT_THRESHOLD_INCREASE: Decimal =
    Decimal::from_parts(5_000, 0, 0, false, 0);

/// Returns the levy threshold that applies to the taxpayer.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::medicare_levy_threshold;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::AssessmentYear;
/// use rust_decimal::Decimal;
///
/// let table = ConfigLoader::shared().unwrap().rate_table(AssessmentYear::Y2023_24).unwrap();
/// assert_eq!(medicare_levy_threshold(table, false), Decimal::new(26_000, 0));
/// assert_eq!(medicare_levy_threshold(table, true), Decimal::new(31_000, 0));
/// ```
pub fn medicare_levy_threshold(table: &RateTable, has_dependents: bool) -> Decimal {
    if has_dependents {
        table.medicare_levy_threshold + MEDICARE_DEPENDENT_THRESHOLD_INCREASE
    } else {
        table.medicare_levy_threshold
    }
}

/// Calculates the Medicare levy on `taxable_income`.
///
/// Zero at or below the applicable threshold, otherwise the whole taxable
/// income multiplied by [`MEDICARE_LEVY_RATE`].
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::calculate_medicare_levy;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::AssessmentYear;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = ConfigLoader::shared().unwrap().rate_table(AssessmentYear::Y2023_24).unwrap();
/// let levy = calculate_medicare_levy(Decimal::new(26_001, 0), table, false);
/// assert_eq!(levy, Decimal::from_str("520.02").unwrap());
/// ```
pub fn calculate_medicare_levy(
    taxable_income: Decimal,
    table: &RateTable,
    has_dependents: bool,
) -> Decimal {
    if taxable_income <= medicare_levy_threshold(table, has_dependents) {
        return Decimal::ZERO;
    }

    taxable_income * MEDICARE_LEVY_RATE
}
