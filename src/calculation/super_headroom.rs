//! Super contribution headroom.
//!
//! Suggests an additional salary sacrifice amount. The suggestion is
//! deliberately conservative: it is the remaining concessional cap, limited
//! to a tenth of salary, not the true remaining cap.

use rust_decimal::Decimal;

use crate::config::RateTable;

/// Share of salary the suggestion is capped at (10%).
pub const SUPER_HEADROOM_SALARY_SHARE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Calculates the suggested additional concessional contribution.
///
/// `max(0, min(cap - employer_super, salary x 10%))`.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::calculate_super_headroom;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::AssessmentYear;
/// use rust_decimal::Decimal;
///
/// let table = ConfigLoader::shared().unwrap().rate_table(AssessmentYear::Y2023_24).unwrap();
/// let headroom = calculate_super_headroom(Decimal::new(80_000, 0), Decimal::new(8_000, 0), table);
/// assert_eq!(headroom, Decimal::new(8_000, 0));
/// ```
pub fn calculate_super_headroom(
    salary: Decimal,
    employer_super: Decimal,
    table: &RateTable,
) -> Decimal {
    let remaining_cap = table.concessional_cap - employer_super;
    remaining_cap
        .min(salary * SUPER_HEADROOM_SALARY_SHARE)
        .max(Decimal::ZERO)
}
