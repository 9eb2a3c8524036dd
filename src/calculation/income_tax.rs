//! Progressive income tax calculation.
//!
//! This module applies a rate table's marginal brackets to taxable income.

use rust_decimal::Decimal;

use crate::config::RateTable;

/// Calculates progressive income tax on `taxable_income`.
///
/// Each bracket's marginal rate is applied only to the part of income that
/// falls within the bracket's span: the gap between its upper threshold and
/// the previous bracket's, clipped to the income still untaxed. Income
/// exactly at a threshold is taxed up to, and not beyond, that bracket. The
/// top bracket is unbounded and absorbs whatever remains.
///
/// Zero or negative income attracts no tax.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::calculate_income_tax;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::AssessmentYear;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::shared().unwrap();
/// let table = config.rate_table(AssessmentYear::Y2023_24).unwrap();
///
/// // (45,000 - 18,200) x 19%
/// let tax = calculate_income_tax(Decimal::new(45_000, 0), table);
/// assert_eq!(tax, Decimal::from_str("5092").unwrap());
/// ```
pub fn calculate_income_tax(taxable_income: Decimal, table: &RateTable) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut remaining = taxable_income;
    let mut previous_threshold = Decimal::ZERO;

    for bracket in &table.brackets {
        if taxable_income > previous_threshold {
            let in_bracket = match bracket.upper_threshold {
                Some(upper) => remaining.min(upper - previous_threshold),
                None => remaining,
            };
            tax += in_bracket * bracket.rate;
            remaining -= in_bracket;
        }

        match bracket.upper_threshold {
            Some(upper) => previous_threshold = upper,
            None => break,
        }
    }

    tax
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::AssessmentYear;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn table(year: AssessmentYear) -> &'static RateTable {
        ConfigLoader::shared().unwrap().rate_table(year).unwrap()
    }

    #[test]
    fn test_zero_income_has_no_tax() {
        assert_eq!(
            calculate_income_tax(Decimal::ZERO, table(AssessmentYear::Y2023_24)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_negative_income_has_no_tax() {
        assert_eq!(
            calculate_income_tax(dec("-5000"), table(AssessmentYear::Y2023_24)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_income_at_tax_free_threshold_has_no_tax() {
        assert_eq!(
            calculate_income_tax(dec("18200"), table(AssessmentYear::Y2023_24)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_one_dollar_over_tax_free_threshold() {
        assert_eq!(
            calculate_income_tax(dec("18201"), table(AssessmentYear::Y2023_24)),
            dec("0.19")
        );
    }

    #[test]
    fn test_top_of_second_bracket_2023_24() {
        assert_eq!(
            calculate_income_tax(dec("45000"), table(AssessmentYear::Y2023_24)),
            dec("5092.00")
        );
    }

    #[test]
    fn test_top_of_third_bracket_2023_24() {
        // 5,092 + (120,000 - 45,000) x 0.325
        assert_eq!(
            calculate_income_tax(dec("120000"), table(AssessmentYear::Y2023_24)),
            dec("29467")
        );
    }

    #[test]
    fn test_top_of_fourth_bracket_2023_24() {
        // 29,467 + (180,000 - 120,000) x 0.37
        assert_eq!(
            calculate_income_tax(dec("180000"), table(AssessmentYear::Y2023_24)),
            dec("51667")
        );
    }

    #[test]
    fn test_top_bracket_is_unbounded() {
        // 51,667 + (250,000 - 180,000) x 0.45
        assert_eq!(
            calculate_income_tax(dec("250000"), table(AssessmentYear::Y2023_24)),
            dec("83167")
        );
    }

    #[test]
    fn test_80000_in_2023_24() {
        // 5,092 + (80,000 - 45,000) x 0.325
        assert_eq!(
            calculate_income_tax(dec("80000"), table(AssessmentYear::Y2023_24)),
            dec("16467")
        );
    }

    #[test]
    fn test_2018_19_brackets() {
        // (37,000 - 18,200) x 0.19 + (50,000 - 37,000) x 0.325
        assert_eq!(
            calculate_income_tax(dec("50000"), table(AssessmentYear::Y2018_19)),
            dec("7797")
        );
    }

    #[test]
    fn test_2024_25_brackets() {
        // (45,000 - 18,200) x 0.16 + (80,000 - 45,000) x 0.30
        assert_eq!(
            calculate_income_tax(dec("80000"), table(AssessmentYear::Y2024_25)),
            dec("14788")
        );
    }

    #[test]
    fn test_fractional_income() {
        assert_eq!(
            calculate_income_tax(dec("18300.50"), table(AssessmentYear::Y2023_24)),
            dec("19.095")
        );
    }

    proptest! {
        #[test]
        fn prop_tax_is_monotonic(a in 0u64..400_000, b in 0u64..400_000, year_index in 0usize..7) {
            let table = table(AssessmentYear::ALL[year_index]);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };

            let low_tax = calculate_income_tax(Decimal::from(low), table);
            let high_tax = calculate_income_tax(Decimal::from(high), table);
            prop_assert!(low_tax <= high_tax);
        }

        #[test]
        fn prop_tax_never_exceeds_top_rate(income in 0u64..1_000_000, year_index in 0usize..7) {
            let table = table(AssessmentYear::ALL[year_index]);
            let income = Decimal::from(income);

            let tax = calculate_income_tax(income, table);
            prop_assert!(tax >= Decimal::ZERO);
            prop_assert!(tax <= income * dec("0.45"));
        }
    }
}
