//! Rate table types for tax evaluation.
//!
//! This module contains the strongly-typed rate table structures that
//! are deserialized from the per-year YAML files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AssessmentYear;

/// A marginal tax bracket.
///
/// The bracket spans from the previous bracket's upper threshold up to and
/// including its own. `None` marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the bracket, or `None` for the top bracket.
    pub upper_threshold: Option<Decimal>,
    /// Marginal rate applied within the bracket (e.g. 0.19).
    pub rate: Decimal,
}

/// Low Income Tax Offset parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowIncomeOffsetParams {
    /// Full offset available at or below the threshold.
    pub max_offset: Decimal,
    /// Income above which the offset starts reducing.
    pub income_threshold: Decimal,
    /// Reduction per dollar of income above the threshold.
    pub reduction_rate: Decimal,
}

/// Low and Middle Income Tax Offset parameters.
///
/// All zero for years where the offset no longer applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowMiddleIncomeOffsetParams {
    /// Maximum offset; zero once the offset is retired.
    pub max_offset: Decimal,
    /// Income up to which the offset phases in.
    pub min_income: Decimal,
    /// Income above which no offset is available.
    pub max_income: Decimal,
}

/// All rates and thresholds for one assessment year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// The year these rates apply to.
    pub assessment_year: AssessmentYear,
    /// Marginal brackets, lowest first.
    pub brackets: Vec<TaxBracket>,
    /// Taxable income at or below which no Medicare levy is payable.
    pub medicare_levy_threshold: Decimal,
    /// Low Income Tax Offset parameters.
    pub low_income_offset: LowIncomeOffsetParams,
    /// Low and Middle Income Tax Offset parameters.
    pub low_middle_income_offset: LowMiddleIncomeOffsetParams,
    /// Annual concessional superannuation contribution cap.
    pub concessional_cap: Decimal,
}

impl RateTable {
    /// Checks the table is internally consistent.
    ///
    /// Brackets must have non-negative rates and strictly increasing
    /// thresholds, and exactly the last bracket must be unbounded.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRateTable {
            year: self.assessment_year.to_string(),
            message,
        };

        let Some((last, bounded)) = self.brackets.split_last() else {
            return Err(invalid("at least one bracket is required".to_string()));
        };

        if last.upper_threshold.is_some() {
            return Err(invalid("the top bracket must be unbounded".to_string()));
        }

        let mut previous = Decimal::ZERO;
        for (index, bracket) in bounded.iter().enumerate() {
            let Some(threshold) = bracket.upper_threshold else {
                return Err(invalid(format!(
                    "bracket {} is unbounded but is not the top bracket",
                    index + 1
                )));
            };
            if threshold <= previous {
                return Err(invalid(format!(
                    "bracket thresholds must be strictly increasing ({} after {})",
                    threshold, previous
                )));
            }
            previous = threshold;
        }

        if let Some(bracket) = self.brackets.iter().find(|b| b.rate < Decimal::ZERO) {
            return Err(invalid(format!("negative marginal rate {}", bracket.rate)));
        }

        Ok(())
    }
}

/// The complete set of rate tables, keyed by assessment year.
#[derive(Debug, Clone, Default)]
pub struct RateTables {
    tables: BTreeMap<AssessmentYear, RateTable>,
}

impl RateTables {
    /// Builds the set from individual tables, validating each one.
    ///
    /// Fails if any table is invalid or if two tables share a year.
    pub fn new(tables: Vec<RateTable>) -> EngineResult<Self> {
        let mut by_year = BTreeMap::new();
        for table in tables {
            table.validate()?;
            let year = table.assessment_year;
            if by_year.insert(year, table).is_some() {
                return Err(EngineError::InvalidRateTable {
                    year: year.to_string(),
                    message: "duplicate rate table for year".to_string(),
                });
            }
        }
        Ok(Self { tables: by_year })
    }

    /// Returns the table for `year`, or `RateTableNotFound`.
    pub fn get(&self, year: AssessmentYear) -> EngineResult<&RateTable> {
        self.tables
            .get(&year)
            .ok_or(EngineError::RateTableNotFound { year })
    }

    /// Returns the years that have a table, oldest first.
    pub fn years(&self) -> Vec<AssessmentYear> {
        self.tables.keys().copied().collect()
    }

    /// Returns the number of loaded tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no tables are loaded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
