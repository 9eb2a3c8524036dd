//! Rate table loading and management for the Tax Position Estimator.
//!
//! This module provides the per-assessment-year rate tables: income tax
//! brackets, the Medicare levy threshold, offset parameters and the
//! concessional super cap. Tables are YAML documents compiled into the
//! crate and validated when loaded.
//!
//! # Example
//!
//! ```
//! use tax_engine::config::ConfigLoader;
//! use tax_engine::models::AssessmentYear;
//!
//! let config = ConfigLoader::shared().unwrap();
//! let table = config.rate_table(AssessmentYear::Y2024_25).unwrap();
//! println!("Medicare threshold: {}", table.medicare_levy_threshold);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    LowIncomeOffsetParams, LowMiddleIncomeOffsetParams, RateTable, RateTables, TaxBracket,
};
