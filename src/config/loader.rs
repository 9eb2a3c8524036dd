//! Rate table loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading per-year rate
//! tables from YAML, either from the copies compiled into the binary or from
//! a directory on disk.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::AssessmentYear;

use super::types::{RateTable, RateTables};

/// The shipped rate tables, compiled in so they cannot drift at runtime.
const BUILTIN_RATE_FILES: [(&str, &str); 7] = [
    (
        "rates/2018-19.yaml",
        include_str!("../../config/rates/2018-19.yaml"),
    ),
    (
        "rates/2019-20.yaml",
        include_str!("../../config/rates/2019-20.yaml"),
    ),
    (
        "rates/2020-21.yaml",
        include_str!("../../config/rates/2020-21.yaml"),
    ),
    (
        "rates/2021-22.yaml",
        include_str!("../../config/rates/2021-22.yaml"),
    ),
    (
        "rates/2022-23.yaml",
        include_str!("../../config/rates/2022-23.yaml"),
    ),
    (
        "rates/2023-24.yaml",
        include_str!("../../config/rates/2023-24.yaml"),
    ),
    (
        "rates/2024-25.yaml",
        include_str!("../../config/rates/2024-25.yaml"),
    ),
];

static SHARED: OnceLock<ConfigLoader> = OnceLock::new();

/// Loads and provides access to the per-year rate tables.
///
/// # Directory Structure
///
/// When loading from disk the configuration directory should look like:
/// ```text
/// config/
/// └── rates/
///     ├── 2018-19.yaml
///     ├── ...
///     └── 2024-25.yaml
/// ```
///
/// Every supported assessment year must have exactly one table.
///
/// # Example
///
/// ```
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::AssessmentYear;
///
/// let loader = ConfigLoader::shared()?;
/// let table = loader.rate_table(AssessmentYear::Y2023_24)?;
/// assert_eq!(table.brackets.len(), 5);
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: RateTables,
}

impl ConfigLoader {
    /// Returns the process-wide loader built from the compiled-in tables.
    ///
    /// The tables are parsed on first use and never mutated afterwards.
    pub fn shared() -> EngineResult<&'static ConfigLoader> {
        if let Some(loader) = SHARED.get() {
            return Ok(loader);
        }
        let loader = Self::builtin()?;
        Ok(SHARED.get_or_init(|| loader))
    }

    /// Parses the compiled-in rate tables into a new loader.
    pub fn builtin() -> EngineResult<Self> {
        let tables = BUILTIN_RATE_FILES
            .iter()
            .map(|(name, content)| Self::parse_rate_table(name, content))
            .collect::<EngineResult<Vec<_>>>()?;

        Self::complete(tables)
    }

    /// Loads rate tables from the specified configuration directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The `rates` directory is missing or holds no YAML files
    /// - Any file contains invalid YAML or an inconsistent table
    /// - Any supported assessment year has no table
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rates_dir = path.as_ref().join("rates");
        let tables = Self::load_rates(&rates_dir)?;
        Self::complete(tables)
    }

    /// Wraps an already-built set of tables without requiring every year.
    pub fn with_tables(tables: RateTables) -> Self {
        Self { tables }
    }

    /// Loads and parses every rate file from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let path_str = path.display().to_string();
                let content =
                    fs::read_to_string(&path).map_err(|_| EngineError::ConfigNotFound {
                        path: path_str.clone(),
                    })?;
                tables.push(Self::parse_rate_table(&path_str, &content)?);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Parses a single YAML rate table.
    fn parse_rate_table(name: &str, content: &str) -> EngineResult<RateTable> {
        let table: RateTable =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: name.to_string(),
                message: e.to_string(),
            })?;
        debug!(
            source = name,
            year = %table.assessment_year,
            brackets = table.brackets.len(),
            "Parsed rate table"
        );
        Ok(table)
    }

    /// Validates the tables and checks every supported year is present.
    fn complete(tables: Vec<RateTable>) -> EngineResult<Self> {
        let tables = RateTables::new(tables)?;

        if let Some(missing) = AssessmentYear::ALL
            .into_iter()
            .find(|year| tables.get(*year).is_err())
        {
            return Err(EngineError::InvalidRateTable {
                year: missing.to_string(),
                message: "no rate table provided".to_string(),
            });
        }

        Ok(Self { tables })
    }

    /// Returns the underlying rate tables.
    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Gets the rate table for an assessment year.
    ///
    /// # Returns
    ///
    /// Returns the table if loaded, or `RateTableNotFound`.
    pub fn rate_table(&self, year: AssessmentYear) -> EngineResult<&RateTable> {
        self.tables.get(year)
    }
}
