//! Assessment year model.
//!
//! Assessment years are a closed set: every rate table, scenario and
//! profile refers to one of the variants below, never to a free string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// An Australian income year (1 July to 30 June) supported by the engine.
///
/// Serialized as its year token, e.g. `"2023-24"`.
///
/// # Example
///
/// ```
/// use tax_engine::models::AssessmentYear;
///
/// let year: AssessmentYear = "2023-24".parse().unwrap();
/// assert_eq!(year, AssessmentYear::Y2023_24);
/// assert_eq!(year.to_string(), "2023-24");
/// assert!("2030-31".parse::<AssessmentYear>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AssessmentYear {
    /// 1 July 2018 to 30 June 2019.
    #[serde(rename = "2018-19")]
    Y2018_19,
    /// 1 July 2019 to 30 June 2020.
    #[serde(rename = "2019-20")]
    Y2019_20,
    /// 1 July 2020 to 30 June 2021.
    #[serde(rename = "2020-21")]
    Y2020_21,
    /// 1 July 2021 to 30 June 2022.
    #[serde(rename = "2021-22")]
    Y2021_22,
    /// 1 July 2022 to 30 June 2023.
    #[serde(rename = "2022-23")]
    Y2022_23,
    /// 1 July 2023 to 30 June 2024.
    #[default]
    #[serde(rename = "2023-24")]
    Y2023_24,
    /// 1 July 2024 to 30 June 2025.
    #[serde(rename = "2024-25")]
    Y2024_25,
}

impl AssessmentYear {
    /// Every supported year, oldest first.
    pub const ALL: [AssessmentYear; 7] = [
        AssessmentYear::Y2018_19,
        AssessmentYear::Y2019_20,
        AssessmentYear::Y2020_21,
        AssessmentYear::Y2021_22,
        AssessmentYear::Y2022_23,
        AssessmentYear::Y2023_24,
        AssessmentYear::Y2024_25,
    ];

    /// Returns the year token, e.g. `"2019-20"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentYear::Y2018_19 => "2018-19",
            AssessmentYear::Y2019_20 => "2019-20",
            AssessmentYear::Y2020_21 => "2020-21",
            AssessmentYear::Y2021_22 => "2021-22",
            AssessmentYear::Y2022_23 => "2022-23",
            AssessmentYear::Y2023_24 => "2023-24",
            AssessmentYear::Y2024_25 => "2024-25",
        }
    }
}

impl fmt::Display for AssessmentYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentYear {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        AssessmentYear::ALL
            .into_iter()
            .find(|year| year.as_str() == token)
            .ok_or_else(|| EngineError::UnsupportedAssessmentYear {
                value: s.to_string(),
            })
    }
}
