//! Request types for the Tax Position Estimator API.

use serde::{Deserialize, Serialize};

use crate::calculation::STANDARD_PAYG;
use crate::models::TaxpayerProfile;

/// Request body for the `/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The profile to evaluate.
    pub profile: TaxpayerProfile,
    /// Label for the resulting outcome; "Standard PAYG" when omitted.
    #[serde(default)]
    pub scenario_label: Option<String>,
}

impl EvaluateRequest {
    /// The label to evaluate under.
    pub fn label(&self) -> &str {
        self.scenario_label.as_deref().unwrap_or(STANDARD_PAYG)
    }
}
