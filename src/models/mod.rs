//! Core data models for the Tax Position Estimator.
//!
//! This module contains all the domain models used throughout the engine.

mod assessment_year;
mod profile;
mod scenario_report;
mod tax_outcome;

pub use assessment_year::AssessmentYear;
pub use profile::{
    DeductionDetails, IncomeDetails, MaritalStatus, PersonalDetails, ResidencyStatus,
    SalaryPackaging, TaxpayerProfile,
};
pub use scenario_report::{Recommendation, RecommendationKind, ScenarioComparison, ScenarioReport};
pub use tax_outcome::{
    AuditStep, AuditTrace, AuditWarning, TaxAssessment, TaxComponents, TaxOutcome,
};
