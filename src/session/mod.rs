//! Stateful session layer.
//!
//! A [`TaxSession`] owns the taxpayer's current profile across edits. The
//! calculation functions stay pure; the session applies partial updates,
//! runs the scenarios on demand and saves or restores the profile through a
//! [`ProfileStore`].

mod store;

pub use store::{InMemoryProfileStore, JsonFileProfileStore, ProfileStore};

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{build_scenario_report, generate_scenarios, select_best};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{
    AssessmentYear, DeductionDetails, IncomeDetails, MaritalStatus, PersonalDetails,
    ResidencyStatus, SalaryPackaging, ScenarioReport, TaxOutcome, TaxpayerProfile,
};

/// Partial update to [`PersonalDetails`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct PersonalDetailsUpdate {
    pub residency_status: Option<ResidencyStatus>,
    pub age: Option<u32>,
    pub marital_status: Option<MaritalStatus>,
    pub dependent_children: Option<u32>,
    pub partner_income: Option<Decimal>,
}

impl PersonalDetailsUpdate {
    fn apply_to(&self, details: &mut PersonalDetails) {
        if let Some(value) = self.residency_status {
            details.residency_status = value;
        }
        if let Some(value) = self.age {
            details.age = value;
        }
        if let Some(value) = self.marital_status {
            details.marital_status = value;
        }
        if let Some(value) = self.dependent_children {
            details.dependent_children = value;
        }
        if let Some(value) = self.partner_income {
            details.partner_income = value;
        }
    }
}

/// Partial update to [`IncomeDetails`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct IncomeDetailsUpdate {
    pub salary: Option<Decimal>,
    pub bonus: Option<Decimal>,
    pub employer_super: Option<Decimal>,
    pub other_income: Option<Decimal>,
}

impl IncomeDetailsUpdate {
    fn apply_to(&self, details: &mut IncomeDetails) {
        let fields = [
            (self.salary, &mut details.salary),
            (self.bonus, &mut details.bonus),
            (self.employer_super, &mut details.employer_super),
            (self.other_income, &mut details.other_income),
        ];
        for (update, field) in fields {
            if let Some(value) = update {
                *field = value;
            }
        }
    }
}

/// Partial update to [`DeductionDetails`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct DeductionDetailsUpdate {
    pub work_related_expenses: Option<Decimal>,
    pub home_office_expenses: Option<Decimal>,
    pub professional_development: Option<Decimal>,
    pub car_and_travel: Option<Decimal>,
    pub tax_agent_fees: Option<Decimal>,
    pub donations: Option<Decimal>,
    pub self_education: Option<Decimal>,
    pub investment_deductions: Option<Decimal>,
}

impl DeductionDetailsUpdate {
    fn apply_to(&self, details: &mut DeductionDetails) {
        let fields = [
            (self.work_related_expenses, &mut details.work_related_expenses),
            (self.home_office_expenses, &mut details.home_office_expenses),
            (self.professional_development, &mut details.professional_development),
            (self.car_and_travel, &mut details.car_and_travel),
            (self.tax_agent_fees, &mut details.tax_agent_fees),
            (self.donations, &mut details.donations),
            (self.self_education, &mut details.self_education),
            (self.investment_deductions, &mut details.investment_deductions),
        ];
        for (update, field) in fields {
            if let Some(value) = update {
                *field = value;
            }
        }
    }
}

/// Partial update to [`SalaryPackaging`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct SalaryPackagingUpdate {
    pub salary_sacrifice_super: Option<Decimal>,
    pub novated_lease: Option<Decimal>,
}

impl SalaryPackagingUpdate {
    fn apply_to(&self, packaging: &mut SalaryPackaging) {
        if let Some(value) = self.salary_sacrifice_super {
            packaging.salary_sacrifice_super = value;
        }
        if let Some(value) = self.novated_lease {
            packaging.novated_lease = value;
        }
    }
}

/// Owns one taxpayer's profile across edits.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::session::{IncomeDetailsUpdate, InMemoryProfileStore, TaxSession};
/// use rust_decimal::Decimal;
///
/// let config = Arc::new(ConfigLoader::builtin()?);
/// let mut session = TaxSession::new(config, InMemoryProfileStore::new());
///
/// session.update_income(IncomeDetailsUpdate {
///     salary: Some(Decimal::new(95_000, 0)),
///     ..Default::default()
/// });
///
/// let outcomes = session.calculate_results()?;
/// assert_eq!(outcomes.len(), 4);
/// assert_eq!(outcomes[0].gross_income, Decimal::new(95_000, 0));
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct TaxSession<S: ProfileStore> {
    profile: TaxpayerProfile,
    config: Arc<ConfigLoader>,
    store: S,
}

impl<S: ProfileStore> TaxSession<S> {
    /// Starts a session on the default profile.
    pub fn new(config: Arc<ConfigLoader>, store: S) -> Self {
        Self {
            profile: TaxpayerProfile::default(),
            config,
            store,
        }
    }

    /// The current profile.
    pub fn profile(&self) -> &TaxpayerProfile {
        &self.profile
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the whole profile.
    pub fn set_profile(&mut self, profile: TaxpayerProfile) {
        self.profile = profile;
    }

    /// Applies a partial update to the personal details.
    pub fn update_personal(&mut self, update: PersonalDetailsUpdate) {
        update.apply_to(&mut self.profile.personal);
    }

    /// Applies a partial update to the income details.
    pub fn update_income(&mut self, update: IncomeDetailsUpdate) {
        update.apply_to(&mut self.profile.income);
    }

    /// Applies a partial update to the deductions.
    pub fn update_deductions(&mut self, update: DeductionDetailsUpdate) {
        update.apply_to(&mut self.profile.deductions);
    }

    /// Applies a partial update to the salary packaging elections.
    pub fn update_salary_packaging(&mut self, update: SalaryPackagingUpdate) {
        update.apply_to(&mut self.profile.salary_packaging);
    }

    /// Selects the assessment year.
    pub fn update_assessment_year(&mut self, year: AssessmentYear) {
        self.profile.assessment_year = year;
    }

    /// Restores the default profile.
    pub fn reset(&mut self) {
        self.profile = TaxpayerProfile::default();
        info!("Session profile reset to defaults");
    }

    /// Evaluates all scenarios for the current profile.
    pub fn calculate_results(&self) -> EngineResult<Vec<TaxOutcome>> {
        generate_scenarios(&self.profile, self.config.tables())
    }

    /// Evaluates all scenarios and returns the best one.
    pub fn best_scenario(&self) -> EngineResult<Option<TaxOutcome>> {
        let outcomes = self.calculate_results()?;
        Ok(select_best(&outcomes).cloned())
    }

    /// Builds the full comparison report for the current profile.
    pub fn report(&self) -> EngineResult<ScenarioReport> {
        build_scenario_report(&self.profile, self.config.tables())
    }

    /// Saves the current profile to the store.
    pub fn save(&mut self) -> EngineResult<()> {
        self.store.save(&self.profile).inspect_err(|e| {
            warn!(error = %e, "Failed to save profile");
        })?;
        info!(year = %self.profile.assessment_year, "Profile saved");
        Ok(())
    }

    /// Restores the saved profile.
    ///
    /// Returns `false` and keeps the current profile when nothing is saved.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStore` when the saved data cannot be read; the current
    /// profile is left unchanged.
    pub fn load(&mut self) -> EngineResult<bool> {
        let saved = self.store.load().inspect_err(|e| {
            warn!(error = %e, "Failed to load profile");
        })?;

        match saved {
            Some(profile) => {
                self.profile = profile;
                info!(year = %self.profile.assessment_year, "Profile loaded");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
