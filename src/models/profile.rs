//! Taxpayer profile model and related types.
//!
//! A [`TaxpayerProfile`] is the single input to every evaluation: personal
//! circumstances, income, deductions, salary packaging elections and the
//! assessment year. All currency amounts are [`Decimal`] dollars.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssessmentYear;

/// Residency status of the taxpayer for the assessment year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidencyStatus {
    /// Australian resident for tax purposes.
    #[default]
    Resident,
    /// Foreign resident for tax purposes.
    ForeignResident,
    /// Holder of a working holiday visa.
    WorkingHolidayMaker,
}

/// Marital status of the taxpayer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// No spouse or partner.
    #[default]
    Single,
    /// Married or in a de facto relationship.
    MarriedOrDeFacto,
}

/// Personal circumstances of the taxpayer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalDetails {
    /// Residency status for the year.
    #[serde(default)]
    pub residency_status: ResidencyStatus,
    /// Age in whole years.
    #[serde(default)]
    pub age: u32,
    /// Marital status for the year.
    #[serde(default)]
    pub marital_status: MaritalStatus,
    /// Number of dependent children.
    #[serde(default)]
    pub dependent_children: u32,
    /// Taxable income of the spouse or partner, if any.
    #[serde(default)]
    pub partner_income: Decimal,
}

impl Default for PersonalDetails {
    fn default() -> Self {
        Self {
            residency_status: ResidencyStatus::Resident,
            age: 30,
            marital_status: MaritalStatus::Single,
            dependent_children: 0,
            partner_income: Decimal::ZERO,
        }
    }
}

impl PersonalDetails {
    /// Returns true if the taxpayer has at least one dependent child.
    pub fn has_dependents(&self) -> bool {
        self.dependent_children > 0
    }
}

/// Income received during the year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeDetails {
    /// Gross salary and wages.
    #[serde(default)]
    pub salary: Decimal,
    /// Bonuses and commissions.
    #[serde(default)]
    pub bonus: Decimal,
    /// Superannuation guarantee contributions paid by the employer.
    ///
    /// Not assessable income; only used to size the salary sacrifice scenario.
    #[serde(default)]
    pub employer_super: Decimal,
    /// Any other assessable income.
    #[serde(default)]
    pub other_income: Decimal,
}

impl Default for IncomeDetails {
    fn default() -> Self {
        Self {
            salary: Decimal::new(80_000, 0),
            bonus: Decimal::ZERO,
            employer_super: Decimal::new(8_000, 0),
            other_income: Decimal::ZERO,
        }
    }
}

impl IncomeDetails {
    /// Assessable gross income: salary + bonus + other income.
    ///
    /// # Example
    ///
    /// ```
    /// use tax_engine::models::IncomeDetails;
    /// use rust_decimal::Decimal;
    ///
    /// let income = IncomeDetails {
    ///     salary: Decimal::new(80_000, 0),
    ///     bonus: Decimal::new(5_000, 0),
    ///     employer_super: Decimal::new(8_000, 0),
    ///     other_income: Decimal::new(1_000, 0),
    /// };
    /// assert_eq!(income.gross_income(), Decimal::new(86_000, 0));
    /// ```
    pub fn gross_income(&self) -> Decimal {
        self.salary + self.bonus + self.other_income
    }

    pub(crate) fn amounts_mut(&mut self) -> [(&'static str, &mut Decimal); 4] {
        [
            ("income.salary", &mut self.salary),
            ("income.bonus", &mut self.bonus),
            ("income.employer_super", &mut self.employer_super),
            ("income.other_income", &mut self.other_income),
        ]
    }
}

/// Deductions claimed against assessable income.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeductionDetails {
    /// Work-related expenses (uniforms, tools, subscriptions).
    #[serde(default)]
    pub work_related_expenses: Decimal,
    /// Working-from-home running costs.
    #[serde(default)]
    pub home_office_expenses: Decimal,
    /// Professional development courses and conferences.
    #[serde(default)]
    pub professional_development: Decimal,
    /// Work-related car and travel expenses.
    #[serde(default)]
    pub car_and_travel: Decimal,
    /// Fees paid to a registered tax agent.
    #[serde(default)]
    pub tax_agent_fees: Decimal,
    /// Gifts and donations to deductible gift recipients.
    #[serde(default)]
    pub donations: Decimal,
    /// Self-education expenses.
    #[serde(default)]
    pub self_education: Decimal,
    /// Interest and other costs of earning investment income.
    #[serde(default)]
    pub investment_deductions: Decimal,
}

impl DeductionDetails {
    /// Sum of all eight deduction categories.
    pub fn total(&self) -> Decimal {
        self.work_related_expenses
            + self.home_office_expenses
            + self.professional_development
            + self.car_and_travel
            + self.tax_agent_fees
            + self.donations
            + self.self_education
            + self.investment_deductions
    }

    /// Returns a copy with every category multiplied by `factor`.
    pub fn scaled(&self, factor: Decimal) -> Self {
        Self {
            work_related_expenses: self.work_related_expenses * factor,
            home_office_expenses: self.home_office_expenses * factor,
            professional_development: self.professional_development * factor,
            car_and_travel: self.car_and_travel * factor,
            tax_agent_fees: self.tax_agent_fees * factor,
            donations: self.donations * factor,
            self_education: self.self_education * factor,
            investment_deductions: self.investment_deductions * factor,
        }
    }

    pub(crate) fn amounts_mut(&mut self) -> [(&'static str, &mut Decimal); 8] {
        [
            ("deductions.work_related_expenses", &mut self.work_related_expenses),
            ("deductions.home_office_expenses", &mut self.home_office_expenses),
            ("deductions.professional_development", &mut self.professional_development),
            ("deductions.car_and_travel", &mut self.car_and_travel),
            ("deductions.tax_agent_fees", &mut self.tax_agent_fees),
            ("deductions.donations", &mut self.donations),
            ("deductions.self_education", &mut self.self_education),
            ("deductions.investment_deductions", &mut self.investment_deductions),
        ]
    }
}

/// Pre-tax salary packaging elections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryPackaging {
    /// Salary sacrificed into superannuation.
    #[serde(default)]
    pub salary_sacrifice_super: Decimal,
    /// Pre-tax novated lease payments.
    #[serde(default)]
    pub novated_lease: Decimal,
}

impl SalaryPackaging {
    /// Total salary redirected before tax.
    pub fn total(&self) -> Decimal {
        self.salary_sacrifice_super + self.novated_lease
    }
}

/// Everything the engine needs to evaluate one taxpayer for one year.
///
/// # Example
///
/// ```
/// use tax_engine::models::{AssessmentYear, TaxpayerProfile};
/// use rust_decimal::Decimal;
///
/// let profile = TaxpayerProfile::default();
/// assert_eq!(profile.assessment_year, AssessmentYear::Y2023_24);
/// assert_eq!(profile.income.salary, Decimal::new(80_000, 0));
/// assert_eq!(profile.deductions.total(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    /// Personal circumstances.
    #[serde(default)]
    pub personal: PersonalDetails,
    /// Income for the year.
    #[serde(default)]
    pub income: IncomeDetails,
    /// Deductions claimed.
    #[serde(default)]
    pub deductions: DeductionDetails,
    /// Salary packaging elections.
    #[serde(default)]
    pub salary_packaging: SalaryPackaging,
    /// The assessment year to evaluate against.
    pub assessment_year: AssessmentYear,
}

impl TaxpayerProfile {
    /// Every currency field with its dotted path, for boundary checks.
    pub(crate) fn amounts_mut(&mut self) -> Vec<(&'static str, &mut Decimal)> {
        let mut amounts = vec![("personal.partner_income", &mut self.personal.partner_income)];
        amounts.extend(self.income.amounts_mut());
        amounts.extend(self.deductions.amounts_mut());
        amounts.push((
            "salary_packaging.salary_sacrifice_super",
            &mut self.salary_packaging.salary_sacrifice_super,
        ));
        amounts.push((
            "salary_packaging.novated_lease",
            &mut self.salary_packaging.novated_lease,
        ));
        amounts
    }
}
