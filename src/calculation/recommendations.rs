//! Recommendation rules.
//!
//! Rules are checked in a fixed order and every matching rule contributes
//! one recommendation. When nothing matches, a single fallback is returned.

use rust_decimal::Decimal;

use crate::models::{
    Recommendation, RecommendationKind, ResidencyStatus, TaxOutcome, TaxpayerProfile,
};

/// Current deductions below this total trigger the deductions review advice.
pub const LOW_DEDUCTIONS_THRESHOLD: Decimal = Decimal::from_parts(300, 0, 0, false, 0);

/// Salary above this triggers the high income advice.
pub const HIGH_INCOME_SALARY: Decimal = Decimal::from_parts(120_000, 0, 0, false, 0);

/// Builds recommendations for a profile given its best scenario.
///
/// `potential_savings` is the best outcome's final position less the
/// baseline's and is quoted in the super contributions advice.
pub fn build_recommendations(
    profile: &TaxpayerProfile,
    best: &TaxOutcome,
    potential_savings: Decimal,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if best.scenario_label.contains("Super") {
        recommendations.push(Recommendation {
            kind: RecommendationKind::IncreaseSuperContributions,
            title: "Increase Super Contributions".to_string(),
            description: format!(
                "Consider salary sacrificing more to your superannuation. This could save you \
                 approximately ${:.2} in tax.",
                potential_savings
            ),
        });
    }

    if profile.deductions.total() < LOW_DEDUCTIONS_THRESHOLD {
        recommendations.push(Recommendation {
            kind: RecommendationKind::ExploreDeductions,
            title: "Explore Work-Related Deductions".to_string(),
            description: "Your claimed deductions are relatively low. Consider reviewing \
                          work-related expenses such as home office use, professional \
                          subscriptions and work-related travel."
                .to_string(),
        });
    }

    if profile.personal.has_dependents()
        && profile.personal.residency_status == ResidencyStatus::Resident
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::CheckFamilyBenefits,
            title: "Check Family Tax Benefits".to_string(),
            description: "You may be eligible for Family Tax Benefits. Check your eligibility \
                          with Services Australia."
                .to_string(),
        });
    }

    if profile.income.salary > HIGH_INCOME_SALARY {
        recommendations.push(Recommendation {
            kind: RecommendationKind::HighIncomePlanning,
            title: "High Income Tax Planning".to_string(),
            description: "As a high income earner, consider discussing additional strategies \
                          such as investment bonds or income splitting with a tax professional."
                .to_string(),
        });
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::ConsultProfessional,
            title: "Consider Speaking with a Tax Professional".to_string(),
            description: "Based on your current details, a tax professional can give \
                          personalised advice."
                .to_string(),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn outcome(label: &str) -> TaxOutcome {
        TaxOutcome {
            gross_income: Decimal::ZERO,
            taxable_income: Decimal::ZERO,
            tax_liability: Decimal::ZERO,
            medicare_levy_amount: Decimal::ZERO,
            offsets_and_rebates: Decimal::ZERO,
            final_refund_or_payable: Decimal::ZERO,
            scenario_label: label.to_string(),
        }
    }

    fn kinds(recommendations: &[Recommendation]) -> Vec<RecommendationKind> {
        recommendations.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_default_profile_with_super_best() {
        let recommendations = build_recommendations(
            &TaxpayerProfile::default(),
            &outcome("With Super Sacrifice"),
            dec("2760"),
        );

        assert_eq!(
            kinds(&recommendations),
            vec![
                RecommendationKind::IncreaseSuperContributions,
                RecommendationKind::ExploreDeductions
            ]
        );
        assert!(recommendations[0].description.contains("2760"));
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let mut profile = TaxpayerProfile::default();
        profile.deductions.work_related_expenses = dec("300");

        let recommendations =
            build_recommendations(&profile, &outcome("Standard PAYG"), Decimal::ZERO);

        assert_eq!(kinds(&recommendations), vec![RecommendationKind::ConsultProfessional]);
        assert_eq!(recommendations[0].title, "Consider Speaking with a Tax Professional");
    }

    #[test]
    fn test_family_benefits_for_resident_with_dependents() {
        let mut profile = TaxpayerProfile::default();
        profile.deductions.work_related_expenses = dec("1000");
        profile.personal.dependent_children = 1;

        let recommendations =
            build_recommendations(&profile, &outcome("Max Deductions"), Decimal::ZERO);
        assert_eq!(kinds(&recommendations), vec![RecommendationKind::CheckFamilyBenefits]);
    }

    #[test]
    fn test_no_family_benefits_for_foreign_resident() {
        let mut profile = TaxpayerProfile::default();
        profile.deductions.work_related_expenses = dec("1000");
        profile.personal.dependent_children = 2;
        profile.personal.residency_status = ResidencyStatus::ForeignResident;

        let recommendations =
            build_recommendations(&profile, &outcome("Max Deductions"), Decimal::ZERO);
        assert_eq!(kinds(&recommendations), vec![RecommendationKind::ConsultProfessional]);
    }

    #[test]
    fn test_high_income_above_120000_only() {
        let mut profile = TaxpayerProfile::default();
        profile.deductions.work_related_expenses = dec("1000");

        profile.income.salary = dec("120000");
        let at_limit = build_recommendations(&profile, &outcome("Max Deductions"), Decimal::ZERO);
        assert_eq!(kinds(&at_limit), vec![RecommendationKind::ConsultProfessional]);

        profile.income.salary = dec("120001");
        let above = build_recommendations(&profile, &outcome("Max Deductions"), Decimal::ZERO);
        assert_eq!(kinds(&above), vec![RecommendationKind::HighIncomePlanning]);
    }
}
