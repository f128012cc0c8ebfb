use crate::core::{
    error::ScoringError,
    explain::build_rationale,
    filters::{matches_age_and_coverage, matches_coverage, matches_health_and_goals},
    scorer::{assign_ranks, Scorer},
};
use crate::models::{EligibilityRules, Policy, Recommendation, RecommendationReport, RiskLevel, UserProfile};

/// Builds the recommendation report on top of the full ranking
///
/// # Pipeline Stages
/// 1. Score the whole catalog
/// 2. Age window + minimum coverage (coverage alone if nothing survives)
/// 3. Health and goal suitability
/// 4. Shortlist and rationale
#[derive(Debug, Clone)]
pub struct Advisor {
    scorer: Scorer,
    rules: EligibilityRules,
}

impl Advisor {
    pub fn new(scorer: Scorer, rules: EligibilityRules) -> Self {
        Self { scorer, rules }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    /// Clamp a requested shortlist size to the configured bounds
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.rules.default_limit)
            .clamp(1, self.rules.max_limit.max(1))
    }

    /// Recommend policies for a profile
    ///
    /// # Arguments
    /// * `profile` - The applicant profile
    /// * `catalog` - The static policy catalog
    /// * `limit` - Requested shortlist size, `None` for the default
    pub fn recommend(
        &self,
        profile: &UserProfile,
        catalog: &[Policy],
        limit: Option<usize>,
    ) -> Result<RecommendationReport, ScoringError> {
        let ranked = self.scorer.score(profile, catalog)?;
        let catalog_size = ranked.len();
        let risk_score = ranked[0].risk_score;
        let family_min_coverage = self.scorer.weights().family_min_coverage;

        // Stage 2: age window with coverage-only fallback
        let mut eligible: Vec<Recommendation> = ranked
            .iter()
            .filter(|r| matches_age_and_coverage(&r.policy, profile, &self.rules))
            .cloned()
            .collect();

        if eligible.is_empty() {
            tracing::debug!("No policies within age window for age {}, widening", profile.age);
            eligible = ranked
                .into_iter()
                .filter(|r| matches_coverage(&r.policy, &self.rules))
                .collect();
        }

        // Stage 3: health and goals
        eligible.retain(|r| matches_health_and_goals(&r.policy, profile, family_min_coverage));

        if eligible.is_empty() {
            return Err(ScoringError::NoEligiblePolicies);
        }

        let total_eligible = eligible.len();
        let mut shortlist = eligible;
        shortlist.truncate(self.effective_limit(limit));
        assign_ranks(&mut shortlist);

        let risk_level = RiskLevel::from_score(risk_score);
        let best = shortlist[0].clone();
        let rationale = build_rationale(profile, &best, risk_level);

        tracing::debug!(
            "Recommending {} for age {} ({} of {} policies eligible)",
            best.policy.id,
            profile.age,
            total_eligible,
            catalog_size
        );

        Ok(RecommendationReport {
            profile: profile.clone(),
            risk_score,
            risk_level,
            best,
            shortlist,
            total_eligible,
            catalog_size,
            rationale,
        })
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(Scorer::default(), EligibilityRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FinancialGoal, HealthStatus, PolicyType};

    fn create_policy(id: &str, policy_type: PolicyType, premium: f64, coverage: f64, target_age: u32) -> Policy {
        let mut policy = Policy::new(id, policy_type, premium, coverage);
        policy.target_age = Some(target_age);
        policy
    }

    fn create_catalog() -> Vec<Policy> {
        vec![
            create_policy("term-30", PolicyType::TermLife, 9_000.0, 5_000_000.0, 30),
            create_policy("health-32", PolicyType::Health, 15_000.0, 1_000_000.0, 32),
            create_policy("comp-28", PolicyType::Comprehensive, 30_000.0, 2_000_000.0, 28),
            create_policy("accident-35", PolicyType::AccidentCover, 2_000.0, 1_000_000.0, 35),
            create_policy("health-60", PolicyType::Health, 40_000.0, 1_500_000.0, 60),
            create_policy("small-30", PolicyType::Health, 1_000.0, 200_000.0, 30),
        ]
    }

    #[test]
    fn test_recommend_filters_by_age_and_coverage() {
        let advisor = Advisor::default();
        let profile = UserProfile::new(30, 1_200_000.0, HealthStatus::Good);

        let report = advisor.recommend(&profile, &create_catalog(), None).unwrap();

        assert_eq!(report.catalog_size, 6);
        assert_eq!(report.total_eligible, 4);
        assert!(report.shortlist.iter().all(|r| r.policy.id != "health-60" && r.policy.id != "small-30"));
        assert_eq!(report.best, report.shortlist[0]);
        assert_eq!(report.best.rank, 1);
    }

    #[test]
    fn test_poor_health_gets_medical_cover() {
        let advisor = Advisor::default();
        let profile = UserProfile::new(30, 1_200_000.0, HealthStatus::Poor);

        let report = advisor.recommend(&profile, &create_catalog(), None).unwrap();

        assert!(report.shortlist.iter().all(|r| r.policy.policy_type.covers_medical()));
    }

    #[test]
    fn test_age_window_fallback() {
        let advisor = Advisor::default();
        let profile = UserProfile::new(80, 1_200_000.0, HealthStatus::Good);

        let report = advisor.recommend(&profile, &create_catalog(), None).unwrap();

        assert_eq!(report.total_eligible, 5);
    }

    #[test]
    fn test_no_eligible_policies() {
        let advisor = Advisor::default();
        let profile = UserProfile::new(30, 1_200_000.0, HealthStatus::Good)
            .with_goals([FinancialGoal::Savings]);
        let catalog = vec![create_policy("accident", PolicyType::AccidentCover, 2_000.0, 1_000_000.0, 30)];

        assert_eq!(
            advisor.recommend(&profile, &catalog, None).unwrap_err(),
            ScoringError::NoEligiblePolicies
        );
    }

    #[test]
    fn test_limit_is_clamped_and_reranked() {
        let advisor = Advisor::default();
        let profile = UserProfile::new(30, 1_200_000.0, HealthStatus::Good);

        let report = advisor.recommend(&profile, &create_catalog(), Some(2)).unwrap();
        assert_eq!(report.shortlist.len(), 2);
        assert_eq!(report.shortlist.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2]);

        assert_eq!(advisor.effective_limit(Some(0)), 1);
        assert_eq!(advisor.effective_limit(Some(500)), 20);
        assert_eq!(advisor.effective_limit(None), 5);
    }

    #[test]
    fn test_empty_catalog_propagates() {
        let advisor = Advisor::default();
        let profile = UserProfile::new(30, 1_200_000.0, HealthStatus::Good);

        assert_eq!(advisor.recommend(&profile, &[], None).unwrap_err(), ScoringError::EmptyCatalog);
    }
}
