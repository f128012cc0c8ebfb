use crate::models::{EligibilityRules, FinancialGoal, HealthStatus, Policy, UserProfile};

/// Check whether a goal favours a given policy
#[inline]
pub fn goal_favours(goal: FinancialGoal, policy: &Policy, family_min_coverage: f64) -> bool {
    match goal {
        FinancialGoal::FamilyProtection => policy.coverage >= family_min_coverage,
        FinancialGoal::CriticalIllness => policy.policy_type.covers_medical(),
        FinancialGoal::Savings => policy.policy_type.builds_savings(),
        FinancialGoal::General => false,
    }
}

/// True when any of the profile's goals favours the policy
#[inline]
pub fn matches_any_goal(profile: &UserProfile, policy: &Policy, family_min_coverage: f64) -> bool {
    profile
        .goals
        .iter()
        .any(|goal| goal_favours(*goal, policy, family_min_coverage))
}

/// Check the policy is priced for the user's age group and offers enough cover
///
/// This is Stage 1 of the eligibility pipeline. Policies without a target
/// age pass the age check.
#[inline]
pub fn matches_age_and_coverage(
    policy: &Policy,
    profile: &UserProfile,
    rules: &EligibilityRules,
) -> bool {
    if !matches_coverage(policy, rules) {
        return false;
    }

    match policy.target_age {
        Some(target) => target.abs_diff(profile.age) <= rules.age_window,
        None => true,
    }
}

/// Minimum coverage check, used alone as the Stage 1 fallback
#[inline]
pub fn matches_coverage(policy: &Policy, rules: &EligibilityRules) -> bool {
    policy.coverage >= rules.min_coverage
}

/// Check the policy suits the user's health and goals
///
/// This is Stage 2. Poor health restricts to medical cover; every goal
/// other than `General` narrows the set further.
#[inline]
pub fn matches_health_and_goals(
    policy: &Policy,
    profile: &UserProfile,
    family_min_coverage: f64,
) -> bool {
    if profile.health == HealthStatus::Poor && !policy.policy_type.covers_medical() {
        return false;
    }

    profile
        .goals
        .iter()
        .filter(|goal| **goal != FinancialGoal::General)
        .all(|goal| goal_favours(*goal, policy, family_min_coverage))
}
