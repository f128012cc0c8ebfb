use crate::core::filters::matches_any_goal;
use crate::models::{Policy, UserProfile, ValueWeights};

/// Premium floor used for the coverage ratio, so free policies stay finite
const MIN_PREMIUM: f64 = 1.0;

/// Calculate the value score of a policy for a profile
///
/// Scoring formula:
/// value = (
///     coverage / max(premium, 1)          # Raw coverage per unit premium
///     * risk_adjustment                   # Riskier users favour protective types
///     * affordability                     # Premium as share of income
///     * goal_adjustment                   # A profile goal favours the policy
/// )
///
/// `normalized_risk` is the profile's risk score scaled into [0, 1].
pub fn calculate_value_score(
    policy: &Policy,
    profile: &UserProfile,
    normalized_risk: f64,
    weights: &ValueWeights,
) -> f64 {
    let ratio = coverage_ratio(policy);
    let risk_adjustment = calculate_risk_adjustment(policy, normalized_risk, weights);
    let affordability =
        calculate_affordability(policy.premium, profile.annual_income, weights.affordability);
    let goal_adjustment = if matches_any_goal(profile, policy, weights.family_min_coverage) {
        1.0 + weights.goal
    } else {
        1.0
    };

    ratio * risk_adjustment * affordability * goal_adjustment
}

/// Coverage per unit of premium
#[inline]
pub fn coverage_ratio(policy: &Policy) -> f64 {
    policy.coverage / policy.premium.max(MIN_PREMIUM)
}

/// Risk adjustment (centred on 1.0)
/// Types with protection above 0.5 gain as risk grows, the rest lose
#[inline]
fn calculate_risk_adjustment(policy: &Policy, normalized_risk: f64, weights: &ValueWeights) -> f64 {
    let protection = weights.protection.for_type(&policy.policy_type);
    1.0 + weights.risk * normalized_risk * (protection - 0.5)
}

/// Affordability factor (0-1)
/// Without income every premium counts as unaffordable
#[inline]
fn calculate_affordability(premium: f64, annual_income: f64, weight: f64) -> f64 {
    let share = if annual_income > 0.0 {
        (premium / annual_income).min(1.0)
    } else {
        1.0
    };

    1.0 - weight * share
}
