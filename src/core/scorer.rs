use std::cmp::Ordering;

use crate::core::{
    error::ScoringError,
    risk::{calculate_risk_score, normalized_risk, validate_profile},
    scoring::calculate_value_score,
};
use crate::models::{Policy, Recommendation, RiskModel, UserProfile, ValueWeights};

/// Policy scorer - ranks a catalog for one profile
///
/// # Pipeline Stages
/// 1. Profile validation
/// 2. Risk scoring
/// 3. Value scoring per policy
/// 4. Ranking
///
/// Scoring is pure: the same profile and catalog always yield the same
/// ordered output.
#[derive(Debug, Clone)]
pub struct Scorer {
    risk_model: RiskModel,
    weights: ValueWeights,
}

impl Scorer {
    pub fn new(risk_model: RiskModel, weights: ValueWeights) -> Self {
        Self { risk_model, weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            risk_model: RiskModel::default(),
            weights: ValueWeights::default(),
        }
    }

    pub fn risk_model(&self) -> &RiskModel {
        &self.risk_model
    }

    pub fn weights(&self) -> &ValueWeights {
        &self.weights
    }

    /// Risk score for a validated profile
    pub fn risk_score(&self, profile: &UserProfile) -> Result<f64, ScoringError> {
        validate_profile(profile)?;
        Ok(calculate_risk_score(profile, &self.risk_model))
    }

    /// Score and rank every policy in the catalog
    ///
    /// # Arguments
    /// * `profile` - The applicant profile
    /// * `catalog` - The static policy catalog
    ///
    /// # Returns
    /// One recommendation per catalog entry, ordered by descending value
    /// score; ties go to the lower premium, then to catalog order.
    pub fn score(
        &self,
        profile: &UserProfile,
        catalog: &[Policy],
    ) -> Result<Vec<Recommendation>, ScoringError> {
        validate_profile(profile)?;

        if catalog.is_empty() {
            return Err(ScoringError::EmptyCatalog);
        }

        let risk_score = calculate_risk_score(profile, &self.risk_model);
        let risk = normalized_risk(risk_score, &self.risk_model);

        let mut recommendations: Vec<Recommendation> = catalog
            .iter()
            .map(|policy| Recommendation {
                rank: 0,
                value_score: calculate_value_score(policy, profile, risk, &self.weights),
                risk_score,
                policy: policy.clone(),
            })
            .collect();

        // Stable sort keeps catalog order for full ties
        recommendations.sort_by(|a, b| {
            b.value_score
                .partial_cmp(&a.value_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.policy
                        .premium
                        .partial_cmp(&b.policy.premium)
                        .unwrap_or(Ordering::Equal)
                })
        });

        assign_ranks(&mut recommendations);

        tracing::debug!(
            "Scored {} policies (risk score {}, top value {:.2})",
            recommendations.len(),
            risk_score,
            recommendations[0].value_score
        );

        Ok(recommendations)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Number recommendations 1..n in their current order
pub fn assign_ranks(recommendations: &mut [Recommendation]) {
    for (index, recommendation) in recommendations.iter_mut().enumerate() {
        recommendation.rank = index + 1;
    }
}
