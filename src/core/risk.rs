use crate::core::error::ScoringError;
use crate::models::{tuning::band_factor, RiskModel, UserProfile};

/// Check the profile constraints every scoring entry point relies on
pub fn validate_profile(profile: &UserProfile) -> Result<(), ScoringError> {
    if profile.age == 0 {
        return Err(ScoringError::InvalidInput(
            "age must be greater than zero".to_string(),
        ));
    }

    if !profile.annual_income.is_finite() || profile.annual_income < 0.0 {
        return Err(ScoringError::InvalidInput(format!(
            "annual income must be a non-negative number, got {}",
            profile.annual_income
        )));
    }

    Ok(())
}

/// Calculate the risk score of a profile
///
/// Scoring formula:
/// risk = age_factor * health_multiplier * income_multiplier
///
/// Older applicants, worse health and lower income all push the score up.
/// The result is rounded to two decimals.
pub fn calculate_risk_score(profile: &UserProfile, model: &RiskModel) -> f64 {
    let age_factor = band_factor(&model.age_bands, model.senior_age_factor, profile.age as f64);
    let health_factor = model.health.factor(profile.health);
    let income_factor = band_factor(
        &model.income_bands,
        model.high_income_factor,
        profile.annual_income,
    );

    round2(age_factor * health_factor * income_factor)
}

/// Risk score scaled into [0, 1] by the model's maximum
#[inline]
pub fn normalized_risk(risk_score: f64, model: &RiskModel) -> f64 {
    let max = model.max_score();
    if max <= 0.0 {
        return 0.0;
    }
    (risk_score / max).clamp(0.0, 1.0)
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
