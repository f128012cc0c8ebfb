use crate::core::error::ScoringError;
use crate::models::{tuning::band_factor, HealthStatus, PolicyType, PremiumEstimate, PremiumRates};

/// Estimate the annual premium for a coverage amount
///
/// Estimate formula:
/// premium = coverage / 1000 * base_rate(type) * age_factor * health_factor
///
/// Rounded to whole currency units.
pub fn estimate_premium(
    age: u32,
    coverage: f64,
    policy_type: &PolicyType,
    health: HealthStatus,
    rates: &PremiumRates,
) -> Result<PremiumEstimate, ScoringError> {
    if age == 0 {
        return Err(ScoringError::InvalidInput(
            "age must be greater than zero".to_string(),
        ));
    }

    if !coverage.is_finite() || coverage <= 0.0 {
        return Err(ScoringError::InvalidInput(format!(
            "coverage must be a positive number, got {}",
            coverage
        )));
    }

    let base_rate = rates.base.for_type(policy_type);
    let age_factor = band_factor(&rates.age_bands, rates.senior_age_factor, age as f64);
    let health_factor = rates.health.factor(health);

    let estimated_premium = (coverage / 1000.0 * base_rate * age_factor * health_factor).round();

    Ok(PremiumEstimate {
        estimated_premium,
        base_rate,
        age_factor,
        health_factor,
    })
}
