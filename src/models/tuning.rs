use serde::{Deserialize, Serialize};
use crate::models::domain::{HealthStatus, PolicyType};

/// Step in a piecewise-constant factor table.
///
/// Applies when the input is strictly below `below`. Tables are read in
/// order, so bands must be sorted by ascending `below`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub below: f64,
    pub factor: f64,
}

impl Band {
    pub const fn new(below: f64, factor: f64) -> Self {
        Self { below, factor }
    }
}

/// Look up the factor for `value`, using `fallback` past the last band
#[inline]
pub fn band_factor(bands: &[Band], fallback: f64, value: f64) -> f64 {
    bands
        .iter()
        .find(|band| value < band.below)
        .map(|band| band.factor)
        .unwrap_or(fallback)
}

fn max_factor(bands: &[Band], fallback: f64) -> f64 {
    bands.iter().map(|band| band.factor).fold(fallback, f64::max)
}

fn check_factor(name: &str, factor: f64) -> Result<(), String> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(format!("{} must be finite and positive, got {}", name, factor));
    }
    Ok(())
}

/// Bands must ascend strictly by `below` and carry positive factors
fn check_bands(name: &str, bands: &[Band]) -> Result<(), String> {
    for band in bands {
        if !band.below.is_finite() {
            return Err(format!("{} bounds must be finite, got {}", name, band.below));
        }
        check_factor(name, band.factor)?;
    }
    for pair in bands.windows(2) {
        if pair[0].below >= pair[1].below {
            return Err(format!(
                "{} must be sorted by ascending `below`, got {} before {}",
                name, pair[0].below, pair[1].below
            ));
        }
    }
    Ok(())
}

/// Multipliers per health status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthFactors {
    pub good: f64,
    pub average: f64,
    pub poor: f64,
}

impl HealthFactors {
    #[inline]
    pub fn factor(&self, health: HealthStatus) -> f64 {
        match health {
            HealthStatus::Good => self.good,
            HealthStatus::Average => self.average,
            HealthStatus::Poor => self.poor,
        }
    }

    fn max(&self) -> f64 {
        self.good.max(self.average).max(self.poor)
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        for factor in [self.good, self.average, self.poor] {
            check_factor(name, factor)?;
        }
        Ok(())
    }
}

/// One number per policy type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeFactors {
    pub term_life: f64,
    pub health: f64,
    pub comprehensive: f64,
    pub accident_cover: f64,
    pub other: f64,
}

impl TypeFactors {
    #[inline]
    pub fn for_type(&self, policy_type: &PolicyType) -> f64 {
        match policy_type {
            PolicyType::TermLife => self.term_life,
            PolicyType::Health => self.health,
            PolicyType::Comprehensive => self.comprehensive,
            PolicyType::AccidentCover => self.accident_cover,
            PolicyType::Other => self.other,
        }
    }
}

/// Risk score model: age factor * health multiplier * income multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskModel {
    pub age_bands: Vec<Band>,
    pub senior_age_factor: f64,
    pub health: HealthFactors,
    pub income_bands: Vec<Band>,
    pub high_income_factor: f64,
}

impl RiskModel {
    /// Largest score any profile can reach under this model
    pub fn max_score(&self) -> f64 {
        max_factor(&self.age_bands, self.senior_age_factor)
            * self.health.max()
            * max_factor(&self.income_bands, self.high_income_factor)
    }

    pub fn validate(&self) -> Result<(), String> {
        check_bands("age_bands", &self.age_bands)?;
        check_factor("senior_age_factor", self.senior_age_factor)?;
        self.health.validate("health factors")?;
        check_bands("income_bands", &self.income_bands)?;
        check_factor("high_income_factor", self.high_income_factor)
    }
}

impl Default for RiskModel {
    fn default() -> Self {
        Self {
            age_bands: vec![Band::new(25.0, 1.0), Band::new(35.0, 1.5), Band::new(50.0, 2.0)],
            senior_age_factor: 3.0,
            health: HealthFactors {
                good: 1.0,
                average: 1.5,
                poor: 2.5,
            },
            // Lower income carries higher risk
            income_bands: vec![Band::new(500_000.0, 1.3), Band::new(1_500_000.0, 1.1)],
            high_income_factor: 0.9,
        }
    }
}

/// Weights of the value score adjustments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueWeights {
    /// How strongly risk shifts value toward high-protection policy types
    pub risk: f64,
    /// Penalty per unit of premium-to-income share, in [0, 1)
    pub affordability: f64,
    /// Bonus when a profile goal favours the policy
    pub goal: f64,
    /// Protection level of each policy type, in [0, 1]
    pub protection: TypeFactors,
    /// Coverage a policy needs to serve a family protection goal
    pub family_min_coverage: f64,
}

impl ValueWeights {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..2.0).contains(&self.risk) {
            return Err(format!("risk weight must be in [0, 2), got {}", self.risk));
        }
        if !(0.0..1.0).contains(&self.affordability) {
            return Err(format!(
                "affordability weight must be in [0, 1), got {}",
                self.affordability
            ));
        }
        if self.goal.is_nan() || self.goal < 0.0 {
            return Err(format!("goal weight must be non-negative, got {}", self.goal));
        }
        let p = &self.protection;
        for factor in [p.term_life, p.health, p.comprehensive, p.accident_cover, p.other] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(format!("protection factors must be in [0, 1], got {}", factor));
            }
        }
        Ok(())
    }
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            risk: 0.5,
            affordability: 0.5,
            goal: 0.15,
            protection: TypeFactors {
                term_life: 0.6,
                health: 0.9,
                comprehensive: 1.0,
                accident_cover: 0.4,
                other: 0.5,
            },
            family_min_coverage: 1_500_000.0,
        }
    }
}

/// Advisor shortlist rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRules {
    /// Allowed distance between user age and a policy's target age
    pub age_window: u32,
    pub min_coverage: f64,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            age_window: 10,
            min_coverage: 1_000_000.0,
            default_limit: 5,
            max_limit: 20,
        }
    }
}

/// Premium estimator rate card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PremiumRates {
    /// Annual premium per 1,000 of coverage
    pub base: TypeFactors,
    pub age_bands: Vec<Band>,
    pub senior_age_factor: f64,
    pub health: HealthFactors,
}

impl PremiumRates {
    pub fn validate(&self) -> Result<(), String> {
        let b = &self.base;
        for rate in [b.term_life, b.health, b.comprehensive, b.accident_cover, b.other] {
            check_factor("base rates", rate)?;
        }
        check_bands("age_bands", &self.age_bands)?;
        check_factor("senior_age_factor", self.senior_age_factor)?;
        self.health.validate("health factors")
    }
}

impl Default for PremiumRates {
    fn default() -> Self {
        Self {
            base: TypeFactors {
                term_life: 5.0,
                health: 8.0,
                comprehensive: 12.0,
                accident_cover: 3.0,
                other: 8.0,
            },
            age_bands: vec![
                Band::new(25.0, 0.8),
                Band::new(35.0, 1.0),
                Band::new(45.0, 1.3),
                Band::new(55.0, 1.7),
            ],
            senior_age_factor: 2.5,
            health: HealthFactors {
                good: 1.0,
                average: 1.3,
                poor: 2.0,
            },
        }
    }
}
