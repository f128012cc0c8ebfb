use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::Validate;

/// Self-reported health status of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[serde(alias = "Good")]
    Good,
    #[serde(alias = "Average")]
    Average,
    #[serde(alias = "Poor")]
    Poor,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Good => "good",
            HealthStatus::Average => "average",
            HealthStatus::Poor => "poor",
        };
        f.write_str(label)
    }
}

/// Financial goal tags attached to a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialGoal {
    FamilyProtection,
    CriticalIllness,
    Savings,
    General,
}

impl FinancialGoal {
    /// Derive goal tags from a free-text goal description.
    ///
    /// Keyword matching is case-insensitive. Text that matches no keyword
    /// yields `General`; blank text yields an empty set.
    pub fn from_text(text: &str) -> BTreeSet<FinancialGoal> {
        let lower = text.trim().to_lowercase();
        let mut goals = BTreeSet::new();

        if lower.is_empty() {
            return goals;
        }

        if lower.contains("family") || lower.contains("dependent") {
            goals.insert(FinancialGoal::FamilyProtection);
        }
        if lower.contains("critical") || lower.contains("serious") {
            goals.insert(FinancialGoal::CriticalIllness);
        }
        if lower.contains("save") || lower.contains("saving") || lower.contains("invest") {
            goals.insert(FinancialGoal::Savings);
        }
        if goals.is_empty() {
            goals.insert(FinancialGoal::General);
        }

        goals
    }
}

/// Category of an insurance product
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyType {
    #[serde(rename = "Term Life", alias = "term_life")]
    TermLife,
    #[serde(alias = "health")]
    Health,
    #[serde(alias = "comprehensive")]
    Comprehensive,
    #[serde(rename = "Accident Cover", alias = "accident_cover")]
    AccidentCover,
    #[serde(other)]
    Other,
}

impl PolicyType {
    /// Types that cover hospitalisation and serious illness
    pub fn covers_medical(&self) -> bool {
        matches!(self, PolicyType::Health | PolicyType::Comprehensive)
    }

    /// Types that carry a long-term savings or life component
    pub fn builds_savings(&self) -> bool {
        matches!(self, PolicyType::TermLife | PolicyType::Comprehensive)
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PolicyType::TermLife => "Term Life",
            PolicyType::Health => "Health",
            PolicyType::Comprehensive => "Comprehensive",
            PolicyType::AccidentCover => "Accident Cover",
            PolicyType::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Applicant profile for a single recommendation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[validate(range(min = 1))]
    pub age: u32,
    #[validate(range(min = 0.0))]
    #[serde(rename = "annualIncome", alias = "annual_income")]
    pub annual_income: f64,
    pub health: HealthStatus,
    #[serde(default)]
    pub goals: BTreeSet<FinancialGoal>,
}

impl UserProfile {
    pub fn new(age: u32, annual_income: f64, health: HealthStatus) -> Self {
        Self {
            age,
            annual_income,
            health,
            goals: BTreeSet::new(),
        }
    }

    pub fn with_goals<I>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = FinancialGoal>,
    {
        self.goals.extend(goals);
        self
    }
}

/// Catalog entry for an insurance product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "policyType", alias = "policy_type")]
    pub policy_type: PolicyType,
    /// Annual premium
    pub premium: f64,
    pub coverage: f64,
    /// Age of the typical holder this product is priced for
    #[serde(rename = "targetAge", alias = "target_age", default, skip_serializing_if = "Option::is_none")]
    pub target_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Policy {
    pub fn new(id: impl Into<String>, policy_type: PolicyType, premium: f64, coverage: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            policy_type,
            premium,
            coverage,
            target_age: None,
            region: None,
        }
    }

    /// Human readable label, falling back to the policy type
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.policy_type.to_string(),
        }
    }
}

/// A policy paired with the scores computed for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub rank: usize,
    #[serde(flatten)]
    pub policy: Policy,
    #[serde(rename = "riskScore")]
    pub risk_score: f64,
    #[serde(rename = "valueScore")]
    pub value_score: f64,
}

/// Coarse bucket of the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 3.0 {
            RiskLevel::Low
        } else if score < 6.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        };
        f.write_str(label)
    }
}

/// Advisor output for one profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub profile: UserProfile,
    #[serde(rename = "riskScore")]
    pub risk_score: f64,
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    pub best: Recommendation,
    pub shortlist: Vec<Recommendation>,
    #[serde(rename = "totalEligible")]
    pub total_eligible: usize,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
    pub rationale: String,
}

/// Estimated annual premium and the factors behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumEstimate {
    #[serde(rename = "estimatedPremium")]
    pub estimated_premium: f64,
    #[serde(rename = "baseRate")]
    pub base_rate: f64,
    #[serde(rename = "ageFactor")]
    pub age_factor: f64,
    #[serde(rename = "healthFactor")]
    pub health_factor: f64,
}

/// Side-by-side comparison of two catalog entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyComparison {
    pub left: Policy,
    pub right: Policy,
    /// right.premium - left.premium
    #[serde(rename = "premiumDifference")]
    pub premium_difference: f64,
    /// right.coverage - left.coverage
    #[serde(rename = "coverageDifference")]
    pub coverage_difference: f64,
    #[serde(rename = "leftValueRatio")]
    pub left_value_ratio: f64,
    #[serde(rename = "rightValueRatio")]
    pub right_value_ratio: f64,
    #[serde(rename = "betterValue")]
    pub better_value: Option<String>,
}

/// Aggregates for one policy type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    #[serde(rename = "policyType")]
    pub policy_type: PolicyType,
    pub count: usize,
    #[serde(rename = "avgPremium")]
    pub avg_premium: f64,
    #[serde(rename = "minPremium")]
    pub min_premium: f64,
    #[serde(rename = "maxPremium")]
    pub max_premium: f64,
    #[serde(rename = "avgCoverage")]
    pub avg_coverage: f64,
    #[serde(rename = "minCoverage")]
    pub min_coverage: f64,
    #[serde(rename = "maxCoverage")]
    pub max_coverage: f64,
}

/// Aggregates for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region: String,
    pub count: usize,
    #[serde(rename = "avgPremium")]
    pub avg_premium: f64,
    #[serde(rename = "avgCoverage")]
    pub avg_coverage: f64,
}

/// Average premium for policies priced at one target age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgePremiumPoint {
    pub age: u32,
    #[serde(rename = "avgPremium")]
    pub avg_premium: f64,
}

/// Catalog-wide aggregates for chart renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogInsights {
    #[serde(rename = "totalPolicies")]
    pub total_policies: usize,
    #[serde(rename = "byType")]
    pub by_type: Vec<TypeSummary>,
    #[serde(rename = "byRegion")]
    pub by_region: Vec<RegionSummary>,
    #[serde(rename = "premiumByAge")]
    pub premium_by_age: Vec<AgePremiumPoint>,
}
