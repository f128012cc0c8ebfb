use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FinancialGoal, HealthStatus, PolicyType, UserProfile};

/// Request for a recommendation report
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(nested)]
    pub profile: UserProfile,
    /// Free-text goal description, merged into the profile's goal tags
    #[serde(rename = "goalText", alias = "goal_text", default)]
    pub goal_text: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl RecommendRequest {
    /// Profile with goals parsed from `goal_text` added
    pub fn resolved_profile(&self) -> UserProfile {
        let mut profile = self.profile.clone();
        if let Some(text) = &self.goal_text {
            profile.goals.extend(FinancialGoal::from_text(text));
        }
        profile
    }
}

/// Request for a premium estimate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PremiumEstimateRequest {
    #[validate(range(min = 1))]
    pub age: u32,
    #[validate(range(exclusive_min = 0.0))]
    pub coverage: f64,
    #[serde(rename = "policyType", alias = "policy_type")]
    pub policy_type: PolicyType,
    pub health: HealthStatus,
}

/// Request to compare two catalog entries
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "leftId", alias = "left_id")]
    pub left_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "rightId", alias = "right_id")]
    pub right_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_request_merges_goal_text() {
        let req: RecommendRequest = serde_json::from_str(
            r#"{
                "profile": {"age": 30, "annualIncome": 800000, "health": "good", "goals": ["savings"]},
                "goalText": "look after my dependents"
            }"#,
        )
        .unwrap();

        assert!(req.validate().is_ok());
        let profile = req.resolved_profile();
        assert!(profile.goals.contains(&FinancialGoal::Savings));
        assert!(profile.goals.contains(&FinancialGoal::FamilyProtection));
    }

    #[test]
    fn test_recommend_request_rejects_zero_age() {
        let req: RecommendRequest = serde_json::from_str(
            r#"{"profile": {"age": 0, "annualIncome": 800000, "health": "good"}}"#,
        )
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_premium_request_rejects_zero_coverage() {
        let req = PremiumEstimateRequest {
            age: 30,
            coverage: 0.0,
            policy_type: PolicyType::Health,
            health: HealthStatus::Good,
        };
        assert!(req.validate().is_err());
    }
}
