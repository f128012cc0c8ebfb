// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod tuning;

pub use domain::{
    AgePremiumPoint, CatalogInsights, FinancialGoal, HealthStatus, Policy, PolicyComparison,
    PolicyType, PremiumEstimate, Recommendation, RecommendationReport, RegionSummary, RiskLevel,
    TypeSummary, UserProfile,
};
pub use requests::{CompareRequest, PremiumEstimateRequest, RecommendRequest};
pub use responses::{ErrorResponse, HealthResponse, PolicyListResponse, RecommendResponse, ScoreResponse};
pub use tuning::{Band, EligibilityRules, HealthFactors, PremiumRates, RiskModel, TypeFactors, ValueWeights};
