use serde::{Deserialize, Serialize};
use crate::models::domain::{Policy, Recommendation, RecommendationReport, UserProfile};

/// Response for the full catalog ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// Profile the ranking was computed for
    pub profile: UserProfile,
    pub recommendations: Vec<Recommendation>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    pub report: RecommendationReport,
}

/// Catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyListResponse {
    pub policies: Vec<Policy>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub policies: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
