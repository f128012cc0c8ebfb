// Core algorithm exports
pub mod advisor;
pub mod compare;
pub mod error;
pub mod explain;
pub mod filters;
pub mod insights;
pub mod premium;
pub mod risk;
pub mod scorer;
pub mod scoring;

pub use advisor::Advisor;
pub use compare::compare_policies;
pub use error::ScoringError;
pub use explain::{build_rationale, format_currency};
pub use filters::{goal_favours, matches_age_and_coverage, matches_coverage, matches_health_and_goals};
pub use insights::catalog_insights;
pub use premium::estimate_premium;
pub use risk::{calculate_risk_score, normalized_risk, validate_profile};
pub use scorer::Scorer;
pub use scoring::{calculate_value_score, coverage_ratio};
