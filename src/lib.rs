//! Policy Optimizer - insurance policy scoring and recommendation service
//!
//! This library provides the policy scorer behind the optimizer dashboard.
//! It ranks a static catalog of insurance policies for a user profile by
//! risk and value score, and builds recommendation reports, premium
//! estimates, comparisons and catalog insights on top of that ranking.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Advisor, Scorer, ScoringError};
pub use models::{HealthStatus, Policy, PolicyType, Recommendation, RecommendationReport, UserProfile};
pub use services::{CatalogError, PolicyCatalog};
