use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{catalog_insights, compare_policies, estimate_premium, Advisor, ScoringError};
use crate::models::{
    CompareRequest, ErrorResponse, HealthResponse, PolicyListResponse, PremiumEstimateRequest,
    PremiumRates, RecommendRequest, RecommendResponse, ScoreResponse, UserProfile,
};
use crate::services::PolicyCatalog;

/// Application state shared across all handlers
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PolicyCatalog>,
    pub advisor: Advisor,
    pub premium_rates: PremiumRates,
}

/// Configure all policy-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/policies", web::get().to(list_policies))
        .route("/policies/score", web::post().to(score_policies))
        .route("/policies/compare", web::post().to(compare))
        .route("/policies/{id}", web::get().to(get_policy))
        .route("/recommendations", web::post().to(recommend))
        .route("/premium/estimate", web::post().to(premium_estimate))
        .route("/insights", web::get().to(insights));
}

fn error_response(status_code: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code,
    };

    match status_code {
        404 => HttpResponse::NotFound().json(body),
        422 => HttpResponse::UnprocessableEntity().json(body),
        503 => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    error_response(400, "validation_failed", errors.to_string())
}

fn scoring_failed(err: ScoringError) -> HttpResponse {
    match err {
        ScoringError::InvalidInput(_) => error_response(400, "invalid_input", err.to_string()),
        ScoringError::NoEligiblePolicies => {
            error_response(422, "no_recommendations", err.to_string())
        }
        ScoringError::EmptyCatalog => {
            tracing::error!("Scoring attempted against an empty catalog");
            error_response(503, "empty_catalog", err.to_string())
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        policies: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// List the whole catalog
///
/// GET /api/v1/policies
async fn list_policies(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(PolicyListResponse {
        policies: state.catalog.policies().to_vec(),
        total: state.catalog.len(),
    })
}

/// Fetch one policy
///
/// GET /api/v1/policies/{id}
async fn get_policy(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.catalog.get(&id) {
        Some(policy) => HttpResponse::Ok().json(policy),
        None => error_response(404, "policy_not_found", format!("No policy with id {}", id)),
    }
}

/// Rank the whole catalog for a profile
///
/// POST /api/v1/policies/score
///
/// Request body:
/// ```json
/// {
///   "age": 30,
///   "annualIncome": 800000,
///   "health": "good|average|poor",
///   "goals": ["family_protection"]
/// }
/// ```
async fn score_policies(
    state: web::Data<AppState>,
    req: web::Json<UserProfile>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for score request: {:?}", errors);
        return validation_failed(errors);
    }

    match state.advisor.scorer().score(&req, state.catalog.policies()) {
        Ok(recommendations) => {
            tracing::info!(
                "Scored {} policies for age {}, health {}",
                recommendations.len(),
                req.age,
                req.health
            );
            HttpResponse::Ok().json(ScoreResponse {
                profile: req.into_inner(),
                total_results: recommendations.len(),
                recommendations,
            })
        }
        Err(e) => scoring_failed(e),
    }
}

/// Recommendation report endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "profile": { "age": 30, "annualIncome": 800000, "health": "good" },
///   "goalText": "protect my family",
///   "limit": 5
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return validation_failed(errors);
    }

    let profile = req.resolved_profile();
    let request_id = uuid::Uuid::new_v4().to_string();

    match state
        .advisor
        .recommend(&profile, state.catalog.policies(), req.limit)
    {
        Ok(report) => {
            tracing::info!(
                "Request {}: recommending {} ({} of {} eligible)",
                request_id,
                report.best.policy.id,
                report.shortlist.len(),
                report.total_eligible
            );
            HttpResponse::Ok().json(RecommendResponse {
                request_id,
                generated_at: chrono::Utc::now(),
                report,
            })
        }
        Err(e) => {
            tracing::info!("Request {}: no recommendation ({})", request_id, e);
            scoring_failed(e)
        }
    }
}

/// Premium estimate endpoint
///
/// POST /api/v1/premium/estimate
async fn premium_estimate(
    state: web::Data<AppState>,
    req: web::Json<PremiumEstimateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match estimate_premium(
        req.age,
        req.coverage,
        &req.policy_type,
        req.health,
        &state.premium_rates,
    ) {
        Ok(estimate) => HttpResponse::Ok().json(estimate),
        Err(e) => scoring_failed(e),
    }
}

/// Compare two catalog entries
///
/// POST /api/v1/policies/compare
async fn compare(
    state: web::Data<AppState>,
    req: web::Json<CompareRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let left = match state.catalog.get(&req.left_id) {
        Some(policy) => policy,
        None => {
            return error_response(404, "policy_not_found", format!("No policy with id {}", req.left_id));
        }
    };
    let right = match state.catalog.get(&req.right_id) {
        Some(policy) => policy,
        None => {
            return error_response(404, "policy_not_found", format!("No policy with id {}", req.right_id));
        }
    };

    HttpResponse::Ok().json(compare_policies(left, right))
}

/// Catalog insights for chart renderers
///
/// GET /api/v1/insights
async fn insights(state: web::Data<AppState>) -> impl Responder {
    match catalog_insights(state.catalog.policies()) {
        Ok(insights) => HttpResponse::Ok().json(insights),
        Err(e) => scoring_failed(e),
    }
}
