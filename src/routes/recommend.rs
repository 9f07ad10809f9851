use actix_web::{web, HttpResponse};
use crate::models::{DestinationsResponse, HealthResponse, RecommendRequest, RecommendResponse, SimilarQuery, SimilarResponse};
use crate::routes::{parse_profile, ApiError, AppState};

/// Configure health, solo recommendation and catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommend", web::post().to(recommend))
        .route("/destinations", web::get().to(list_destinations))
        .route("/destinations/{name}/similar", web::get().to(similar_destinations));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let destinations = state.catalog.len();
    let status = if destinations > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        destinations,
        groups: state.registry().len().await,
    })
}

/// Solo recommendation endpoint
///
/// POST /api/v1/recommend
///
/// Request body:
/// ```json
/// {
///   "profile": {
///     "name": "Asha",
///     "travelerType": "friends",
///     "interests": ["beach", "nightlife", "food"],
///     "budget": "low"
///   },
///   "limit": 10
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let limit = state.settings.result_limit(req.limit);
    let profile = parse_profile(req.profile)?;

    tracing::debug!(
        "Recommending for {} ({}, {} interests), limit: {}",
        profile.name,
        profile.traveler_type,
        profile.interests.len(),
        limit
    );

    let result = state
        .matcher
        .recommend(&profile, state.catalog.destinations(), limit)?;

    tracing::info!(
        "Returning {} destinations for {} (from {} candidates)",
        result.results.len(),
        profile.name,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(RecommendResponse {
        results: result.results,
        total_candidates: result.total_candidates,
    }))
}

/// Full catalog listing
async fn list_destinations(state: web::Data<AppState>) -> HttpResponse {
    let destinations = state.catalog.destinations().to_vec();
    HttpResponse::Ok().json(DestinationsResponse {
        total: destinations.len(),
        destinations,
    })
}

/// Destinations most like the given one
///
/// GET /api/v1/destinations/{name}/similar?limit=10
async fn similar_destinations(
    state: web::Data<AppState>,
    name: web::Path<String>,
    query: web::Query<SimilarQuery>,
) -> Result<HttpResponse, ApiError> {
    let name = name.into_inner();
    let limit = state.settings.result_limit(query.limit);

    let similar = state
        .similarity
        .similar_to(&name, limit)
        .ok_or_else(|| ApiError::NotFound(format!("Destination not found: {}", name)))?;

    Ok(HttpResponse::Ok().json(SimilarResponse { name, similar }))
}

