use crate::core::Recommender;
use crate::models::{
    College, ErrorResponse, HealthResponse, ListRecommendationsQuery, RecommendationsResponse,
};
use crate::services::{CatalogCache, PostgresClient, SupabaseClient, SupabaseError, TokenVerifier};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub postgres: Arc<PostgresClient>,
    pub catalog_cache: Arc<CatalogCache>,
    pub verifier: TokenVerifier,
    pub recommender: Recommender,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route(
            "/recommendations/generate",
            web::post().to(generate_recommendations),
        )
        .route("/recommendations", web::get().to(list_recommendations));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Resolve the caller's identity from the Authorization header
///
/// Rejection happens before any other work; internal verification detail
/// is logged but never forwarded.
fn authenticate(state: &AppState, req: &HttpRequest) -> Result<String, HttpResponse> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    state.verifier.user_id_from_header(header).map_err(|e| {
        tracing::info!("Rejected request on {}: {}", req.path(), e);
        HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Unauthorized".to_string(),
            message: "A valid bearer token is required".to_string(),
            status_code: 401,
        })
    })
}

/// Generate recommendations endpoint
///
/// POST /api/v1/recommendations/generate
///
/// No body payload. The caller is identified by the bearer token; the
/// full pipeline runs synchronously: profile, catalog, scoring, ranking,
/// persistence, response.
async fn generate_recommendations(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> impl Responder {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    // Run id ties the log lines of one generation together
    let run_id = uuid::Uuid::new_v4();
    tracing::info!("Generating recommendations for user: {} (run {})", user_id, run_id);

    let profile = match state.supabase.get_profile(&user_id).await {
        Ok(profile) => profile,
        Err(SupabaseError::NotFound(_)) => {
            tracing::info!("No profile found for user {}", user_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Profile not found".to_string(),
                message: "Complete your profile before requesting recommendations".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch profile".to_string(),
                message: "The profile store could not be reached".to_string(),
                status_code: 500,
            });
        }
    };

    let colleges = match fetch_catalog(&state).await {
        Ok(colleges) => colleges,
        Err(e) => {
            tracing::error!("Failed to fetch college catalog: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to fetch catalog".to_string(),
                message: "The college catalog is currently unavailable".to_string(),
                status_code: 502,
            });
        }
    };

    // The engine is a pure function of (profile, catalog)
    let result = state.recommender.generate(&profile, &colleges);

    // Sequential writes, fail-fast: a partially persisted batch must not
    // be reported as success.
    if let Err(e) = state
        .postgres
        .save_recommendations(&user_id, &result.recommendations)
        .await
    {
        tracing::error!("Failed to persist recommendations for {}: {}", user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to save recommendations".to_string(),
            message: "Recommendations could not be saved; please retry".to_string(),
            status_code: 500,
        });
    }

    tracing::info!(
        "Returning {} recommendations for user {} (from {} colleges, run {})",
        result.recommendations.len(),
        user_id,
        result.total_evaluated,
        run_id
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        recommendations: result.recommendations,
        total_evaluated: result.total_evaluated,
        generated_at: chrono::Utc::now(),
    })
}

/// Catalog fetch with the service-layer cache in front
async fn fetch_catalog(state: &AppState) -> Result<Arc<Vec<College>>, SupabaseError> {
    if let Some(colleges) = state.catalog_cache.get().await {
        tracing::debug!("Catalog served from cache ({} colleges)", colleges.len());
        return Ok(colleges);
    }

    let colleges = state.supabase.list_colleges().await?;
    Ok(state.catalog_cache.set(colleges).await)
}

/// List persisted recommendations endpoint
///
/// GET /api/v1/recommendations?limit={n}&offset={n}
///
/// Read-back path for dashboard-style consumers; returns the stored
/// rows, best score first.
async fn list_recommendations(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListRecommendationsQuery>,
) -> impl Responder {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .postgres
        .list_recommendations(&user_id, query.limit as usize, query.offset as usize)
        .await
    {
        Ok(recommendations) => HttpResponse::Ok().json(serde_json::json!({
            "user_id": user_id,
            "count": recommendations.len(),
            "recommendations": recommendations,
        })),
        Err(e) => {
            tracing::error!("Failed to list recommendations for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list recommendations".to_string(),
                message: "Stored recommendations could not be read".to_string(),
                status_code: 500,
            })
        }
    }
}
