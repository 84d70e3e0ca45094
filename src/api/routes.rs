//! Application route configuration.

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{location_routes, user_routes};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::USERS_BASE_PATH;
use crate::errors::{AppError, AppResult};

/// Create the application router with all routes configured
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(USERS_BASE_PATH, user_routes().merge(location_routes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy admitting a single browser origin.
pub fn cors_layer(allowed_origin: &str) -> AppResult<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin).map_err(|e| {
        AppError::internal(format!(
            "Invalid CORS_ALLOWED_ORIGIN {}: {}",
            allowed_origin, e
        ))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any))
}

async fn root() -> &'static str {
    "Usuarios service"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Liveness plus database connectivity
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: "healthy",
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    database: "unhealthy",
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
