//! Region and commune lookups, relayed from the location service.

use axum::{
    extract::State,
    routing::get,
    Router,
};

use crate::api::extractors::ApiPath;
use crate::api::AppState;
use crate::errors::AppResult;

/// Create location routes
pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/regiones", get(list_regions))
        .route("/regiones/:code/comunas", get(list_communes))
}

/// Regions, exactly as the location service returned them
#[utoipa::path(
    get,
    path = "/api/v1/usuarios/regiones",
    tag = "Locations",
    responses(
        (status = 200, description = "Upstream body, unmodified", body = String),
        (status = 502, description = "Location service unavailable")
    )
)]
pub async fn list_regions(State(state): State<AppState>) -> AppResult<String> {
    state.location_directory.regions().await
}

/// Communes of one region, exactly as the location service returned them
#[utoipa::path(
    get,
    path = "/api/v1/usuarios/regiones/{code}/comunas",
    tag = "Locations",
    params(("code" = String, Path, description = "Region code")),
    responses(
        (status = 200, description = "Upstream body, unmodified", body = String),
        (status = 502, description = "Location service unavailable")
    )
)]
pub async fn list_communes(
    State(state): State<AppState>,
    ApiPath(code): ApiPath<String>,
) -> AppResult<String> {
    state.location_directory.communes(&code).await
}
