//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{cors_layer, create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::Services;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    tracing::info!(?config, "Starting server");

    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    let db = Arc::new(db);

    let services = Services::from_connection(db.get_connection(), &config)?;
    let app_state = AppState::from_services(&services, db);
    let app = create_router(app_state, cors_layer(&config.cors_allowed_origin)?);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
