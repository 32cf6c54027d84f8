use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::portal::handlers;
use crate::features::portal::services::PortalService;

/// Create routes for the portal overview feature
pub fn routes(service: Arc<PortalService>) -> Router {
    Router::new()
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/home", get(handlers::get_home))
        .route("/health", get(handlers::health_check))
        .with_state(service)
}
