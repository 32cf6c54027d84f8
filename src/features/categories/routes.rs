use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers::{self, AreaState};
use crate::features::categories::services::CategoryService;
use crate::features::events::services::EventService;

/// Create routes for the areas (categories) feature
pub fn routes(categories: Arc<CategoryService>, events: Arc<EventService>) -> Router {
    Router::new()
        .route(
            "/api/areas",
            get(handlers::list_areas).post(handlers::create_area),
        )
        // Fixed segments must come before {id}
        .route("/api/areas/overview", get(handlers::areas_overview))
        .route("/api/areas/event-counts", get(handlers::area_event_counts))
        .route(
            "/api/areas/{id}",
            get(handlers::get_area)
                .put(handlers::update_area)
                .delete(handlers::delete_area),
        )
        .route("/api/areas/{id}/events", get(handlers::list_area_events))
        .with_state(AreaState { categories, events })
}
