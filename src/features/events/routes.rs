use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::events::handlers;
use crate::features::events::services::EventService;

/// Create routes for the events feature
pub fn routes(service: Arc<EventService>) -> Router {
    Router::new()
        .route(
            "/api/events",
            get(handlers::list_events).post(handlers::create_event),
        )
        // Must come before {id}
        .route(
            "/api/events/upcoming",
            get(handlers::list_all_upcoming_events),
        )
        .route(
            "/api/events/{id}",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        .with_state(service)
}
