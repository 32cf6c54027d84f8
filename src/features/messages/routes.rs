use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::messages::handlers;
use crate::features::messages::services::MessageService;

/// Create routes for the contact messages feature
pub fn routes(service: Arc<MessageService>) -> Router {
    Router::new()
        .route("/api/contact", post(handlers::submit_contact_message))
        .route("/api/messages", get(handlers::list_public_messages))
        .with_state(service)
}
