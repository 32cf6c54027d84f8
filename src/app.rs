//! Service wiring and the HTTP router.

use std::sync::Arc;

use axum::Router;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::events::{routes as events_routes, EventService};
use crate::features::messages::{routes as messages_routes, MessageService};
use crate::features::portal::{routes as portal_routes, PortalService};
use crate::features::search::{routes as search_routes, SearchService};
use crate::modules::storage::Storage;
use crate::shared::clock::Clock;

/// Every service the portal exposes, built over one opened [`Storage`]
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<CategoryService>,
    pub events: Arc<EventService>,
    pub messages: Arc<MessageService>,
    pub search: Arc<SearchService>,
    pub portal: Arc<PortalService>,
}

impl AppServices {
    pub fn new(storage: &Storage, clock: Arc<dyn Clock>) -> Self {
        let categories = Arc::new(CategoryService::new(
            Arc::clone(&storage.categories),
            Arc::clone(&storage.events),
            Arc::clone(&clock),
        ));
        let events = Arc::new(EventService::new(
            Arc::clone(&storage.events),
            Arc::clone(&clock),
        ));
        let messages = Arc::new(MessageService::new(Arc::clone(&storage.messages)));
        let search = Arc::new(SearchService::new(
            Arc::clone(&events),
            Arc::clone(&categories),
        ));
        let portal = Arc::new(PortalService::new(
            Arc::clone(&storage.stats),
            storage.backend_name(),
            Arc::clone(&events),
            Arc::clone(&categories),
            clock,
        ));

        Self {
            categories,
            events,
            messages,
            search,
            portal,
        }
    }
}

/// API and health routes without middleware or Swagger UI
pub fn api_routes(services: &AppServices) -> Router {
    Router::new()
        .merge(categories_routes::routes(
            Arc::clone(&services.categories),
            Arc::clone(&services.events),
        ))
        .merge(events_routes::routes(Arc::clone(&services.events)))
        .merge(search_routes::routes(Arc::clone(&services.search)))
        .merge(messages_routes::routes(Arc::clone(&services.messages)))
        .merge(portal_routes::routes(Arc::clone(&services.portal)))
}

/// Full application router: API routes, Swagger UI, CORS, request ids and tracing
pub fn build_router(services: &AppServices, app: &AppConfig, swagger: &SwaggerConfig) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: swagger.title.clone(),
        version: swagger.version.clone(),
        description: swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(api_routes(services))
        .layer(middleware::cors_layer(&app.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
