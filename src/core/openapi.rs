use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::events::{dtos as events_dtos, handlers as events_handlers};
use crate::features::messages::{dtos as messages_dtos, handlers as messages_handlers};
use crate::features::portal::{dtos as portal_dtos, handlers as portal_handlers};
use crate::features::search::{dtos as search_dtos, handlers as search_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Areas
        categories_handlers::list_areas,
        categories_handlers::areas_overview,
        categories_handlers::area_event_counts,
        categories_handlers::get_area,
        categories_handlers::list_area_events,
        categories_handlers::create_area,
        categories_handlers::update_area,
        categories_handlers::delete_area,
        // Events
        events_handlers::list_events,
        events_handlers::list_all_upcoming_events,
        events_handlers::get_event,
        events_handlers::create_event,
        events_handlers::update_event,
        events_handlers::delete_event,
        // Search
        search_handlers::search,
        // Contact messages
        messages_handlers::submit_contact_message,
        messages_handlers::list_public_messages,
        // Portal
        portal_handlers::get_stats,
        portal_handlers::get_home,
        portal_handlers::health_check,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Areas
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::CategoryEventCountDto,
            categories_dtos::AreaOverviewDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryEventCountDto>>,
            ApiResponse<Vec<categories_dtos::AreaOverviewDto>>,
            // Events
            events_dtos::EventResponseDto,
            events_dtos::CreateEventDto,
            ApiResponse<Vec<events_dtos::EventResponseDto>>,
            ApiResponse<events_dtos::EventResponseDto>,
            // Search
            search_dtos::SearchResultDto,
            search_dtos::SearchResponseDto,
            ApiResponse<search_dtos::SearchResponseDto>,
            // Contact messages
            messages_dtos::CreateContactMessageDto,
            messages_dtos::PublicContactMessageDto,
            ApiResponse<messages_dtos::PublicContactMessageDto>,
            ApiResponse<Vec<messages_dtos::PublicContactMessageDto>>,
            // Portal
            portal_dtos::StatsDto,
            portal_dtos::HomeDto,
            portal_dtos::HealthReportDto,
            ApiResponse<portal_dtos::StatsDto>,
            ApiResponse<portal_dtos::HomeDto>,
        )
    ),
    tags(
        (name = "areas", description = "Community areas and their events"),
        (name = "events", description = "Community events"),
        (name = "search", description = "Combined search over events and areas"),
        (name = "messages", description = "Contact form submissions"),
        (name = "portal", description = "Home page, statistics and health"),
    ),
    info(
        title = "Community Portal API",
        version = "0.1.0",
        description = "API documentation for the Community Portal",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
