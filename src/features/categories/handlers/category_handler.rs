use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    AreaOverviewDto, CategoryEventCountDto, CategoryResponseDto, CreateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::features::events::dtos::EventResponseDto;
use crate::features::events::services::EventService;
use crate::shared::constants::AREA_OVERVIEW_EVENTS_LIMIT;
use crate::shared::types::{ApiResponse, Meta};

/// Shared state for area routes, which also list events
#[derive(Clone)]
pub struct AreaState {
    pub categories: Arc<CategoryService>,
    pub events: Arc<EventService>,
}

/// Query params for listing an area's events
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AreaEventsQuery {
    /// If true, only events dated today or later. Default: false
    #[serde(default)]
    pub upcoming: bool,
}

/// List all areas, name ascending
#[utoipa::path(
    get,
    path = "/api/areas",
    responses(
        (status = 200, description = "List of areas", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "areas"
)]
pub async fn list_areas(
    State(state): State<AreaState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let areas = state.categories.list().await?;
    Ok(Json(ApiResponse::list(areas)))
}

/// Every area with its nearest upcoming events
#[utoipa::path(
    get,
    path = "/api/areas/overview",
    responses(
        (status = 200, description = "Areas with upcoming events", body = ApiResponse<Vec<AreaOverviewDto>>),
    ),
    tag = "areas"
)]
pub async fn areas_overview(
    State(state): State<AreaState>,
) -> Result<Json<ApiResponse<Vec<AreaOverviewDto>>>> {
    let overview = state
        .categories
        .overview(AREA_OVERVIEW_EVENTS_LIMIT)
        .await?;
    Ok(Json(ApiResponse::list(overview)))
}

/// Number of events per area, zero counts included
#[utoipa::path(
    get,
    path = "/api/areas/event-counts",
    responses(
        (status = 200, description = "Event counts per area", body = ApiResponse<Vec<CategoryEventCountDto>>),
    ),
    tag = "areas"
)]
pub async fn area_event_counts(
    State(state): State<AreaState>,
) -> Result<Json<ApiResponse<Vec<CategoryEventCountDto>>>> {
    let counts = state.categories.event_counts().await?;
    Ok(Json(ApiResponse::list(counts)))
}

/// Get area by id
#[utoipa::path(
    get,
    path = "/api/areas/{id}",
    params(
        ("id" = i64, Path, description = "Area id")
    ),
    responses(
        (status = 200, description = "Area found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Area not found")
    ),
    tag = "areas"
)]
pub async fn get_area(
    State(state): State<AreaState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let area = state
        .categories
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Area {} not found", id)))?;

    Ok(Json(ApiResponse::success(Some(area), None, None)))
}

/// List events in an area
///
/// `meta.total` is the area's overall event count, not the number returned.
#[utoipa::path(
    get,
    path = "/api/areas/{id}/events",
    params(
        ("id" = i64, Path, description = "Area id"),
        AreaEventsQuery
    ),
    responses(
        (status = 200, description = "Events in the area", body = ApiResponse<Vec<EventResponseDto>>),
        (status = 404, description = "Area not found")
    ),
    tag = "areas"
)]
pub async fn list_area_events(
    State(state): State<AreaState>,
    Path(id): Path<i64>,
    Query(query): Query<AreaEventsQuery>,
) -> Result<Json<ApiResponse<Vec<EventResponseDto>>>> {
    if state.categories.get(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Area {} not found", id)));
    }

    let events = if query.upcoming {
        state.events.list_upcoming_by_category(id).await?
    } else {
        state.events.list_by_category(id).await?
    };
    let total = state.categories.event_count(id).await?;

    Ok(Json(ApiResponse::success(
        Some(events),
        None,
        Some(Meta { total }),
    )))
}

/// Create an area
#[utoipa::path(
    post,
    path = "/api/areas",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Area created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or duplicate name")
    ),
    tag = "areas"
)]
pub async fn create_area(
    State(state): State<AreaState>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()?;

    let area = state.categories.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(area),
            Some("Area created".to_string()),
            None,
        )),
    ))
}

/// Replace an area
#[utoipa::path(
    put,
    path = "/api/areas/{id}",
    params(
        ("id" = i64, Path, description = "Area id")
    ),
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Area updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 404, description = "Area not found")
    ),
    tag = "areas"
)]
pub async fn update_area(
    State(state): State<AreaState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()?;

    let area = state.categories.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(area),
        Some("Area updated".to_string()),
        None,
    )))
}

/// Delete an area
///
/// Events filed under it are kept and detached.
#[utoipa::path(
    delete,
    path = "/api/areas/{id}",
    params(
        ("id" = i64, Path, description = "Area id")
    ),
    responses(
        (status = 200, description = "Area deleted"),
        (status = 404, description = "Area not found")
    ),
    tag = "areas"
)]
pub async fn delete_area(
    State(state): State<AreaState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    if !state.categories.delete(id).await? {
        return Err(AppError::NotFound(format!("Area {} not found", id)));
    }

    Ok(Json(ApiResponse::success(
        None,
        Some("Area deleted".to_string()),
        None,
    )))
}
