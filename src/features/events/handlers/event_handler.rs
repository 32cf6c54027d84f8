use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::events::dtos::{CreateEventDto, EventResponseDto, ListEventsQuery};
use crate::features::events::services::EventService;
use crate::shared::constants::DEFAULT_UPCOMING_LIMIT;
use crate::shared::types::{clamp_limit, ApiResponse};

/// List events
///
/// Without filters every event is returned, soonest first. Only one filter
/// family applies: `category_id` (optionally with `upcoming`), then
/// `featured`, then `upcoming`, then `from`/`to`, then `location`.
#[utoipa::path(
    get,
    path = "/api/events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "List of events", body = ApiResponse<Vec<EventResponseDto>>),
        (status = 400, description = "Invalid filter combination")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(service): State<Arc<EventService>>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<ApiResponse<Vec<EventResponseDto>>>> {
    let events = match query {
        ListEventsQuery {
            category_id: Some(category_id),
            upcoming,
            ..
        } => {
            if upcoming {
                service.list_upcoming_by_category(category_id).await?
            } else {
                service.list_by_category(category_id).await?
            }
        }
        ListEventsQuery { featured: true, .. } => service.list_featured().await?,
        ListEventsQuery {
            upcoming: true,
            limit,
            ..
        } => {
            service
                .list_upcoming(clamp_limit(limit, DEFAULT_UPCOMING_LIMIT))
                .await?
        }
        ListEventsQuery {
            from: Some(from),
            to: Some(to),
            ..
        } => service.list_by_date_range(from, to).await?,
        ListEventsQuery { from: Some(_), .. } | ListEventsQuery { to: Some(_), .. } => {
            return Err(AppError::BadRequest(
                "Both 'from' and 'to' are required for a date range".to_string(),
            ));
        }
        ListEventsQuery {
            location: Some(location),
            ..
        } => service.list_by_location(&location).await?,
        _ => service.list().await?,
    };

    Ok(Json(ApiResponse::list(events)))
}

/// List every upcoming event
#[utoipa::path(
    get,
    path = "/api/events/upcoming",
    responses(
        (status = 200, description = "All events dated today or later", body = ApiResponse<Vec<EventResponseDto>>),
    ),
    tag = "events"
)]
pub async fn list_all_upcoming_events(
    State(service): State<Arc<EventService>>,
) -> Result<Json<ApiResponse<Vec<EventResponseDto>>>> {
    let events = service.list_all_upcoming().await?;
    Ok(Json(ApiResponse::list(events)))
}

/// Get event by id
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = ApiResponse<EventResponseDto>),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(service): State<Arc<EventService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EventResponseDto>>> {
    let event = service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))?;

    Ok(Json(ApiResponse::success(Some(event), None, None)))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(service): State<Arc<EventService>>,
    AppJson(dto): AppJson<CreateEventDto>,
) -> Result<(StatusCode, Json<ApiResponse<EventResponseDto>>)> {
    dto.validate()?;

    let event = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(event),
            Some("Event created".to_string()),
            None,
        )),
    ))
}

/// Replace an event
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    request_body = CreateEventDto,
    responses(
        (status = 200, description = "Event updated", body = ApiResponse<EventResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(service): State<Arc<EventService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<CreateEventDto>,
) -> Result<Json<ApiResponse<EventResponseDto>>> {
    dto.validate()?;

    let event = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(event),
        Some("Event updated".to_string()),
        None,
    )))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(service): State<Arc<EventService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    if !service.delete(id).await? {
        return Err(AppError::NotFound(format!("Event {} not found", id)));
    }

    Ok(Json(ApiResponse::success(
        None,
        Some("Event deleted".to_string()),
        None,
    )))
}
