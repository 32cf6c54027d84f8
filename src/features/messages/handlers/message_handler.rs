use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::messages::dtos::{CreateContactMessageDto, PublicContactMessageDto};
use crate::features::messages::services::MessageService;
use crate::shared::types::ApiResponse;

/// Submit the contact form
///
/// Only the public view of the stored message is echoed back.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactMessageDto,
    responses(
        (status = 201, description = "Message received", body = ApiResponse<PublicContactMessageDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "messages"
)]
pub async fn submit_contact_message(
    State(service): State<Arc<MessageService>>,
    AppJson(dto): AppJson<CreateContactMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<PublicContactMessageDto>>)> {
    dto.validate()?;

    let message = service.submit(dto).await?;
    let public = PublicContactMessageDto {
        id: message.id,
        subject: message.subject,
        area: message.area,
        created_at: message.created_at,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(public),
            Some("Thank you! Your message has been received.".to_string()),
            None,
        )),
    ))
}

/// List contact messages without personal details
#[utoipa::path(
    get,
    path = "/api/messages",
    responses(
        (status = 200, description = "Sanitised contact messages, newest first", body = ApiResponse<Vec<PublicContactMessageDto>>),
    ),
    tag = "messages"
)]
pub async fn list_public_messages(
    State(service): State<Arc<MessageService>>,
) -> Result<Json<ApiResponse<Vec<PublicContactMessageDto>>>> {
    let messages = service.list_public().await?;
    Ok(Json(ApiResponse::list(messages)))
}
