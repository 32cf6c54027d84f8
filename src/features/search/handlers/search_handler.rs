use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::search::dtos::{SearchQuery, SearchResponseDto};
use crate::features::search::services::SearchService;
use crate::shared::types::ApiResponse;

/// Search events and areas
///
/// Event hits come first, tagged `"type": "event"`, followed by area hits
/// tagged `"type": "area"`.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Search results", body = ApiResponse<SearchResponseDto>),
    ),
    tag = "search"
)]
pub async fn search(
    State(service): State<Arc<SearchService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResponseDto>>> {
    let response = service.search(&query.q, query.category_id).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}
