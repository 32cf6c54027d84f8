use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::features::portal::dtos::{HealthReportDto, HomeDto, StatsDto};
use crate::features::portal::services::PortalService;
use crate::shared::types::ApiResponse;

/// Portal statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Portal statistics", body = ApiResponse<StatsDto>),
    ),
    tag = "portal"
)]
pub async fn get_stats(
    State(service): State<Arc<PortalService>>,
) -> Result<Json<ApiResponse<StatsDto>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Home page data
#[utoipa::path(
    get,
    path = "/api/home",
    responses(
        (status = 200, description = "Featured and upcoming events, areas and stats", body = ApiResponse<HomeDto>),
    ),
    tag = "portal"
)]
pub async fn get_home(
    State(service): State<Arc<PortalService>>,
) -> Result<Json<ApiResponse<HomeDto>>> {
    let home = service.home().await?;
    Ok(Json(ApiResponse::success(Some(home), None, None)))
}

/// Health check
///
/// Responds 503 when the storage backend cannot answer.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Storage is healthy", body = HealthReportDto),
        (status = 503, description = "Storage is unavailable", body = HealthReportDto)
    ),
    tag = "portal"
)]
pub async fn health_check(
    State(service): State<Arc<PortalService>>,
) -> (StatusCode, Json<HealthReportDto>) {
    let report = service.health().await;
    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
