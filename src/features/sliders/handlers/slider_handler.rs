use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::sliders::dtos::{CreateSliderDto, SliderResponseDto, UpdateSliderDto};
use crate::features::sliders::services::SliderService;
use crate::shared::types::ApiResponse;

/// List active sliders
#[utoipa::path(
    get,
    path = "/api/sliders",
    responses(
        (status = 200, description = "Active sliders in display order", body = ApiResponse<Vec<SliderResponseDto>>),
    ),
    tag = "sliders"
)]
pub async fn list_sliders(
    State(service): State<Arc<SliderService>>,
) -> Result<Json<ApiResponse<Vec<SliderResponseDto>>>> {
    let sliders = service.list_active().await?;
    Ok(Json(ApiResponse::success(Some(sliders), None, None)))
}

/// Create a slider (admin)
#[utoipa::path(
    post,
    path = "/api/admin/sliders",
    request_body = CreateSliderDto,
    responses(
        (status = 201, description = "Slider created", body = ApiResponse<SliderResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn create_slider(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SliderService>>,
    AppJson(dto): AppJson<CreateSliderDto>,
) -> Result<(StatusCode, Json<ApiResponse<SliderResponseDto>>)> {
    dto.validate().map_err(AppError::from_validation)?;

    let slider = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(slider), None, None)),
    ))
}

/// Update a slider (admin)
#[utoipa::path(
    put,
    path = "/api/admin/sliders/{id}",
    params(("id" = Uuid, Path, description = "Slider id")),
    request_body = UpdateSliderDto,
    responses(
        (status = 200, description = "Slider updated", body = ApiResponse<SliderResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Slider not found"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn update_slider(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SliderService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSliderDto>,
) -> Result<Json<ApiResponse<SliderResponseDto>>> {
    dto.validate().map_err(AppError::from_validation)?;

    let slider = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(slider), None, None)))
}

/// Delete a slider (admin)
#[utoipa::path(
    delete,
    path = "/api/admin/sliders/{id}",
    params(("id" = Uuid, Path, description = "Slider id")),
    responses(
        (status = 200, description = "Slider deleted"),
        (status = 404, description = "Slider not found"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_slider(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SliderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Slider deleted".to_string()),
        None,
    )))
}
