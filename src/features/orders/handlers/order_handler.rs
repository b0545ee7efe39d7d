use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::orders::dtos::{OrderResponseDto, PlaceOrderDto, UpdateOrderStatusDto};
use crate::features::orders::services::OrderService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Place a new order
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderDto,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderResponseDto>),
        (status = 400, description = "Validation error or unknown product"),
        (status = 409, description = "Inactive product or insufficient stock"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "orders",
    security(("bearer_auth" = []))
)]
pub async fn place_order(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    AppJson(dto): AppJson<PlaceOrderDto>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponseDto>>)> {
    dto.validate().map_err(AppError::from_validation)?;

    let order = service.place(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(order), None, None)),
    ))
}

/// List own orders
#[utoipa::path(
    get,
    path = "/api/orders",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated order list", body = ApiResponse<Vec<OrderResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "orders",
    security(("bearer_auth" = []))
)]
pub async fn list_orders(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<OrderResponseDto>>>> {
    let (orders, total) = service.list_for_user(user.user_id, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(orders),
        None,
        Some(Meta { total }),
    )))
}

/// Get one of the user's own orders
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = ApiResponse<OrderResponseDto>),
        (status = 404, description = "Order not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "orders",
    security(("bearer_auth" = []))
)]
pub async fn get_order(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderResponseDto>>> {
    let order = service.get_for_user(user.user_id, id).await?;
    Ok(Json(ApiResponse::success(Some(order), None, None)))
}

/// Cancel a pending order and restock its items
#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderResponseDto>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not pending"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "orders",
    security(("bearer_auth" = []))
)]
pub async fn cancel_order(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderResponseDto>>> {
    let order = service.cancel(user.user_id, id).await?;
    Ok(Json(ApiResponse::success(
        Some(order),
        Some("Order cancelled".to_string()),
        None,
    )))
}

/// List all orders (admin)
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated order list", body = ApiResponse<Vec<OrderResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn list_all_orders(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OrderService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<OrderResponseDto>>>> {
    let (orders, total) = service.list_all(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(orders),
        None,
        Some(Meta { total }),
    )))
}

/// Update an order's status (admin)
#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<OrderResponseDto>),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "Order not found"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn update_order_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OrderService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateOrderStatusDto>,
) -> Result<Json<ApiResponse<OrderResponseDto>>> {
    let order = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(order), None, None)))
}
