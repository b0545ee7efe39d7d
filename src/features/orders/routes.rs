use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::orders::handlers;
use crate::features::orders::services::OrderService;

/// Authenticated customer order routes (JWT required)
pub fn routes(service: Arc<OrderService>) -> Router {
    Router::new()
        .route(
            "/api/orders",
            post(handlers::place_order).get(handlers::list_orders),
        )
        .route("/api/orders/{id}", get(handlers::get_order))
        .route("/api/orders/{id}/cancel", post(handlers::cancel_order))
        .with_state(service)
}

/// Admin order management routes (JWT + admin role required)
pub fn admin_routes(service: Arc<OrderService>) -> Router {
    Router::new()
        .route("/api/admin/orders", get(handlers::list_all_orders))
        .route(
            "/api/admin/orders/{id}/status",
            put(handlers::update_order_status),
        )
        .with_state(service)
}
