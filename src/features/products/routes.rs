use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Public catalog read routes
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/{slug}", get(handlers::get_product))
        .with_state(service)
}

/// Admin product management routes (JWT + admin role required)
pub fn admin_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/admin/products", post(handlers::create_product))
        .route(
            "/api/admin/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route(
            "/api/admin/products/{id}/categories",
            put(handlers::set_product_categories),
        )
        .with_state(service)
}
