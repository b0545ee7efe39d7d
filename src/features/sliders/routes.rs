use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::sliders::handlers;
use crate::features::sliders::services::SliderService;

/// Public slider read routes
pub fn routes(service: Arc<SliderService>) -> Router {
    Router::new()
        .route("/api/sliders", get(handlers::list_sliders))
        .with_state(service)
}

/// Admin slider management routes (JWT + admin role required)
pub fn admin_routes(service: Arc<SliderService>) -> Router {
    Router::new()
        .route("/api/admin/sliders", post(handlers::create_slider))
        .route(
            "/api/admin/sliders/{id}",
            put(handlers::update_slider).delete(handlers::delete_slider),
        )
        .with_state(service)
}
