use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Routes for the caller's own account (JWT required)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/users/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/api/users/password", put(handlers::change_password))
        .with_state(service)
}

/// Admin account administration routes (JWT + admin role required)
pub fn admin_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/admin/users", get(handlers::list_users))
        .route(
            "/api/admin/users/{id}/active",
            put(handlers::set_user_active),
        )
        .with_state(service)
}
