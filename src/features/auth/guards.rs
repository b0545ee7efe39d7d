//! Role-based authorization guards.
//!
//! Guards extract the authenticated user from request extensions and verify
//! the required role. The auth middleware must run before them.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only endpoints.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_customer_user, with_admin_auth};
    use axum::http::StatusCode;
    use axum::{extract::Request, middleware::Next, response::Response, routing::get, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(_user): RequireAdmin) -> &'static str {
        "ok"
    }

    fn admin_router() -> Router {
        Router::new().route("/admin-only", get(admin_only))
    }

    async fn inject_customer(mut request: Request, next: Next) -> Response {
        request.extensions_mut().insert(create_customer_user());
        next.run(request).await
    }

    #[tokio::test]
    async fn admin_user_passes_guard() {
        let server = TestServer::new(with_admin_auth(admin_router())).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn customer_is_forbidden() {
        let router = admin_router().layer(axum::middleware::from_fn(inject_customer));
        let server = TestServer::new(router).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let server = TestServer::new(admin_router()).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
