//! API route definitions.

use axum::{Json, Router, http::StatusCode, middleware, response::IntoResponse, response::Response};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};
use staffhub_core::auth::{Role, authorize};

pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;
pub mod leaves;

/// Creates the API router with public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(departments::admin_routes())
        .merge(employees::routes())
        .merge(leaves::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(departments::public_routes())
        .merge(protected_routes)
}

/// Gate for admin-only handlers.
///
/// Returns the ready-made 403 response so handlers can bail with a
/// single early return.
pub(crate) fn require_admin(auth: &crate::middleware::AuthUser) -> Result<(), Response> {
    authorize(auth.role, &[Role::Admin]).map_err(|e| {
        (
            StatusCode::FORBIDDEN,
            Json(error_body("forbidden", e.public_message())),
        )
            .into_response()
    })
}

/// The uniform error body: success responses carry `success: true`,
/// so every failure carries `success: false` alongside the machine
/// code and human message.
pub(crate) fn error_body(error: &'static str, message: impl Into<String>) -> serde_json::Value {
    json!({
        "success": false,
        "error": error,
        "message": message.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_marks_failure() {
        let body = error_body("not_found", "no such thing");
        assert_eq!(body["success"], serde_json::Value::Bool(false));
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "no such thing");
    }
}
