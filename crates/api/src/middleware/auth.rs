//! Authentication middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::AppState;
use crate::routes::error_body;
use staffhub_core::auth::Role;
use staffhub_db::{UserRepository, entities::users};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// The authenticated caller, loaded fresh from the database.
///
/// Tokens carry only the user ID and issue-time role; the user row is
/// reloaded on every request so a deleted account or a changed role
/// takes effect immediately rather than at token expiry.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user row behind the token.
    pub user: users::Model,
    /// The user's current role.
    pub role: Role,
}

impl AuthUser {
    /// Returns the user ID.
    #[must_use]
    pub const fn user_id(&self) -> uuid::Uuid {
        self.user.id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(error_body("unauthorized", "Authentication required")),
            )
        })
    }
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Loads the user behind the token from the database
/// 4. Stores the user in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(error_body(
                "missing_token",
                "Authorization header with Bearer token is required",
            )),
        )
            .into_response();
    };

    // Validate token
    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            let (error, message) = match e {
                staffhub_shared::JwtError::Expired => ("token_expired", "Token has expired"),
                _ => ("invalid_token", "Invalid or malformed token"),
            };
            return (StatusCode::UNAUTHORIZED, Json(error_body(error, message))).into_response();
        }
    };

    // Load the user; a valid token for a deleted account is rejected
    let user_repo = UserRepository::new((*state.db).clone());
    let user = match user_repo.find_by_id(claims.user_id()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(error_body(
                    "invalid_token",
                    "User behind this token no longer exists",
                )),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error loading authenticated user");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_body("internal_error", "An error occurred")),
            )
                .into_response();
        }
    };

    let Some(role) = Role::parse(&user.role) else {
        error!(user_id = %user.id, role = %user.role, "Unknown role stored for user");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_body("internal_error", "An error occurred")),
        )
            .into_response();
    };

    request.extensions_mut().insert(AuthUser { user, role });
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token("abc123"), None);
    }
}
