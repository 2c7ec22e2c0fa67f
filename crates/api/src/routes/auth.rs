//! Authentication routes for register and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::{error, info};

use crate::AppState;
use crate::routes::error_body;
use staffhub_core::auth::{Role, hash_password, verify_password};
use staffhub_db::UserRepository;
use staffhub_shared::auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// POST /auth/register - Register a new user with the Employee role.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Some(field) = missing_registration_field(&payload) {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body(
                "missing_field",
                format!("Please fill the required field: {field}"),
            )),
        )
            .into_response();
    }
    if payload.password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body(
                "weak_password",
                "Password must be at least 8 characters",
            )),
        )
            .into_response();
    }
    let mobile_number = payload.mobile_number.unwrap_or_default();
    let age = payload.age.unwrap_or_default();

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(error_body(
                    "email_exists",
                    "A user with this email already exists",
                )),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error();
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return internal_error();
        }
    };

    // Self-registration never grants Admin
    let user = match user_repo
        .create(
            &payload.name,
            &payload.email,
            &password_hash,
            &mobile_number,
            age,
            Role::Employee,
        )
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error();
        }
    };

    let token = match state.jwt_service.issue_token(user.id, &user.role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to issue token");
            return internal_error();
        }
    };

    info!(user_id = %user.id, "User registered");

    let response = LoginResponse {
        success: true,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
        token,
        expires_in: state.jwt_service.token_expires_in(),
    };

    (StatusCode::CREATED, Json(response)).into_response()
}

/// POST /auth/login - Authenticate a user and return a session token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error();
        }
    }

    let token = match state.jwt_service.issue_token(user.id, &user.role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to issue token");
            return internal_error();
        }
    };

    info!(user_id = %user.id, "User logged in");

    let response = LoginResponse {
        success: true,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
        token,
        expires_in: state.jwt_service.token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Finds the first registration field that is absent or blank.
///
/// All five fields are required; a missing one is a 400 rather than
/// a serde rejection, so `mobile_number` and `age` are optional at
/// the deserialization layer and checked here.
fn missing_registration_field(payload: &RegisterRequest) -> Option<&'static str> {
    if payload.name.trim().is_empty() {
        return Some("name");
    }
    if payload.email.trim().is_empty() {
        return Some("email");
    }
    if payload.password.is_empty() {
        return Some("password");
    }
    if payload
        .mobile_number
        .as_deref()
        .is_none_or(|m| m.trim().is_empty())
    {
        return Some("mobile_number");
    }
    if payload.age.is_none() {
        return Some("age");
    }
    None
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(error_body(
            "invalid_credentials",
            "Invalid email or password",
        )),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_body("internal_error", "An error occurred")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> RegisterRequest {
        RegisterRequest {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            password: "longenough".to_string(),
            mobile_number: Some("555-0101".to_string()),
            age: Some(31),
        }
    }

    #[test]
    fn test_complete_registration_passes_field_check() {
        assert_eq!(missing_registration_field(&full_request()), None);
    }

    #[test]
    fn test_missing_mobile_number_named() {
        let mut payload = full_request();
        payload.mobile_number = None;
        assert_eq!(missing_registration_field(&payload), Some("mobile_number"));

        payload.mobile_number = Some("   ".to_string());
        assert_eq!(missing_registration_field(&payload), Some("mobile_number"));
    }

    #[test]
    fn test_missing_age_named() {
        let mut payload = full_request();
        payload.age = None;
        assert_eq!(missing_registration_field(&payload), Some("age"));
    }

    #[test]
    fn test_blank_name_named_first() {
        let mut payload = full_request();
        payload.name = "  ".to_string();
        payload.age = None;
        assert_eq!(missing_registration_field(&payload), Some("name"));
    }
}
