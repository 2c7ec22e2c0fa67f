//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for session tokens.
///
/// Token validity is entirely determined by signature, expiry, and the
/// continued existence of the referenced user; there is no server-side
/// session table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Role the user held when the token was issued.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Registration request payload.
///
/// `mobile_number` and `age` deserialize as optional so a missing
/// field reaches the handler's own validation instead of being
/// rejected at the deserialization layer.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// User full name.
    pub name: String,
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
    /// User mobile number.
    pub mobile_number: Option<String>,
    /// User age.
    pub age: Option<i32>,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// User info returned in auth responses.
///
/// Deliberately excludes the password hash; it never crosses the API
/// boundary.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// User full name.
    pub name: String,
    /// User email.
    pub email: String,
    /// User role.
    pub role: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Authenticated user info.
    pub user: UserInfo,
    /// Session token.
    pub token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
}
