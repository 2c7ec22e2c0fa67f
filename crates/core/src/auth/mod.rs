//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - User role definitions and the role-based access gate

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};
use staffhub_shared::{AppError, AppResult};

/// User roles within the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Manages departments, employees, and leave decisions.
    Admin,
    /// Applies for and cancels their own leave.
    Employee,
}

impl Role {
    /// Parses a role from its stored string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Self::Admin),
            "Employee" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Employee => "Employee",
        }
    }

    /// Returns true if this role can manage employees and departments.
    #[must_use]
    pub const fn can_manage(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Checks that a user's role is in the allowed set.
///
/// This is the explicit access-control gate composed in front of each
/// operation; handlers never consult ambient request state for roles.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the role is not allowed.
pub fn authorize(role: Role, allowed: &[Role]) -> AppResult<()> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Role ({role}) is not allowed to access this resource"
        )))
    }
}
