//! Employee routes.
//!
//! Admin-only management plus the self-service profile lookup. The
//! leave ledger has its own endpoint with admin-override semantics.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::routes::{error_body, require_admin};
use crate::{AppState, middleware::AuthUser};
use staffhub_core::auth::hash_password;
use staffhub_core::employee::EmployeeStatus;
use staffhub_db::repositories::{
    CreateEmployeeInput, EmployeeRepository, UpdateEmployeeInput, UserRepository,
};

/// Payload for creating an employee with a linked user account.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Full name.
    pub name: String,
    /// Email, shared by the employee and user records.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Photo URL.
    #[serde(default)]
    pub photo: String,
    /// First day of employment; defaults to today.
    pub date_of_joining: Option<NaiveDate>,
    /// Salary in whole currency units.
    pub salary: i64,
    /// Employment status.
    pub status: String,
    /// Temporary password for the new user account.
    pub password: String,
}

/// Payload for updating an employee profile.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateEmployeeRequest {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New photo URL.
    pub photo: Option<String>,
    /// New job title.
    pub position: Option<String>,
    /// New department name.
    pub department: Option<String>,
    /// New joining date.
    pub date_of_joining: Option<NaiveDate>,
    /// New salary.
    pub salary: Option<i64>,
    /// New employment status.
    pub status: Option<String>,
    /// New linked user account.
    pub user_id: Option<uuid::Uuid>,
}

/// Payload for the leave-balance override.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateLeaveBalanceRequest {
    /// New total leave days.
    pub total_leaves: Option<i32>,
    /// New taken count.
    pub leaves_taken: Option<i32>,
    /// New remaining count, honored only when total and taken are absent.
    pub remaining_leaves: Option<i32>,
}

/// Creates the employee routes (auth applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/employees", post(create_employee))
        .route("/admin/employees", get(list_employees))
        .route("/admin/employees/{id}", get(get_employee))
        .route("/admin/employees/{id}", put(update_employee))
        .route("/admin/employees/{id}", delete(delete_employee))
        .route(
            "/admin/employees/{id}/leave-balance",
            put(update_leave_balance),
        )
        .route("/me/employee-profile", get(my_employee_profile))
}

/// POST /admin/employees - Create an employee and its user account.
#[allow(clippy::too_many_lines)]
async fn create_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    for (field, value) in [
        ("name", &payload.name),
        ("email", &payload.email),
        ("phone_number", &payload.phone_number),
        ("position", &payload.position),
        ("department", &payload.department),
        ("password", &payload.password),
    ] {
        if value.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(error_body(
                    "missing_field",
                    format!("Please fill the required field: {field}"),
                )),
            )
                .into_response();
        }
    }

    let Some(status) = EmployeeStatus::parse(&payload.status) else {
        return invalid_status(&payload.status);
    };

    let employee_repo = EmployeeRepository::new((*state.db).clone());
    let user_repo = UserRepository::new((*state.db).clone());

    // The email must be free on both tables
    match employee_repo.email_exists(&payload.email, None).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(error_body("email_exists", "Email has already been taken")),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking employee email");
            return internal_error();
        }
    }
    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(error_body(
                    "email_exists",
                    "A user account with this email already exists",
                )),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking user email");
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

    let input = CreateEmployeeInput {
        name: payload.name,
        email: payload.email,
        phone_number: payload.phone_number,
        position: payload.position,
        department: payload.department,
        photo: payload.photo,
        date_of_joining: payload
            .date_of_joining
            .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        salary: payload.salary,
        status,
        password_hash,
    };

    match employee_repo.create_with_user(input).await {
        Ok(created) => {
            info!(
                employee_id = %created.employee.id,
                user_id = %created.user.id,
                "Employee and linked user created"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Employee and linked user account created successfully",
                    "employee": created.employee,
                    "user": {
                        "id": created.user.id,
                        "email": created.user.email,
                        "role": created.user.role
                    }
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create employee");
            internal_error()
        }
    }
}

/// GET /admin/employees - List all employees with their user accounts.
async fn list_employees(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(rows) => {
            let employees: Vec<serde_json::Value> = rows
                .into_iter()
                .map(|(employee, user)| {
                    json!({
                        "employee": employee,
                        "user": user.map(|u| json!({
                            "id": u.id,
                            "name": u.name,
                            "email": u.email,
                            "role": u.role
                        }))
                    })
                })
                .collect();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "count": employees.len(),
                    "employees": employees
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list employees");
            internal_error()
        }
    }
}

/// GET `/admin/employees/{id}` - Get one employee.
async fn get_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(employee)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "employee": employee })),
        )
            .into_response(),
        Ok(None) => employee_not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to get employee");
            internal_error()
        }
    }
}

/// PUT `/admin/employees/{id}` - Update an employee profile.
async fn update_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let status = match payload.status.as_deref() {
        Some(raw) => match EmployeeStatus::parse(raw) {
            Some(s) => Some(s),
            None => return invalid_status(raw),
        },
        None => None,
    };

    let repo = EmployeeRepository::new((*state.db).clone());

    // An email change must not collide with another employee
    if let Some(email) = payload.email.as_deref() {
        match repo.email_exists(email, Some(id)).await {
            Ok(true) => {
                return (
                    StatusCode::CONFLICT,
                    Json(error_body("email_exists", "Email has already been taken")),
                )
                    .into_response();
            }
            Ok(false) => {}
            Err(e) => {
                error!(error = %e, "Database error checking employee email");
                return internal_error();
            }
        }
    }

    let input = UpdateEmployeeInput {
        name: payload.name,
        email: payload.email,
        phone_number: payload.phone_number,
        photo: payload.photo,
        position: payload.position,
        department: payload.department,
        date_of_joining: payload.date_of_joining,
        salary: payload.salary,
        status,
        user_id: payload.user_id,
    };

    match repo.update_profile(id, input).await {
        Ok(Some(employee)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "employee": employee })),
        )
            .into_response(),
        Ok(None) => employee_not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to update employee");
            internal_error()
        }
    }
}

/// PUT `/admin/employees/{id}/leave-balance` - Override the ledger.
async fn update_leave_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
    Json(payload): Json<UpdateLeaveBalanceRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo
        .update_leave_balance(
            id,
            payload.total_leaves,
            payload.leaves_taken,
            payload.remaining_leaves,
        )
        .await
    {
        Ok(Some(employee)) => {
            info!(
                employee_id = %id,
                total = employee.total_leaves,
                taken = employee.leaves_taken,
                remaining = employee.remaining_leaves,
                "Leave balance overridden"
            );
            (
                StatusCode::OK,
                Json(json!({ "success": true, "employee": employee })),
            )
                .into_response()
        }
        Ok(None) => employee_not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to update leave balance");
            internal_error()
        }
    }
}

/// DELETE `/admin/employees/{id}` - Delete an employee profile.
async fn delete_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(true) => {
            info!(employee_id = %id, "Employee deleted");
            (
                StatusCode::OK,
                Json(json!({ "success": true, "message": "Employee deleted" })),
            )
                .into_response()
        }
        Ok(false) => employee_not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to delete employee");
            internal_error()
        }
    }
}

/// GET /me/employee-profile - The caller's own employee profile.
async fn my_employee_profile(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.find_by_user(auth.user_id()).await {
        Ok(Some(employee)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "employee_profile": employee })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(error_body(
                "not_found",
                "Employee profile not found for this user",
            )),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load employee profile");
            internal_error()
        }
    }
}

fn invalid_status(raw: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(error_body(
            "invalid_status",
            format!("Unknown employee status: {raw}"),
        )),
    )
        .into_response()
}

fn employee_not_found(id: uuid::Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(error_body(
            "not_found",
            format!("Employee not found with id: {id}"),
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
