//! Leave request routes.
//!
//! Employees file, list, and cancel their own requests; admins list
//! everything and decide pending requests. All domain failures map
//! through `LeaveError` so status codes stay consistent.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::routes::{error_body, require_admin};
use crate::{AppState, middleware::AuthUser};
use staffhub_core::leave::{LeaveError, LeaveType};
use staffhub_db::repositories::{ApplyLeaveInput, EmployeeRepository, LeaveRepository};

/// Payload for filing a leave request.
#[derive(Debug, Deserialize)]
pub struct ApplyLeaveRequest {
    /// Leave category.
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Why the leave is requested.
    pub reason: String,
}

/// Payload for an admin decision.
#[derive(Debug, Deserialize)]
pub struct DecideLeaveRequest {
    /// "approved" or "rejected".
    pub status: String,
    /// Optional comments shown to the employee.
    pub admin_comments: Option<String>,
}

/// Creates the leave routes (auth applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leave/apply", post(apply_leave))
        .route("/leave/my", get(my_leaves))
        .route("/leave/cancel/{id}", put(cancel_leave))
        .route("/admin/leave/all", get(list_all_leaves))
        .route("/admin/leave/{id}", get(get_leave))
        .route("/admin/leave/{id}/status", put(decide_leave))
}

/// POST /leave/apply - File a new leave request.
async fn apply_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ApplyLeaveRequest>,
) -> impl IntoResponse {
    let Some(leave_type) = LeaveType::parse(&payload.leave_type) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body(
                "invalid_leave_type",
                format!("Unknown leave type: {}", payload.leave_type),
            )),
        )
            .into_response();
    };

    let employee = match find_own_profile(&state, &auth).await {
        Ok(employee) => employee,
        Err(response) => return response,
    };

    let repo = LeaveRepository::new((*state.db).clone());
    let input = ApplyLeaveInput {
        employee_id: employee.id,
        leave_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason,
    };

    match repo.apply(input).await {
        Ok(leave) => {
            info!(leave_id = %leave.id, employee_id = %employee.id, "Leave request filed");
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "leave": leave })),
            )
                .into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// GET /leave/my - The caller's own requests, newest first.
async fn my_leaves(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let employee = match find_own_profile(&state, &auth).await {
        Ok(employee) => employee,
        Err(response) => return response,
    };

    let repo = LeaveRepository::new((*state.db).clone());

    match repo.list_for_employee(employee.id).await {
        Ok(leaves) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": leaves.len(),
                "leaves": leaves
            })),
        )
            .into_response(),
        Err(e) => leave_error_response(&e),
    }
}

/// PUT `/leave/cancel/{id}` - Cancel one of the caller's pending requests.
async fn cancel_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let employee = match find_own_profile(&state, &auth).await {
        Ok(employee) => employee,
        Err(response) => return response,
    };

    let repo = LeaveRepository::new((*state.db).clone());

    match repo.cancel(id, employee.id).await {
        Ok(leave) => {
            info!(leave_id = %leave.id, "Leave request cancelled");
            (
                StatusCode::OK,
                Json(json!({ "success": true, "leave": leave })),
            )
                .into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// GET `/admin/leave/{id}` - One request, any status.
async fn get_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = LeaveRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(leave)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "leave": leave })),
        )
            .into_response(),
        Ok(None) => leave_error_response(&LeaveError::LeaveNotFound(id)),
        Err(e) => leave_error_response(&e),
    }
}

/// GET /admin/leave/all - Every request with employee and approver info.
async fn list_all_leaves(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = LeaveRepository::new((*state.db).clone());

    match repo.list_all().await {
        Ok(rows) => {
            let leaves: Vec<serde_json::Value> = rows
                .into_iter()
                .map(|row| {
                    json!({
                        "leave": row.leave,
                        "employee": row.employee.map(|e| json!({
                            "id": e.id,
                            "name": e.name,
                            "email": e.email,
                            "department": e.department,
                            "position": e.position
                        })),
                        "approver": row.approver.map(|u| json!({
                            "id": u.id,
                            "name": u.name,
                            "email": u.email
                        }))
                    })
                })
                .collect();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "count": leaves.len(),
                    "leaves": leaves
                })),
            )
                .into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// PUT `/admin/leave/{id}/status` - Approve or reject a request.
async fn decide_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
    Json(payload): Json<DecideLeaveRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = LeaveRepository::new((*state.db).clone());

    match repo
        .decide(id, &payload.status, auth.user_id(), payload.admin_comments)
        .await
    {
        Ok(leave) => {
            info!(
                leave_id = %leave.id,
                status = %leave.status,
                decided_by = %auth.user_id(),
                "Leave request decided"
            );
            (
                StatusCode::OK,
                Json(json!({ "success": true, "leave": leave })),
            )
                .into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// Loads the employee profile behind the authenticated user.
async fn find_own_profile(
    state: &AppState,
    auth: &AuthUser,
) -> Result<staffhub_db::entities::employees::Model, Response> {
    let repo = EmployeeRepository::new((*state.db).clone());
    match repo.find_by_user(auth.user_id()).await {
        Ok(Some(employee)) => Ok(employee),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(error_body(
                "not_found",
                "Employee profile not found for this user",
            )),
        )
            .into_response()),
        Err(e) => {
            error!(error = %e, "Failed to load employee profile");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_body("internal_error", "An error occurred")),
            )
                .into_response())
        }
    }
}

/// Maps a domain error onto its HTTP response.
fn leave_error_response(err: &LeaveError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if matches!(err, LeaveError::Database(_)) {
        error!(error = %err, "Database error during leave operation");
        "An error occurred".to_string()
    } else {
        err.to_string()
    };

    (status, Json(error_body(err.error_code(), message))).into_response()
}
