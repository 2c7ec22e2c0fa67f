//! Department routes.
//!
//! Reads are public; writes sit behind the auth middleware and an
//! admin role check.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::routes::{error_body, require_admin};
use crate::{AppState, middleware::AuthUser};
use staffhub_db::repositories::{DepartmentRepository, UpdateDepartmentInput};

/// Payload for creating a department.
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    /// Department name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

/// Payload for updating a department.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateDepartmentRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Creates the public department routes.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments))
        .route("/departments/{id}", get(get_department))
}

/// Creates the admin department routes (auth applied externally).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/departments", post(create_department))
        .route("/admin/departments/{id}", put(update_department))
        .route("/admin/departments/{id}", delete(delete_department))
}

/// GET /departments - List all departments.
async fn list_departments(State(state): State<AppState>) -> impl IntoResponse {
    let repo = DepartmentRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(departments) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": departments.len(),
                "departments": departments
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list departments");
            internal_error()
        }
    }
}

/// GET `/departments/{id}` - Get one department.
async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let repo = DepartmentRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(department)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "department": department })),
        )
            .into_response(),
        Ok(None) => department_not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to get department");
            internal_error()
        }
    }
}

/// POST /admin/departments - Create a department.
async fn create_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateDepartmentRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }
    if payload.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body("missing_field", "Department name is required")),
        )
            .into_response();
    }

    let repo = DepartmentRepository::new((*state.db).clone());

    match repo.name_exists(payload.name.trim(), None).await {
        Ok(true) => return name_conflict(),
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking department name");
            return internal_error();
        }
    }

    match repo.create(payload.name.trim(), &payload.description).await {
        Ok(department) => {
            info!(department_id = %department.id, name = %department.name, "Department created");
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "department": department })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create department");
            internal_error()
        }
    }
}

/// PUT `/admin/departments/{id}` - Update a department.
async fn update_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
    Json(payload): Json<UpdateDepartmentRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = DepartmentRepository::new((*state.db).clone());

    // A rename must not collide with another department
    if let Some(name) = payload.name.as_deref() {
        match repo.name_exists(name.trim(), Some(id)).await {
            Ok(true) => return name_conflict(),
            Ok(false) => {}
            Err(e) => {
                error!(error = %e, "Database error checking department name");
                return internal_error();
            }
        }
    }

    let input = UpdateDepartmentInput {
        name: payload.name.map(|n| n.trim().to_string()),
        description: payload.description,
    };

    match repo.update(id, input).await {
        Ok(Some(department)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "department": department })),
        )
            .into_response(),
        Ok(None) => department_not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to update department");
            internal_error()
        }
    }
}

/// DELETE `/admin/departments/{id}` - Delete a department.
async fn delete_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = DepartmentRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(true) => {
            info!(department_id = %id, "Department deleted");
            (
                StatusCode::OK,
                Json(json!({ "success": true, "message": "Department deleted" })),
            )
                .into_response()
        }
        Ok(false) => department_not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to delete department");
            internal_error()
        }
    }
}

fn department_not_found(id: uuid::Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(error_body(
            "not_found",
            format!("Department not found with id: {id}"),
        )),
    )
        .into_response()
}

fn name_conflict() -> axum::response::Response {
    (
        StatusCode::CONFLICT,
        Json(error_body(
            "name_exists",
            "A department with this name already exists",
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
