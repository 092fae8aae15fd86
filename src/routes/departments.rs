// ABOUTME: Department CRUD route handlers
// ABOUTME: Manages the departments volunteers can be assigned to
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};

/// Department create payload
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentBody {
    pub name: String,
    pub address: Option<String>,
}

/// Department update payload, all fields optional
#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentBody {
    pub name: Option<String>,
    pub address: Option<String>,
    pub status: Option<i64>,
}

/// Department routes implementation
pub struct DepartmentRoutes;

impl DepartmentRoutes {
    /// Create department routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/departments", post(handle_create_department))
            .route("/departments", get(handle_list_departments))
            .route("/departments/:id", get(handle_get_department))
            .route("/departments/:id", put(handle_update_department))
            .route("/departments/:id", delete(handle_delete_department))
            .with_state(resources)
    }
}

async fn handle_create_department(
    State(resources): State<Arc<ServerResources>>,
    Json(body): Json<CreateDepartmentBody>,
) -> AppResult<impl IntoResponse> {
    if body.name.trim().is_empty() {
        return Err(AppError::invalid_input("Department name must not be empty"));
    }

    let id = resources
        .database
        .create_department(&body.name, body.address.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create department");
            AppError::internal("Failed to create department")
        })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

async fn handle_list_departments(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<impl IntoResponse> {
    let departments = resources.database.list_departments().await.map_err(|e| {
        error!(error = %e, "Failed to list departments");
        AppError::internal("Failed to list departments")
    })?;

    Ok(Json(departments))
}

async fn handle_get_department(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let department = resources
        .database
        .get_department(id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to get department");
            AppError::internal("Failed to get department")
        })?
        .ok_or_else(|| AppError::not_found(format!("Department {id}")))?;

    Ok(Json(department))
}

async fn handle_update_department(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateDepartmentBody>,
) -> AppResult<impl IntoResponse> {
    let updated = resources
        .database
        .update_department(id, body.name.as_deref(), body.address.as_deref(), body.status)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update department");
            AppError::internal("Failed to update department")
        })?;

    if !updated {
        return Err(AppError::not_found(format!("Department {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn handle_delete_department(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = resources.database.delete_department(id).await.map_err(|e| {
        error!(error = %e, "Failed to delete department");
        AppError::internal("Failed to delete department")
    })?;

    if !deleted {
        return Err(AppError::not_found(format!("Department {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}
