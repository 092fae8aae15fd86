// ABOUTME: Role CRUD route handlers
// ABOUTME: Manages the named roles the approval workflow promotes users into
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

/// Role create/update payload
#[derive(Debug, Deserialize)]
pub struct RoleBody {
    pub name: String,
}

/// Role routes implementation
pub struct RoleRoutes;

impl RoleRoutes {
    /// Create role routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/roles", post(handle_create_role))
            .route("/roles", get(handle_list_roles))
            .route("/roles/:id", get(handle_get_role))
            .route("/roles/:id", put(handle_update_role))
            .route("/roles/:id", delete(handle_delete_role))
            .with_state(resources)
    }
}

async fn handle_create_role(
    State(resources): State<Arc<ServerResources>>,
    Json(body): Json<RoleBody>,
) -> AppResult<impl IntoResponse> {
    if body.name.trim().is_empty() {
        return Err(AppError::invalid_input("Role name must not be empty"));
    }

    if resources
        .database
        .get_role_by_name(&body.name)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to check existing role");
            AppError::internal("Failed to create role")
        })?
        .is_some()
    {
        return Err(AppError::already_exists(format!(
            "Role '{}' already exists",
            body.name
        )));
    }

    let id = resources
        .database
        .create_role(&body.name)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create role");
            AppError::internal("Failed to create role")
        })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

async fn handle_list_roles(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<impl IntoResponse> {
    let roles = resources.database.list_roles().await.map_err(|e| {
        error!(error = %e, "Failed to list roles");
        AppError::internal("Failed to list roles")
    })?;

    Ok(Json(roles))
}

async fn handle_get_role(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let role = resources
        .database
        .get_role(id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to get role");
            AppError::internal("Failed to get role")
        })?
        .ok_or_else(|| AppError::not_found(format!("Role {id}")))?;

    Ok(Json(role))
}

async fn handle_update_role(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
    Json(body): Json<RoleBody>,
) -> AppResult<impl IntoResponse> {
    if body.name.trim().is_empty() {
        return Err(AppError::invalid_input("Role name must not be empty"));
    }

    let updated = resources
        .database
        .update_role(id, &body.name)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update role");
            AppError::internal("Failed to update role")
        })?;

    if !updated {
        return Err(AppError::not_found(format!("Role {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn handle_delete_role(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = resources.database.delete_role(id).await.map_err(|e| {
        error!(error = %e, "Failed to delete role");
        AppError::internal("Failed to delete role")
    })?;

    if !deleted {
        return Err(AppError::not_found(format!("Role {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}
