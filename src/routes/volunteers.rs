// ABOUTME: Volunteer-detail CRUD route handlers
// ABOUTME: Direct management of the records normally created by verification approval
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

/// Volunteer-detail create payload
#[derive(Debug, Deserialize)]
pub struct CreateVolunteerBody {
    pub user_id: i64,
    pub department_id: Option<i64>,
}

/// Volunteer-detail update payload, all fields optional
#[derive(Debug, Deserialize)]
pub struct UpdateVolunteerBody {
    pub department_id: Option<i64>,
    pub status: Option<i64>,
}

/// Volunteer routes implementation
pub struct VolunteerRoutes;

impl VolunteerRoutes {
    /// Create volunteer routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/volunteers", post(handle_create_volunteer))
            .route("/volunteers", get(handle_list_volunteers))
            .route("/volunteers/:id", get(handle_get_volunteer))
            .route("/volunteers/:id", put(handle_update_volunteer))
            .route("/volunteers/:id", delete(handle_delete_volunteer))
            .with_state(resources)
    }
}

async fn handle_create_volunteer(
    State(resources): State<Arc<ServerResources>>,
    Json(body): Json<CreateVolunteerBody>,
) -> AppResult<impl IntoResponse> {
    resources
        .database
        .get_user(body.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to look up user for volunteer detail");
            AppError::internal("Failed to create volunteer detail")
        })?
        .ok_or_else(|| AppError::not_found(format!("User {}", body.user_id)))?;

    if resources
        .database
        .get_volunteer_detail_for_user(body.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to check existing volunteer detail");
            AppError::internal("Failed to create volunteer detail")
        })?
        .is_some()
    {
        return Err(AppError::already_exists(format!(
            "User {} already has a volunteer detail",
            body.user_id
        )));
    }

    let id = resources
        .database
        .create_volunteer_detail(body.user_id, body.department_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create volunteer detail");
            AppError::internal("Failed to create volunteer detail")
        })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

async fn handle_list_volunteers(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<impl IntoResponse> {
    let volunteers = resources
        .database
        .list_volunteer_details()
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list volunteer details");
            AppError::internal("Failed to list volunteer details")
        })?;

    Ok(Json(volunteers))
}

async fn handle_get_volunteer(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let volunteer = resources
        .database
        .get_volunteer_detail(id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to get volunteer detail");
            AppError::internal("Failed to get volunteer detail")
        })?
        .ok_or_else(|| AppError::not_found(format!("Volunteer detail {id}")))?;

    Ok(Json(volunteer))
}

async fn handle_update_volunteer(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateVolunteerBody>,
) -> AppResult<impl IntoResponse> {
    let updated = resources
        .database
        .update_volunteer_detail(id, body.department_id, body.status)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update volunteer detail");
            AppError::internal("Failed to update volunteer detail")
        })?;

    if !updated {
        return Err(AppError::not_found(format!("Volunteer detail {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn handle_delete_volunteer(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = resources
        .database
        .delete_volunteer_detail(id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to delete volunteer detail");
            AppError::internal("Failed to delete volunteer detail")
        })?;

    if !deleted {
        return Err(AppError::not_found(format!("Volunteer detail {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}
