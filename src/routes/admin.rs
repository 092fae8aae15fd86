// ABOUTME: Admin route handlers for the request-approval workflow
// ABOUTME: Listing, approving, and rejecting onboarding requests with role promotion
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin routes for the approval workflow
//!
//! All handlers verify the caller holds the `admin` role before touching
//! requests. Handlers are thin wrappers; the state transition itself lives
//! in the database layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{to_value, Value};
use tracing::{error, info};

use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};
use crate::middleware::{require_admin, AuthUser};

/// Generic admin response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// Response message
    pub message: String,
    /// Optional additional data
    pub data: Option<Value>,
}

/// Rejection payload with optional notes
#[derive(Debug, Deserialize)]
pub struct RejectRequestBody {
    pub notes: Option<String>,
}

/// Notes attached to an already-rejected request
#[derive(Debug, Deserialize)]
pub struct RejectNotesBody {
    pub notes: String,
}

/// Admin routes implementation
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all admin request routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/admin/requests", get(handle_list_requests))
            .route("/admin/requests/pending", get(handle_list_pending_requests))
            .route("/admin/requests/:id", get(handle_get_request))
            .route("/admin/requests/:id", delete(handle_delete_request))
            .route("/admin/requests/:id/approve", post(handle_approve_request))
            .route("/admin/requests/:id/reject", post(handle_reject_request))
            .route(
                "/admin/requests/:id/reject-notes",
                post(handle_add_reject_notes),
            )
            .with_state(resources)
    }
}

/// List all requests
async fn handle_list_requests(
    State(resources): State<Arc<ServerResources>>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<impl IntoResponse> {
    require_admin(auth.user_id, &resources.database).await?;

    let requests = resources.database.list_requests().await.map_err(|e| {
        error!(error = %e, "Failed to list requests");
        AppError::internal("Failed to list requests")
    })?;

    Ok(Json(requests))
}

/// List pending requests only
async fn handle_list_pending_requests(
    State(resources): State<Arc<ServerResources>>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<impl IntoResponse> {
    require_admin(auth.user_id, &resources.database).await?;

    let requests = resources
        .database
        .list_pending_requests()
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list pending requests");
            AppError::internal("Failed to list pending requests")
        })?;

    Ok(Json(requests))
}

/// Get a single request
async fn handle_get_request(
    State(resources): State<Arc<ServerResources>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    require_admin(auth.user_id, &resources.database).await?;

    let request = resources
        .database
        .get_request(id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to get request");
            AppError::internal("Failed to get request")
        })?
        .ok_or_else(|| AppError::not_found(format!("Request {id}")))?;

    Ok(Json(request))
}

/// Approve a pending request
async fn handle_approve_request(
    State(resources): State<Arc<ServerResources>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let admin = require_admin(auth.user_id, &resources.database).await?;

    let request = resources.database.approve_request(id, admin.id).await?;

    info!(request_id = id, admin_id = admin.id, "Request approved by admin");

    Ok(Json(AdminResponse {
        success: true,
        message: format!("Request {id} approved"),
        data: to_value(request).ok(),
    }))
}

/// Reject a pending request
async fn handle_reject_request(
    State(resources): State<Arc<ServerResources>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<RejectRequestBody>,
) -> AppResult<impl IntoResponse> {
    let admin = require_admin(auth.user_id, &resources.database).await?;

    let request = resources
        .database
        .reject_request(id, admin.id, body.notes.as_deref())
        .await?;

    info!(request_id = id, admin_id = admin.id, "Request rejected by admin");

    Ok(Json(AdminResponse {
        success: true,
        message: format!("Request {id} rejected"),
        data: to_value(request).ok(),
    }))
}

/// Attach notes to a rejected request
async fn handle_add_reject_notes(
    State(resources): State<Arc<ServerResources>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<RejectNotesBody>,
) -> AppResult<impl IntoResponse> {
    require_admin(auth.user_id, &resources.database).await?;

    if body.notes.trim().is_empty() {
        return Err(AppError::invalid_input("Notes must not be empty"));
    }

    let request = resources.database.add_reject_notes(id, &body.notes).await?;

    Ok(Json(AdminResponse {
        success: true,
        message: format!("Notes added to request {id}"),
        data: to_value(request).ok(),
    }))
}

/// Delete a request
async fn handle_delete_request(
    State(resources): State<Arc<ServerResources>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    require_admin(auth.user_id, &resources.database).await?;

    let deleted = resources.database.delete_request(id).await.map_err(|e| {
        error!(error = %e, "Failed to delete request");
        AppError::internal("Failed to delete request")
    })?;

    if !deleted {
        return Err(AppError::not_found(format!("Request {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}
