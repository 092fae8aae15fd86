// ABOUTME: Identity document route handlers
// ABOUTME: Submission and management of documents users provide during verification
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
use tracing::error;

use crate::context::ServerResources;
use crate::database::IdentityInput;
use crate::errors::{AppError, AppResult};

/// Identity routes implementation
pub struct IdentityRoutes;

impl IdentityRoutes {
    /// Create identity document routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users/:id/identities", post(handle_create_identity))
            .route("/users/:id/identities", get(handle_list_identities))
            .route("/identities/:id", put(handle_update_identity))
            .route("/identities/:id", delete(handle_delete_identity))
            .with_state(resources)
    }
}

/// Record an identity document for a user
async fn handle_create_identity(
    State(resources): State<Arc<ServerResources>>,
    Path(user_id): Path<i64>,
    Json(input): Json<IdentityInput>,
) -> AppResult<impl IntoResponse> {
    if input.number.trim().is_empty() || input.doc_type.trim().is_empty() {
        return Err(AppError::invalid_input(
            "Document number and type are required",
        ));
    }

    resources
        .database
        .get_user(user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to look up user for identity");
            AppError::internal("Failed to record identity")
        })?
        .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

    let id = resources
        .database
        .create_identity(user_id, &input)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to record identity");
            AppError::internal("Failed to record identity")
        })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// List a user's identity documents
async fn handle_list_identities(
    State(resources): State<Arc<ServerResources>>,
    Path(user_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let identities = resources
        .database
        .list_identities_for_user(user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list identities");
            AppError::internal("Failed to list identities")
        })?;

    Ok(Json(identities))
}

/// Update an identity document
async fn handle_update_identity(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
    Json(input): Json<IdentityInput>,
) -> AppResult<impl IntoResponse> {
    if input.number.trim().is_empty() || input.doc_type.trim().is_empty() {
        return Err(AppError::invalid_input(
            "Document number and type are required",
        ));
    }

    let updated = resources
        .database
        .update_identity(id, &input)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update identity");
            AppError::internal("Failed to update identity")
        })?;

    if !updated {
        return Err(AppError::not_found(format!("Identity {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an identity document
async fn handle_delete_identity(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = resources.database.delete_identity(id).await.map_err(|e| {
        error!(error = %e, "Failed to delete identity");
        AppError::internal("Failed to delete identity")
    })?;

    if !deleted {
        return Err(AppError::not_found(format!("Identity {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}
