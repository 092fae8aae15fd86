// ABOUTME: Applicant lifecycle route handlers
// ABOUTME: Profile management and application submission creating pending registration requests
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
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};

use crate::context::ServerResources;
use crate::database::UserProfileUpdate;
use crate::errors::{AppError, AppResult};
use crate::models::RequestType;

/// Application form submitted by an applicant
#[derive(Debug, Deserialize)]
pub struct ApplicationForm {
    pub name: String,
    pub surname: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub mobile: Option<String>,
    pub country_id: Option<i64>,
    pub resident_country_id: Option<i64>,
    pub department_id: Option<i64>,
}

/// Minimal applicant signup payload used by staff-created accounts
#[derive(Debug, Deserialize)]
pub struct CreateApplicantRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
}

/// Applicant routes implementation
pub struct ApplicantRoutes;

impl ApplicantRoutes {
    /// Create applicant routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/applicants", post(handle_create_applicant))
            .route("/applicants", get(handle_list_applicants))
            .route("/applicants/:id", get(handle_get_applicant))
            .route("/applicants/:id", put(handle_update_applicant))
            .route("/applicants/:id", delete(handle_delete_applicant))
            .route("/applicants/:id/application", post(handle_submit_application))
            .with_state(resources)
    }
}

/// Create an applicant account directly
async fn handle_create_applicant(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<CreateApplicantRequest>,
) -> AppResult<impl IntoResponse> {
    if !request.email.contains('@') {
        return Err(AppError::invalid_input("Invalid email address"));
    }
    if request.password.len() < 8 {
        return Err(AppError::invalid_input(
            "Password must be at least 8 characters",
        ));
    }

    if resources
        .database
        .get_user_by_email(&request.email)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to check existing applicant");
            AppError::internal("Failed to create applicant")
        })?
        .is_some()
    {
        return Err(AppError::already_exists("Email is already registered"));
    }

    let password_hash = crate::auth::AuthManager::hash_password(&request.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let user = crate::models::User::new(
        request.email,
        password_hash,
        request.name,
        request.surname,
    );

    let user_id = resources.database.create_user(&user).await.map_err(|e| {
        error!(error = %e, "Failed to create applicant");
        AppError::internal("Failed to create applicant")
    })?;

    info!(user_id = user_id, "Applicant created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "user_id": user_id })),
    ))
}

/// List all applicants
async fn handle_list_applicants(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<impl IntoResponse> {
    let users = resources.database.list_users().await.map_err(|e| {
        error!(error = %e, "Failed to list applicants");
        AppError::internal("Failed to list applicants")
    })?;

    Ok(Json(users))
}

/// Get a single applicant
async fn handle_get_applicant(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let user = resources
        .database
        .get_user(id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to get applicant");
            AppError::internal("Failed to get applicant")
        })?
        .ok_or_else(|| AppError::not_found(format!("Applicant {id}")))?;

    Ok(Json(user))
}

/// Update an applicant's profile
async fn handle_update_applicant(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
    Json(update): Json<UserProfileUpdate>,
) -> AppResult<impl IntoResponse> {
    let updated = resources
        .database
        .update_user_profile(id, &update)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update applicant");
            AppError::internal("Failed to update applicant")
        })?;

    if !updated {
        return Err(AppError::not_found(format!("Applicant {id}")));
    }

    info!(user_id = id, "Applicant profile updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an applicant account
async fn handle_delete_applicant(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = resources.database.delete_user(id).await.map_err(|e| {
        error!(error = %e, "Failed to delete applicant");
        AppError::internal("Failed to delete applicant")
    })?;

    if !deleted {
        return Err(AppError::not_found(format!("Applicant {id}")));
    }

    info!(user_id = id, "Applicant deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Submit the application form and queue a registration request for review
async fn handle_submit_application(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
    Json(form): Json<ApplicationForm>,
) -> AppResult<impl IntoResponse> {
    if form.name.trim().is_empty() || form.surname.trim().is_empty() {
        return Err(AppError::invalid_input("Name and surname are required"));
    }

    resources
        .database
        .get_user(id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to look up applicant");
            AppError::internal("Failed to submit application")
        })?
        .ok_or_else(|| AppError::not_found(format!("Applicant {id}")))?;

    let update = UserProfileUpdate {
        name: Some(form.name),
        surname: Some(form.surname),
        gender: form.gender,
        dob: form.dob,
        mobile: form.mobile,
        country_id: form.country_id,
        resident_country_id: form.resident_country_id,
        avatar: None,
        department_id: form.department_id,
    };

    resources
        .database
        .update_user_profile(id, &update)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update applicant profile");
            AppError::internal("Failed to submit application")
        })?;

    let request_id = resources
        .database
        .create_request(id, RequestType::Registration)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create registration request");
            AppError::internal("Failed to submit application")
        })?;

    info!(user_id = id, request_id = request_id, "Application submitted");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "request_id": request_id,
            "status": "pending"
        })),
    ))
}
