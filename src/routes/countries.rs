// ABOUTME: Country CRUD route handlers
// ABOUTME: Manages the countries referenced by citizenship and residency fields
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

/// Country create payload
#[derive(Debug, Deserialize)]
pub struct CreateCountryBody {
    pub name: String,
}

/// Country update payload, all fields optional
#[derive(Debug, Deserialize)]
pub struct UpdateCountryBody {
    pub name: Option<String>,
    pub status: Option<i64>,
}

/// Country routes implementation
pub struct CountryRoutes;

impl CountryRoutes {
    /// Create country routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/countries", post(handle_create_country))
            .route("/countries", get(handle_list_countries))
            .route("/countries/:id", get(handle_get_country))
            .route("/countries/:id", put(handle_update_country))
            .route("/countries/:id", delete(handle_delete_country))
            .with_state(resources)
    }
}

async fn handle_create_country(
    State(resources): State<Arc<ServerResources>>,
    Json(body): Json<CreateCountryBody>,
) -> AppResult<impl IntoResponse> {
    if body.name.trim().is_empty() {
        return Err(AppError::invalid_input("Country name must not be empty"));
    }

    let id = resources
        .database
        .create_country(&body.name)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create country");
            AppError::internal("Failed to create country")
        })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

async fn handle_list_countries(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<impl IntoResponse> {
    let countries = resources.database.list_countries().await.map_err(|e| {
        error!(error = %e, "Failed to list countries");
        AppError::internal("Failed to list countries")
    })?;

    Ok(Json(countries))
}

async fn handle_get_country(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let country = resources
        .database
        .get_country(id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to get country");
            AppError::internal("Failed to get country")
        })?
        .ok_or_else(|| AppError::not_found(format!("Country {id}")))?;

    Ok(Json(country))
}

async fn handle_update_country(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCountryBody>,
) -> AppResult<impl IntoResponse> {
    let updated = resources
        .database
        .update_country(id, body.name.as_deref(), body.status)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update country");
            AppError::internal("Failed to update country")
        })?;

    if !updated {
        return Err(AppError::not_found(format!("Country {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn handle_delete_country(
    State(resources): State<Arc<ServerResources>>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = resources.database.delete_country(id).await.map_err(|e| {
        error!(error = %e, "Failed to delete country");
        AppError::internal("Failed to delete country")
    })?;

    if !deleted {
        return Err(AppError::not_found(format!("Country {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}
