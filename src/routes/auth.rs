// ABOUTME: Authentication route handlers for user registration and login
// ABOUTME: Validates credentials, hashes passwords, and issues JWT tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::auth::AuthManager;
use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// User registration request
///
/// Roles are never taken from this payload; they are only granted through
/// the admin approval workflow.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub mobile: Option<String>,
    pub country_id: Option<i64>,
    pub resident_country_id: Option<i64>,
    pub department_id: Option<i64>,
}

/// Registration response with user details
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    pub email: String,
    pub message: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response with token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_in_hours: i64,
    pub user: UserInfo,
}

/// Sanitized user information for responses
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role_id: Option<i64>,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(handle_register))
            .route("/auth/login", post(handle_login))
            .with_state(resources)
    }
}

fn validate_registration(request: &RegisterRequest) -> AppResult<()> {
    if !request.email.contains('@') || request.email.len() < 3 {
        return Err(AppError::invalid_input("Invalid email address"));
    }
    if request.password.len() < 8 {
        return Err(AppError::invalid_input(
            "Password must be at least 8 characters",
        ));
    }
    if request.name.trim().is_empty() || request.surname.trim().is_empty() {
        return Err(AppError::invalid_input("Name and surname are required"));
    }
    Ok(())
}

/// Handle user registration
async fn handle_register(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validate_registration(&request)?;

    if resources
        .database
        .get_user_by_email(&request.email)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to check existing user");
            AppError::internal("Registration failed")
        })?
        .is_some()
    {
        return Err(AppError::already_exists("Email is already registered"));
    }

    let password_hash = AuthManager::hash_password(&request.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let mut user = User::new(
        request.email.clone(),
        password_hash,
        request.name,
        request.surname,
    );
    user.gender = request.gender;
    user.dob = request.dob;
    user.mobile = request.mobile;
    user.country_id = request.country_id;
    user.resident_country_id = request.resident_country_id;
    user.department_id = request.department_id;

    let user_id = resources.database.create_user(&user).await.map_err(|e| {
        error!(error = %e, "Failed to create user");
        AppError::internal("Registration failed")
    })?;

    info!(user_id = user_id, email = %request.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            email: request.email,
            message: "User registered successfully".to_owned(),
        }),
    ))
}

/// Handle user login
async fn handle_login(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = resources
        .database
        .get_user_by_email(&request.email)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to look up user for login");
            AppError::internal("Login failed")
        })?
        .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

    let valid = AuthManager::verify_password(&request.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

    if !valid {
        warn!(email = %request.email, "Login failed: bad password");
        return Err(AppError::auth_invalid("Invalid email or password"));
    }

    if !user.status.can_login() {
        warn!(user_id = user.id, "Login refused: user is inactive");
        return Err(AppError::permission_denied("User is inactive"));
    }

    let token = resources
        .auth_manager
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        jwt_token: token,
        expires_in_hours: resources.auth_manager.token_expiry_hours(),
        user: UserInfo {
            id: user.id,
            email: user.email,
            name: user.name,
            surname: user.surname,
            role_id: user.role_id,
        },
    }))
}
