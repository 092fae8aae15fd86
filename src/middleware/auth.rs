// ABOUTME: JWT authentication middleware for protected routes
// ABOUTME: Validates Bearer tokens and injects the authenticated user into request extensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use axum::{extract::State, http::Request, middleware::Next, response::Response};
use tracing::{debug, warn};

use crate::auth::JwtValidationError;
use crate::context::ServerResources;
use crate::errors::AppError;

/// Authenticated user context, inserted into request extensions by
/// [`auth_middleware`] and read by handlers via `Extension<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Authenticated user's ID
    pub user_id: i64,
    /// Authenticated user's email
    pub email: String,
}

/// Validate the `Authorization: Bearer` header and attach [`AuthUser`]
///
/// # Errors
///
/// Returns an error if:
/// - The header is missing or not a Bearer token
/// - The token fails validation (expired, bad signature, malformed)
pub async fn auth_middleware(
    State(resources): State<Arc<ServerResources>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authentication failed: header is not a Bearer token");
        AppError::auth_invalid("Authorization header must be 'Bearer <token>'")
    })?;

    let claims = resources.auth_manager.validate_token(token).map_err(|e| {
        warn!("JWT validation failed: {e}");
        match e {
            JwtValidationError::TokenExpired { .. } => AppError::auth_expired(),
            other => AppError::auth_invalid(other.to_string()),
        }
    })?;

    let user_id = claims
        .user_id()
        .map_err(|_| AppError::auth_invalid("Invalid user ID in token"))?;

    debug!(user_id = user_id, "Request authenticated");

    request.extensions_mut().insert(AuthUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
