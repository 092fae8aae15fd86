// ABOUTME: Central admin authorization guard for routes requiring admin privileges
// ABOUTME: Verifies the user holds the admin role and returns 403 Forbidden if not
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin Authorization Guard
//!
//! Route handlers that process approval requests call [`require_admin`]
//! instead of performing inline role checks.

use std::sync::Arc;

use crate::database::Database;
use crate::errors::AppError;
use crate::models::{role_names, User};

/// Require admin privileges for a user
///
/// Returns the User record if authorized.
///
/// # Errors
///
/// Returns an error if:
/// - The user does not exist
/// - The database query fails
/// - The user does not hold the admin role (403 Forbidden)
pub async fn require_admin(user_id: i64, database: &Arc<Database>) -> Result<User, AppError> {
    let user = database
        .get_user(user_id)
        .await
        .map_err(|e| AppError::internal(format!("Failed to get user: {e}")))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

    let role = match user.role_id {
        Some(role_id) => database
            .get_role(role_id)
            .await
            .map_err(|e| AppError::internal(format!("Failed to get role: {e}")))?,
        None => None,
    };

    if !role.is_some_and(|r| r.name == role_names::ADMIN) {
        return Err(AppError::permission_denied("Admin privileges required"));
    }

    Ok(user)
}
