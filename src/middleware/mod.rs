// ABOUTME: HTTP middleware for authentication and authorization
// ABOUTME: Bearer-token validation and the admin role guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request middleware layered over the protected route groups.

pub mod admin_guard;
pub mod auth;

pub use admin_guard::require_admin;
pub use auth::{auth_middleware, AuthUser};
