// ABOUTME: Route module organization for the onboarding service HTTP endpoints
// ABOUTME: Assembles per-domain routers under /api/v1 with auth and admin layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route module for the onboarding service
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the database layer. Routes are assembled here under
//! `/api/v1`, with health endpoints mounted at the root.

/// Admin request-approval routes
pub mod admin;
/// Applicant lifecycle routes
pub mod applicants;
/// Authentication routes (register, login)
pub mod auth;
/// Country CRUD routes
pub mod countries;
/// Department CRUD routes
pub mod departments;
/// Health check and readiness routes
pub mod health;
/// Identity document routes
pub mod identities;
/// Role CRUD routes
pub mod roles;
/// Volunteer-detail CRUD routes
pub mod volunteers;

pub use admin::AdminRoutes;
pub use applicants::ApplicantRoutes;
pub use auth::{AuthRoutes, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use countries::CountryRoutes;
pub use departments::DepartmentRoutes;
pub use health::HealthRoutes;
pub use identities::IdentityRoutes;
pub use roles::RoleRoutes;
pub use volunteers::VolunteerRoutes;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::context::ServerResources;
use crate::middleware::auth_middleware;

/// Assemble the full application router
///
/// Health endpoints are public. Everything else lives under `/api/v1`;
/// only registration and login skip the Bearer-token middleware.
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let protected = Router::new()
        .merge(ApplicantRoutes::routes(resources.clone()))
        .merge(RoleRoutes::routes(resources.clone()))
        .merge(DepartmentRoutes::routes(resources.clone()))
        .merge(CountryRoutes::routes(resources.clone()))
        .merge(VolunteerRoutes::routes(resources.clone()))
        .merge(IdentityRoutes::routes(resources.clone()))
        .merge(AdminRoutes::routes(resources.clone()))
        .layer(middleware::from_fn_with_state(
            resources.clone(),
            auth_middleware,
        ));

    let api_v1 = Router::new()
        .merge(AuthRoutes::routes(resources))
        .merge(protected);

    Router::new()
        .merge(HealthRoutes::routes())
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
