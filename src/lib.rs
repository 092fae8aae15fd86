// ABOUTME: Main library entry point for the onboarding and volunteer service
// ABOUTME: Provides REST endpoints for applicants, volunteers, and admin approval workflows
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Onboarding & Volunteer Service
//!
//! An HTTP backend for managing volunteer onboarding: user registration,
//! applicant profiles, reference data (roles, departments, countries), and
//! the admin request-approval workflow that promotes users from applicant
//! to volunteer.
//!
//! ## Architecture
//!
//! The service follows a layered design:
//! - **Routes**: thin axum handlers that bind HTTP requests and delegate
//! - **Database**: `sqlx`-backed storage with one module per resource
//! - **Auth**: bcrypt password hashing and JWT session tokens
//! - **Config**: environment-based configuration for deployment

/// JWT-based authentication and session management
pub mod auth;

/// Configuration management
pub mod config;

/// Shared server resources for dependency injection
pub mod context;

/// Database access layer
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for request authentication and admin authorization
pub mod middleware;

/// Core data models
pub mod models;

/// HTTP routes organized by domain
pub mod routes;
