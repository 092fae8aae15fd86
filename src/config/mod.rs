// ABOUTME: Configuration module organization for the onboarding service
// ABOUTME: Exposes environment-based configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management

/// Environment-based configuration for production deployment
pub mod environment;

pub use environment::ServerConfig;
