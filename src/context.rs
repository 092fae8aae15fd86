// ABOUTME: Shared server resources container for dependency injection
// ABOUTME: Bundles database, auth manager, and configuration behind Arc for handler state
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared resources passed to every route handler as axum state.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;

/// Centralized container for all expensive-to-create server resources
pub struct ServerResources {
    /// Database connection pool
    pub database: Arc<Database>,
    /// JWT and password authentication
    pub auth_manager: Arc<AuthManager>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create a new resource container
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
        }
    }
}
