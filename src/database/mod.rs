// ABOUTME: Database management for the onboarding service
// ABOUTME: Owns the SQLite pool, schema migrations, and per-resource query modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! This module provides database functionality for the onboarding service.
//! Each resource (users, requests, departments, ...) contributes its own
//! `impl Database` block with migrations and queries.

mod countries;
mod departments;
mod identities;
mod requests;
mod roles;
mod users;
mod volunteers;

pub use identities::IdentityInput;
pub use users::UserProfileUpdate;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::models::role_names;

/// Database manager for onboarding data
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        // Reference tables first, then everything keyed on users
        self.migrate_roles().await?;
        self.migrate_departments().await?;
        self.migrate_countries().await?;
        self.migrate_users().await?;
        self.migrate_requests().await?;
        self.migrate_volunteers().await?;
        self.migrate_identities().await?;

        self.seed_roles().await?;

        Ok(())
    }

    /// Seed the well-known roles the approval workflow promotes users into
    async fn seed_roles(&self) -> Result<()> {
        for name in [role_names::APPLICANT, role_names::VOLUNTEER, role_names::ADMIN] {
            sqlx::query("INSERT OR IGNORE INTO roles (name) VALUES ($1)")
                .bind(name)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}
