// ABOUTME: Role database operations
// ABOUTME: CRUD for the roles table plus lookup by name for promotions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use sqlx::Row;

use super::Database;
use crate::models::Role;

impl Database {
    /// Create the roles table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_roles(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS roles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a new role
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken or the insert fails
    pub async fn create_role(&self, name: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO roles (name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a role by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_role(&self, role_id: i64) -> Result<Option<Role>> {
        let row = sqlx::query("SELECT * FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_role))
    }

    /// Get a role by its unique name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        let row = sqlx::query("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_role))
    }

    /// List all roles
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        let rows = sqlx::query("SELECT * FROM roles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_role).collect())
    }

    /// Rename a role
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_role(&self, role_id: i64, name: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE roles SET name = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
        )
        .bind(role_id)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a role
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_role(&self, role_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(role_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_role(row: &sqlx::sqlite::SqliteRow) -> Role {
        Role {
            id: row.get("id"),
            name: row.get("name"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
