// ABOUTME: Department database operations
// ABOUTME: CRUD for the departments volunteers are assigned to
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use sqlx::Row;

use super::Database;
use crate::models::Department;

impl Database {
    /// Create the departments table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_departments(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS departments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                address TEXT,
                status INTEGER NOT NULL DEFAULT 1,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a new department
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_department(&self, name: &str, address: Option<&str>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO departments (name, address) VALUES ($1, $2)")
            .bind(name)
            .bind(address)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a department by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_department(&self, department_id: i64) -> Result<Option<Department>> {
        let row = sqlx::query("SELECT * FROM departments WHERE id = $1")
            .bind(department_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_department))
    }

    /// List all departments
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query("SELECT * FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_department).collect())
    }

    /// Update a department's fields
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_department(
        &self,
        department_id: i64,
        name: Option<&str>,
        address: Option<&str>,
        status: Option<i64>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE departments SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                status = COALESCE($4, status),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(department_id)
        .bind(name)
        .bind(address)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a department
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_department(&self, department_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(department_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_department(row: &sqlx::sqlite::SqliteRow) -> Department {
        Department {
            id: row.get("id"),
            name: row.get("name"),
            address: row.get("address"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
