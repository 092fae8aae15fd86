// ABOUTME: Volunteer detail database operations
// ABOUTME: Records created when verification requests are approved, plus admin CRUD
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use sqlx::Row;

use super::Database;
use crate::models::VolunteerDetail;

impl Database {
    /// Create the volunteer_details table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_volunteers(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS volunteer_details (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                department_id INTEGER REFERENCES departments(id),
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

    /// Create a volunteer detail record directly
    ///
    /// The approval workflow normally creates these; this is the manual path.
    ///
    /// # Errors
    ///
    /// Returns an error if the user already has a record or the insert fails
    pub async fn create_volunteer_detail(
        &self,
        user_id: i64,
        department_id: Option<i64>,
    ) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO volunteer_details (user_id, department_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(department_id)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a volunteer detail by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_volunteer_detail(&self, id: i64) -> Result<Option<VolunteerDetail>> {
        let row = sqlx::query("SELECT * FROM volunteer_details WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_volunteer_detail))
    }

    /// Get the volunteer detail belonging to a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_volunteer_detail_for_user(
        &self,
        user_id: i64,
    ) -> Result<Option<VolunteerDetail>> {
        let row = sqlx::query("SELECT * FROM volunteer_details WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_volunteer_detail))
    }

    /// List all volunteer details
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_volunteer_details(&self) -> Result<Vec<VolunteerDetail>> {
        let rows = sqlx::query("SELECT * FROM volunteer_details ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_volunteer_detail).collect())
    }

    /// Update a volunteer detail's department or status
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_volunteer_detail(
        &self,
        id: i64,
        department_id: Option<i64>,
        status: Option<i64>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE volunteer_details SET
                department_id = COALESCE($2, department_id),
                status = COALESCE($3, status),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(department_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a volunteer detail
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_volunteer_detail(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM volunteer_details WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_volunteer_detail(row: &sqlx::sqlite::SqliteRow) -> VolunteerDetail {
        VolunteerDetail {
            id: row.get("id"),
            user_id: row.get("user_id"),
            department_id: row.get("department_id"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
