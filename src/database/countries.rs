// ABOUTME: Country database operations
// ABOUTME: CRUD for the countries referenced by citizenship and residency fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use sqlx::Row;

use super::Database;
use crate::models::Country;

impl Database {
    /// Create the countries table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_countries(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS countries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
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

    /// Create a new country
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken or the insert fails
    pub async fn create_country(&self, name: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO countries (name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a country by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_country(&self, country_id: i64) -> Result<Option<Country>> {
        let row = sqlx::query("SELECT * FROM countries WHERE id = $1")
            .bind(country_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_country))
    }

    /// List all countries
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_countries(&self) -> Result<Vec<Country>> {
        let rows = sqlx::query("SELECT * FROM countries ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_country).collect())
    }

    /// Update a country's fields
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_country(
        &self,
        country_id: i64,
        name: Option<&str>,
        status: Option<i64>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE countries SET
                name = COALESCE($2, name),
                status = COALESCE($3, status),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(country_id)
        .bind(name)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a country
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_country(&self, country_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(country_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_country(row: &sqlx::sqlite::SqliteRow) -> Country {
        Country {
            id: row.get("id"),
            name: row.get("name"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
