// ABOUTME: Identity document database operations
// ABOUTME: CRUD for documents users submit during verification
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::Row;

use super::Database;
use crate::models::UserIdentity;

/// Fields for creating or updating an identity document
#[derive(Debug, Clone, serde::Deserialize)]
pub struct IdentityInput {
    pub number: String,
    pub doc_type: String,
    pub expiry_date: Option<NaiveDate>,
    pub place_issued: Option<String>,
}

impl Database {
    /// Create the user_identities table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_identities(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_identities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                number TEXT NOT NULL,
                doc_type TEXT NOT NULL,
                status INTEGER NOT NULL DEFAULT 1,
                expiry_date DATE,
                place_issued TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_user_identities_user_id ON user_identities(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record an identity document for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_identity(&self, user_id: i64, input: &IdentityInput) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO user_identities (user_id, number, doc_type, expiry_date, place_issued)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user_id)
        .bind(&input.number)
        .bind(&input.doc_type)
        .bind(input.expiry_date)
        .bind(&input.place_issued)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get an identity document by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_identity(&self, id: i64) -> Result<Option<UserIdentity>> {
        let row = sqlx::query("SELECT * FROM user_identities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_identity))
    }

    /// List the identity documents a user has submitted
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_identities_for_user(&self, user_id: i64) -> Result<Vec<UserIdentity>> {
        let rows = sqlx::query("SELECT * FROM user_identities WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_identity).collect())
    }

    /// Update an identity document
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_identity(&self, id: i64, input: &IdentityInput) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE user_identities SET
                number = $2,
                doc_type = $3,
                expiry_date = $4,
                place_issued = $5,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&input.number)
        .bind(&input.doc_type)
        .bind(input.expiry_date)
        .bind(&input.place_issued)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an identity document
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_identity(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_identities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_identity(row: &sqlx::sqlite::SqliteRow) -> UserIdentity {
        UserIdentity {
            id: row.get("id"),
            user_id: row.get("user_id"),
            number: row.get("number"),
            doc_type: row.get("doc_type"),
            status: row.get("status"),
            expiry_date: row.get("expiry_date"),
            place_issued: row.get("place_issued"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
