// ABOUTME: Approval request database operations, the core admin workflow
// ABOUTME: Handles pending request listing, approval with role promotion, and rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::str::FromStr;

use anyhow::Result;
use sqlx::Row;
use tracing::info;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Request, RequestStatus, RequestType};

impl Database {
    /// Create the requests table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_requests(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS requests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                request_type TEXT NOT NULL CHECK (request_type IN ('registration', 'verification')),
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved', 'rejected')),
                reject_notes TEXT,
                verifier_id INTEGER REFERENCES users(id),
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_requests_status ON requests(status)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_requests_user_id ON requests(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a new pending request for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_request(&self, user_id: i64, request_type: RequestType) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO requests (user_id, request_type) VALUES ($1, $2)")
                .bind(user_id)
                .bind(request_type.as_str())
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a request by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_request(&self, request_id: i64) -> Result<Option<Request>> {
        let row = sqlx::query("SELECT * FROM requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    /// Get a request by ID only if it is still pending
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_pending_request(&self, request_id: i64) -> Result<Option<Request>> {
        let row = sqlx::query("SELECT * FROM requests WHERE id = $1 AND status = 'pending'")
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    /// List all requests, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_requests(&self) -> Result<Vec<Request>> {
        let rows = sqlx::query("SELECT * FROM requests ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// List only pending requests, oldest first so admins work a queue
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_pending_requests(&self) -> Result<Vec<Request>> {
        let rows = sqlx::query(
            "SELECT * FROM requests WHERE status = 'pending' ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// List requests belonging to a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_requests_for_user(&self, user_id: i64) -> Result<Vec<Request>> {
        let rows = sqlx::query("SELECT * FROM requests WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// Approve a pending request and apply its side effects atomically
    ///
    /// Approval promotes the requesting user into the role the request type
    /// maps to. For verification requests a volunteer-detail record is also
    /// created. All writes happen in one transaction; a failure leaves the
    /// request pending.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request does not exist (`ResourceNotFound`)
    /// - The request is not pending (`InvalidState`)
    /// - The target role is missing or a write fails
    pub async fn approve_request(&self, request_id: i64, verifier_id: i64) -> AppResult<Request> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT * FROM requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(&mut *tx)
            .await?;

        let request = row
            .as_ref()
            .map(Self::row_to_request)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id}")))?;

        if !request.is_pending() {
            return Err(AppError::invalid_state(format!(
                "Request {request_id} is already {}",
                request.status
            )));
        }

        let role_name = request.request_type.promoted_role();
        let role_row = sqlx::query("SELECT id FROM roles WHERE name = $1")
            .bind(role_name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::internal(format!("Role '{role_name}' is not seeded")))?;
        let role_id: i64 = role_row.get("id");

        // Guarded transition: a concurrent decision that committed first
        // leaves zero rows to update, and this approval must not proceed.
        let result = sqlx::query(
            r"
            UPDATE requests SET
                status = 'approved',
                verifier_id = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(request_id)
        .bind(verifier_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::invalid_state(format!(
                "Request {request_id} was already decided"
            )));
        }

        sqlx::query(
            r"
            UPDATE users SET
                role_id = $2,
                status = 'active',
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(request.user_id)
        .bind(role_id)
        .execute(&mut *tx)
        .await?;

        if request.request_type == RequestType::Verification {
            sqlx::query(
                r"
                UPDATE users SET verification_status = 1 WHERE id = $1
                ",
            )
            .bind(request.user_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r"
                INSERT INTO volunteer_details (user_id, department_id)
                SELECT id, department_id FROM users WHERE id = $1
                ON CONFLICT(user_id) DO NOTHING
                ",
            )
            .bind(request.user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            request_id = request_id,
            user_id = request.user_id,
            request_type = %request.request_type,
            role = role_name,
            "Request approved"
        );

        self.get_request(request_id)
            .await?
            .ok_or_else(|| AppError::internal("Approved request vanished"))
    }

    /// Reject a pending request, optionally recording notes
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request does not exist (`ResourceNotFound`)
    /// - The request is not pending (`InvalidState`)
    /// - The update fails
    pub async fn reject_request(
        &self,
        request_id: i64,
        verifier_id: i64,
        notes: Option<&str>,
    ) -> AppResult<Request> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT * FROM requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(&mut *tx)
            .await?;

        let request = row
            .as_ref()
            .map(Self::row_to_request)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id}")))?;

        if !request.is_pending() {
            return Err(AppError::invalid_state(format!(
                "Request {request_id} is already {}",
                request.status
            )));
        }

        let result = sqlx::query(
            r"
            UPDATE requests SET
                status = 'rejected',
                verifier_id = $2,
                reject_notes = COALESCE($3, reject_notes),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(request_id)
        .bind(verifier_id)
        .bind(notes)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::invalid_state(format!(
                "Request {request_id} was already decided"
            )));
        }

        tx.commit().await?;

        info!(request_id = request_id, user_id = request.user_id, "Request rejected");

        self.get_request(request_id)
            .await?
            .ok_or_else(|| AppError::internal("Rejected request vanished"))
    }

    /// Attach or replace rejection notes on an already-rejected request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request does not exist (`ResourceNotFound`)
    /// - The request is not rejected (`InvalidState`)
    /// - The update fails
    pub async fn add_reject_notes(&self, request_id: i64, notes: &str) -> AppResult<Request> {
        let request = self
            .get_request(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id}")))?;

        if request.status != RequestStatus::Rejected {
            return Err(AppError::invalid_state(format!(
                "Request {request_id} is {}, notes can only be added to rejected requests",
                request.status
            )));
        }

        sqlx::query(
            r"
            UPDATE requests SET
                reject_notes = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(request_id)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        self.get_request(request_id)
            .await?
            .ok_or_else(|| AppError::internal("Annotated request vanished"))
    }

    /// Delete a request
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_request(&self, request_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(request_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Convert a database row to a Request struct
    fn row_to_request(row: &sqlx::sqlite::SqliteRow) -> Result<Request> {
        let request_type: String = row.get("request_type");
        let status: String = row.get("status");

        Ok(Request {
            id: row.get("id"),
            user_id: row.get("user_id"),
            request_type: RequestType::from_str(&request_type)?,
            status: RequestStatus::from_str(&status)?,
            reject_notes: row.get("reject_notes"),
            verifier_id: row.get("verifier_id"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}
