// ABOUTME: User management database operations
// ABOUTME: Handles user registration, profile updates, and account lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::Row;

use super::Database;
use crate::models::{User, UserStatus};

/// Profile fields an applicant can change after registration
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub mobile: Option<String>,
    pub country_id: Option<i64>,
    pub resident_country_id: Option<i64>,
    pub avatar: Option<String>,
    pub department_id: Option<i64>,
}

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                role_id INTEGER REFERENCES roles(id),
                department_id INTEGER REFERENCES departments(id),
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                surname TEXT NOT NULL,
                gender TEXT,
                dob DATE,
                mobile TEXT,
                country_id INTEGER REFERENCES countries(id),
                resident_country_id INTEGER REFERENCES countries(id),
                avatar TEXT,
                verification_status INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'active', 'inactive')),
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_role_id ON users(role_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a new user account
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already in use or the insert fails
    pub async fn create_user(&self, user: &User) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO users (email, password_hash, name, surname, gender, dob, mobile,
                               country_id, resident_country_id, avatar, department_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.gender)
        .bind(user.dob)
        .bind(&user.mobile)
        .bind(user.country_id)
        .bind(user.resident_country_id)
        .bind(&user.avatar)
        .bind(user.department_id)
        .bind(user.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Get a user by email address
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// List all users
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_user).collect()
    }

    /// Update an applicant's profile fields
    ///
    /// Only fields present in the update are changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_user_profile(
        &self,
        user_id: i64,
        update: &UserProfileUpdate,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE users SET
                name = COALESCE($2, name),
                surname = COALESCE($3, surname),
                gender = COALESCE($4, gender),
                dob = COALESCE($5, dob),
                mobile = COALESCE($6, mobile),
                country_id = COALESCE($7, country_id),
                resident_country_id = COALESCE($8, resident_country_id),
                avatar = COALESCE($9, avatar),
                department_id = COALESCE($10, department_id),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.surname)
        .bind(&update.gender)
        .bind(update.dob)
        .bind(&update.mobile)
        .bind(update.country_id)
        .bind(update.resident_country_id)
        .bind(&update.avatar)
        .bind(update.department_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Assign a role to a user directly
    ///
    /// The approval workflow promotes roles on its own; this is the manual
    /// path used for bootstrapping admins.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn set_user_role(&self, user_id: i64, role_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET role_id = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Update a user's account status
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_user_status(&self, user_id: i64, status: UserStatus) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET status = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
        )
        .bind(user_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user account
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_user(&self, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Convert a database row to a User struct
    pub(super) fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let status: String = row.get("status");

        Ok(User {
            id: row.get("id"),
            role_id: row.get("role_id"),
            department_id: row.get("department_id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            name: row.get("name"),
            surname: row.get("surname"),
            gender: row.get("gender"),
            dob: row.get("dob"),
            mobile: row.get("mobile"),
            country_id: row.get("country_id"),
            resident_country_id: row.get("resident_country_id"),
            avatar: row.get("avatar"),
            verification_status: row.get("verification_status"),
            status: UserStatus::from_str(&status)?,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}
