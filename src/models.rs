// ABOUTME: Core data models for the onboarding and volunteer service
// ABOUTME: Defines User, Request, VolunteerDetail and other fundamental data structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! This module contains the core data structures used throughout the
//! onboarding service.
//!
//! ## Design Principles
//!
//! - **Serializable**: All models support JSON serialization for the REST API
//! - **Type Safe**: Status and request-type columns are enums, not raw strings
//!
//! ## Core Models
//!
//! - `User`: a registered account moving through the onboarding pipeline
//! - `Request`: an approval request processed by admins (THE CORE workflow)
//! - `VolunteerDetail`: the record created when a verification is approved

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Well-known role names seeded at migration time.
///
/// The approval workflow resolves promotion targets by name rather than by
/// hardcoded numeric IDs.
pub mod role_names {
    /// Role granted when a registration request is approved
    pub const APPLICANT: &str = "applicant";
    /// Role granted when a verification request is approved
    pub const VOLUNTEER: &str = "volunteer";
    /// Role required for the admin request endpoints
    pub const ADMIN: &str = "admin";
}

/// User account status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Account registered but not yet through the approval pipeline
    #[default]
    Pending,
    /// Account active
    Active,
    /// Account deactivated by an admin
    Inactive,
}

impl UserStatus {
    /// Check if the user can log in
    #[must_use]
    pub const fn can_login(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(AppError::invalid_input(format!(
                "Invalid user status: {other}"
            ))),
        }
    }
}

/// Represents a registered user
///
/// Users start with no role; approval of their requests promotes them to
/// the `applicant` or `volunteer` role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: i64,
    /// Role this user holds, if any
    pub role_id: Option<i64>,
    /// Department the user belongs to, if any
    pub department_id: Option<i64>,
    /// User email address (unique, used for login)
    pub email: String,
    /// Hashed password for authentication (never serialized)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Gender ("male"/"female" in the application form)
    pub gender: Option<String>,
    /// Date of birth
    pub dob: Option<NaiveDate>,
    /// Mobile phone number
    pub mobile: Option<String>,
    /// Country of citizenship
    pub country_id: Option<i64>,
    /// Country of residence
    pub resident_country_id: Option<i64>,
    /// Avatar URL
    pub avatar: Option<String>,
    /// Whether identity verification has completed
    pub verification_status: i64,
    /// Account status
    pub status: UserStatus,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record for registration
    #[must_use]
    pub fn new(email: String, password_hash: String, name: String, surname: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            role_id: None,
            department_id: None,
            email,
            password_hash,
            name,
            surname,
            gender: None,
            dob: None,
            mobile: None,
            country_id: None,
            resident_country_id: None,
            avatar: None,
            verification_status: 0,
            status: UserStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A named role users can be promoted into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    /// Unique role name
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A department volunteers are assigned to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub status: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A country for citizenship/residency references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub status: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Type of an approval request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// First-stage onboarding; approval promotes the user to `applicant`
    Registration,
    /// Second-stage verification; approval promotes the user to `volunteer`
    /// and creates a volunteer-detail record
    Verification,
}

impl RequestType {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Verification => "verification",
        }
    }

    /// The role name this request type promotes a user into on approval
    #[must_use]
    pub const fn promoted_role(&self) -> &'static str {
        match self {
            Self::Registration => role_names::APPLICANT,
            Self::Verification => role_names::VOLUNTEER,
        }
    }
}

impl Display for RequestType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(Self::Registration),
            "verification" => Ok(Self::Verification),
            other => Err(AppError::invalid_input(format!(
                "Invalid request type: {other}"
            ))),
        }
    }
}

/// Lifecycle state of an approval request
///
/// A request leaves `pending` exactly once, into `approved` or `rejected`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting an admin decision
    #[default]
    Pending,
    /// Approved by an admin; side effects have been applied
    Approved,
    /// Rejected by an admin
    Rejected,
}

impl RequestStatus {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(AppError::invalid_input(format!(
                "Invalid request status: {other}"
            ))),
        }
    }
}

/// An approval request processed by the admin workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub id: i64,
    /// User this request belongs to
    pub user_id: i64,
    /// What kind of promotion the request asks for
    pub request_type: RequestType,
    /// Current lifecycle state
    pub status: RequestStatus,
    /// Notes attached when the request was rejected
    pub reject_notes: Option<String>,
    /// Admin who processed the request
    pub verifier_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    /// Whether the request can still be approved or rejected
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }
}

/// Volunteer detail record, created when a verification request is approved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerDetail {
    pub id: i64,
    /// User the detail belongs to (unique per user)
    pub user_id: i64,
    /// Department the volunteer is assigned to
    pub department_id: Option<i64>,
    pub status: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity document submitted by a user during verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub user_id: i64,
    /// Document number
    pub number: String,
    /// Document type (passport, national ID, ...)
    pub doc_type: String,
    pub status: i64,
    pub expiry_date: Option<NaiveDate>,
    pub place_issued: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_pending() {
        let user = User::new(
            "ada@example.com".into(),
            "hash".into(),
            "Ada".into(),
            "Lovelace".into(),
        );
        assert_eq!(user.status, UserStatus::Pending);
        assert!(user.role_id.is_none());
        assert!(user.status.can_login());
    }

    #[test]
    fn test_inactive_user_cannot_login() {
        assert!(!UserStatus::Inactive.can_login());
        assert!(UserStatus::Active.can_login());
    }

    #[test]
    fn test_request_type_roundtrip() {
        for ty in [RequestType::Registration, RequestType::Verification] {
            assert_eq!(ty.as_str().parse::<RequestType>().unwrap(), ty);
        }
        assert!("application form".parse::<RequestType>().is_err());
    }

    #[test]
    fn test_promoted_roles() {
        assert_eq!(RequestType::Registration.promoted_role(), "applicant");
        assert_eq!(RequestType::Verification.promoted_role(), "volunteer");
    }

    #[test]
    fn test_request_status_roundtrip() {
        for st in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(st.as_str().parse::<RequestStatus>().unwrap(), st);
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "ada@example.com".into(),
            "secret-hash".into(),
            "Ada".into(),
            "Lovelace".into(),
        );
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
