// ABOUTME: JWT-based user authentication and authorization system
// ABOUTME: Handles password hashing, token generation, and token validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Authentication and Session Management
//!
//! This module provides bcrypt password hashing and JWT-based session
//! tokens for the onboarding service. Token issuance is deliberately basic:
//! HS256 with a single shared secret.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Audience claim for tokens issued by this service
pub const TOKEN_AUDIENCE: &str = "onboarding-service";

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired { expired_at } => {
                write!(
                    f,
                    "JWT token expired at {}",
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

impl Claims {
    /// Parse the subject claim back into a user ID
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not a numeric user ID
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("Invalid subject claim: {e}"))
    }
}

/// Authentication manager for `JWT` tokens and password hashing
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub const fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Hash a password with bcrypt
    ///
    /// # Errors
    ///
    /// Returns an error if bcrypt hashing fails
    pub fn hash_password(password: &str) -> Result<String> {
        Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
    }

    /// Verify a password against a stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, password_hash)?)
    }

    /// Generate a `JWT` token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            aud: TOKEN_AUDIENCE.to_owned(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )?;

        Ok(token)
    }

    /// Validate a `JWT` token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Token signature is invalid
    /// - Token has expired
    /// - Token is malformed or the audience does not match
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_audience(&[TOKEN_AUDIENCE]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        )
        .map_err(|e| Self::convert_jwt_error(&e))?;

        Ok(token_data.claims)
    }

    /// Token expiry in hours, as configured
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::warn!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::ExpiredSignature => JwtValidationError::TokenExpired {
                expired_at: Utc::now(),
            },
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidAudience => JwtValidationError::TokenInvalid {
                reason: "Token audience does not match this service".into(),
            },
            _ => JwtValidationError::TokenMalformed {
                details: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 42,
            ..User::new(
                "ada@example.com".into(),
                "hash".into(),
                "Ada".into(),
                "Lovelace".into(),
            )
        }
    }

    fn test_manager() -> AuthManager {
        AuthManager::new(b"test-secret-for-auth-unit-tests".to_vec(), 24)
    }

    #[test]
    fn test_token_roundtrip() {
        let manager = test_manager();
        let token = manager.generate_token(&test_user()).unwrap();

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.aud, TOKEN_AUDIENCE);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let manager = test_manager();
        let token = manager.generate_token(&test_user()).unwrap();

        let other = AuthManager::new(b"a-completely-different-secret".to_vec(), 24);
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = AuthManager::new(b"test-secret-for-auth-unit-tests".to_vec(), -1);
        let token = manager.generate_token(&test_user()).unwrap();

        match test_manager().validate_token(&token) {
            Err(JwtValidationError::TokenExpired { .. }) => {}
            other => panic!("Expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn test_password_hashing() {
        let hash = AuthManager::hash_password("hunter2").unwrap();
        assert!(AuthManager::verify_password("hunter2", &hash).unwrap());
        assert!(!AuthManager::verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        match test_manager().validate_token("not-a-jwt") {
            Err(JwtValidationError::TokenMalformed { .. }) => {}
            other => panic!("Expected TokenMalformed, got {other:?}"),
        }
    }
}
