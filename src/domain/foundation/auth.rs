//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is the password-free record kept as the current
//! session. `AuthError` is what the account collaborator reports; every
//! variant maps to a message the front end can show next to a form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{UserId, ValidationError};

/// Which side of the platform an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// RQTH job seeker.
    Candidate,
    /// Inclusive employer.
    Recruiter,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Candidate => write!(f, "candidate"),
            UserRole::Recruiter => write!(f, "recruiter"),
        }
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "candidate" => Ok(UserRole::Candidate),
            "recruiter" | "employer" => Ok(UserRole::Recruiter),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// The logged-in user, as stored in the current-session entry.
///
/// Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(rename = "userType")]
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Returns true if the user is a candidate.
    pub fn is_candidate(&self) -> bool {
        self.role == UserRole::Candidate
    }
}

/// Errors reported by the account collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Registration attempted with an email that already has an account.
    #[error("Email already in use")]
    EmailAlreadyInUse,

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An operation required a logged-in user and there is none.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Registration input rejected before touching storage.
    #[error("Invalid registration: {0}")]
    InvalidRegistration(String),

    /// The backing store could not be read or written.
    #[error("Account storage unavailable: {0}")]
    Storage(String),
}

impl AuthError {
    /// Creates a storage error with a message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Returns true if retrying the same call might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::Storage(_))
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::InvalidRegistration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "Jean Dupont",
            "jean@x.fr",
            UserRole::Candidate,
        )
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Candidate".parse::<UserRole>().unwrap(), UserRole::Candidate);
        assert_eq!("RECRUITER".parse::<UserRole>().unwrap(), UserRole::Recruiter);
    }

    #[test]
    fn employer_is_an_alias_for_recruiter() {
        assert_eq!("employer".parse::<UserRole>().unwrap(), UserRole::Recruiter);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn session_record_uses_user_type_key() {
        let json = serde_json::to_value(test_user()).unwrap();
        assert_eq!(json["userType"], "candidate");
        assert_eq!(json["id"], "user-123");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn is_candidate_reflects_role() {
        assert!(test_user().is_candidate());
    }

    #[test]
    fn only_storage_errors_are_transient() {
        assert!(AuthError::storage("disk full").is_transient());
        assert!(!AuthError::InvalidCredentials.is_transient());
    }

    #[test]
    fn messages_are_user_presentable() {
        assert_eq!(AuthError::EmailAlreadyInUse.to_string(), "Email already in use");
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }
}
