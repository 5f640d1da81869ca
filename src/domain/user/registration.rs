//! Registration and login input.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{AuthError, UserRole};

/// Lower-cased, trimmed email used for lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Input of the sign-up form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: UserRole,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: SecretString,
        role: UserRole,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password,
            role,
        }
    }

    /// Checks the input before any storage access.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::InvalidRegistration("Name is required".to_string()));
        }
        if !is_plausible_email(&self.email) {
            return Err(AuthError::InvalidRegistration(
                "A valid email is required".to_string(),
            ));
        }
        if self.password.expose_secret().is_empty() {
            return Err(AuthError::InvalidRegistration(
                "Password is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input of the sign-in form.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

/// One `@` with a non-empty local part and a dotted domain.
fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
            .unwrap_or(false)
}
