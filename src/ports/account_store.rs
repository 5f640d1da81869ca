//! AccountStore port - the session/auth collaborator.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::user::{Credentials, Registration};

/// Registration, sign-in and the current session.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// - `InvalidRegistration` if the input is incomplete
    /// - `EmailAlreadyInUse` if the email (case-insensitive) has an account
    async fn register(&self, registration: Registration) -> Result<AuthenticatedUser, AuthError>;

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for an unknown email or a wrong password
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AuthError>;

    /// Clears the current session. Succeeds when nobody is signed in.
    async fn logout(&self) -> Result<(), AuthError>;

    /// The signed-in user, if any.
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError>;
}
