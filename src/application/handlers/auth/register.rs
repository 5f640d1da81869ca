//! RegisterHandler - Command handler for signing up.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserRole};
use crate::domain::routing::Route;
use crate::domain::user::Registration;
use crate::ports::AccountStore;

/// Command to create an account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: UserRole,
}

/// Result of a successful registration. The new account is signed in.
#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user: AuthenticatedUser,
    pub redirect_to: Route,
}

/// Handler for registrations.
pub struct RegisterHandler {
    accounts: Arc<dyn AccountStore>,
}

impl RegisterHandler {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterResult, AuthError> {
        let registration = Registration::new(cmd.name, cmd.email, cmd.password, cmd.role);
        registration.validate()?;

        let user = self.accounts.register(registration).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "account registered");

        Ok(RegisterResult {
            redirect_to: Route::dashboard_for(user.role),
            user,
        })
    }
}
