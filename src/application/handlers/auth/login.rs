//! LoginHandler - Command handler for signing in.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::routing::Route;
use crate::domain::user::Credentials;
use crate::ports::AccountStore;

/// Command to sign in.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: SecretString,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: AuthenticatedUser,
    pub redirect_to: Route,
}

/// Handler for sign-ins.
pub struct LoginHandler {
    accounts: Arc<dyn AccountStore>,
}

impl LoginHandler {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthError> {
        let user = match self
            .accounts
            .login(Credentials::new(cmd.email, cmd.password))
            .await
        {
            Ok(user) => user,
            Err(err) => {
                tracing::info!(error = %err, "sign-in rejected");
                return Err(err);
            }
        };
        tracing::info!(user_id = %user.id, "signed in");

        Ok(LoginResult {
            redirect_to: Route::dashboard_for(user.role),
            user,
        })
    }
}
