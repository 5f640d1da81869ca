//! LogoutHandler - ends the current session.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::routing::HOME_PATH;
use crate::ports::AccountStore;

pub struct LogoutHandler {
    accounts: Arc<dyn AccountStore>,
}

impl LogoutHandler {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Signs out and returns the path to redirect to.
    pub async fn handle(&self) -> Result<&'static str, AuthError> {
        self.accounts.logout().await?;
        tracing::info!("signed out");
        Ok(HOME_PATH)
    }
}
