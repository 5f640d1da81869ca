//! CurrentUserHandler - Query handler for the signed-in user.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::routing::{RouteDecision, RouteGuard};
use crate::ports::AccountStore;

pub struct CurrentUserHandler {
    accounts: Arc<dyn AccountStore>,
}

impl CurrentUserHandler {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        self.accounts.current_user().await
    }

    /// The signed-in user, or `NotAuthenticated`.
    pub async fn require(&self) -> Result<AuthenticatedUser, AuthError> {
        self.handle().await?.ok_or(AuthError::NotAuthenticated)
    }

    /// Resolves `path` for whoever is signed in right now.
    pub async fn navigate(&self, path: &str) -> Result<RouteDecision, AuthError> {
        let user = self.handle().await?;
        let decision = RouteGuard::resolve(path, user.as_ref());
        tracing::debug!(path, ?decision, "route resolved");
        Ok(decision)
    }
}
