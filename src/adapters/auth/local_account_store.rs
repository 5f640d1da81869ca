//! Local account store.
//!
//! Keeps the user directory as a JSON array under `worksable_users` and the
//! signed-in user (without credentials) under `worksable_current_user`, both
//! in a [`KeyValueStore`]. Passwords are stored as Argon2 hashes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::user::{Credentials, PasswordDigest, Registration, StoredAccount};
use crate::ports::{AccountStore, KeyValueStore};

pub const USERS_KEY: &str = "worksable_users";
pub const CURRENT_USER_KEY: &str = "worksable_current_user";

enum Directory {
    Loaded(Vec<StoredAccount>),
    Unreadable(String),
}

/// Account store backed by a key-value store.
pub struct LocalAccountStore {
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write cycles on the directory.
    directory_lock: Mutex<()>,
}

impl LocalAccountStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            directory_lock: Mutex::new(()),
        }
    }

    /// Reads the directory. A missing key is an empty directory.
    async fn load_directory(&self) -> Result<Directory, AuthError> {
        let raw = self
            .store
            .get(USERS_KEY)
            .await
            .map_err(|e| AuthError::storage(e.to_string()))?;
        Ok(match raw {
            None => Directory::Loaded(Vec::new()),
            Some(json) => match serde_json::from_str(&json) {
                Ok(accounts) => Directory::Loaded(accounts),
                Err(e) => Directory::Unreadable(e.to_string()),
            },
        })
    }

    async fn save_directory(&self, accounts: &[StoredAccount]) -> Result<(), AuthError> {
        let json =
            serde_json::to_string(accounts).map_err(|e| AuthError::storage(e.to_string()))?;
        self.store
            .set(USERS_KEY, json)
            .await
            .map_err(|e| AuthError::storage(e.to_string()))
    }

    async fn set_current(&self, user: &AuthenticatedUser) -> Result<(), AuthError> {
        let json = serde_json::to_string(user).map_err(|e| AuthError::storage(e.to_string()))?;
        self.store
            .set(CURRENT_USER_KEY, json)
            .await
            .map_err(|e| AuthError::storage(e.to_string()))
    }
}

#[async_trait]
impl AccountStore for LocalAccountStore {
    async fn register(&self, registration: Registration) -> Result<AuthenticatedUser, AuthError> {
        registration.validate()?;

        let _guard = self.directory_lock.lock().await;
        let mut accounts = match self.load_directory().await? {
            Directory::Loaded(accounts) => accounts,
            Directory::Unreadable(reason) => {
                tracing::error!(%reason, "refusing to overwrite unreadable user directory");
                return Err(AuthError::storage(format!(
                    "user directory is unreadable: {}",
                    reason
                )));
            }
        };
        if accounts.iter().any(|a| a.has_email(&registration.email)) {
            tracing::info!(role = %registration.role, "registration rejected: email already in use");
            return Err(AuthError::EmailAlreadyInUse);
        }

        let Registration {
            name,
            email,
            password,
            role,
        } = registration;
        let digest = tokio::task::spawn_blocking(move || PasswordDigest::hash(&password))
            .await
            .map_err(|e| AuthError::storage(format!("password hashing task failed: {}", e)))??;

        let account = StoredAccount::new(name.trim(), email.trim(), role, digest);
        let user = account.to_user();
        accounts.push(account);
        self.save_directory(&accounts).await?;
        self.set_current(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AuthError> {
        let accounts = match self.load_directory().await? {
            Directory::Loaded(accounts) => accounts,
            Directory::Unreadable(reason) => {
                tracing::warn!(%reason, "treating unreadable user directory as empty");
                Vec::new()
            }
        };

        let Some(account) = accounts
            .into_iter()
            .find(|a| a.has_email(&credentials.email))
        else {
            tracing::info!("login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let digest = account.password_hash.clone();
        let password = credentials.password;
        let matches = tokio::task::spawn_blocking(move || digest.verify(&password))
            .await
            .map_err(|e| AuthError::storage(format!("password check task failed: {}", e)))?;
        if !matches {
            tracing::info!(user_id = %account.id, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let user = account.to_user();
        self.set_current(&user).await?;
        tracing::info!(user_id = %user.id, "user signed in");
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let removed = self
            .store
            .remove(CURRENT_USER_KEY)
            .await
            .map_err(|e| AuthError::storage(e.to_string()))?;
        if removed {
            tracing::info!("user signed out");
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        let raw = self
            .store
            .get(CURRENT_USER_KEY)
            .await
            .map_err(|e| AuthError::storage(e.to_string()))?;
        let Some(json) = raw else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable session entry");
                Ok(None)
            }
        }
    }
}
