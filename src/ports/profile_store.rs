//! ProfileStore port - where completed onboarding profiles are saved.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::profile::ProfileRecord;

/// Errors reported by a profile store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("Profile storage unavailable: {0}")]
    Unavailable(String),

    #[error("Stored profile is unreadable: {0}")]
    Corrupt(String),
}

/// Port for persisting candidate profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Saves the whole profile of `user_id`, replacing any previous one.
    async fn save_profile(
        &self,
        user_id: &UserId,
        profile: &ProfileRecord,
    ) -> Result<(), ProfileStoreError>;

    /// Loads the saved profile of `user_id`, if any.
    async fn load_profile(&self, user_id: &UserId)
        -> Result<Option<ProfileRecord>, ProfileStoreError>;
}
