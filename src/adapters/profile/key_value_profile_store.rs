//! Profile store backed by the key-value port.
//!
//! Each profile is a JSON blob under `worksable_profile_<userId>`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::profile::ProfileRecord;
use crate::ports::{KeyValueStore, ProfileStore, ProfileStoreError};

pub const PROFILE_KEY_PREFIX: &str = "worksable_profile_";

pub fn profile_key(user_id: &UserId) -> String {
    format!("{}{}", PROFILE_KEY_PREFIX, user_id.as_str())
}

pub struct KeyValueProfileStore {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueProfileStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileStore for KeyValueProfileStore {
    async fn save_profile(
        &self,
        user_id: &UserId,
        profile: &ProfileRecord,
    ) -> Result<(), ProfileStoreError> {
        let json = serde_json::to_string(profile)
            .map_err(|e| ProfileStoreError::Corrupt(e.to_string()))?;
        self.store
            .set(&profile_key(user_id), json)
            .await
            .map_err(|e| ProfileStoreError::Unavailable(e.to_string()))?;
        tracing::debug!(user_id = %user_id, "profile saved");
        Ok(())
    }

    async fn load_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        let raw = self
            .store
            .get(&profile_key(user_id))
            .await
            .map_err(|e| ProfileStoreError::Unavailable(e.to_string()))?;
        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| ProfileStoreError::Corrupt(e.to_string()))
        })
        .transpose()
    }
}
