//! Profile persistence adapters.

mod key_value_profile_store;

pub use key_value_profile_store::{profile_key, KeyValueProfileStore, PROFILE_KEY_PREFIX};
