//! Authentication adapters.
//!
//! - `LocalAccountStore` - user directory and current session kept in a
//!   `KeyValueStore`, with Argon2 password hashes

mod local_account_store;

pub use local_account_store::{LocalAccountStore, CURRENT_USER_KEY, USERS_KEY};
