//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `KeyValueStore` - Flat string storage (browser-storage style blobs)
//! - `AccountStore` - Registration, sign-in and the current session
//! - `ProfileStore` - Persistence of completed onboarding profiles

mod account_store;
mod key_value_store;
mod profile_store;

pub use account_store::AccountStore;
pub use key_value_store::{KeyValueStore, StorageError};
pub use profile_store::{ProfileStore, ProfileStoreError};
