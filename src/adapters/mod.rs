//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Key-value stores (in-memory, one file per key)
//! - `auth` - Account store over the key-value port
//! - `profile` - Profile store over the key-value port
//! - `console` - Line-oriented front end standing in for the pages

pub mod auth;
pub mod console;
pub mod profile;
pub mod storage;

pub use auth::LocalAccountStore;
pub use console::ConsoleApp;
pub use profile::KeyValueProfileStore;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
