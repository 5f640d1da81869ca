//! Storage adapters for the key-value port.
//!
//! - `InMemoryKeyValueStore` - process-local, for tests and ephemeral runs
//! - `FileKeyValueStore` - one JSON file per key under a data directory

mod file_key_value_store;
mod in_memory_key_value_store;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
