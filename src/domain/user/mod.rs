//! User module - accounts of the local user directory.
//!
//! Registration input is validated here; the directory itself lives behind
//! the `AccountStore` port.

mod account;
mod password;
mod registration;

pub use account::StoredAccount;
pub use password::PasswordDigest;
pub use registration::{normalize_email, Credentials, Registration};
