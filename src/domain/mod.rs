//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, statuses, auth types)
//! - `profile` - The candidate profile record and typed field updates
//! - `wizard` - Onboarding step sequence, validation rules and the wizard aggregate
//! - `user` - Accounts of the local user directory and password hashing
//! - `routing` - Route table and access policy

pub mod foundation;
pub mod profile;
pub mod routing;
pub mod user;
pub mod wizard;
