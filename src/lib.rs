//! Worksable - onboarding for an inclusive IT job-matching platform
//!
//! This crate implements the candidate onboarding wizard (a four-step form
//! over a typed profile record), the account store it runs behind, and the
//! route access policy that gates it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
