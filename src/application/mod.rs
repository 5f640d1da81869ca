//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Nothing here knows how accounts or profiles are stored.

pub mod handlers;

pub use handlers::{
    CurrentUserHandler, LoginCommand, LoginHandler, LoginResult, LogoutHandler, OnboardingSession,
    RegisterCommand, RegisterHandler, RegisterResult, SubmitProfileError, SubmitResult, WizardView,
};
