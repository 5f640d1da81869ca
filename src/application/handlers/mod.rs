//! Application handlers.
//!
//! Account handlers talk to the `AccountStore` port; the onboarding session
//! owns one wizard and submits to the `ProfileStore` port.

pub mod auth;
pub mod onboarding;

pub use auth::{
    CurrentUserHandler, LoginCommand, LoginHandler, LoginResult, LogoutHandler, RegisterCommand,
    RegisterHandler, RegisterResult,
};
pub use onboarding::{OnboardingSession, SubmitProfileError, SubmitResult, WizardView};
