//! Onboarding wizard session.

mod session;

pub use session::{OnboardingSession, SubmitProfileError, SubmitResult, WizardView};
