//! Wizard module - the multi-step onboarding engine.
//!
//! Steps are data ([`StepSequence`], [`StepDescriptor`]) and each one is
//! bound to a profile section and a rule set in [`validation`].

mod aggregate;
mod events;
mod progress;
mod step;
pub mod validation;

#[cfg(test)]
mod properties;

pub use aggregate::{Wizard, SUBMIT_FAILED_MESSAGE};
pub use events::WizardEvent;
pub use progress::{StepState, WizardProgress};
pub use step::{StepDescriptor, StepSequence, WizardStep};
