//! Wizard domain events.

use serde::{Deserialize, Serialize};

use super::step::WizardStep;
use crate::domain::foundation::{Timestamp, UserId, WizardId};
use crate::domain::profile::Section;

/// Events recorded by the [`Wizard`](super::Wizard) aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// A wizard was started with an empty profile.
    Started {
        wizard_id: WizardId,
        owner: UserId,
        started_at: Timestamp,
    },

    /// A field was written. The value itself is not carried.
    FieldUpdated {
        wizard_id: WizardId,
        section: Section,
        path: String,
    },

    /// The current step changed.
    StepChanged {
        wizard_id: WizardId,
        from: WizardStep,
        to: WizardStep,
    },

    /// A step failed validation on a navigation attempt.
    ValidationFailed {
        wizard_id: WizardId,
        step: WizardStep,
        errors: Vec<String>,
    },

    /// The profile was handed to the store.
    SubmissionStarted { wizard_id: WizardId },

    /// The store accepted the profile.
    SubmissionSucceeded { wizard_id: WizardId },

    /// The store rejected the profile; the wizard is editable again.
    SubmissionFailed { wizard_id: WizardId, reason: String },
}

impl WizardEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::Started { .. } => "wizard.started",
            WizardEvent::FieldUpdated { .. } => "wizard.field_updated",
            WizardEvent::StepChanged { .. } => "wizard.step_changed",
            WizardEvent::ValidationFailed { .. } => "wizard.validation_failed",
            WizardEvent::SubmissionStarted { .. } => "wizard.submission_started",
            WizardEvent::SubmissionSucceeded { .. } => "wizard.submission_succeeded",
            WizardEvent::SubmissionFailed { .. } => "wizard.submission_failed",
        }
    }
}
