//! WizardStatus enum for tracking the lifecycle of an onboarding wizard.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of an onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStatus {
    /// Fields can be edited and steps navigated.
    #[default]
    Editing,
    /// A save is in flight; the submit control must stay disabled.
    Submitting,
    /// The profile was handed off successfully.
    Completed,
}

impl WizardStatus {
    /// Returns true if profile fields can be modified.
    pub fn is_mutable(&self) -> bool {
        matches!(self, WizardStatus::Editing)
    }

    /// Returns true while a submission is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, WizardStatus::Submitting)
    }
}

impl StateMachine for WizardStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WizardStatus::*;
        matches!(
            (self, target),
            (Editing, Submitting) | (Submitting, Editing) | (Submitting, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WizardStatus::*;
        match self {
            Editing => vec![Submitting],
            Submitting => vec![Editing, Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for WizardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WizardStatus::Editing => "Editing",
            WizardStatus::Submitting => "Submitting",
            WizardStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}
