//! WizardProgress value object - step indicator state for renderers.

use serde::Serialize;

use super::step::{StepDescriptor, StepSequence, WizardStep};

/// Display state of one step in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

/// A read-only snapshot of how far the user is through the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardProgress {
    current: WizardStep,
}

impl WizardProgress {
    pub fn new(current: WizardStep) -> Self {
        Self { current }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Percentage of steps reached, the current one included (25, 50, 75, 100).
    pub fn percent(&self) -> u8 {
        ((self.current.index() * 100) / StepSequence::count()) as u8
    }

    pub fn state_of(&self, step: WizardStep) -> StepState {
        if step == self.current {
            StepState::Active
        } else if StepSequence::is_before(step, self.current) {
            StepState::Completed
        } else {
            StepState::Upcoming
        }
    }

    /// Every step with its indicator state, in order.
    pub fn indicators(&self) -> Vec<(StepDescriptor, StepState)> {
        StepSequence::all()
            .iter()
            .map(|step| (step.descriptor(), self.state_of(*step)))
            .collect()
    }
}
