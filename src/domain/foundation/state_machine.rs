//! Lifecycle transitions for status enums.

use super::ValidationError;

/// A status enum with a fixed transition table.
///
/// `WizardStatus` is the one implementor; aggregates call `transition_to`
/// and map the error into their own error type.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every status reachable in one step from `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "status",
                format!("{:?} cannot move to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    /// No way out.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
