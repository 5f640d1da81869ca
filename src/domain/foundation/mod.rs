//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Worksable domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;
mod wizard_status;

pub use auth::{AuthError, AuthenticatedUser, UserRole};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ArrangementId, CertificationId, ExperienceId, SkillId, UserId, WizardId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use wizard_status::WizardStatus;
