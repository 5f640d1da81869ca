//! OnboardingSession - one candidate's wizard plus the store it submits to.
//!
//! The wizard itself is synchronous. The only suspension point is the save
//! inside [`OnboardingSession::submit`], and the lock is not held across it:
//! the wizard is marked busy first so that a second submit, or any edit,
//! is rejected until the save resolves.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, WizardStatus};
use crate::domain::profile::{ProfileRecord, Section};
use crate::domain::routing::Route;
use crate::domain::wizard::{
    StepDescriptor, Wizard, WizardEvent, WizardProgress, WizardStep, SUBMIT_FAILED_MESSAGE,
};
use crate::ports::{ProfileStore, ProfileStoreError};

/// Everything a renderer needs to draw the active step.
#[derive(Debug, Clone)]
pub struct WizardView {
    pub step: StepDescriptor,
    pub progress: WizardProgress,
    pub status: WizardStatus,
    /// Recomputed on every call; drives the Next control.
    pub can_advance: bool,
    pub busy: bool,
    pub errors: Vec<String>,
    pub submit_error: Option<String>,
    pub profile: ProfileRecord,
}

/// Result of an accepted submission.
#[derive(Debug, Clone)]
pub struct SubmitResult {
    pub profile: ProfileRecord,
    pub redirect_to: Route,
}

/// Why a submission did not complete.
#[derive(Debug, thiserror::Error)]
pub enum SubmitProfileError {
    /// The wizard refused before calling the store (incomplete, busy, done).
    #[error("{0}")]
    Rejected(DomainError),

    /// The store failed; the wizard is editable again.
    #[error("{}", SUBMIT_FAILED_MESSAGE)]
    SaveFailed(#[source] ProfileStoreError),
}

impl SubmitProfileError {
    /// Returns true if another submission was already in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitProfileError::Rejected(e) if e.code == ErrorCode::SubmissionInProgress)
    }
}

pub struct OnboardingSession {
    owner: AuthenticatedUser,
    wizard: Mutex<Wizard>,
    profiles: Arc<dyn ProfileStore>,
}

impl OnboardingSession {
    /// Starts a wizard with an empty profile for `owner`.
    pub fn start(owner: AuthenticatedUser, profiles: Arc<dyn ProfileStore>) -> Self {
        let mut wizard = Wizard::new(owner.id.clone());
        log_events(wizard.take_events());
        Self {
            owner,
            wizard: Mutex::new(wizard),
            profiles,
        }
    }

    pub fn owner(&self) -> &AuthenticatedUser {
        &self.owner
    }

    pub async fn view(&self) -> WizardView {
        let wizard = self.wizard.lock().await;
        let step = wizard.current_step();
        WizardView {
            step: step.descriptor(),
            progress: wizard.progress(),
            status: wizard.status(),
            can_advance: wizard.can_advance(),
            busy: wizard.is_busy(),
            errors: wizard.errors_for(step.section()).to_vec(),
            submit_error: wizard.submit_error().map(str::to_string),
            profile: wizard.profile().clone(),
        }
    }

    /// Runs `op` against the wizard and logs the events it produced.
    pub async fn edit<T>(
        &self,
        op: impl FnOnce(&mut Wizard) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut wizard = self.wizard.lock().await;
        let out = op(&mut wizard);
        log_events(wizard.take_events());
        out
    }

    pub async fn set_field(&self, section: Section, path: &str, value: Value) -> Result<(), DomainError> {
        self.edit(|w| w.set_field(section, path, value)).await
    }

    pub async fn next(&self) -> Result<bool, DomainError> {
        self.edit(Wizard::next).await
    }

    pub async fn previous(&self) -> Result<bool, DomainError> {
        self.edit(Wizard::previous).await
    }

    pub async fn jump_to_step(&self, target: WizardStep) -> Result<bool, DomainError> {
        self.edit(|w| w.jump_to_step(target)).await
    }

    /// Validates every step, hands the profile to the store and, on success,
    /// returns the dashboard to redirect to.
    ///
    /// At most one submission is outstanding per session; a concurrent call
    /// fails with `SubmissionInProgress` without touching the store.
    pub async fn submit(&self) -> Result<SubmitResult, SubmitProfileError> {
        let snapshot = self
            .edit(Wizard::begin_submit)
            .await
            .map_err(SubmitProfileError::Rejected)?;

        let pending = PendingSubmit {
            wizard: &self.wizard,
            armed: true,
        };
        let saved = self.profiles.save_profile(&self.owner.id, &snapshot).await;
        if let Err(err) = &saved {
            tracing::error!(user_id = %self.owner.id, error = %err, "profile save failed");
        }

        let outcome = saved.as_ref().map(|_| ()).map_err(|e| e.to_string());
        let elapsed = self
            .edit(|w| {
                w.finish_submit(outcome)?;
                Ok(w.updated_at().since(&w.created_at()))
            })
            .await;
        pending.disarm();
        let elapsed = elapsed.map_err(SubmitProfileError::Rejected)?;

        match saved {
            Ok(()) => {
                tracing::info!(
                    user_id = %self.owner.id,
                    elapsed_secs = elapsed.num_seconds(),
                    "onboarding completed"
                );
                Ok(SubmitResult {
                    profile: snapshot,
                    redirect_to: Route::dashboard_for(self.owner.role),
                })
            }
            Err(err) => Err(SubmitProfileError::SaveFailed(err)),
        }
    }
}

/// Returns the wizard to editing when a submit is dropped or unwinds
/// before the save outcome is recorded.
struct PendingSubmit<'a> {
    wizard: &'a Mutex<Wizard>,
    armed: bool,
}

impl PendingSubmit<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(mut wizard) = self.wizard.try_lock() else {
            tracing::warn!("abandoned submit could not reset a locked wizard");
            return;
        };
        if let Err(err) = wizard.finish_submit(Err("save abandoned".to_string())) {
            tracing::warn!(error = %err.message, "abandoned submit left wizard unchanged");
        }
        log_events(wizard.take_events());
    }
}

fn log_events(events: Vec<WizardEvent>) {
    for event in events {
        match &event {
            WizardEvent::ValidationFailed { step, errors, .. } => {
                tracing::debug!(event = event.name(), step = %step, ?errors);
            }
            WizardEvent::SubmissionFailed { reason, .. } => {
                tracing::warn!(event = event.name(), reason = %reason);
            }
            WizardEvent::FieldUpdated { section, path, .. } => {
                tracing::trace!(event = event.name(), section = %section, path = %path);
            }
            _ => tracing::debug!(event = event.name()),
        }
    }
}
