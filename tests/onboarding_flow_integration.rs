//! Integration tests for the candidate onboarding flow.
//!
//! These tests drive the wizard through the application layer:
//! 1. Step-by-step navigation gated by validation
//! 2. Submission handing the profile to the store exactly once
//! 3. The busy gate rejecting a second submit while a save is pending
//! 4. Recovery after a failed save

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock, Semaphore};

use worksable::application::{OnboardingSession, SubmitProfileError};
use worksable::domain::foundation::{AuthenticatedUser, ErrorCode, UserId, UserRole, WizardStatus};
use worksable::domain::profile::{ProfileRecord, Section};
use worksable::domain::routing::Route;
use worksable::domain::wizard::{validation, Wizard, WizardStep, SUBMIT_FAILED_MESSAGE};
use worksable::ports::{ProfileStore, ProfileStoreError};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Profile store whose saves block until released.
struct GatedProfileStore {
    calls: AtomicUsize,
    entered: Notify,
    gate: Semaphore,
    saved: RwLock<Vec<ProfileRecord>>,
}

impl GatedProfileStore {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            gate: Semaphore::new(0),
            saved: RwLock::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl ProfileStore for GatedProfileStore {
    async fn save_profile(
        &self,
        _user_id: &UserId,
        profile: &ProfileRecord,
    ) -> Result<(), ProfileStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| ProfileStoreError::Unavailable(e.to_string()))?;
        permit.forget();
        self.saved.write().await.push(profile.clone());
        Ok(())
    }

    async fn load_profile(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        Ok(self.saved.read().await.last().cloned())
    }
}

/// Profile store that fails the first `failures` saves.
struct FlakyProfileStore {
    failures: AtomicUsize,
    calls: AtomicUsize,
}

#[async_trait]
impl ProfileStore for FlakyProfileStore {
    async fn save_profile(
        &self,
        _user_id: &UserId,
        _profile: &ProfileRecord,
    ) -> Result<(), ProfileStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let left = self.failures.load(Ordering::SeqCst);
        if left > 0 {
            self.failures.store(left - 1, Ordering::SeqCst);
            return Err(ProfileStoreError::Unavailable("connection reset".to_string()));
        }
        Ok(())
    }

    async fn load_profile(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        Ok(None)
    }
}

fn candidate() -> AuthenticatedUser {
    AuthenticatedUser::new(
        UserId::new("candidate-1").unwrap(),
        "Jean Dupont",
        "jean@x.fr",
        UserRole::Candidate,
    )
}

async fn fill_steps_one_to_three(session: &OnboardingSession) {
    session.set_field(Section::PersonalInfo, "firstName", json!("Jean")).await.unwrap();
    session.set_field(Section::PersonalInfo, "lastName", json!("Dupont")).await.unwrap();
    session.set_field(Section::PersonalInfo, "email", json!("jean@x.fr")).await.unwrap();
    assert!(session.next().await.unwrap());

    session.set_field(Section::HealthInfo, "disabilityType", json!(["auditory"])).await.unwrap();
    assert!(session.next().await.unwrap());

    session.set_field(Section::Schedule, "workHours.preferred.start", json!("09:00")).await.unwrap();
    session.set_field(Section::Schedule, "workHours.preferred.end", json!("17:00")).await.unwrap();
    assert!(session.next().await.unwrap());
}

async fn add_react(session: &OnboardingSession) {
    session
        .set_field(
            Section::Professional,
            "skills",
            json!([{ "id": "1", "name": "React", "level": "avancé" }]),
        )
        .await
        .unwrap();
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn empty_profile_blocks_first_step() {
    let mut wizard = Wizard::new(UserId::new("u").unwrap());

    assert!(!wizard.next().unwrap());
    assert_eq!(wizard.current_index(), 1);
    assert_eq!(
        wizard.errors_for(Section::PersonalInfo),
        &[
            validation::FIRST_NAME_REQUIRED.to_string(),
            validation::LAST_NAME_REQUIRED.to_string(),
            validation::EMAIL_REQUIRED.to_string(),
        ]
    );
}

#[test]
fn filled_first_step_advances_without_error() {
    let mut wizard = Wizard::new(UserId::new("u").unwrap());
    wizard.set_field(Section::PersonalInfo, "firstName", json!("Jean")).unwrap();
    wizard.set_field(Section::PersonalInfo, "lastName", json!("Dupont")).unwrap();
    wizard.set_field(Section::PersonalInfo, "email", json!("jean@x.fr")).unwrap();

    assert!(wizard.next().unwrap());
    assert_eq!(wizard.current_index(), 2);
    assert!(wizard.errors_for(Section::PersonalInfo).is_empty());
}

#[test]
fn empty_disability_type_blocks_until_a_tag_is_added() {
    let mut wizard = Wizard::new(UserId::new("u").unwrap());
    wizard.set_field(Section::PersonalInfo, "firstName", json!("Jean")).unwrap();
    wizard.set_field(Section::PersonalInfo, "lastName", json!("Dupont")).unwrap();
    wizard.set_field(Section::PersonalInfo, "email", json!("jean@x.fr")).unwrap();
    wizard.next().unwrap();

    wizard.set_field(Section::HealthInfo, "disabilityType", json!([])).unwrap();
    assert!(!wizard.next().unwrap());
    assert_eq!(wizard.current_step(), WizardStep::RqthSituation);

    wizard.set_field(Section::HealthInfo, "disabilityType", json!(["motor"])).unwrap();
    assert!(wizard.next().unwrap());
    assert_eq!(wizard.current_step(), WizardStep::WorkPreferences);
}

#[test]
fn back_is_always_allowed() {
    let mut wizard = Wizard::new(UserId::new("u").unwrap());
    wizard.set_field(Section::PersonalInfo, "firstName", json!("Jean")).unwrap();
    wizard.set_field(Section::PersonalInfo, "lastName", json!("Dupont")).unwrap();
    wizard.set_field(Section::PersonalInfo, "email", json!("jean@x.fr")).unwrap();
    wizard.next().unwrap();

    // Invalidate the step we are going back to; it must not matter.
    wizard.set_field(Section::PersonalInfo, "email", json!("")).unwrap();
    assert!(wizard.previous().unwrap());
    assert_eq!(wizard.current_index(), 1);
    assert!(!wizard.previous().unwrap());
    assert_eq!(wizard.current_index(), 1);
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn submit_without_skill_never_reaches_store() {
    let store = Arc::new(FlakyProfileStore {
        failures: AtomicUsize::new(0),
        calls: AtomicUsize::new(0),
    });
    let session = OnboardingSession::start(candidate(), store.clone());
    fill_steps_one_to_three(&session).await;

    let err = session.submit().await.unwrap_err();
    match err {
        SubmitProfileError::Rejected(e) => assert_eq!(e.code, ErrorCode::StepIncomplete),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);

    add_react(&session).await;
    let result = session.submit().await.unwrap();
    assert_eq!(result.redirect_to, Route::Dashboard);
    assert_eq!(result.profile.professional.skills[0].name, "React");
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_submits_save_exactly_once() {
    let store = Arc::new(GatedProfileStore::new());
    let session = Arc::new(OnboardingSession::start(candidate(), store.clone()));
    fill_steps_one_to_three(&session).await;
    add_react(&session).await;

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.submit().await })
    };
    store.wait_until_entered().await;

    let view = session.view().await;
    assert!(view.busy);
    assert_eq!(view.status, WizardStatus::Submitting);

    let second = session.submit().await.unwrap_err();
    assert!(second.is_busy());

    let edit = session
        .set_field(Section::PersonalInfo, "city", json!("Lyon"))
        .await
        .unwrap_err();
    assert_eq!(edit.code, ErrorCode::SubmissionInProgress);

    store.release();
    let first = first.await.unwrap().unwrap();

    assert_eq!(store.calls(), 1);
    assert_eq!(first.redirect_to, Route::Dashboard);
    assert_eq!(session.view().await.status, WizardStatus::Completed);
    assert_eq!(
        store.load_profile(&candidate().id).await.unwrap(),
        Some(first.profile)
    );
}

#[tokio::test]
async fn failed_save_can_be_resubmitted() {
    let store = Arc::new(FlakyProfileStore {
        failures: AtomicUsize::new(1),
        calls: AtomicUsize::new(0),
    });
    let session = OnboardingSession::start(candidate(), store.clone());
    fill_steps_one_to_three(&session).await;
    add_react(&session).await;

    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, SubmitProfileError::SaveFailed(_)));

    let view = session.view().await;
    assert_eq!(view.status, WizardStatus::Editing);
    assert_eq!(view.submit_error.as_deref(), Some(SUBMIT_FAILED_MESSAGE));
    assert_eq!(view.profile.personal_info.first_name, "Jean");

    session.submit().await.unwrap();
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    assert!(session.view().await.submit_error.is_none());

    let again = session.submit().await.unwrap_err();
    assert!(matches!(again, SubmitProfileError::Rejected(ref e) if e.code == ErrorCode::WizardCompleted));
}
