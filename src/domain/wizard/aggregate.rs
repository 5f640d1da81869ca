//! Wizard aggregate - the onboarding form state machine.
//!
//! A Wizard owns one [`ProfileRecord`] for the duration of an onboarding
//! session. It applies field writes, gates forward navigation on the current
//! step's rules and drives the two-phase submission
//! ([`begin_submit`](Wizard::begin_submit) / [`finish_submit`](Wizard::finish_submit))
//! whose asynchronous middle part lives in the application layer.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::foundation::{
    ArrangementId, CertificationId, DomainError, ErrorCode, ExperienceId, SkillId, StateMachine,
    Timestamp, UserId, ValidationError, WizardId, WizardStatus,
};
use crate::domain::profile::{
    DisabilityCategory, FieldUpdate, NewCertification, ProfileRecord, RoleField, Section,
    SkillLevel, TechDomain,
};

use super::events::WizardEvent;
use super::progress::WizardProgress;
use super::step::{StepSequence, WizardStep};
use super::validation;

/// Message surfaced when the profile store rejects a submission.
pub const SUBMIT_FAILED_MESSAGE: &str = "An error occurred while saving the profile";

/// The Wizard aggregate root.
#[derive(Debug, Clone)]
pub struct Wizard {
    id: WizardId,
    owner: UserId,
    status: WizardStatus,
    current_step: WizardStep,
    profile: ProfileRecord,
    /// Messages of the last failed validation, per section.
    errors: BTreeMap<Section, Vec<String>>,
    submit_error: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    domain_events: Vec<WizardEvent>,
}

impl Wizard {
    /// Starts a wizard on the first step with an empty profile.
    pub fn new(owner: UserId) -> Self {
        let id = WizardId::new();
        let now = Timestamp::now();

        let mut wizard = Self {
            id,
            owner: owner.clone(),
            status: WizardStatus::Editing,
            current_step: StepSequence::first(),
            profile: ProfileRecord::default(),
            errors: BTreeMap::new(),
            submit_error: None,
            created_at: now,
            updated_at: now,
            domain_events: Vec::new(),
        };

        wizard.record_event(WizardEvent::Started {
            wizard_id: id,
            owner,
            started_at: now,
        });

        wizard
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> WizardId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    /// True while a submission is outstanding; the submit control must be disabled.
    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// 1-based index of the current step.
    pub fn current_index(&self) -> usize {
        self.current_step.index()
    }

    pub fn profile(&self) -> &ProfileRecord {
        &self.profile
    }

    pub fn errors(&self) -> &BTreeMap<Section, Vec<String>> {
        &self.errors
    }

    pub fn errors_for(&self, section: Section) -> &[String] {
        self.errors.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn progress(&self) -> WizardProgress {
        WizardProgress::new(self.current_step)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Drains the recorded domain events.
    pub fn take_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Field Mutation
    // ───────────────────────────────────────────────────────────────

    /// Writes `value` at `path` within `section`, merging into the section.
    ///
    /// No validation rule runs here; rules are checked on navigation.
    pub fn set_field(&mut self, section: Section, path: &str, value: Value) -> Result<(), DomainError> {
        self.ensure_editable()?;
        let updates = FieldUpdate::parse(section, path, value)?;
        self.apply_updates(updates)
    }

    /// Applies an already-typed update.
    pub fn apply(&mut self, update: FieldUpdate) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.apply_updates(vec![update])
    }

    fn apply_updates(&mut self, updates: Vec<FieldUpdate>) -> Result<(), DomainError> {
        let touched: Vec<(Section, &'static str)> =
            updates.iter().map(|u| (u.section(), u.path())).collect();
        self.profile.apply_all(updates)?;
        for (section, path) in touched {
            self.record_event(WizardEvent::FieldUpdated {
                wizard_id: self.id,
                section,
                path: path.to_string(),
            });
        }
        self.touch();
        Ok(())
    }

    /// Runs a list helper against a staged copy of the profile and commits
    /// the copy only on success.
    fn edit_profile<T>(
        &mut self,
        section: Section,
        path: &str,
        edit: impl FnOnce(&mut ProfileRecord) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        self.ensure_editable()?;
        let mut staged = self.profile.clone();
        let out = edit(&mut staged)?;
        self.profile = staged;
        self.record_event(WizardEvent::FieldUpdated {
            wizard_id: self.id,
            section,
            path: path.to_string(),
        });
        self.touch();
        Ok(out)
    }

    pub fn toggle_disability(&mut self, category: DisabilityCategory) -> Result<bool, DomainError> {
        self.edit_profile(Section::HealthInfo, "disabilityType", |p| {
            Ok(p.health_info.toggle_disability(category))
        })
    }

    pub fn add_arrangement(&mut self, description: &str) -> Result<ArrangementId, DomainError> {
        self.edit_profile(Section::Schedule, "adaptation.specialArrangements", |p| {
            Ok(p.schedule.adaptation.add_arrangement(description)?)
        })
    }

    pub fn remove_arrangement(&mut self, id: &ArrangementId) -> Result<(), DomainError> {
        self.edit_profile(Section::Schedule, "adaptation.specialArrangements", |p| {
            found(p.schedule.adaptation.remove_arrangement(id), "arrangement", id)
        })
    }

    pub fn add_skill(&mut self, name: &str, level: SkillLevel) -> Result<SkillId, DomainError> {
        self.edit_profile(Section::Professional, "skills", |p| {
            Ok(p.professional.add_skill(name, level)?)
        })
    }

    pub fn remove_skill(&mut self, id: &SkillId) -> Result<(), DomainError> {
        self.edit_profile(Section::Professional, "skills", |p| {
            found(p.professional.remove_skill(id), "skill", id)
        })
    }

    pub fn add_role(&mut self) -> Result<ExperienceId, DomainError> {
        self.edit_profile(Section::Professional, "experience.roles", |p| {
            Ok(p.professional.add_role())
        })
    }

    pub fn update_role(
        &mut self,
        id: &ExperienceId,
        field: RoleField,
        value: &str,
    ) -> Result<(), DomainError> {
        self.edit_profile(Section::Professional, "experience.roles", |p| {
            let role = p
                .professional
                .role_mut(id)
                .ok_or_else(|| entry_not_found("experience role", id))?;
            role.set(field, value);
            Ok(())
        })
    }

    pub fn remove_role(&mut self, id: &ExperienceId) -> Result<(), DomainError> {
        self.edit_profile(Section::Professional, "experience.roles", |p| {
            found(p.professional.remove_role(id), "experience role", id)
        })
    }

    pub fn add_certification(
        &mut self,
        certification: NewCertification,
    ) -> Result<CertificationId, DomainError> {
        self.edit_profile(Section::Professional, "certifications", |p| {
            Ok(p.professional.add_certification(certification)?)
        })
    }

    pub fn remove_certification(&mut self, id: &CertificationId) -> Result<(), DomainError> {
        self.edit_profile(Section::Professional, "certifications", |p| {
            found(p.professional.remove_certification(id), "certification", id)
        })
    }

    pub fn select_domain(&mut self, domain: Option<TechDomain>) -> Result<(), DomainError> {
        self.edit_profile(Section::Professional, "techDomain", |p| {
            p.professional.select_domain(domain);
            Ok(())
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Validation
    // ───────────────────────────────────────────────────────────────

    /// Evaluates the current step's rules without touching any state.
    ///
    /// Renderers call this on every render to enable the Next control.
    pub fn can_advance(&self) -> bool {
        validation::is_step_valid(self.current_step, &self.profile)
    }

    /// Checks `step` and records its messages (or clears them on success).
    pub fn validate_step(&mut self, step: WizardStep) -> bool {
        let section = step.section();
        let errors = validation::step_errors(step, &self.profile);
        if errors.is_empty() {
            self.errors.remove(&section);
            return true;
        }
        self.errors.insert(section, errors.clone());
        self.record_event(WizardEvent::ValidationFailed {
            wizard_id: self.id,
            step,
            errors,
        });
        false
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Moves forward one step if the current step is valid.
    ///
    /// Returns false (and records the step's errors) when blocked. On the
    /// last step a valid result is returned without moving.
    pub fn next(&mut self) -> Result<bool, DomainError> {
        self.ensure_navigable()?;
        if !self.validate_step(self.current_step) {
            return Ok(false);
        }
        if let Some(target) = StepSequence::next(self.current_step) {
            self.move_to(target);
        }
        Ok(true)
    }

    /// Moves back one step. Never validates. Returns false on the first step.
    pub fn previous(&mut self) -> Result<bool, DomainError> {
        self.ensure_navigable()?;
        match StepSequence::previous(self.current_step) {
            Some(target) => {
                self.move_to(target);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Jumps to `target` if the step being left is valid.
    ///
    /// Jumping to the current step is a no-op that succeeds.
    pub fn jump_to_step(&mut self, target: WizardStep) -> Result<bool, DomainError> {
        self.ensure_navigable()?;
        if target == self.current_step {
            return Ok(true);
        }
        if !self.validate_step(self.current_step) {
            return Ok(false);
        }
        self.move_to(target);
        Ok(true)
    }

    fn move_to(&mut self, target: WizardStep) {
        let from = self.current_step;
        self.current_step = target;
        self.touch();
        self.record_event(WizardEvent::StepChanged {
            wizard_id: self.id,
            from,
            to: target,
        });
    }

    // ───────────────────────────────────────────────────────────────
    // Submission
    // ───────────────────────────────────────────────────────────────

    /// First half of a submission.
    ///
    /// Requires the final step, validates every step, then marks the wizard
    /// busy and returns the profile snapshot to hand to the store. While busy,
    /// further calls fail with `SubmissionInProgress`.
    pub fn begin_submit(&mut self) -> Result<ProfileRecord, DomainError> {
        match self.status {
            WizardStatus::Submitting => {
                return Err(DomainError::new(
                    ErrorCode::SubmissionInProgress,
                    "A submission is already in progress",
                ))
            }
            WizardStatus::Completed => {
                return Err(DomainError::new(
                    ErrorCode::WizardCompleted,
                    "The profile has already been submitted",
                ))
            }
            WizardStatus::Editing => {}
        }

        if !StepSequence::is_last(self.current_step) {
            return Err(DomainError::new(
                ErrorCode::NotOnFinalStep,
                "The profile can only be submitted from the last step",
            )
            .with_detail("current_step", self.current_step.index().to_string()));
        }

        let failing: Vec<WizardStep> = StepSequence::all()
            .iter()
            .copied()
            .filter(|step| !self.validate_step(*step))
            .collect();
        if let Some(first) = failing.first() {
            return Err(DomainError::new(
                ErrorCode::StepIncomplete,
                format!("Step '{}' is incomplete", first),
            )
            .with_detail("step", first.index().to_string()));
        }

        self.status = self
            .status
            .transition_to(WizardStatus::Submitting)
            .map_err(invalid_transition)?;
        self.submit_error = None;
        self.touch();
        self.record_event(WizardEvent::SubmissionStarted { wizard_id: self.id });

        Ok(self.profile.clone())
    }

    /// Second half of a submission, with the store's outcome.
    ///
    /// Success completes the wizard. Failure returns it to editing with a
    /// generic message; the profile is kept so the user can resubmit.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) -> Result<(), DomainError> {
        let target = if outcome.is_ok() {
            WizardStatus::Completed
        } else {
            WizardStatus::Editing
        };
        self.status = self
            .status
            .transition_to(target)
            .map_err(invalid_transition)?;
        self.touch();

        match outcome {
            Ok(()) => {
                self.record_event(WizardEvent::SubmissionSucceeded { wizard_id: self.id });
            }
            Err(reason) => {
                self.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                self.record_event(WizardEvent::SubmissionFailed {
                    wizard_id: self.id,
                    reason,
                });
            }
        }
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Internal Helpers
    // ───────────────────────────────────────────────────────────────

    fn ensure_editable(&self) -> Result<(), DomainError> {
        match self.status {
            WizardStatus::Editing => Ok(()),
            WizardStatus::Submitting => Err(DomainError::new(
                ErrorCode::SubmissionInProgress,
                "The profile cannot be edited while it is being saved",
            )),
            WizardStatus::Completed => Err(DomainError::new(
                ErrorCode::WizardCompleted,
                "The profile has already been submitted",
            )),
        }
    }

    fn ensure_navigable(&self) -> Result<(), DomainError> {
        self.ensure_editable()
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn record_event(&mut self, event: WizardEvent) {
        self.domain_events.push(event);
    }
}

fn invalid_transition(err: ValidationError) -> DomainError {
    DomainError::new(ErrorCode::InvalidStateTransition, err.to_string())
}

fn entry_not_found(kind: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::EntryNotFound, format!("No {} with id '{}'", kind, id))
}

fn found(removed: bool, kind: &str, id: impl std::fmt::Display) -> Result<(), DomainError> {
    if removed {
        Ok(())
    } else {
        Err(entry_not_found(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::validation::{
        DISABILITY_TYPE_REQUIRED, EMAIL_REQUIRED, FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED,
        SKILL_REQUIRED,
    };
    use serde_json::json;

    fn create_test_wizard() -> Wizard {
        Wizard::new(UserId::new("user-1").unwrap())
    }

    fn fill_personal(w: &mut Wizard) {
        w.set_field(Section::PersonalInfo, "firstName", json!("Jean")).unwrap();
        w.set_field(Section::PersonalInfo, "lastName", json!("Dupont")).unwrap();
        w.set_field(Section::PersonalInfo, "email", json!("jean@x.fr")).unwrap();
    }

    fn wizard_on_last_step() -> Wizard {
        let mut w = create_test_wizard();
        fill_personal(&mut w);
        assert!(w.next().unwrap());
        w.toggle_disability(DisabilityCategory::Motor).unwrap();
        assert!(w.next().unwrap());
        w.set_field(
            Section::Schedule,
            "workHours.preferred",
            json!({ "start": "09:00", "end": "17:00" }),
        )
        .unwrap();
        assert!(w.next().unwrap());
        w
    }

    // ───────────────────────────────────────────────────────────────
    // Creation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn new_wizard_starts_on_first_step_editing() {
        let w = create_test_wizard();
        assert_eq!(w.current_index(), 1);
        assert_eq!(w.status(), WizardStatus::Editing);
        assert!(w.errors().is_empty());
        assert_eq!(w.profile(), &ProfileRecord::default());
    }

    #[test]
    fn new_wizard_records_started_event() {
        let mut w = create_test_wizard();
        let events = w.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], WizardEvent::Started { .. }));
        assert!(w.take_events().is_empty());
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn next_on_empty_profile_is_blocked_with_errors() {
        let mut w = create_test_wizard();
        assert!(!w.next().unwrap());
        assert_eq!(w.current_index(), 1);
        assert_eq!(
            w.errors_for(Section::PersonalInfo),
            &[FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED, EMAIL_REQUIRED]
        );
    }

    #[test]
    fn next_after_filling_names_advances_and_clears_errors() {
        let mut w = create_test_wizard();
        assert!(!w.next().unwrap());
        fill_personal(&mut w);
        assert!(w.next().unwrap());
        assert_eq!(w.current_index(), 2);
        assert!(w.errors_for(Section::PersonalInfo).is_empty());
    }

    #[test]
    fn health_step_blocks_until_a_category_is_selected() {
        let mut w = create_test_wizard();
        fill_personal(&mut w);
        w.next().unwrap();

        assert!(!w.next().unwrap());
        assert_eq!(w.errors_for(Section::HealthInfo), &[DISABILITY_TYPE_REQUIRED]);

        w.set_field(Section::HealthInfo, "disabilityType", json!(["visual"])).unwrap();
        assert!(w.next().unwrap());
        assert_eq!(w.current_step(), WizardStep::WorkPreferences);
    }

    #[test]
    fn next_on_last_step_does_not_move() {
        let mut w = wizard_on_last_step();
        w.add_skill("React", SkillLevel::Advanced).unwrap();
        assert!(w.next().unwrap());
        assert_eq!(w.current_index(), 4);
    }

    #[test]
    fn previous_never_validates_and_floors_at_one() {
        let mut w = wizard_on_last_step();
        w.set_field(Section::PersonalInfo, "firstName", json!("")).unwrap();
        assert!(w.previous().unwrap());
        assert!(w.previous().unwrap());
        assert!(w.previous().unwrap());
        assert_eq!(w.current_index(), 1);
        assert!(!w.previous().unwrap());
        assert_eq!(w.current_index(), 1);
    }

    #[test]
    fn jump_to_current_step_is_a_no_op() {
        let mut w = create_test_wizard();
        w.take_events();
        assert!(w.jump_to_step(WizardStep::PersonalInfo).unwrap());
        assert_eq!(w.current_index(), 1);
        assert!(w.errors().is_empty());
        assert!(w.take_events().is_empty());
    }

    #[test]
    fn jump_requires_step_being_left_to_be_valid() {
        let mut w = create_test_wizard();
        assert!(!w.jump_to_step(WizardStep::WorkPreferences).unwrap());
        assert_eq!(w.current_index(), 1);

        fill_personal(&mut w);
        assert!(w.jump_to_step(WizardStep::WorkPreferences).unwrap());
        assert_eq!(w.current_step(), WizardStep::WorkPreferences);
    }

    #[test]
    fn can_advance_is_pure() {
        let mut w = create_test_wizard();
        assert!(!w.can_advance());
        assert!(w.errors().is_empty());
        fill_personal(&mut w);
        assert!(w.can_advance());
    }

    #[test]
    fn step_change_records_event() {
        let mut w = create_test_wizard();
        fill_personal(&mut w);
        w.take_events();
        w.next().unwrap();
        let events = w.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            WizardEvent::StepChanged {
                from: WizardStep::PersonalInfo,
                to: WizardStep::RqthSituation,
                ..
            }
        )));
    }

    // ───────────────────────────────────────────────────────────────
    // Field Mutation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn set_field_rejects_unknown_path_without_change() {
        let mut w = create_test_wizard();
        let err = w
            .set_field(Section::PersonalInfo, "nickname", json!("JD"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownField);
        assert_eq!(w.profile(), &ProfileRecord::default());
    }

    #[test]
    fn remove_unknown_entry_is_reported() {
        let mut w = create_test_wizard();
        let err = w.remove_skill(&SkillId::parse("missing").unwrap()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EntryNotFound);
    }

    #[test]
    fn update_role_edits_only_that_role() {
        let mut w = create_test_wizard();
        let first = w.add_role().unwrap();
        let second = w.add_role().unwrap();
        w.update_role(&second, RoleField::Company, "TechCorp").unwrap();

        let roles = &w.profile().professional.experience.roles;
        assert_eq!(roles[0].id, first);
        assert!(roles[0].company.is_empty());
        assert_eq!(roles[1].company, "TechCorp");
    }

    // ───────────────────────────────────────────────────────────────
    // Submission
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn submit_off_final_step_is_rejected() {
        let mut w = create_test_wizard();
        let err = w.begin_submit().unwrap_err();
        assert_eq!(err.code, ErrorCode::NotOnFinalStep);
        assert_eq!(w.status(), WizardStatus::Editing);
    }

    #[test]
    fn submit_without_skills_is_rejected() {
        let mut w = wizard_on_last_step();
        let err = w.begin_submit().unwrap_err();
        assert_eq!(err.code, ErrorCode::StepIncomplete);
        assert_eq!(w.errors_for(Section::Professional), &[SKILL_REQUIRED]);
        assert!(!w.is_busy());
    }

    #[test]
    fn submit_revalidates_earlier_steps() {
        let mut w = wizard_on_last_step();
        w.add_skill("React", SkillLevel::Advanced).unwrap();
        w.set_field(Section::PersonalInfo, "email", json!("  ")).unwrap();

        let err = w.begin_submit().unwrap_err();
        assert_eq!(err.code, ErrorCode::StepIncomplete);
        assert_eq!(w.errors_for(Section::PersonalInfo), &[EMAIL_REQUIRED]);
    }

    #[test]
    fn begin_submit_marks_busy_and_blocks_second_submit() {
        let mut w = wizard_on_last_step();
        w.add_skill("React", SkillLevel::Advanced).unwrap();

        let snapshot = w.begin_submit().unwrap();
        assert_eq!(snapshot.professional.skills.len(), 1);
        assert!(w.is_busy());

        let err = w.begin_submit().unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionInProgress);
        assert!(w.set_field(Section::PersonalInfo, "city", json!("Lyon")).is_err());
        assert!(w.previous().is_err());
    }

    #[test]
    fn successful_submit_completes_wizard() {
        let mut w = wizard_on_last_step();
        w.add_skill("React", SkillLevel::Advanced).unwrap();
        w.begin_submit().unwrap();
        w.finish_submit(Ok(())).unwrap();

        assert_eq!(w.status(), WizardStatus::Completed);
        assert_eq!(w.begin_submit().unwrap_err().code, ErrorCode::WizardCompleted);
    }

    #[test]
    fn failed_submit_keeps_profile_and_allows_retry() {
        let mut w = wizard_on_last_step();
        w.add_skill("React", SkillLevel::Advanced).unwrap();
        w.begin_submit().unwrap();
        w.finish_submit(Err("disk full".to_string())).unwrap();

        assert_eq!(w.status(), WizardStatus::Editing);
        assert_eq!(w.submit_error(), Some(SUBMIT_FAILED_MESSAGE));
        assert_eq!(w.profile().professional.skills.len(), 1);

        w.begin_submit().unwrap();
        assert!(w.submit_error().is_none());
    }

    #[test]
    fn finish_without_begin_is_an_invalid_transition() {
        let mut w = create_test_wizard();
        let err = w.finish_submit(Ok(())).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }
}
