//! Wizard steps and their fixed ordering.
//!
//! # Step Order
//!
//! 1. PersonalInfo → 2. RqthSituation → 3. WorkPreferences →
//! 4. ProfessionalProfile
//!
//! Each step edits exactly one [`Section`] of the profile and owns one
//! validation rule set. All of it lives in one descriptor table.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation;
use crate::domain::foundation::ValidationError;
use crate::domain::profile::{ProfileRecord, Section};

/// One page of the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    RqthSituation,
    WorkPreferences,
    ProfessionalProfile,
}

/// The step table: order, labels, the section each step edits and the rule
/// that gates leaving it.
const STEPS: [StepDescriptor; 4] = [
    StepDescriptor {
        step: WizardStep::PersonalInfo,
        index: 1,
        label: "Personal information",
        icon: "user",
        section: Section::PersonalInfo,
        rule: validation::personal_info_errors,
    },
    StepDescriptor {
        step: WizardStep::RqthSituation,
        index: 2,
        label: "RQTH situation",
        icon: "heart",
        section: Section::HealthInfo,
        rule: validation::rqth_situation_errors,
    },
    StepDescriptor {
        step: WizardStep::WorkPreferences,
        index: 3,
        label: "Work preferences",
        icon: "briefcase",
        section: Section::Schedule,
        rule: validation::work_preferences_errors,
    },
    StepDescriptor {
        step: WizardStep::ProfessionalProfile,
        index: 4,
        label: "Professional profile",
        icon: "academic-cap",
        section: Section::Professional,
        rule: validation::professional_profile_errors,
    },
];

impl WizardStep {
    /// 1-based position in the sequence.
    pub fn index(&self) -> usize {
        *self as usize + 1
    }

    /// Looks a step up by its 1-based position.
    pub fn from_index(index: usize) -> Result<Self, ValidationError> {
        index
            .checked_sub(1)
            .and_then(|i| StepSequence::ORDER.get(i).copied())
            .ok_or_else(|| {
                ValidationError::out_of_range(
                    "step",
                    1,
                    StepSequence::count() as i32,
                    i32::try_from(index).unwrap_or(i32::MAX),
                )
            })
    }

    /// Profile section edited on this step.
    pub fn section(&self) -> Section {
        self.descriptor().section
    }

    pub fn descriptor(&self) -> StepDescriptor {
        STEPS[*self as usize]
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().label)
    }
}

/// Static description of a step.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepDescriptor {
    pub step: WizardStep,
    pub index: usize,
    pub label: &'static str,
    /// Icon reference understood by the renderer.
    pub icon: &'static str,
    pub section: Section,
    /// Messages for every rule the profile violates, in display order.
    #[serde(skip)]
    pub rule: fn(&ProfileRecord) -> Vec<&'static str>,
}

impl StepDescriptor {
    pub fn errors(&self, profile: &ProfileRecord) -> Vec<&'static str> {
        (self.rule)(profile)
    }
}

impl PartialEq for StepDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.step == other.step
    }
}

impl Eq for StepDescriptor {}

/// Central location for step ordering logic.
pub struct StepSequence;

impl StepSequence {
    /// The canonical order of wizard steps.
    pub const ORDER: [WizardStep; 4] = [
        WizardStep::PersonalInfo,
        WizardStep::RqthSituation,
        WizardStep::WorkPreferences,
        WizardStep::ProfessionalProfile,
    ];

    pub fn all() -> &'static [WizardStep; 4] {
        &Self::ORDER
    }

    pub fn count() -> usize {
        Self::ORDER.len()
    }

    pub fn descriptors() -> Vec<StepDescriptor> {
        Self::ORDER.iter().map(WizardStep::descriptor).collect()
    }

    /// Returns the next step, or None on the last one.
    pub fn next(step: WizardStep) -> Option<WizardStep> {
        Self::ORDER.get(step.index()).copied()
    }

    /// Returns the previous step, or None on the first one.
    pub fn previous(step: WizardStep) -> Option<WizardStep> {
        step.index()
            .checked_sub(2)
            .and_then(|i| Self::ORDER.get(i).copied())
    }

    pub fn first() -> WizardStep {
        Self::ORDER[0]
    }

    pub fn last() -> WizardStep {
        Self::ORDER[Self::ORDER.len() - 1]
    }

    pub fn is_first(step: WizardStep) -> bool {
        step == Self::first()
    }

    pub fn is_last(step: WizardStep) -> bool {
        step == Self::last()
    }

    /// Returns true if step `a` comes before step `b`.
    pub fn is_before(a: WizardStep, b: WizardStep) -> bool {
        a.index() < b.index()
    }
}
