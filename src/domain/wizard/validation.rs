//! Per-step validation rules.
//!
//! Rules are pure functions of the profile so they can be evaluated on every
//! render to enable or disable the Next control. Each step's descriptor
//! points at its rule.

use super::step::WizardStep;
use crate::domain::profile::ProfileRecord;

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const DISABILITY_TYPE_REQUIRED: &str = "Please select at least one disability type";
pub const WORK_HOURS_REQUIRED: &str = "Work hours are required";
pub const SKILL_REQUIRED: &str = "Please add at least one skill";

/// Returns every rule violated by `step`, in display order.
pub fn step_errors(step: WizardStep, profile: &ProfileRecord) -> Vec<String> {
    step.descriptor()
        .errors(profile)
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn personal_info_errors(profile: &ProfileRecord) -> Vec<&'static str> {
    let info = &profile.personal_info;
    let mut errors = Vec::new();
    if info.first_name.trim().is_empty() {
        errors.push(FIRST_NAME_REQUIRED);
    }
    if info.last_name.trim().is_empty() {
        errors.push(LAST_NAME_REQUIRED);
    }
    if info.email.trim().is_empty() {
        errors.push(EMAIL_REQUIRED);
    }
    errors
}

pub fn rqth_situation_errors(profile: &ProfileRecord) -> Vec<&'static str> {
    required(!profile.health_info.disability_type.is_empty(), DISABILITY_TYPE_REQUIRED)
}

pub fn work_preferences_errors(profile: &ProfileRecord) -> Vec<&'static str> {
    required(profile.schedule.work_hours.preferred.is_complete(), WORK_HOURS_REQUIRED)
}

pub fn professional_profile_errors(profile: &ProfileRecord) -> Vec<&'static str> {
    required(!profile.professional.skills.is_empty(), SKILL_REQUIRED)
}

fn required(present: bool, message: &'static str) -> Vec<&'static str> {
    if present {
        Vec::new()
    } else {
        vec![message]
    }
}

pub fn is_step_valid(step: WizardStep, profile: &ProfileRecord) -> bool {
    step_errors(step, profile).is_empty()
}
