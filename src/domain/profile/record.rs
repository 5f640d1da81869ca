//! The profile record aggregated across the onboarding steps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::health::HealthInfo;
use super::personal::PersonalInfo;
use super::professional::Professional;
use super::schedule::Schedule;
use crate::domain::foundation::ValidationError;

/// One of the four top-level groups of a [`ProfileRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalInfo,
    HealthInfo,
    Schedule,
    Professional,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::PersonalInfo,
        Section::HealthInfo,
        Section::Schedule,
        Section::Professional,
    ];

    /// Key of the section in the serialized record.
    pub fn key(&self) -> &'static str {
        match self {
            Section::PersonalInfo => "personalInfo",
            Section::HealthInfo => "healthInfo",
            Section::Schedule => "schedule",
            Section::Professional => "professional",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = ValidationError;

    /// Accepts the record key (`personalInfo`) or the short name (`personal`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "personalinfo" | "personal" => Ok(Section::PersonalInfo),
            "healthinfo" | "health" => Ok(Section::HealthInfo),
            "schedule" => Ok(Section::Schedule),
            "professional" => Ok(Section::Professional),
            other => Err(ValidationError::invalid_format(
                "section",
                format!("unknown section '{}'", other),
            )),
        }
    }
}

/// Candidate profile built field by field during onboarding.
///
/// Created empty when the wizard starts and handed to the profile store as a
/// whole once every step validates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub personal_info: PersonalInfo,
    pub health_info: HealthInfo,
    pub schedule: Schedule,
    pub professional: Professional,
}

impl ProfileRecord {
    /// Serialized form of one section.
    pub fn section_value(&self, section: Section) -> serde_json::Value {
        let value = match section {
            Section::PersonalInfo => serde_json::to_value(&self.personal_info),
            Section::HealthInfo => serde_json::to_value(&self.health_info),
            Section::Schedule => serde_json::to_value(&self.schedule),
            Section::Professional => serde_json::to_value(&self.professional),
        };
        // Plain data structs with string keys always serialize.
        value.unwrap_or(serde_json::Value::Null)
    }

    /// Reads the value at a dotted path (`"workHours.preferred.start"`)
    /// within a section, in its wire representation.
    pub fn field_value(&self, section: Section, path: &str) -> Option<serde_json::Value> {
        let mut current = self.section_value(section);
        for segment in path.split('.') {
            current = current.get_mut(segment)?.take();
        }
        Some(current)
    }
}
