//! Health information section (RQTH situation step).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::catalog::{DisabilityCategory, Evolution};

/// Disability situation and the care it requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInfo {
    /// At least one category is required to leave the step.
    pub disability_type: BTreeSet<DisabilityCategory>,
    pub evolution: Evolution,
    pub contraindications: Vec<String>,
    pub treatments: Treatments,
    pub daily_needs: Vec<String>,
    pub medical_follow_up: MedicalFollowUp,
}

impl HealthInfo {
    /// Adds the category if absent, removes it if present.
    ///
    /// Returns true when the category is selected afterwards.
    pub fn toggle_disability(&mut self, category: DisabilityCategory) -> bool {
        if self.disability_type.remove(&category) {
            false
        } else {
            self.disability_type.insert(category);
            true
        }
    }
}

/// Ongoing treatments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatments {
    pub current: Vec<String>,
    pub frequency: String,
    pub constraints: Vec<String>,
}

/// Medical follow-up obligations that affect the work schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalFollowUp {
    pub frequency: String,
    pub specialists: Vec<String>,
    pub hospital_proximity: bool,
    pub regular_care: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_protocol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut health = HealthInfo::default();
        assert!(health.toggle_disability(DisabilityCategory::Visual));
        assert!(health.disability_type.contains(&DisabilityCategory::Visual));
        assert!(!health.toggle_disability(DisabilityCategory::Visual));
        assert!(health.disability_type.is_empty());
    }

    #[test]
    fn serializes_nested_objects_in_camel_case() {
        let json = serde_json::to_value(HealthInfo::default()).unwrap();
        assert_eq!(json["evolution"], "stable");
        assert_eq!(json["medicalFollowUp"]["hospitalProximity"], false);
        assert!(json["disabilityType"].as_array().unwrap().is_empty());
    }
}
