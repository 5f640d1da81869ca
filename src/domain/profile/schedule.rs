//! Schedule section (work preferences step).

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ArrangementId, ValidationError};

/// Default cap on working hours per day.
pub const DEFAULT_MAX_HOURS_PER_DAY: u8 = 8;

/// Working time, break and adaptation preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub work_hours: WorkHours,
    pub breaks: Breaks,
    pub adaptation: Adaptation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHours {
    pub preferred: PreferredHours,
    pub max_per_day: u8,
    pub flexibility_needs: Vec<String>,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            preferred: PreferredHours::default(),
            max_per_day: DEFAULT_MAX_HOURS_PER_DAY,
            flexibility_needs: Vec::new(),
        }
    }
}

/// Preferred daily window. Both ends are required to leave the step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferredHours {
    #[serde(default, with = "clock")]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "clock")]
    pub end: Option<NaiveTime>,
}

impl PreferredHours {
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Wall-clock times stored as `HH:MM`, the shape a time input produces.
pub(crate) mod clock {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw, FORMAT).ok()
    }

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&t.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Also reads `HH:MM:SS`, which older records carry.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        parse(&raw)
            .or_else(|| NaiveTime::parse_from_str(&raw, "%H:%M:%S").ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("'{}' is not a HH:MM time", raw)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breaks {
    pub frequency: String,
    pub duration: String,
    pub specific: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adaptation {
    pub remote: bool,
    pub hybrid: bool,
    pub special_arrangements: Vec<SpecialArrangement>,
}

impl Adaptation {
    pub fn add_arrangement(
        &mut self,
        description: impl Into<String>,
    ) -> Result<ArrangementId, ValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("adaptation.specialArrangements"));
        }
        let arrangement = SpecialArrangement::new(description.trim());
        let id = arrangement.id.clone();
        self.special_arrangements.push(arrangement);
        Ok(id)
    }

    pub fn remove_arrangement(&mut self, id: &ArrangementId) -> bool {
        let before = self.special_arrangements.len();
        self.special_arrangements.retain(|a| &a.id != id);
        self.special_arrangements.len() != before
    }
}

/// A workplace arrangement the candidate needs (ergonomic seat, screen reader...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialArrangement {
    #[serde(default = "ArrangementId::generate")]
    pub id: ArrangementId,
    pub description: String,
}

impl SpecialArrangement {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: ArrangementId::generate(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_work_day_is_eight_hours() {
        assert_eq!(Schedule::default().work_hours.max_per_day, 8);
    }

    #[test]
    fn preferred_hours_complete_only_with_both_ends() {
        let mut hours = PreferredHours::default();
        assert!(!hours.is_complete());
        hours.start = NaiveTime::from_hms_opt(9, 0, 0);
        assert!(!hours.is_complete());
        hours.end = NaiveTime::from_hms_opt(17, 0, 0);
        assert!(hours.is_complete());
    }

    #[test]
    fn arrangements_are_added_and_removed_by_id() {
        let mut adaptation = Adaptation::default();
        let seat = adaptation.add_arrangement("Ergonomic seat").unwrap();
        adaptation.add_arrangement("Screen reader").unwrap();
        assert!(adaptation.add_arrangement("  ").is_err());

        assert!(adaptation.remove_arrangement(&seat));
        assert_eq!(adaptation.special_arrangements.len(), 1);
        assert_eq!(adaptation.special_arrangements[0].description, "Screen reader");
    }

    #[test]
    fn preferred_hours_deserialize_from_clock_strings() {
        let hours: PreferredHours =
            serde_json::from_str(r#"{"start":"08:30:00","end":null}"#).unwrap();
        assert_eq!(hours.start, NaiveTime::from_hms_opt(8, 30, 0));
        assert!(hours.end.is_none());
    }

    #[test]
    fn preferred_hours_serialize_as_hours_and_minutes() {
        let hours = PreferredHours {
            start: NaiveTime::from_hms_opt(9, 0, 0),
            end: None,
        };
        let json = serde_json::to_value(&hours).unwrap();
        assert_eq!(json, serde_json::json!({ "start": "09:00", "end": null }));

        let back: PreferredHours = serde_json::from_value(json).unwrap();
        assert_eq!(back, hours);
    }
}
