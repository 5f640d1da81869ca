//! Typed field updates addressed by `(section, dotted path)`.
//!
//! The adapter delivers `(section, path, value)` triples with a JSON value.
//! [`FieldUpdate::parse`] turns them into a closed set of typed updates, so
//! unknown paths and ill-typed values are rejected at the boundary. Writing a
//! whole intermediate object (`"workHours"`, `"treatments"`...) expands into
//! one update per child key, which merges the object instead of replacing it.
//!
//! [`ProfileRecord::apply_all`] applies a batch atomically.

use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeSet;

use super::catalog::{DisabilityCategory, Evolution, SubDomain, TechDomain};
use super::health::HealthInfo;
use super::personal::PersonalInfo;
use super::professional::{
    check_specializations, check_unique_ids, Certification, ExperienceRole, Professional, Skill,
};
use super::record::{ProfileRecord, Section};
use super::schedule::{clock, Schedule, SpecialArrangement};
use crate::domain::foundation::ValidationError;

/// Accepted range for `workHours.maxPerDay`.
pub const MAX_PER_DAY_RANGE: std::ops::RangeInclusive<u8> = 1..=24;

/// A single typed write into one section of a [`ProfileRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Personal(PersonalField),
    Health(HealthField),
    Schedule(ScheduleField),
    Professional(ProfessionalField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalField {
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
    City(String),
    BirthDate(Option<NaiveDate>),
    Address(Option<String>),
    PostalCode(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthField {
    DisabilityType(BTreeSet<DisabilityCategory>),
    Evolution(Evolution),
    Contraindications(Vec<String>),
    DailyNeeds(Vec<String>),
    TreatmentsCurrent(Vec<String>),
    TreatmentsFrequency(String),
    TreatmentsConstraints(Vec<String>),
    FollowUpFrequency(String),
    FollowUpSpecialists(Vec<String>),
    HospitalProximity(bool),
    RegularCare(Vec<String>),
    EmergencyProtocol(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleField {
    PreferredStart(Option<NaiveTime>),
    PreferredEnd(Option<NaiveTime>),
    MaxPerDay(u8),
    FlexibilityNeeds(Vec<String>),
    BreakFrequency(String),
    BreakDuration(String),
    SpecificBreaks(Vec<String>),
    Remote(bool),
    Hybrid(bool),
    SpecialArrangements(Vec<SpecialArrangement>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfessionalField {
    Skills(Vec<Skill>),
    Roles(Vec<ExperienceRole>),
    Degree(String),
    School(String),
    Year(String),
    Certifications(Vec<Certification>),
    TechDomain(Option<TechDomain>),
    Specializations(BTreeSet<SubDomain>),
}

/// Intermediate objects that may be written whole, per section.
fn object_paths(section: Section) -> &'static [&'static str] {
    match section {
        Section::PersonalInfo => &[],
        Section::HealthInfo => &["treatments", "medicalFollowUp"],
        Section::Schedule => &["workHours", "workHours.preferred", "breaks", "adaptation"],
        Section::Professional => &["experience", "education"],
    }
}

impl FieldUpdate {
    /// Parses a `(section, path, value)` triple into typed updates.
    ///
    /// A leaf path yields exactly one update. An intermediate object path
    /// with an object value yields one update per key of the value.
    pub fn parse(
        section: Section,
        path: &str,
        value: Value,
    ) -> Result<Vec<FieldUpdate>, ValidationError> {
        if object_paths(section).contains(&path) {
            let Value::Object(children) = value else {
                return Err(ValidationError::invalid_format(path, "expected an object"));
            };
            let mut updates = Vec::with_capacity(children.len());
            for (key, child) in children {
                updates.extend(Self::parse(section, &format!("{}.{}", path, key), child)?);
            }
            return Ok(updates);
        }
        Self::parse_leaf(section, path, value).map(|update| vec![update])
    }

    /// Parses a leaf path only.
    pub fn parse_leaf(
        section: Section,
        path: &str,
        value: Value,
    ) -> Result<FieldUpdate, ValidationError> {
        let update = match section {
            Section::PersonalInfo => FieldUpdate::Personal(match path {
                "firstName" => PersonalField::FirstName(text(path, value)?),
                "lastName" => PersonalField::LastName(text(path, value)?),
                "email" => PersonalField::Email(text(path, value)?),
                "phone" => PersonalField::Phone(text(path, value)?),
                "city" => PersonalField::City(text(path, value)?),
                "birthDate" => PersonalField::BirthDate(date(path, value)?),
                "address" => PersonalField::Address(optional_text(path, value)?),
                "postalCode" => PersonalField::PostalCode(optional_text(path, value)?),
                _ => return Err(unknown_path(section, path)),
            }),
            Section::HealthInfo => FieldUpdate::Health(match path {
                "disabilityType" => HealthField::DisabilityType(categories(path, value)?),
                "evolution" => HealthField::Evolution(typed(path, value)?),
                "contraindications" => HealthField::Contraindications(typed(path, value)?),
                "dailyNeeds" => HealthField::DailyNeeds(typed(path, value)?),
                "treatments.current" => HealthField::TreatmentsCurrent(typed(path, value)?),
                "treatments.frequency" => HealthField::TreatmentsFrequency(text(path, value)?),
                "treatments.constraints" => {
                    HealthField::TreatmentsConstraints(typed(path, value)?)
                }
                "medicalFollowUp.frequency" => HealthField::FollowUpFrequency(text(path, value)?),
                "medicalFollowUp.specialists" => {
                    HealthField::FollowUpSpecialists(typed(path, value)?)
                }
                "medicalFollowUp.hospitalProximity" => {
                    HealthField::HospitalProximity(typed(path, value)?)
                }
                "medicalFollowUp.regularCare" => HealthField::RegularCare(typed(path, value)?),
                "medicalFollowUp.emergencyProtocol" => {
                    HealthField::EmergencyProtocol(optional_text(path, value)?)
                }
                _ => return Err(unknown_path(section, path)),
            }),
            Section::Schedule => FieldUpdate::Schedule(match path {
                "workHours.preferred.start" => ScheduleField::PreferredStart(time(path, value)?),
                "workHours.preferred.end" => ScheduleField::PreferredEnd(time(path, value)?),
                "workHours.maxPerDay" => ScheduleField::MaxPerDay(hours(path, value)?),
                "workHours.flexibilityNeeds" => ScheduleField::FlexibilityNeeds(typed(path, value)?),
                "breaks.frequency" => ScheduleField::BreakFrequency(text(path, value)?),
                "breaks.duration" => ScheduleField::BreakDuration(text(path, value)?),
                "breaks.specific" => ScheduleField::SpecificBreaks(typed(path, value)?),
                "adaptation.remote" => ScheduleField::Remote(typed(path, value)?),
                "adaptation.hybrid" => ScheduleField::Hybrid(typed(path, value)?),
                "adaptation.specialArrangements" => {
                    ScheduleField::SpecialArrangements(typed(path, value)?)
                }
                _ => return Err(unknown_path(section, path)),
            }),
            Section::Professional => FieldUpdate::Professional(match path {
                "skills" => ProfessionalField::Skills(typed(path, value)?),
                "experience.roles" => ProfessionalField::Roles(typed(path, value)?),
                "education.degree" => ProfessionalField::Degree(text(path, value)?),
                "education.school" => ProfessionalField::School(text(path, value)?),
                "education.year" => ProfessionalField::Year(year(path, value)?),
                "certifications" => ProfessionalField::Certifications(typed(path, value)?),
                "techDomain" => ProfessionalField::TechDomain(typed(path, value)?),
                "specializations" => ProfessionalField::Specializations(typed(path, value)?),
                _ => return Err(unknown_path(section, path)),
            }),
        };
        Ok(update)
    }

    pub fn section(&self) -> Section {
        match self {
            FieldUpdate::Personal(_) => Section::PersonalInfo,
            FieldUpdate::Health(_) => Section::HealthInfo,
            FieldUpdate::Schedule(_) => Section::Schedule,
            FieldUpdate::Professional(_) => Section::Professional,
        }
    }

    /// Dotted path addressed by this update.
    pub fn path(&self) -> &'static str {
        match self {
            FieldUpdate::Personal(f) => match f {
                PersonalField::FirstName(_) => "firstName",
                PersonalField::LastName(_) => "lastName",
                PersonalField::Email(_) => "email",
                PersonalField::Phone(_) => "phone",
                PersonalField::City(_) => "city",
                PersonalField::BirthDate(_) => "birthDate",
                PersonalField::Address(_) => "address",
                PersonalField::PostalCode(_) => "postalCode",
            },
            FieldUpdate::Health(f) => match f {
                HealthField::DisabilityType(_) => "disabilityType",
                HealthField::Evolution(_) => "evolution",
                HealthField::Contraindications(_) => "contraindications",
                HealthField::DailyNeeds(_) => "dailyNeeds",
                HealthField::TreatmentsCurrent(_) => "treatments.current",
                HealthField::TreatmentsFrequency(_) => "treatments.frequency",
                HealthField::TreatmentsConstraints(_) => "treatments.constraints",
                HealthField::FollowUpFrequency(_) => "medicalFollowUp.frequency",
                HealthField::FollowUpSpecialists(_) => "medicalFollowUp.specialists",
                HealthField::HospitalProximity(_) => "medicalFollowUp.hospitalProximity",
                HealthField::RegularCare(_) => "medicalFollowUp.regularCare",
                HealthField::EmergencyProtocol(_) => "medicalFollowUp.emergencyProtocol",
            },
            FieldUpdate::Schedule(f) => match f {
                ScheduleField::PreferredStart(_) => "workHours.preferred.start",
                ScheduleField::PreferredEnd(_) => "workHours.preferred.end",
                ScheduleField::MaxPerDay(_) => "workHours.maxPerDay",
                ScheduleField::FlexibilityNeeds(_) => "workHours.flexibilityNeeds",
                ScheduleField::BreakFrequency(_) => "breaks.frequency",
                ScheduleField::BreakDuration(_) => "breaks.duration",
                ScheduleField::SpecificBreaks(_) => "breaks.specific",
                ScheduleField::Remote(_) => "adaptation.remote",
                ScheduleField::Hybrid(_) => "adaptation.hybrid",
                ScheduleField::SpecialArrangements(_) => "adaptation.specialArrangements",
            },
            FieldUpdate::Professional(f) => match f {
                ProfessionalField::Skills(_) => "skills",
                ProfessionalField::Roles(_) => "experience.roles",
                ProfessionalField::Degree(_) => "education.degree",
                ProfessionalField::School(_) => "education.school",
                ProfessionalField::Year(_) => "education.year",
                ProfessionalField::Certifications(_) => "certifications",
                ProfessionalField::TechDomain(_) => "techDomain",
                ProfessionalField::Specializations(_) => "specializations",
            },
        }
    }
}

impl ProfileRecord {
    /// Applies one update. On error the record is left untouched.
    pub fn apply(&mut self, update: FieldUpdate) -> Result<(), ValidationError> {
        match update {
            FieldUpdate::Personal(field) => {
                apply_personal(&mut self.personal_info, field);
                Ok(())
            }
            FieldUpdate::Health(field) => {
                apply_health(&mut self.health_info, field);
                Ok(())
            }
            FieldUpdate::Schedule(field) => apply_schedule(&mut self.schedule, field),
            FieldUpdate::Professional(field) => apply_professional(&mut self.professional, field),
        }
    }

    /// Applies every update or none of them.
    pub fn apply_all(
        &mut self,
        updates: impl IntoIterator<Item = FieldUpdate>,
    ) -> Result<(), ValidationError> {
        let mut staged = self.clone();
        for update in updates {
            staged.apply(update)?;
        }
        *self = staged;
        Ok(())
    }
}

fn apply_personal(info: &mut PersonalInfo, field: PersonalField) {
    match field {
        PersonalField::FirstName(v) => info.first_name = v,
        PersonalField::LastName(v) => info.last_name = v,
        PersonalField::Email(v) => info.email = v,
        PersonalField::Phone(v) => info.phone = v,
        PersonalField::City(v) => info.city = v,
        PersonalField::BirthDate(v) => info.birth_date = v,
        PersonalField::Address(v) => info.address = v,
        PersonalField::PostalCode(v) => info.postal_code = v,
    }
}

fn apply_health(info: &mut HealthInfo, field: HealthField) {
    match field {
        HealthField::DisabilityType(v) => info.disability_type = v,
        HealthField::Evolution(v) => info.evolution = v,
        HealthField::Contraindications(v) => info.contraindications = v,
        HealthField::DailyNeeds(v) => info.daily_needs = v,
        HealthField::TreatmentsCurrent(v) => info.treatments.current = v,
        HealthField::TreatmentsFrequency(v) => info.treatments.frequency = v,
        HealthField::TreatmentsConstraints(v) => info.treatments.constraints = v,
        HealthField::FollowUpFrequency(v) => info.medical_follow_up.frequency = v,
        HealthField::FollowUpSpecialists(v) => info.medical_follow_up.specialists = v,
        HealthField::HospitalProximity(v) => info.medical_follow_up.hospital_proximity = v,
        HealthField::RegularCare(v) => info.medical_follow_up.regular_care = v,
        HealthField::EmergencyProtocol(v) => info.medical_follow_up.emergency_protocol = v,
    }
}

fn apply_schedule(schedule: &mut Schedule, field: ScheduleField) -> Result<(), ValidationError> {
    match field {
        ScheduleField::PreferredStart(v) => schedule.work_hours.preferred.start = v,
        ScheduleField::PreferredEnd(v) => schedule.work_hours.preferred.end = v,
        ScheduleField::MaxPerDay(v) => {
            if !MAX_PER_DAY_RANGE.contains(&v) {
                return Err(ValidationError::out_of_range(
                    "workHours.maxPerDay",
                    i32::from(*MAX_PER_DAY_RANGE.start()),
                    i32::from(*MAX_PER_DAY_RANGE.end()),
                    i32::from(v),
                ));
            }
            schedule.work_hours.max_per_day = v;
        }
        ScheduleField::FlexibilityNeeds(v) => schedule.work_hours.flexibility_needs = v,
        ScheduleField::BreakFrequency(v) => schedule.breaks.frequency = v,
        ScheduleField::BreakDuration(v) => schedule.breaks.duration = v,
        ScheduleField::SpecificBreaks(v) => schedule.breaks.specific = v,
        ScheduleField::Remote(v) => schedule.adaptation.remote = v,
        ScheduleField::Hybrid(v) => schedule.adaptation.hybrid = v,
        ScheduleField::SpecialArrangements(v) => {
            check_unique_ids("adaptation.specialArrangements", v.iter().map(|a| &a.id))?;
            schedule.adaptation.special_arrangements = v;
        }
    }
    Ok(())
}

fn apply_professional(
    professional: &mut Professional,
    field: ProfessionalField,
) -> Result<(), ValidationError> {
    match field {
        ProfessionalField::Skills(v) => {
            check_unique_ids("skills", v.iter().map(|s| &s.id))?;
            professional.skills = v;
        }
        ProfessionalField::Roles(v) => {
            check_unique_ids("experience.roles", v.iter().map(|r| &r.id))?;
            professional.experience.roles = v;
        }
        ProfessionalField::Degree(v) => professional.education.degree = v,
        ProfessionalField::School(v) => professional.education.school = v,
        ProfessionalField::Year(v) => professional.education.year = v,
        ProfessionalField::Certifications(v) => {
            check_unique_ids("certifications", v.iter().map(|c| &c.id))?;
            professional.certifications = v;
        }
        ProfessionalField::TechDomain(v) => professional.select_domain(v),
        ProfessionalField::Specializations(v) => {
            check_specializations(professional.tech_domain, &v)?;
            professional.specializations = v;
        }
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Value parsing
// ───────────────────────────────────────────────────────────────

fn unknown_path(section: Section, path: &str) -> ValidationError {
    ValidationError::unknown_field(format!("{}.{}", section.key(), path))
}

fn typed<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|e| ValidationError::invalid_format(path, e.to_string()))
}

fn text(path: &str, value: Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        _ => Err(ValidationError::invalid_format(path, "expected a string")),
    }
}

/// Empty strings clear optional fields.
fn optional_text(path: &str, value: Value) -> Result<Option<String>, ValidationError> {
    let s = text(path, value)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

fn year(path: &str, value: Value) -> Result<String, ValidationError> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        other => text(path, other),
    }
}

fn time(path: &str, value: Value) -> Result<Option<NaiveTime>, ValidationError> {
    let Some(raw) = optional_text(path, value)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    clock::parse(raw)
        .map(Some)
        .ok_or_else(|| ValidationError::invalid_format(path, format!("'{}' is not a HH:MM time", raw)))
}

fn date(path: &str, value: Value) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(raw) = optional_text(path, value)? else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            ValidationError::invalid_format(path, format!("'{}' is not a YYYY-MM-DD date", raw))
        })
}

fn hours(path: &str, value: Value) -> Result<u8, ValidationError> {
    let n = match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ValidationError::invalid_format(path, "expected a whole number of hours"))?;
    u8::try_from(n).map_err(|_| {
        ValidationError::out_of_range(
            path,
            i32::from(*MAX_PER_DAY_RANGE.start()),
            i32::from(*MAX_PER_DAY_RANGE.end()),
            i32::try_from(n).unwrap_or(i32::MAX),
        )
    })
}

fn categories(path: &str, value: Value) -> Result<BTreeSet<DisabilityCategory>, ValidationError> {
    let tags: Vec<String> = typed(path, value)?;
    tags.iter().map(|tag| tag.parse()).collect()
}
