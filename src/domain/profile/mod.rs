//! Profile module - the candidate record collected during onboarding.
//!
//! A [`ProfileRecord`] has four sections (personal, health, schedule,
//! professional). It is only ever mutated through typed [`FieldUpdate`]s or
//! the list helpers on each section.

mod catalog;
mod field;
mod health;
mod personal;
mod professional;
mod record;
mod schedule;

pub use catalog::{DisabilityCategory, Evolution, SkillLevel, SubDomain, TechDomain};
pub use field::{
    FieldUpdate, HealthField, PersonalField, ProfessionalField, ScheduleField, MAX_PER_DAY_RANGE,
};
pub use health::{HealthInfo, MedicalFollowUp, Treatments};
pub use personal::PersonalInfo;
pub use professional::{
    Certification, Education, Experience, ExperienceRole, NewCertification, Professional, RoleField,
    Skill,
};
pub use record::{ProfileRecord, Section};
pub use schedule::{
    Adaptation, Breaks, PreferredHours, Schedule, SpecialArrangement, WorkHours,
    DEFAULT_MAX_HOURS_PER_DAY,
};
