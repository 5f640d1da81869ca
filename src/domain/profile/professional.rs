//! Professional section (skills, experience, education, certifications).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::str::FromStr;

use super::catalog::{SkillLevel, SubDomain, TechDomain};
use crate::domain::foundation::{CertificationId, ExperienceId, SkillId, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    /// At least one skill is required to leave the step.
    pub skills: Vec<Skill>,
    pub experience: Experience,
    pub education: Education,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_domain: Option<TechDomain>,
    /// Always a subset of `tech_domain`'s sub-domains.
    #[serde(default)]
    pub specializations: BTreeSet<SubDomain>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default = "SkillId::generate")]
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            id: SkillId::generate(),
            name: name.into(),
            level,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub roles: Vec<ExperienceRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRole {
    #[serde(default = "ExperienceId::generate")]
    pub id: ExperienceId,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

impl ExperienceRole {
    /// A blank role, as appended by the "add experience" control.
    pub fn blank() -> Self {
        Self {
            id: ExperienceId::generate(),
            company: String::new(),
            role: String::new(),
            duration: String::new(),
            description: String::new(),
        }
    }
}

/// Editable text field of an [`ExperienceRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleField {
    Company,
    Role,
    Duration,
    Description,
}

impl FromStr for RoleField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "company" => Ok(RoleField::Company),
            "role" => Ok(RoleField::Role),
            "duration" => Ok(RoleField::Duration),
            "description" => Ok(RoleField::Description),
            other => Err(ValidationError::unknown_field(format!(
                "experience.roles.{}",
                other
            ))),
        }
    }
}

impl ExperienceRole {
    pub fn set(&mut self, field: RoleField, value: impl Into<String>) {
        let slot = match field {
            RoleField::Company => &mut self.company,
            RoleField::Role => &mut self.role,
            RoleField::Duration => &mut self.duration,
            RoleField::Description => &mut self.description,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default = "CertificationId::generate")]
    pub id: CertificationId,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

/// Input of the "add certification" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCertification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry_date: Option<String>,
}

impl Professional {
    pub fn add_skill(
        &mut self,
        name: impl Into<String>,
        level: SkillLevel,
    ) -> Result<SkillId, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("skills.name"));
        }
        let skill = Skill::new(name.trim(), level);
        let id = skill.id.clone();
        self.skills.push(skill);
        Ok(id)
    }

    pub fn remove_skill(&mut self, id: &SkillId) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| &s.id != id);
        self.skills.len() != before
    }

    pub fn add_role(&mut self) -> ExperienceId {
        let role = ExperienceRole::blank();
        let id = role.id.clone();
        self.experience.roles.push(role);
        id
    }

    pub fn role_mut(&mut self, id: &ExperienceId) -> Option<&mut ExperienceRole> {
        self.experience.roles.iter_mut().find(|r| &r.id == id)
    }

    pub fn remove_role(&mut self, id: &ExperienceId) -> bool {
        let before = self.experience.roles.len();
        self.experience.roles.retain(|r| &r.id != id);
        self.experience.roles.len() != before
    }

    /// Adds a certification. Name, issuer and date are required.
    pub fn add_certification(
        &mut self,
        cert: NewCertification,
    ) -> Result<CertificationId, ValidationError> {
        for (field, value) in [
            ("certifications.name", &cert.name),
            ("certifications.issuer", &cert.issuer),
            ("certifications.date", &cert.date),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }
        let certification = Certification {
            id: CertificationId::generate(),
            name: cert.name,
            issuer: cert.issuer,
            date: cert.date,
            expiry_date: cert.expiry_date.filter(|d| !d.trim().is_empty()),
        };
        let id = certification.id.clone();
        self.certifications.push(certification);
        Ok(id)
    }

    pub fn remove_certification(&mut self, id: &CertificationId) -> bool {
        let before = self.certifications.len();
        self.certifications.retain(|c| &c.id != id);
        self.certifications.len() != before
    }

    /// Selects the top-level domain. Changing it clears specializations.
    pub fn select_domain(&mut self, domain: Option<TechDomain>) {
        if self.tech_domain != domain {
            self.specializations.clear();
        }
        self.tech_domain = domain;
    }

    /// Replaces the specializations; each must belong to the selected domain.
    pub fn set_specializations(
        &mut self,
        specializations: BTreeSet<SubDomain>,
    ) -> Result<(), ValidationError> {
        check_specializations(self.tech_domain, &specializations)?;
        self.specializations = specializations;
        Ok(())
    }
}

pub(crate) fn check_specializations(
    domain: Option<TechDomain>,
    specializations: &BTreeSet<SubDomain>,
) -> Result<(), ValidationError> {
    if let Some(stray) = specializations
        .iter()
        .find(|s| Some(s.domain()) != domain)
    {
        return Err(ValidationError::invalid_format(
            "specializations",
            match domain {
                Some(d) => format!("{:?} is not a sub-domain of {:?}", stray, d),
                None => format!("{:?} requires a domain to be selected first", stray),
            },
        ));
    }
    Ok(())
}

/// Rejects a list whose entries do not have pairwise distinct ids.
pub(crate) fn check_unique_ids<'a, I>(
    field: &str,
    ids: impl IntoIterator<Item = &'a I>,
) -> Result<(), ValidationError>
where
    I: Eq + Hash + std::fmt::Display + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::invalid_format(
                field,
                format!("duplicate entry id '{}'", id),
            ));
        }
    }
    Ok(())
}
