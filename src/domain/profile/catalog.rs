//! Closed option sets offered by the onboarding steps.
//!
//! Disability categories, skill levels, condition evolution and the IT
//! domain / sub-domain tree used by the professional section.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Disability category tag (RQTH situation step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisabilityCategory {
    Motor,
    Visual,
    Auditory,
    Cognitive,
    Psychological,
    Chronic,
}

impl DisabilityCategory {
    pub const ALL: [DisabilityCategory; 6] = [
        DisabilityCategory::Motor,
        DisabilityCategory::Visual,
        DisabilityCategory::Auditory,
        DisabilityCategory::Cognitive,
        DisabilityCategory::Psychological,
        DisabilityCategory::Chronic,
    ];

    /// Label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            DisabilityCategory::Motor => "Moteur",
            DisabilityCategory::Visual => "Visuel",
            DisabilityCategory::Auditory => "Auditif",
            DisabilityCategory::Cognitive => "Cognitif",
            DisabilityCategory::Psychological => "Psychologique",
            DisabilityCategory::Chronic => "Maladie chronique",
        }
    }

    /// Finer-grained conditions offered once the category is selected.
    pub fn details(&self) -> &'static [&'static str] {
        match self {
            DisabilityCategory::Motor => &[
                "Membres supérieurs",
                "Membres inférieurs",
                "Dos/Colonne vertébrale",
                "Troubles musculaires",
                "Troubles articulaires",
            ],
            DisabilityCategory::Visual => &[
                "Cécité",
                "Malvoyance",
                "Troubles de la vision",
                "Sensibilité à la lumière",
            ],
            DisabilityCategory::Auditory => &[
                "Surdité",
                "Malentendance",
                "Acouphènes",
                "Hypersensibilité au bruit",
            ],
            DisabilityCategory::Cognitive => &[
                "Troubles de l'attention",
                "Troubles de la mémoire",
                "Troubles de l'apprentissage",
                "Troubles du spectre autistique",
            ],
            DisabilityCategory::Psychological => &[
                "Anxiété",
                "Dépression",
                "Troubles bipolaires",
                "Stress post-traumatique",
            ],
            DisabilityCategory::Chronic => &[
                "Diabète",
                "Sclérose en plaques",
                "Maladies auto-immunes",
                "Maladies cardiovasculaires",
            ],
        }
    }
}

impl FromStr for DisabilityCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "motor" => Ok(DisabilityCategory::Motor),
            "visual" => Ok(DisabilityCategory::Visual),
            "auditory" => Ok(DisabilityCategory::Auditory),
            "cognitive" => Ok(DisabilityCategory::Cognitive),
            "psychological" => Ok(DisabilityCategory::Psychological),
            "chronic" => Ok(DisabilityCategory::Chronic),
            other => Err(ValidationError::invalid_format(
                "disabilityType",
                format!("unknown disability category '{}'", other),
            )),
        }
    }
}

/// How a condition is expected to develop over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Evolution {
    #[default]
    Stable,
    Degenerative,
    Variable,
}

/// Self-assessed proficiency of a skill.
///
/// Serialized with the French labels used throughout the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum SkillLevel {
    #[default]
    #[serde(rename = "débutant")]
    Beginner,
    #[serde(rename = "intermédiaire")]
    Intermediate,
    #[serde(rename = "avancé")]
    Advanced,
    #[serde(rename = "expert")]
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    /// Wire value, e.g. `"avancé"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "débutant",
            SkillLevel::Intermediate => "intermédiaire",
            SkillLevel::Advanced => "avancé",
            SkillLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = ValidationError;

    /// Accepts the French labels with or without accents, and the English
    /// names used by the alternate profile-setup form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "débutant" | "debutant" | "beginner" => Ok(SkillLevel::Beginner),
            "intermédiaire" | "intermediaire" | "intermediate" => Ok(SkillLevel::Intermediate),
            "avancé" | "avance" | "advanced" => Ok(SkillLevel::Advanced),
            "expert" => Ok(SkillLevel::Expert),
            other => Err(ValidationError::invalid_format(
                "level",
                format!("unknown skill level '{}'", other),
            )),
        }
    }
}

/// Top-level IT domain a candidate works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechDomain {
    Development,
    Data,
    Infrastructure,
    Design,
    Management,
}

impl TechDomain {
    pub const ALL: [TechDomain; 5] = [
        TechDomain::Development,
        TechDomain::Data,
        TechDomain::Infrastructure,
        TechDomain::Design,
        TechDomain::Management,
    ];

    /// Sub-domains that may be selected under this domain.
    pub fn sub_domains(&self) -> Vec<SubDomain> {
        SubDomain::ALL
            .into_iter()
            .filter(|s| s.domain() == *self)
            .collect()
    }
}

impl FromStr for TechDomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(TechDomain::Development),
            "data" => Ok(TechDomain::Data),
            "infrastructure" => Ok(TechDomain::Infrastructure),
            "design" => Ok(TechDomain::Design),
            "management" => Ok(TechDomain::Management),
            other => Err(ValidationError::invalid_format(
                "techDomain",
                format!("unknown domain '{}'", other),
            )),
        }
    }
}

/// Specialization within a [`TechDomain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubDomain {
    Frontend,
    Backend,
    Mobile,
    Fullstack,
    DataAnalysis,
    DataEngineering,
    MachineLearning,
    Cloud,
    Devops,
    Network,
    Security,
    UxUi,
    Accessibility,
    ProductManagement,
    ProjectManagement,
    QualityAssurance,
}

impl SubDomain {
    pub const ALL: [SubDomain; 16] = [
        SubDomain::Frontend,
        SubDomain::Backend,
        SubDomain::Mobile,
        SubDomain::Fullstack,
        SubDomain::DataAnalysis,
        SubDomain::DataEngineering,
        SubDomain::MachineLearning,
        SubDomain::Cloud,
        SubDomain::Devops,
        SubDomain::Network,
        SubDomain::Security,
        SubDomain::UxUi,
        SubDomain::Accessibility,
        SubDomain::ProductManagement,
        SubDomain::ProjectManagement,
        SubDomain::QualityAssurance,
    ];

    /// The domain this specialization belongs to.
    pub fn domain(&self) -> TechDomain {
        use SubDomain::*;
        match self {
            Frontend | Backend | Mobile | Fullstack => TechDomain::Development,
            DataAnalysis | DataEngineering | MachineLearning => TechDomain::Data,
            Cloud | Devops | Network | Security => TechDomain::Infrastructure,
            UxUi | Accessibility => TechDomain::Design,
            ProductManagement | ProjectManagement | QualityAssurance => TechDomain::Management,
        }
    }
}
