use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    Loss,
    #[default]
    Maintenance,
    Gain,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
    #[default]
    Female,
    Male,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MedicalFlag {
    Diabetes,
    Hypertension,
}

/// Safety-relevant slice of a user's profile, supplied per planning request.
///
/// The engine never persists this; assembling it from stored profile data is
/// the job of the onboarding/profile collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSafetyProfile {
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub medical_flags: Vec<MedicalFlag>,
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
    /// Preferred diet, matched against template diet tags ("vegetarian", ...).
    #[serde(default)]
    pub diet: Option<String>,
    /// True when the user opted out of the per-meal vegetable requirement.
    #[serde(default)]
    pub skip_veg_requirement: bool,
}

impl UserSafetyProfile {
    pub fn has_flag(&self, flag: MedicalFlag) -> bool {
        self.medical_flags.contains(&flag)
    }
}
