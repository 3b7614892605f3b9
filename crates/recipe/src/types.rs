use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Badge a template carries when it is suitable for low/medium glycemic-index
/// diets. Required on every candidate when a diabetes medical flag is active.
pub const GI_FRIENDLY_BADGE: &str = "diabetes-friendly";

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
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MealType {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
    Snack,
}

impl MealType {
    /// Lunch and dinner are "main meals": the slots that carry the
    /// protein/vegetable discipline. Breakfast and snacks are exempt.
    pub fn is_main(&self) -> bool {
        matches!(self, MealType::Lunch | MealType::Dinner)
    }
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
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One line of a template's ingredient list.
///
/// `amount` keeps whatever the catalog stored ("2", "1/2", "1 1/2") as a
/// string; the shopping crate coerces it when building lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            amount: None,
            unit: None,
            role: None,
        }
    }

    pub fn with_amount(
        name: impl Into<String>,
        amount: impl Into<String>,
        unit: Option<&str>,
    ) -> Self {
        Ingredient {
            name: name.into(),
            amount: Some(amount.into()),
            unit: unit.map(str::to_string),
            role: None,
        }
    }
}

/// A catalog meal template.
///
/// Immutable once loaded from its source catalog: the planning engine only
/// ever borrows these, it never edits or clones them into plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTemplate {
    pub id: String,
    pub name: String,
    pub meal_type: MealType,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    /// Cups of vegetables per serving.
    pub vegetable_cups: Option<f64>,
    /// Diet tags like "vegetarian", "keto", "mediterranean".
    #[serde(default)]
    pub diet_tags: Vec<String>,
    /// Qualitative badges, e.g. [`GI_FRIENDLY_BADGE`].
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub prep_time_min: u32,
    pub cook_time_min: u32,
    pub servings: u32,
    pub cuisine: Option<String>,
    pub difficulty: Difficulty,
}

impl MealTemplate {
    pub fn total_time_min(&self) -> u32 {
        self.prep_time_min + self.cook_time_min
    }

    pub fn has_diet_tag(&self, tag: &str) -> bool {
        self.diet_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.iter().any(|b| b.eq_ignore_ascii_case(badge))
    }
}
