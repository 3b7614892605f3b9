use serde::{Deserialize, Serialize};
use user::{MedicalFlag, UserSafetyProfile};

use crate::error::PlanningError;
use crate::targets::NutritionTargets;

/// The full bundle of numeric thresholds governing per-meal and
/// weekly-aggregate validation.
///
/// A rule set is configuration: it is never mutated at runtime, and changing
/// the rules means swapping the whole value. The shipped `Default` is the
/// baseline; deployments load alternates via [`RuleSet::from_json`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,
    pub version: u32,

    // Weekly ingredient budget
    pub max_unique_ingredients_per_week: usize,
    pub max_exotic_ingredients_per_week: usize,
    /// Watch list of hard-to-source ingredient names, capped per week.
    pub exotic_ingredients: Vec<String>,

    // Weekly variety
    pub min_unique_templates_per_meal_type: usize,
    pub max_repeats_per_week: usize,
    pub min_distinct_cuisines_per_week: usize,

    // Per-meal checks
    pub min_main_protein_g: f64,
    pub max_main_protein_g: f64,
    pub min_veg_cups_per_main: f64,
    pub calorie_tolerance_pct: f64,
    pub min_carb_percent: f64,
    pub max_carb_percent: f64,
    /// Carb-percent sanity check is skipped below this calorie floor; tiny
    /// items produce noisy percentages. Tunable, not a hard law.
    pub carb_check_min_calories: f64,
    pub max_total_minutes: u32,
    pub max_ingredients_per_recipe: usize,
    pub min_easy_meals_per_day: usize,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            name: "default".to_string(),
            version: 1,
            max_unique_ingredients_per_week: 25,
            max_exotic_ingredients_per_week: 3,
            exotic_ingredients: [
                "saffron",
                "sumac",
                "gochujang",
                "harissa",
                "miso",
                "tahini",
                "fish sauce",
                "za'atar",
                "tamarind",
                "cardamom",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            min_unique_templates_per_meal_type: 3,
            max_repeats_per_week: 3,
            min_distinct_cuisines_per_week: 3,
            min_main_protein_g: 30.0,
            max_main_protein_g: 40.0,
            min_veg_cups_per_main: 2.0,
            calorie_tolerance_pct: 15.0,
            min_carb_percent: 45.0,
            max_carb_percent: 65.0,
            carb_check_min_calories: 120.0,
            max_total_minutes: 45,
            max_ingredients_per_recipe: 12,
            min_easy_meals_per_day: 1,
        }
    }
}

impl RuleSet {
    pub fn from_json(json: &str) -> Result<Self, PlanningError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PlanningError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Everything a single planning session needs to know about the user:
/// safety profile fields plus the numeric macro targets.
///
/// Constructed once per session; the engine never persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanParameters {
    pub weeks: u8,
    pub meals_per_day: u8,
    pub snacks_per_day: u8,
    pub calorie_target: Option<f64>,
    pub protein_target_g: Option<f64>,
    pub carb_target_g: Option<f64>,
    pub fat_target_g: Option<f64>,
    pub diet: Option<String>,
    pub medical_flags: Vec<MedicalFlag>,
    pub allergens: Vec<String>,
    pub disliked_ingredients: Vec<String>,
    pub skip_veg_requirement: bool,
}

impl Default for PlanParameters {
    fn default() -> Self {
        PlanParameters {
            weeks: 1,
            meals_per_day: 3,
            snacks_per_day: 1,
            calorie_target: None,
            protein_target_g: None,
            carb_target_g: None,
            fat_target_g: None,
            diet: None,
            medical_flags: Vec::new(),
            allergens: Vec::new(),
            disliked_ingredients: Vec::new(),
            skip_veg_requirement: false,
        }
    }
}

impl PlanParameters {
    /// Aggregate a safety profile and a computed target bundle into session
    /// parameters.
    pub fn for_profile(profile: &UserSafetyProfile, targets: &NutritionTargets) -> Self {
        PlanParameters {
            weeks: 1,
            meals_per_day: targets.meals_per_day,
            snacks_per_day: targets.snacks_per_day,
            calorie_target: None,
            protein_target_g: Some(targets.daily_protein_g),
            carb_target_g: Some(targets.daily_carb_max_g),
            fat_target_g: None,
            diet: profile.diet.clone(),
            medical_flags: profile.medical_flags.clone(),
            allergens: profile.allergens.clone(),
            disliked_ingredients: profile.disliked_ingredients.clone(),
            skip_veg_requirement: profile.skip_veg_requirement,
        }
    }

    pub fn has_flag(&self, flag: MedicalFlag) -> bool {
        self.medical_flags.contains(&flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_set_caps() {
        let rules = RuleSet::default();
        assert_eq!(rules.max_unique_ingredients_per_week, 25);
        assert_eq!(rules.min_carb_percent, 45.0);
        assert_eq!(rules.max_carb_percent, 65.0);
        assert_eq!(rules.carb_check_min_calories, 120.0);
    }

    #[test]
    fn test_rule_set_json_round_trip() {
        let rules = RuleSet::default();
        let json = rules.to_json().unwrap();
        let loaded = RuleSet::from_json(&json).unwrap();
        assert_eq!(loaded.name, "default");
        assert_eq!(
            loaded.max_unique_ingredients_per_week,
            rules.max_unique_ingredients_per_week
        );
    }

    #[test]
    fn test_rule_set_rejects_malformed_json() {
        assert!(RuleSet::from_json("{not json").is_err());
    }
}
