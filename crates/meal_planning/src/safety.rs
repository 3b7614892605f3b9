use recipe::{GI_FRIENDLY_BADGE, MealTemplate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use tracing::debug;
use user::MedicalFlag;

use crate::rules::{PlanParameters, RuleSet};

/// Why a template was rejected. Admissible templates get no code at all.
///
/// The `Display` form is the stable wire string ("allergen",
/// "missing-diabetes-badge", ...) reported back to callers.
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
pub enum RejectionCode {
    Allergen,
    MissingDiabetesBadge,
    ContainsDislikedIngredient,
    TooManyIngredients,
    TooLongToCook,
    MissingProtein,
    ProteinOutOfRange,
    NotEnoughVeg,
    CarbPercentOutOfRange,
}

/// Decide whether one template is admissible for one user session.
///
/// Checks run in a fixed priority order and the first failure is the
/// reported reason; later checks are not evaluated. Safety checks (allergen,
/// medical badge, dislikes) come before convenience checks by design, so a
/// template that is both allergenic and slow always reports `allergen`.
///
/// Breakfast and snack templates are exempt from the protein and vegetable
/// checks: macro discipline is enforced on main meals only.
pub fn check_template(
    template: &MealTemplate,
    params: &PlanParameters,
    rules: &RuleSet,
) -> Option<RejectionCode> {
    let code = run_checks(template, params, rules);
    if let Some(code) = code {
        debug!(template = %template.id, reason = %code, "template rejected");
    }
    code
}

pub fn is_admissible(template: &MealTemplate, params: &PlanParameters, rules: &RuleSet) -> bool {
    check_template(template, params, rules).is_none()
}

/// Keep only the admissible templates of a pool, preserving catalog order.
pub fn admissible_templates<'a>(
    pool: &'a [MealTemplate],
    params: &PlanParameters,
    rules: &RuleSet,
) -> Vec<&'a MealTemplate> {
    pool.iter()
        .filter(|template| run_checks(template, params, rules).is_none())
        .collect()
}

fn run_checks(
    template: &MealTemplate,
    params: &PlanParameters,
    rules: &RuleSet,
) -> Option<RejectionCode> {
    if has_allergen_conflict(template, &params.allergens) {
        return Some(RejectionCode::Allergen);
    }

    if params.has_flag(MedicalFlag::Diabetes) && !template.has_badge(GI_FRIENDLY_BADGE) {
        return Some(RejectionCode::MissingDiabetesBadge);
    }

    if contains_disliked_ingredient(template, &params.disliked_ingredients) {
        return Some(RejectionCode::ContainsDislikedIngredient);
    }

    if template.ingredients.len() > rules.max_ingredients_per_recipe {
        return Some(RejectionCode::TooManyIngredients);
    }

    if template.total_time_min() > rules.max_total_minutes {
        return Some(RejectionCode::TooLongToCook);
    }

    if template.meal_type.is_main() {
        match template.protein_g {
            None => return Some(RejectionCode::MissingProtein),
            Some(protein)
                if protein < rules.min_main_protein_g || protein > rules.max_main_protein_g =>
            {
                return Some(RejectionCode::ProteinOutOfRange);
            }
            Some(_) => {}
        }

        if !params.skip_veg_requirement
            && template.vegetable_cups.unwrap_or(0.0) < rules.min_veg_cups_per_main
        {
            return Some(RejectionCode::NotEnoughVeg);
        }
    }

    if let (Some(calories), Some(carbs)) = (template.calories, template.carbs_g) {
        if calories >= rules.carb_check_min_calories {
            let carb_percent = carbs * 4.0 / calories * 100.0;
            if carb_percent < rules.min_carb_percent || carb_percent > rules.max_carb_percent {
                return Some(RejectionCode::CarbPercentOutOfRange);
            }
        }
    }

    None
}

fn has_allergen_conflict(template: &MealTemplate, user_allergens: &[String]) -> bool {
    template.allergens.iter().any(|allergen| {
        user_allergens
            .iter()
            .any(|a| a.eq_ignore_ascii_case(allergen))
    })
}

/// Disliked strings match ingredient names with case-insensitive containment,
/// so "onion" also rules out "red onion".
fn contains_disliked_ingredient(template: &MealTemplate, dislikes: &[String]) -> bool {
    if dislikes.is_empty() {
        return false;
    }
    template.ingredients.iter().any(|ingredient| {
        let name = ingredient.name.to_lowercase();
        dislikes
            .iter()
            .any(|dislike| !dislike.is_empty() && name.contains(&dislike.to_lowercase()))
    })
}
