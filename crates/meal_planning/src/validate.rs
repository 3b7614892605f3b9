use std::collections::{BTreeMap, BTreeSet};

use recipe::{MealTemplate, MealType};
use serde::Serialize;

use crate::rules::RuleSet;

/// One day of an assembled plan: the templates chosen for its slots, in
/// slot order.
#[derive(Debug, Clone, Default)]
pub struct PlanDay<'a> {
    pub meals: Vec<&'a MealTemplate>,
}

/// A day x slot grid of chosen templates. The grid only borrows from the
/// catalog; it never copies templates.
///
/// Built incrementally by the caller from scorer output, then validated as a
/// whole. Validation is read-only and deterministic: the same grid content
/// always produces the same reports.
#[derive(Debug, Clone, Default)]
pub struct WeeklyPlan<'a> {
    pub days: Vec<PlanDay<'a>>,
}

impl<'a> WeeklyPlan<'a> {
    pub fn new() -> Self {
        WeeklyPlan { days: Vec::new() }
    }

    pub fn push_day(&mut self, meals: Vec<&'a MealTemplate>) {
        self.days.push(PlanDay { meals });
    }

    pub fn meals(&self) -> impl Iterator<Item = &'a MealTemplate> + '_ {
        self.days.iter().flat_map(|day| day.meals.iter().copied())
    }
}

/// Weekly ingredient-budget outcome: distinct normalized ingredient names,
/// how many of them sit on the exotic watch list, and whether both caps hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientBudgetReport {
    pub unique_ingredient_count: usize,
    pub exotic_count: usize,
    pub within_caps: bool,
}

/// Weekly variety outcome. `repeats` is the sum of (uses - 1) over every
/// template used more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarietyReport {
    pub distinct_templates: BTreeMap<MealType, usize>,
    pub distinct_cuisines: usize,
    pub repeats: usize,
    pub ok: bool,
}

/// Both sub-reports over one assembled week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    pub ingredient_budget: IngredientBudgetReport,
    pub variety: VarietyReport,
}

impl WeeklyReport {
    /// A plan is valid only when both sub-checks hold; per-meal safety rules
    /// are assumed to already hold for every cell.
    pub fn is_valid(&self) -> bool {
        self.ingredient_budget.within_caps && self.variety.ok
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Walk every ingredient of every meal and check the week's sourcing budget:
/// distinct normalized names against the weekly cap, and watch-list names
/// against the exotic cap.
pub fn check_ingredient_budget(plan: &WeeklyPlan<'_>, rules: &RuleSet) -> IngredientBudgetReport {
    let exotic: BTreeSet<String> = rules.exotic_ingredients.iter().map(|n| normalize(n)).collect();

    let mut unique: BTreeSet<String> = BTreeSet::new();
    for template in plan.meals() {
        for ingredient in &template.ingredients {
            unique.insert(normalize(&ingredient.name));
        }
    }

    let exotic_count = unique.iter().filter(|name| exotic.contains(*name)).count();
    let unique_ingredient_count = unique.len();

    IngredientBudgetReport {
        unique_ingredient_count,
        exotic_count,
        within_caps: unique_ingredient_count <= rules.max_unique_ingredients_per_week
            && exotic_count <= rules.max_exotic_ingredients_per_week,
    }
}

/// Check cross-meal variety: distinct templates per meal type, distinct
/// cuisine tags, and total repeats across the week.
///
/// The per-type minimum applies to meal types that appear in the plan; a
/// plan with no snacks is not penalized for snack variety.
pub fn check_variety(plan: &WeeklyPlan<'_>, rules: &RuleSet) -> VarietyReport {
    let mut per_type: BTreeMap<MealType, BTreeSet<&str>> = BTreeMap::new();
    let mut uses: BTreeMap<&str, usize> = BTreeMap::new();
    let mut cuisines: BTreeSet<String> = BTreeSet::new();

    for template in plan.meals() {
        per_type
            .entry(template.meal_type)
            .or_default()
            .insert(template.id.as_str());
        *uses.entry(template.id.as_str()).or_insert(0) += 1;
        if let Some(cuisine) = &template.cuisine {
            cuisines.insert(normalize(cuisine));
        }
    }

    let repeats: usize = uses.values().filter(|&&count| count > 1).map(|count| count - 1).sum();

    let distinct_templates: BTreeMap<MealType, usize> = per_type
        .into_iter()
        .map(|(meal_type, ids)| (meal_type, ids.len()))
        .collect();

    let ok = distinct_templates
        .values()
        .all(|&count| count >= rules.min_unique_templates_per_meal_type)
        && cuisines.len() >= rules.min_distinct_cuisines_per_week
        && repeats <= rules.max_repeats_per_week;

    VarietyReport {
        distinct_templates,
        distinct_cuisines: cuisines.len(),
        repeats,
        ok,
    }
}

/// Run both aggregate sub-checks over a completed week.
///
/// The result is advisory: it reports the counts and booleans, and the
/// caller decides how to re-select meals when a check fails.
pub fn validate_week(plan: &WeeklyPlan<'_>, rules: &RuleSet) -> WeeklyReport {
    WeeklyReport {
        ingredient_budget: check_ingredient_budget(plan, rules),
        variety: check_variety(plan, rules),
    }
}
