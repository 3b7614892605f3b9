pub mod error;
pub mod rules;
pub mod safety;
pub mod scoring;
pub mod targets;
pub mod validate;

pub use error::PlanningError;
pub use rules::{PlanParameters, RuleSet};
pub use safety::{RejectionCode, admissible_templates, check_template, is_admissible};
pub use scoring::{
    ScoredCandidate, best_craving_match, cuisine_tags_for_craving, rank_candidates, score_template,
};
pub use targets::{
    CarbPattern, NutritionTargets, Rounding, SlotCarbWindow, TargetCalculator, TargetRequest,
};
pub use validate::{
    IngredientBudgetReport, PlanDay, VarietyReport, WeeklyPlan, WeeklyReport,
    check_ingredient_budget, check_variety, validate_week,
};
