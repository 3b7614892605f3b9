use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use user::{Goal, Sex};

use crate::error::PlanningError;

/// How the daily carb window is spread across meal slots.
#[derive(
    EnumString, Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CarbPattern {
    /// Every slot gets an equal share.
    #[default]
    Even,
    /// Slots named for a workout get double the carb share.
    WorkoutFocused,
}

#[derive(
    EnumString, Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    NearestTenth,
    NearestHalf,
    #[default]
    NearestWhole,
}

impl Rounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::NearestTenth => (value * 10.0).round() / 10.0,
            Rounding::NearestHalf => (value * 2.0).round() / 2.0,
            Rounding::NearestWhole => value.round(),
        }
    }
}

/// Inputs to the target calculator. Out-of-range counts are clamped, never
/// rejected: meals/day to [1,8], snacks/day to [0,2].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRequest {
    pub goal: Goal,
    pub sex: Sex,
    pub desired_weight_lb: f64,
    pub meals_per_day: u8,
    pub snacks_per_day: u8,
    pub carb_pattern: CarbPattern,
    pub rounding: Rounding,
}

impl Default for TargetRequest {
    fn default() -> Self {
        TargetRequest {
            goal: Goal::default(),
            sex: Sex::default(),
            desired_weight_lb: 150.0,
            meals_per_day: 3,
            snacks_per_day: 1,
            carb_pattern: CarbPattern::default(),
            rounding: Rounding::default(),
        }
    }
}

/// Derived daily and per-meal nutrition targets, plus the human-readable
/// rationale shown to the user alongside the numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub daily_protein_g: f64,
    pub daily_carb_min_g: f64,
    pub daily_carb_max_g: f64,
    pub per_meal_protein_g: f64,
    pub per_meal_carb_min_g: f64,
    pub per_meal_carb_max_g: f64,
    pub veg_cups_min: f64,
    pub veg_cups_max: f64,
    /// Clamped meal count actually used as the macro denominator.
    pub meals_per_day: u8,
    pub snacks_per_day: u8,
    pub notes: Vec<String>,
}

/// Carb window assigned to one named slot by [`TargetCalculator::distribute_carbs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotCarbWindow {
    pub slot: String,
    pub carb_min_g: f64,
    pub carb_max_g: f64,
}

fn protein_coefficient(goal: Goal, sex: Sex) -> f64 {
    match (goal, sex) {
        (Goal::Gain, Sex::Male) => 2.0,
        (Goal::Gain, Sex::Female) => 1.5,
        (Goal::Loss, _) | (Goal::Maintenance, _) => 1.0,
    }
}

/// Daily starchy-carb gram range by (goal, sex). Ranges tighten for loss and
/// widen for gain; male defaults sit above female at every goal.
fn daily_carb_range(goal: Goal, sex: Sex) -> (f64, f64) {
    match (goal, sex) {
        (Goal::Loss, Sex::Female) => (60.0, 90.0),
        (Goal::Loss, Sex::Male) => (90.0, 120.0),
        (Goal::Maintenance, Sex::Female) => (90.0, 130.0),
        (Goal::Maintenance, Sex::Male) => (130.0, 180.0),
        (Goal::Gain, Sex::Female) => (130.0, 180.0),
        (Goal::Gain, Sex::Male) => (180.0, 250.0),
    }
}

/// TargetCalculator derives daily and per-meal protein/carb/vegetable targets
/// from a user's goal, sex, and desired weight.
///
/// Snacks are deliberately excluded from the per-meal denominator: they are
/// optional protein/vegetable top-ups, not part of the macro split.
pub struct TargetCalculator;

impl TargetCalculator {
    pub fn calculate(request: &TargetRequest) -> NutritionTargets {
        let meals = request.meals_per_day.clamp(1, 8);
        let snacks = request.snacks_per_day.min(2);
        let round = request.rounding;

        let coefficient = protein_coefficient(request.goal, request.sex);
        let weight = request.desired_weight_lb.max(0.0);
        let daily_protein = round.apply(weight * coefficient);
        let (carb_min, carb_max) = daily_carb_range(request.goal, request.sex);

        let mut notes = vec![
            format!(
                "Daily protein target: {} g ({} g per lb of desired weight for {}).",
                daily_protein, coefficient, request.goal
            ),
            format!(
                "Daily starchy-carb window: {}-{} g for a {} profile aiming at {}.",
                carb_min, carb_max, request.sex, request.goal
            ),
            format!(
                "Macros split across {} meals; {} snack(s) stay optional top-ups outside the split.",
                meals, snacks
            ),
            "Aim for 2-3 cups of vegetables at every meal.".to_string(),
        ];
        if meals != request.meals_per_day {
            notes.push(format!(
                "Meals per day adjusted from {} to {} (supported range is 1-8).",
                request.meals_per_day, meals
            ));
        }
        if snacks != request.snacks_per_day {
            notes.push(format!(
                "Snacks per day adjusted from {} to {} (supported range is 0-2).",
                request.snacks_per_day, snacks
            ));
        }

        NutritionTargets {
            daily_protein_g: daily_protein,
            daily_carb_min_g: round.apply(carb_min),
            daily_carb_max_g: round.apply(carb_max),
            per_meal_protein_g: round.apply(daily_protein / meals as f64),
            per_meal_carb_min_g: round.apply(carb_min / meals as f64),
            per_meal_carb_max_g: round.apply(carb_max / meals as f64),
            veg_cups_min: 2.0,
            veg_cups_max: 3.0,
            meals_per_day: meals,
            snacks_per_day: snacks,
            notes,
        }
    }

    /// Spread the per-meal carb window across an ordered list of slot names.
    ///
    /// Every slot starts at weight 1. With [`CarbPattern::WorkoutFocused`],
    /// slots whose name contains "workout" get weight 2. Weights are
    /// renormalized to sum to the slot count before multiplying, so the total
    /// carb budget is unchanged by the pattern.
    pub fn distribute_carbs(
        targets: &NutritionTargets,
        slots: &[&str],
        pattern: CarbPattern,
        rounding: Rounding,
    ) -> Result<Vec<SlotCarbWindow>, PlanningError> {
        if slots.is_empty() {
            return Err(PlanningError::EmptySlotList);
        }

        let weights: Vec<f64> = slots
            .iter()
            .map(|slot| match pattern {
                CarbPattern::Even => 1.0,
                CarbPattern::WorkoutFocused => {
                    if slot.to_lowercase().contains("workout") {
                        2.0
                    } else {
                        1.0
                    }
                }
            })
            .collect();

        let total: f64 = weights.iter().sum();
        let scale = slots.len() as f64 / total;

        Ok(slots
            .iter()
            .zip(weights)
            .map(|(slot, weight)| {
                let w = weight * scale;
                SlotCarbWindow {
                    slot: slot.to_string(),
                    carb_min_g: rounding.apply(targets.per_meal_carb_min_g * w),
                    carb_max_g: rounding.apply(targets.per_meal_carb_max_g * w),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protein_coefficient_by_goal_and_sex() {
        let request = TargetRequest {
            goal: Goal::Gain,
            sex: Sex::Female,
            desired_weight_lb: 150.0,
            ..Default::default()
        };
        assert_eq!(TargetCalculator::calculate(&request).daily_protein_g, 225.0);

        let request = TargetRequest {
            goal: Goal::Gain,
            sex: Sex::Male,
            desired_weight_lb: 150.0,
            ..Default::default()
        };
        assert_eq!(TargetCalculator::calculate(&request).daily_protein_g, 300.0);

        let request = TargetRequest {
            goal: Goal::Loss,
            sex: Sex::Female,
            desired_weight_lb: 150.0,
            ..Default::default()
        };
        assert_eq!(TargetCalculator::calculate(&request).daily_protein_g, 150.0);
    }

    #[test]
    fn test_meal_count_clamped_not_rejected() {
        let request = TargetRequest {
            meals_per_day: 0,
            ..Default::default()
        };
        let targets = TargetCalculator::calculate(&request);
        assert_eq!(targets.meals_per_day, 1);
        assert_eq!(targets.per_meal_protein_g, targets.daily_protein_g);

        let request = TargetRequest {
            meals_per_day: 12,
            snacks_per_day: 9,
            ..Default::default()
        };
        let targets = TargetCalculator::calculate(&request);
        assert_eq!(targets.meals_per_day, 8);
        assert_eq!(targets.snacks_per_day, 2);
    }

    #[test]
    fn test_carb_ranges_widen_with_goal_and_sex() {
        let (loss_min, loss_max) = daily_carb_range(Goal::Loss, Sex::Female);
        let (gain_min, gain_max) = daily_carb_range(Goal::Gain, Sex::Female);
        assert!(gain_min > loss_min);
        assert!(gain_max - gain_min > loss_max - loss_min);

        for goal in [Goal::Loss, Goal::Maintenance, Goal::Gain] {
            let (f_min, f_max) = daily_carb_range(goal, Sex::Female);
            let (m_min, m_max) = daily_carb_range(goal, Sex::Male);
            assert!(m_min > f_min, "male minimum should exceed female for {goal}");
            assert!(m_max > f_max, "male maximum should exceed female for {goal}");
        }
    }

    #[test]
    fn test_rounding_modes() {
        assert_eq!(Rounding::NearestWhole.apply(33.333), 33.0);
        assert_eq!(Rounding::NearestHalf.apply(33.333), 33.5);
        assert_eq!(Rounding::NearestTenth.apply(33.333), 33.3);
    }

    #[test]
    fn test_workout_slot_gets_double_share() {
        let targets = TargetCalculator::calculate(&TargetRequest {
            goal: Goal::Maintenance,
            sex: Sex::Male,
            meals_per_day: 3,
            rounding: Rounding::NearestTenth,
            ..Default::default()
        });
        // 130-180 g daily over 3 meals: 43.3-60 g per meal.
        let windows = TargetCalculator::distribute_carbs(
            &targets,
            &["breakfast", "lunch", "post-workout"],
            CarbPattern::WorkoutFocused,
            Rounding::NearestTenth,
        )
        .unwrap();

        assert_eq!(windows.len(), 3);
        // Weights 1,1,2 renormalize to 0.75, 0.75, 1.5.
        assert!(windows[2].carb_max_g > windows[0].carb_max_g * 1.9);
        assert_eq!(windows[0].carb_max_g, windows[1].carb_max_g);
    }

    #[test]
    fn test_even_distribution_keeps_slots_equal() {
        let targets = TargetCalculator::calculate(&TargetRequest::default());
        let windows = TargetCalculator::distribute_carbs(
            &targets,
            &["breakfast", "lunch", "dinner"],
            CarbPattern::Even,
            Rounding::NearestWhole,
        )
        .unwrap();
        assert!(windows.iter().all(|w| w.carb_min_g == windows[0].carb_min_g));
    }

    #[test]
    fn test_empty_slot_list_is_an_error() {
        let targets = TargetCalculator::calculate(&TargetRequest::default());
        let result = TargetCalculator::distribute_carbs(
            &targets,
            &[],
            CarbPattern::Even,
            Rounding::NearestWhole,
        );
        assert!(result.is_err());
    }
}
