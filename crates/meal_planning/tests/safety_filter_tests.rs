use meal_planning::{PlanParameters, RejectionCode, RuleSet, check_template, is_admissible};
use recipe::{Difficulty, GI_FRIENDLY_BADGE, Ingredient, MealTemplate, MealType};
use user::MedicalFlag;

fn create_test_template(id: &str, meal_type: MealType) -> MealTemplate {
    MealTemplate {
        id: id.to_string(),
        name: format!("Template {}", id),
        meal_type,
        calories: Some(500.0),
        protein_g: Some(35.0),
        carbs_g: Some(65.0),
        fat_g: Some(15.0),
        fiber_g: Some(8.0),
        vegetable_cups: Some(2.0),
        diet_tags: Vec::new(),
        badges: Vec::new(),
        allergens: Vec::new(),
        ingredients: vec![
            Ingredient::new("chicken breast"),
            Ingredient::new("brown rice"),
            Ingredient::new("broccoli"),
        ],
        instructions: vec!["Cook everything.".to_string()],
        prep_time_min: 10,
        cook_time_min: 20,
        servings: 2,
        cuisine: Some("american".to_string()),
        difficulty: Difficulty::Easy,
    }
}

/// Profile with a peanut allergy, template listing peanut: always `allergen`.
#[test]
fn test_allergen_profile_scenario() {
    let mut template = create_test_template("satay", MealType::Lunch);
    template.allergens = vec!["peanut".to_string()];
    let params = PlanParameters {
        allergens: vec!["peanut".to_string()],
        ..Default::default()
    };

    assert_eq!(
        check_template(&template, &params, &RuleSet::default()),
        Some(RejectionCode::Allergen)
    );
}

/// Allergen-free lunch with protein 35 g (inside [30,40]), 2 veg cups, and
/// carbs at 52% of 500 kcal (inside [45,65]) is admissible.
#[test]
fn test_admissible_lunch_scenario() {
    let template = create_test_template("balanced", MealType::Lunch);
    let params = PlanParameters {
        allergens: vec!["peanut".to_string()],
        ..Default::default()
    };

    assert_eq!(check_template(&template, &params, &RuleSet::default()), None);
    assert!(is_admissible(&template, &params, &RuleSet::default()));
}

/// Allergen check reports even when later checks would also fail.
#[test]
fn test_allergen_reported_before_other_failures() {
    let mut template = create_test_template("worst", MealType::Dinner);
    template.allergens = vec!["shellfish".to_string()];
    template.protein_g = Some(5.0); // would fail protein-out-of-range
    template.prep_time_min = 90; // would fail too-long-to-cook
    template.ingredients = (0..30)
        .map(|i| Ingredient::new(format!("item {}", i)))
        .collect(); // would fail too-many-ingredients

    let params = PlanParameters {
        allergens: vec!["shellfish".to_string()],
        ..Default::default()
    };
    assert_eq!(
        check_template(&template, &params, &RuleSet::default()),
        Some(RejectionCode::Allergen)
    );
}

/// A template over both the ingredient cap and the cook-time cap reports the
/// ingredient cap: that check comes first.
#[test]
fn test_ingredient_cap_has_priority_over_cook_time() {
    let mut template = create_test_template("elaborate", MealType::Dinner);
    template.ingredients = (0..15)
        .map(|i| Ingredient::new(format!("item {}", i)))
        .collect();
    template.prep_time_min = 40;
    template.cook_time_min = 40;

    assert_eq!(
        check_template(&template, &PlanParameters::default(), &RuleSet::default()),
        Some(RejectionCode::TooManyIngredients)
    );
}

/// Diabetes flag requires the GI badge on every candidate.
#[test]
fn test_diabetes_flag_requires_badge() {
    let template = create_test_template("plain", MealType::Lunch);
    let params = PlanParameters {
        medical_flags: vec![MedicalFlag::Diabetes],
        ..Default::default()
    };
    assert_eq!(
        check_template(&template, &params, &RuleSet::default()),
        Some(RejectionCode::MissingDiabetesBadge)
    );

    let mut badged = create_test_template("badged", MealType::Lunch);
    badged.badges = vec![GI_FRIENDLY_BADGE.to_string()];
    assert_eq!(check_template(&badged, &params, &RuleSet::default()), None);
}

/// Breakfast and snack templates never receive the main-meal codes, whatever
/// their protein and vegetable values.
#[test]
fn test_main_meal_exemption_for_breakfast_and_snacks() {
    for meal_type in [MealType::Breakfast, MealType::Snack] {
        let mut template = create_test_template("flexible", meal_type);
        template.protein_g = None;
        template.vegetable_cups = Some(0.0);
        template.carbs_g = Some(70.0); // 56% of 500 kcal, keeps carb check quiet

        assert_eq!(
            check_template(&template, &PlanParameters::default(), &RuleSet::default()),
            None,
            "{meal_type} should be exempt from protein/veg checks"
        );
    }
}

#[test]
fn test_main_meal_protein_checks() {
    let mut template = create_test_template("thin", MealType::Dinner);
    template.protein_g = None;
    assert_eq!(
        check_template(&template, &PlanParameters::default(), &RuleSet::default()),
        Some(RejectionCode::MissingProtein)
    );

    template.protein_g = Some(55.0);
    assert_eq!(
        check_template(&template, &PlanParameters::default(), &RuleSet::default()),
        Some(RejectionCode::ProteinOutOfRange)
    );
}

#[test]
fn test_carb_percent_band() {
    let mut template = create_test_template("sugary", MealType::Snack);
    template.calories = Some(400.0);
    template.carbs_g = Some(90.0); // 90% of calories from carbs
    assert_eq!(
        check_template(&template, &PlanParameters::default(), &RuleSet::default()),
        Some(RejectionCode::CarbPercentOutOfRange)
    );

    // Unknown carbs: check cannot run, template passes.
    template.carbs_g = None;
    assert_eq!(
        check_template(&template, &PlanParameters::default(), &RuleSet::default()),
        None
    );
}

/// Swapping the rule set swaps the thresholds wholesale.
#[test]
fn test_custom_rule_set_changes_outcome() {
    let template = create_test_template("slowish", MealType::Lunch);
    let strict = RuleSet {
        max_total_minutes: 20,
        ..Default::default()
    };
    assert_eq!(
        check_template(&template, &PlanParameters::default(), &strict),
        Some(RejectionCode::TooLongToCook)
    );
    assert_eq!(
        check_template(&template, &PlanParameters::default(), &RuleSet::default()),
        None
    );
}
