pub mod types;

pub use types::{Difficulty, GI_FRIENDLY_BADGE, Ingredient, MealTemplate, MealType};
