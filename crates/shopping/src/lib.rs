pub mod consolidate;
pub mod parse;
pub mod quantity;

pub use consolidate::{AggregatedIngredient, consolidate, grouping_key, normalize_name, shopping_list};
pub use parse::{ParsedIngredientLine, from_structured, parse_line};
pub use quantity::{canonical_unit, format_quantity, normalize_unit, parse_quantity};
