use recipe::Ingredient;
use serde::Serialize;

use crate::quantity::{canonical_unit, normalize_unit, parse_quantity};

/// One ingredient line after parsing: quantity/unit/name plus the text it
/// came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIngredientLine {
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub original_text: String,
}

/// Parse a free-form ingredient line.
///
/// Grammar attempts, in order: `<quantity> <unit> <name>` where the unit may
/// be one or two words, then `<quantity> <name>`, then the whole string as a
/// name with no quantity or unit. Parsing never fails: unparsable quantity or
/// unit information degrades to name-only, and an empty line yields an
/// empty-name record that callers filter out.
pub fn parse_line(text: &str) -> ParsedIngredientLine {
    let original_text = text.to_string();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedIngredientLine {
            name: String::new(),
            quantity: None,
            unit: None,
            original_text,
        };
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    // Quantity spans two tokens for a mixed number, else one.
    let mut quantity = None;
    let mut consumed = 0;
    if tokens.len() >= 2 && tokens[1].contains('/') {
        if let Some(value) = parse_quantity(&format!("{} {}", tokens[0], tokens[1])) {
            quantity = Some(value);
            consumed = 2;
        }
    }
    if quantity.is_none() {
        if let Some(value) = parse_quantity(tokens[0]) {
            quantity = Some(value);
            consumed = 1;
        }
    }

    let rest = &tokens[consumed..];
    if quantity.is_none() || rest.is_empty() {
        // No leading quantity, or a bare quantity with nothing after it:
        // the whole string is the name.
        return ParsedIngredientLine {
            name: trimmed.to_string(),
            quantity: None,
            unit: None,
            original_text,
        };
    }

    // Unit is one or two words, and must leave at least one token of name.
    let mut unit = None;
    let mut unit_len = 0;
    if rest.len() >= 3 {
        if let Some(canonical) = canonical_unit(&format!("{} {}", rest[0], rest[1])) {
            unit = Some(canonical.to_string());
            unit_len = 2;
        }
    }
    if unit.is_none() && rest.len() >= 2 {
        if let Some(canonical) = canonical_unit(rest[0]) {
            unit = Some(canonical.to_string());
            unit_len = 1;
        }
    }

    ParsedIngredientLine {
        name: rest[unit_len..].join(" "),
        quantity,
        unit,
        original_text,
    }
}

/// Coerce a structured catalog ingredient into a parsed line.
pub fn from_structured(ingredient: &Ingredient) -> ParsedIngredientLine {
    let name = ingredient.name.trim().to_string();
    let quantity = ingredient.amount.as_deref().and_then(parse_quantity);
    let unit = ingredient.unit.as_deref().and_then(normalize_unit);

    let mut original_text = String::new();
    for part in [
        ingredient.amount.as_deref(),
        ingredient.unit.as_deref(),
        Some(name.as_str()),
    ]
    .into_iter()
    .flatten()
    {
        if !original_text.is_empty() {
            original_text.push(' ');
        }
        original_text.push_str(part.trim());
    }

    ParsedIngredientLine {
        name,
        quantity,
        unit,
        original_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_unit_name() {
        let line = parse_line("2 cups rice");
        assert_eq!(line.name, "rice");
        assert_eq!(line.quantity, Some(2.0));
        assert_eq!(line.unit, Some("cup".to_string()));
        assert_eq!(line.original_text, "2 cups rice");
    }

    #[test]
    fn test_parse_mixed_number_quantity() {
        let line = parse_line("1 1/2 tbsp olive oil");
        assert_eq!(line.name, "olive oil");
        assert_eq!(line.quantity, Some(1.5));
        assert_eq!(line.unit, Some("tbsp".to_string()));
    }

    #[test]
    fn test_parse_two_word_unit() {
        let line = parse_line("8 fluid ounces milk");
        assert_eq!(line.name, "milk");
        assert_eq!(line.quantity, Some(8.0));
        assert_eq!(line.unit, Some("fl oz".to_string()));
    }

    #[test]
    fn test_parse_quantity_name_without_unit() {
        let line = parse_line("2 eggs");
        assert_eq!(line.name, "eggs");
        assert_eq!(line.quantity, Some(2.0));
        assert_eq!(line.unit, None);
    }

    #[test]
    fn test_parse_name_only() {
        let line = parse_line("salt to taste");
        assert_eq!(line.name, "salt to taste");
        assert_eq!(line.quantity, None);
        assert_eq!(line.unit, None);
    }

    #[test]
    fn test_unit_word_becomes_name_when_nothing_follows() {
        // Grammar falls back to <quantity> <name> when no name follows a unit.
        let line = parse_line("2 cups");
        assert_eq!(line.name, "cups");
        assert_eq!(line.quantity, Some(2.0));
        assert_eq!(line.unit, None);
    }

    #[test]
    fn test_empty_line_yields_empty_name_record() {
        let line = parse_line("   ");
        assert_eq!(line.name, "");
        assert_eq!(line.quantity, None);
        assert_eq!(line.unit, None);
    }

    #[test]
    fn test_structured_entry_coercion() {
        let ingredient = Ingredient::with_amount("Chicken Breast", "1 1/2", Some("Pounds"));
        let line = from_structured(&ingredient);
        assert_eq!(line.name, "Chicken Breast");
        assert_eq!(line.quantity, Some(1.5));
        assert_eq!(line.unit, Some("lb".to_string()));
        assert_eq!(line.original_text, "1 1/2 Pounds Chicken Breast");
    }
}
