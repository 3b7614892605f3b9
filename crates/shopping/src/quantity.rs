/// Parse a quantity string into a float.
///
/// Supports whole numbers ("2"), decimals ("0.5"), simple fractions ("1/2"),
/// and mixed numbers ("1 1/2"). Anything else, including negative values,
/// degrades to `None` rather than failing the caller.
pub fn parse_quantity(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Mixed number: "1 1/2"
    if let Some((whole, frac)) = trimmed.split_once(char::is_whitespace) {
        if frac.contains('/') {
            let whole: f64 = whole.trim().parse().ok()?;
            if whole < 0.0 {
                return None;
            }
            return Some(whole + parse_simple_fraction(frac.trim())?);
        }
        return None;
    }

    // Simple fraction: "1/2"
    if trimmed.contains('/') {
        return parse_simple_fraction(trimmed);
    }

    // Decimal or whole number
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn parse_simple_fraction(text: &str) -> Option<f64> {
    let (numer, denom) = text.split_once('/')?;
    let numer: f64 = numer.trim().parse().ok()?;
    let denom: f64 = denom.trim().parse().ok()?;
    if numer < 0.0 || denom <= 0.0 {
        return None;
    }
    Some(numer / denom)
}

/// Collapse plural and abbreviated unit spellings to a canonical form.
///
/// Returns `None` for words that are not a known unit, which is how the
/// free-text parser tells units apart from ingredient names.
pub fn canonical_unit(word: &str) -> Option<&'static str> {
    let normalized = word.trim().trim_end_matches(['.', ',']).to_lowercase();
    Some(match normalized.as_str() {
        "cup" | "cups" | "c" => "cup",
        "tablespoon" | "tablespoons" | "tbsp" | "tbsps" | "tbs" | "tb" => "tbsp",
        "teaspoon" | "teaspoons" | "tsp" | "tsps" | "ts" => "tsp",
        "ounce" | "ounces" | "oz" => "oz",
        "fluid ounce" | "fluid ounces" | "fl oz" => "fl oz",
        "pound" | "pounds" | "lb" | "lbs" => "lb",
        "gram" | "grams" | "g" => "g",
        "kilogram" | "kilograms" | "kg" => "kg",
        "milliliter" | "milliliters" | "ml" => "ml",
        "liter" | "liters" | "l" => "l",
        "pint" | "pints" | "pt" => "pint",
        "quart" | "quarts" | "qt" => "quart",
        "gallon" | "gallons" | "gal" => "gallon",
        "clove" | "cloves" => "clove",
        "can" | "cans" => "can",
        "slice" | "slices" => "slice",
        "piece" | "pieces" => "piece",
        "pinch" | "pinches" => "pinch",
        "dash" | "dashes" => "dash",
        "bunch" | "bunches" => "bunch",
        "head" | "heads" => "head",
        "stalk" | "stalks" => "stalk",
        "sprig" | "sprigs" => "sprig",
        "package" | "packages" | "pkg" => "package",
        "bag" | "bags" => "bag",
        "jar" | "jars" => "jar",
        "bottle" | "bottles" => "bottle",
        _ => return None,
    })
}

/// Normalize a structured entry's unit: alias table first, unknown units
/// pass through lowercased, blank units become `None`.
pub fn normalize_unit(unit: &str) -> Option<String> {
    let trimmed = unit.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        canonical_unit(trimmed)
            .map(str::to_string)
            .unwrap_or_else(|| trimmed.to_lowercase()),
    )
}

/// Render a quantity for a shopping list.
///
/// Common fractional parts render as kitchen fractions (0.5 -> "1/2",
/// 1.5 -> "1 1/2"); other non-integers round to one decimal with a trailing
/// ".0" stripped; integers render bare.
pub fn format_quantity(quantity: f64) -> String {
    const COMMON_FRACTIONS: &[(f64, &str)] = &[
        (0.25, "1/4"),
        (1.0 / 3.0, "1/3"),
        (0.5, "1/2"),
        (2.0 / 3.0, "2/3"),
        (0.75, "3/4"),
    ];

    let whole = quantity.trunc();
    let frac = quantity - whole;

    if frac < 0.005 {
        return format!("{}", whole as i64);
    }

    for (value, rendering) in COMMON_FRACTIONS {
        if (frac - value).abs() < 0.01 {
            return if whole >= 1.0 {
                format!("{} {}", whole as i64, rendering)
            } else {
                (*rendering).to_string()
            };
        }
    }

    let rounded = (quantity * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}
