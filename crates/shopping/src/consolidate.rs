use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use recipe::MealTemplate;
use serde::Serialize;
use tracing::debug;

use crate::parse::{ParsedIngredientLine, from_structured};
use crate::quantity::format_quantity;

/// Preparation descriptors stripped before grouping, so "chopped onion" and
/// "onion, diced" land on the same shopping-list row.
static DESCRIPTOR_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "fresh", "frozen", "chopped", "diced", "minced", "sliced", "grated", "shredded", "raw",
        "cooked", "canned", "dried", "whole", "ground",
    ])
});

/// One deduplicated shopping-list entry.
///
/// `quantity` is defined only when every contributing line shared the
/// entry's unit (or all were unit-less); the grouping key guarantees that.
/// Created fresh per consolidation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedIngredient {
    /// Display name: original casing of the first line seen for the group.
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    /// How many lines contributed, whether or not they carried a quantity.
    pub occurrences: u32,
    /// Stable grouping key: normalized name, plus "::unit" when present.
    pub key: String,
    /// UI checkbox state; always starts unchecked.
    pub checked: bool,
    /// Human-readable rendering, e.g. "1 1/2 cup rice".
    pub display: String,
}

fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = name.strip_suffix("oes") {
        return format!("{}o", stem);
    }
    if name.len() > 4 {
        if let Some(stem) = name.strip_suffix("es") {
            return stem.to_string();
        }
    }
    if !name.ends_with("ss") {
        if let Some(stem) = name.strip_suffix('s') {
            return stem.to_string();
        }
    }
    name.to_string()
}

/// Normalize an ingredient name for grouping: lowercase, drop punctuation
/// and descriptor words, singularize.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if matches!(c, ',' | '(' | ')') { ' ' } else { c })
        .collect();

    let kept: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|word| !DESCRIPTOR_WORDS.contains(word))
        .collect();

    if kept.is_empty() {
        // Name was nothing but descriptors; keep it rather than lose the row.
        return singularize(lowered.trim());
    }
    singularize(&kept.join(" "))
}

/// The stable grouping key deciding whether two lines are the same
/// shopping-list item. Bundling the unit into the key means quantities in
/// different units never merge; that is the documented behavior, not a bug.
pub fn grouping_key(normalized_name: &str, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{}::{}", normalized_name, unit),
        None => normalized_name.to_string(),
    }
}

struct Group {
    name: String,
    quantity: Option<f64>,
    unit: Option<String>,
    occurrences: u32,
}

/// Merge parsed ingredient lines across meals into a deduplicated list.
///
/// Quantities sum within a group; the first quantity seen seeds the total and
/// a quantity-less line never erases it. Occurrences count every line.
/// Empty-name lines (the parser's degraded output for blank input) are
/// dropped here. Output is sorted alphabetically by display name, key as the
/// tie-break, so identical input multisets always produce identical lists.
pub fn consolidate(
    lines: impl IntoIterator<Item = ParsedIngredientLine>,
) -> Vec<AggregatedIngredient> {
    let mut groups: HashMap<String, Group> = HashMap::new();

    for line in lines {
        let name = line.name.trim();
        if name.is_empty() {
            continue;
        }

        let key = grouping_key(&normalize_name(name), line.unit.as_deref());
        let group = groups.entry(key).or_insert_with(|| Group {
            name: name.to_string(),
            quantity: None,
            unit: line.unit.clone(),
            occurrences: 0,
        });

        group.occurrences += 1;
        if let Some(quantity) = line.quantity {
            group.quantity = Some(group.quantity.unwrap_or(0.0) + quantity);
        }
    }

    let mut result: Vec<AggregatedIngredient> = groups
        .into_iter()
        .map(|(key, group)| {
            let display = match (group.quantity, group.unit.as_deref()) {
                (Some(quantity), Some(unit)) => {
                    format!("{} {} {}", format_quantity(quantity), unit, group.name)
                }
                (Some(quantity), None) => format!("{} {}", format_quantity(quantity), group.name),
                (None, _) => group.name.clone(),
            };
            AggregatedIngredient {
                name: group.name,
                quantity: group.quantity,
                unit: group.unit,
                occurrences: group.occurrences,
                key,
                checked: false,
                display,
            }
        })
        .collect();

    result.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.key.cmp(&b.key)));
    debug!(entries = result.len(), "consolidated shopping list");
    result
}

/// Build the consolidated shopping list for a set of chosen meals.
pub fn shopping_list<'a>(
    templates: impl IntoIterator<Item = &'a MealTemplate>,
) -> Vec<AggregatedIngredient> {
    consolidate(
        templates
            .into_iter()
            .flat_map(|template| template.ingredients.iter().map(from_structured)),
    )
}
