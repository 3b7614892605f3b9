use std::cmp::Ordering;
use std::sync::LazyLock;

use recipe::{Difficulty, MealTemplate};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::rules::{PlanParameters, RuleSet};
use crate::safety::admissible_templates;

/// Ordered keyword table mapping craving text to candidate cuisine tags.
///
/// A deliberately small, inspectable heuristic rather than a classifier;
/// [`cuisine_tags_for_craving`] is the seam to swap a real one in behind.
static CRAVING_PATTERNS: LazyLock<Vec<(Regex, &'static [&'static str])>> = LazyLock::new(|| {
    [
        ("mex|tex|taco|burrito", &["mexican", "tex-mex"][..]),
        ("ital|pasta|pizza", &["italian"][..]),
        ("medit|greek|feta|olive", &["mediterranean"][..]),
        ("india|curry|masala", &["indian"][..]),
        ("chin|stir.?fry|soy|wok", &["chinese", "asian"][..]),
        ("japan|sushi|teriyaki|ramen", &["japanese", "asian"][..]),
        ("thai|lemongrass|pad.?thai", &["thai", "asian"][..]),
        ("bbq|barbecue|grill|smoked", &["american", "bbq"][..]),
    ]
    .into_iter()
    .map(|(pattern, tags)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("static craving pattern");
        (regex, tags)
    })
    .collect()
});

/// Map free-text craving input to zero or more candidate cuisine tags.
///
/// The text is pattern-matching input only, never interpreted further.
pub fn cuisine_tags_for_craving(text: &str) -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = Vec::new();
    for (regex, row_tags) in CRAVING_PATTERNS.iter() {
        if regex.is_match(text) {
            for tag in *row_tags {
                if !tags.contains(tag) {
                    tags.push(tag);
                }
            }
        }
    }
    tags
}

/// A template with its computed ranking score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate<'a> {
    pub template: &'a MealTemplate,
    pub score: f64,
}

/// Score one candidate against the user's diet preference and optional
/// craving text.
///
/// Base 0; +2 diet-tag affinity; a simplicity bonus shrinking to zero at 8
/// ingredients; a speed bonus shrinking to zero at 45 minutes. With craving
/// text: +3 for a cuisine-tag match, +2 when the text appears in the template
/// name, +1 for easy difficulty.
pub fn score_template(template: &MealTemplate, diet: Option<&str>, craving: Option<&str>) -> f64 {
    let mut score = 0.0;

    if let Some(diet) = diet {
        if template.has_diet_tag(diet) {
            score += 2.0;
        }
    }

    score += (8.0 - template.ingredients.len() as f64).max(0.0) * 0.1;
    score += (45.0 - f64::from(template.total_time_min())).max(0.0) * 0.02;

    if let Some(text) = craving {
        let text = text.trim();
        if !text.is_empty() {
            let craving_tags = cuisine_tags_for_craving(text);
            if let Some(cuisine) = &template.cuisine {
                if craving_tags.iter().any(|tag| cuisine.eq_ignore_ascii_case(tag)) {
                    score += 3.0;
                }
            }
            if template.name.to_lowercase().contains(&text.to_lowercase()) {
                score += 2.0;
            }
            if template.difficulty == Difficulty::Easy {
                score += 1.0;
            }
        }
    }

    score
}

/// Rank a pool of candidates descending by score.
///
/// The sort is stable and ties are not broken further: tied candidates keep
/// their pool order. Callers that need a deterministic secondary key should
/// pre-sort the pool (e.g. by id) before ranking.
pub fn rank_candidates<'a>(
    pool: impl IntoIterator<Item = &'a MealTemplate>,
    diet: Option<&str>,
    craving: Option<&str>,
) -> Vec<ScoredCandidate<'a>> {
    let mut ranked: Vec<ScoredCandidate<'a>> = pool
        .into_iter()
        .map(|template| ScoredCandidate {
            score: score_template(template, diet, craving),
            template,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

/// Pick the single best candidate for a craving.
///
/// Admissible candidates are ranked and the top one returned; with no
/// admissible candidate the first template of the pool is the fallback, so a
/// craving request always gets *something* from a non-empty pool.
pub fn best_craving_match<'a>(
    pool: &'a [MealTemplate],
    params: &PlanParameters,
    rules: &RuleSet,
    craving: Option<&str>,
) -> Option<&'a MealTemplate> {
    let admissible = admissible_templates(pool, params, rules);
    if admissible.is_empty() {
        debug!(pool = pool.len(), "no admissible candidate, falling back to pool head");
        return pool.first();
    }

    let ranked = rank_candidates(admissible, params.diet.as_deref(), craving);
    ranked.first().map(|candidate| candidate.template)
}
