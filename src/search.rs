//! Ingredient and category search on top of a [`RecipeLookup`].
//!
//! An ingredient query such as `"chicken, rice"` is split into terms, every
//! term is looked up concurrently, and the result sets are merged into one
//! list ranked by how many of the terms each recipe matched. Ties keep the
//! order in which recipes were first seen, walking the terms left to right.

use crate::config::FailurePolicy;
use crate::error::SearchError;
use crate::model::{Category, RecipeDetails, RecipeSummary, ScoredRecipe, SearchOutcome};
use crate::providers::RecipeLookup;
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};

/// Categories offered when the API cannot list them
pub const FALLBACK_CATEGORIES: [&str; 12] = [
    "Beef",
    "Chicken",
    "Dessert",
    "Lamb",
    "Miscellaneous",
    "Pasta",
    "Pork",
    "Seafood",
    "Side",
    "Starter",
    "Vegan",
    "Vegetarian",
];

/// Split a comma-separated ingredient query into distinct, trimmed terms
///
/// Duplicates are compared case-insensitively and the first spelling wins.
pub fn parse_terms(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    query
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .filter(|term| seen.insert(term.to_lowercase()))
        .map(String::from)
        .collect()
}

/// Merge per-term result sets into a ranked list
///
/// Each recipe scores one point per result set it appears in. The output is
/// sorted by score, highest first; the sort is stable so equal scores stay
/// in discovery order.
pub fn merge_results<I>(result_sets: I) -> Vec<ScoredRecipe>
where
    I: IntoIterator<Item = Vec<RecipeSummary>>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<ScoredRecipe> = Vec::new();

    for recipes in result_sets {
        // A recipe listed twice by the same term still counts once
        let mut counted = HashSet::new();
        for recipe in recipes {
            if !counted.insert(recipe.id.clone()) {
                continue;
            }
            match positions.get(&recipe.id) {
                Some(&position) => merged[position].match_count += 1,
                None => {
                    positions.insert(recipe.id.clone(), merged.len());
                    merged.push(ScoredRecipe {
                        recipe,
                        match_count: 1,
                    });
                }
            }
        }
    }

    merged.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    merged
}

/// Search recipes matching any of the comma-separated ingredients in `query`
///
/// All lookups run concurrently and are awaited together. With
/// [`FailurePolicy::FailFast`] the first failing term (in query order) fails
/// the whole search; with [`FailurePolicy::Partial`] failed terms are skipped
/// unless every term failed.
pub async fn search_by_ingredients(
    lookup: &dyn RecipeLookup,
    query: &str,
    policy: FailurePolicy,
) -> Result<SearchOutcome, SearchError> {
    let terms = parse_terms(query);
    if terms.is_empty() {
        debug!("Empty ingredient query, nothing to search");
        return Ok(SearchOutcome::NoResults);
    }

    info!(
        "Searching {} for {} ingredient(s): {}",
        lookup.provider_name(),
        terms.len(),
        terms.join(", ")
    );

    let lookups = terms.iter().map(|term| lookup.lookup_by_ingredient(term));
    let results = join_all(lookups).await;

    let result_sets = match policy {
        FailurePolicy::FailFast => {
            let mut sets = Vec::with_capacity(results.len());
            for (term, result) in terms.iter().zip(results) {
                match result {
                    Ok(recipes) => sets.push(recipes),
                    Err(e) => {
                        error!("Lookup for '{}' failed: {}", term, e);
                        return Err(e);
                    }
                }
            }
            sets
        }
        FailurePolicy::Partial => {
            let mut sets = Vec::with_capacity(results.len());
            let mut failures = Vec::new();
            for (term, result) in terms.iter().zip(results) {
                match result {
                    Ok(recipes) => sets.push(recipes),
                    Err(e) => {
                        warn!("Skipping '{}', lookup failed: {}", term, e);
                        failures.push(format!("{}: {}", term, e));
                    }
                }
            }
            if sets.is_empty() {
                return Err(SearchError::AllLookupsFailed(failures.join("; ")));
            }
            sets
        }
    };

    let ranked = merge_results(result_sets);
    debug!("Ingredient search produced {} recipe(s)", ranked.len());
    Ok(SearchOutcome::from_scored(ranked))
}

/// Search recipes in one category
///
/// Every hit carries a match count of 1 so both searches share a result type.
pub async fn search_by_category(
    lookup: &dyn RecipeLookup,
    category: &str,
) -> Result<SearchOutcome, SearchError> {
    let category = category.trim();
    if category.is_empty() {
        return Ok(SearchOutcome::NoResults);
    }

    let recipes = lookup.lookup_by_category(category).await.map_err(|e| {
        error!("Category search for '{}' failed: {}", category, e);
        e
    })?;

    Ok(SearchOutcome::from_scored(merge_results([recipes])))
}

/// List categories, falling back to a built-in list when the API fails
pub async fn categories(lookup: &dyn RecipeLookup) -> Vec<Category> {
    match lookup.categories().await {
        Ok(categories) if !categories.is_empty() => categories,
        Ok(_) => {
            warn!("Category list was empty, using fallback categories");
            fallback_categories()
        }
        Err(e) => {
            warn!("Failed to load categories, using fallback: {}", e);
            fallback_categories()
        }
    }
}

fn fallback_categories() -> Vec<Category> {
    FALLBACK_CATEGORIES.iter().map(|name| Category::new(*name)).collect()
}

/// Fetch one recipe, treating an unknown id as an error
pub async fn recipe_details(
    lookup: &dyn RecipeLookup,
    id: &str,
) -> Result<RecipeDetails, SearchError> {
    lookup
        .recipe_details(id.trim())
        .await?
        .ok_or_else(|| SearchError::NotFound(id.to_string()))
}
