use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Highest numbered `strIngredientN` / `strMeasureN` field the API returns
pub const MAX_INGREDIENT_FIELDS: usize = 20;

/// A recipe as it appears in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "strArea", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// A search hit with the number of queried ingredients it matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: RecipeSummary,
    pub match_count: usize,
}

/// Outcome of a successful search
///
/// An empty search is not an error, but callers usually want to render it
/// differently from a list, so it gets its own variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<ScoredRecipe>),
    NoResults,
}

impl SearchOutcome {
    pub(crate) fn from_scored(recipes: Vec<ScoredRecipe>) -> Self {
        if recipes.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Found(recipes)
        }
    }

    /// Recipes found, empty for `NoResults`
    pub fn recipes(&self) -> &[ScoredRecipe] {
        match self {
            SearchOutcome::Found(recipes) => recipes,
            SearchOutcome::NoResults => &[],
        }
    }

    pub fn into_recipes(self) -> Vec<ScoredRecipe> {
        match self {
            SearchOutcome::Found(recipes) => recipes,
            SearchOutcome::NoResults => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::NoResults)
    }
}

/// Full recipe returned by the details lookup
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDetails {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strTags", default)]
    pub raw_tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    pub source: Option<String>,
    /// Remaining fields, including the numbered ingredient and measure slots
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

impl RecipeDetails {
    /// Ingredients in slot order, skipping blank slots
    pub fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENT_FIELDS)
            .filter_map(|i| {
                let name = self.slot(&format!("strIngredient{}", i))?;
                if name.is_empty() {
                    return None;
                }
                let measure = self
                    .slot(&format!("strMeasure{}", i))
                    .unwrap_or_default();
                Some(Ingredient {
                    name: name.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }

    /// Tags split on commas, trimmed
    pub fn tags(&self) -> Vec<String> {
        self.raw_tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn instructions(&self) -> &str {
        self.instructions.as_deref().unwrap_or_default()
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
            category: self.category.clone(),
            area: self.area.clone(),
        }
    }

    fn slot(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str).map(str::trim)
    }
}

/// A recipe category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "strCategory")]
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Envelope used by every TheMealDB endpoint; `meals` is `null` when empty
#[derive(Debug, Deserialize)]
pub(crate) struct MealsResponse<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

/// One step of a guided cooking session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookingStep {
    /// 1-based position
    pub step: usize,
    pub instruction: String,
    pub completed: bool,
}

/// An entry on the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub ingredient: String,
    pub measure: String,
    pub completed: bool,
    pub recipe_id: String,
    pub recipe_name: String,
}

impl ShoppingItem {
    pub fn new(
        ingredient: impl Into<String>,
        measure: impl Into<String>,
        recipe_id: impl Into<String>,
        recipe_name: impl Into<String>,
    ) -> Self {
        let ingredient = ingredient.into();
        let recipe_id = recipe_id.into();
        Self {
            id: format!("{}-{}", recipe_id, ingredient),
            ingredient,
            measure: measure.into(),
            completed: false,
            recipe_id,
            recipe_name: recipe_name.into(),
        }
    }
}
