mod mealdb;

pub use mealdb::MealDbClient;

use crate::error::SearchError;
use crate::model::{Category, RecipeDetails, RecipeSummary};
use async_trait::async_trait;

/// Source of recipe data
///
/// An empty result set is `Ok(vec![])`; only transport, status and decoding
/// problems are errors.
#[async_trait]
pub trait RecipeLookup: Send + Sync {
    /// Get the provider name (e.g., "themealdb")
    fn provider_name(&self) -> &str;

    /// Recipes that use the given ingredient
    async fn lookup_by_ingredient(&self, term: &str) -> Result<Vec<RecipeSummary>, SearchError>;

    /// Recipes in the given category
    async fn lookup_by_category(&self, category: &str)
        -> Result<Vec<RecipeSummary>, SearchError>;

    /// Full recipe by id, `None` when the id is unknown
    async fn recipe_details(&self, id: &str) -> Result<Option<RecipeDetails>, SearchError>;

    /// All known categories
    async fn categories(&self) -> Result<Vec<Category>, SearchError>;
}
