pub mod builder;
pub mod config;
pub mod cooking;
pub mod error;
pub mod model;
pub mod providers;
pub mod search;
pub mod storage;

pub use builder::{CookSmart, CookSmartBuilder};
pub use config::{AppConfig, FailurePolicy};
pub use cooking::{split_into_steps, CookingMode};
pub use error::{CookError, CookingError, SearchError, StorageError};
pub use model::{
    Category, CookingStep, Ingredient, RecipeDetails, RecipeSummary, ScoredRecipe, SearchOutcome,
    ShoppingItem,
};
pub use providers::{MealDbClient, RecipeLookup};

/// Ranked ingredient search against TheMealDB with default settings
///
/// # Arguments
/// * `query` - Comma-separated ingredients, e.g. `"chicken, rice"`
///
/// # Returns
/// `SearchOutcome::Found` with recipes ordered by how many of the
/// ingredients they use, or `SearchOutcome::NoResults`
pub async fn search_by_ingredients(query: &str) -> Result<SearchOutcome, SearchError> {
    CookSmart::builder()
        .build()?
        .search_by_ingredients(query)
        .await
}

/// Recipes in a category, using default settings
pub async fn search_by_category(category: &str) -> Result<SearchOutcome, SearchError> {
    CookSmart::builder().build()?.search_by_category(category).await
}

/// Fetch a recipe and split its instructions into cooking steps
///
/// Fails with `CookingError::EmptyInstructions` when there is nothing to cook.
pub async fn cooking_steps(recipe_id: &str) -> Result<Vec<CookingStep>, CookError> {
    let mode = CookSmart::builder()
        .build()?
        .start_cooking(recipe_id)
        .await?;
    Ok(mode.steps().to_vec())
}
