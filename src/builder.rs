use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, FailurePolicy};
use crate::cooking::CookingMode;
use crate::error::CookError;
use crate::providers::{MealDbClient, RecipeLookup};
use crate::storage::{FavoritesStore, ShoppingList};
use crate::{search, Category, RecipeDetails, SearchError, SearchOutcome};

/// Recipe finder bound to one lookup backend and search policy
pub struct CookSmart {
    lookup: Arc<dyn RecipeLookup>,
    policy: FailurePolicy,
    data_dir: PathBuf,
}

impl CookSmart {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use cooksmart::CookSmart;
    ///
    /// let builder = CookSmart::builder();
    /// ```
    pub fn builder() -> CookSmartBuilder {
        CookSmartBuilder::default()
    }

    /// Build a finder from loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        Ok(Self {
            lookup: Arc::new(MealDbClient::new(&config.api)?),
            policy: config.search.failure_policy,
            data_dir: config.storage.data_dir.clone(),
        })
    }

    /// Ranked search over comma-separated ingredients
    ///
    /// # Example
    /// ```no_run
    /// # use cooksmart::{CookSmart, SearchOutcome};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let finder = CookSmart::builder().build()?;
    /// if let SearchOutcome::Found(recipes) = finder.search_by_ingredients("chicken, rice").await? {
    ///     println!("{} matched {} ingredient(s)", recipes[0].recipe.name, recipes[0].match_count);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_by_ingredients(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        search::search_by_ingredients(self.lookup.as_ref(), query, self.policy).await
    }

    pub async fn search_by_category(&self, category: &str) -> Result<SearchOutcome, SearchError> {
        search::search_by_category(self.lookup.as_ref(), category).await
    }

    /// Categories from the API, or the built-in list if it is unavailable
    pub async fn categories(&self) -> Vec<Category> {
        search::categories(self.lookup.as_ref()).await
    }

    pub async fn recipe_details(&self, id: &str) -> Result<RecipeDetails, SearchError> {
        search::recipe_details(self.lookup.as_ref(), id).await
    }

    /// Fetch a recipe and enter cooking mode on its first step
    ///
    /// A recipe whose instructions contain no steps fails with
    /// [`CookingError::EmptyInstructions`](crate::CookingError::EmptyInstructions).
    pub async fn start_cooking(&self, recipe_id: &str) -> Result<CookingMode, CookError> {
        let recipe = self.recipe_details(recipe_id).await?;
        let mut mode = CookingMode::new();
        mode.start(recipe.instructions())?;
        Ok(mode)
    }

    pub fn favorites(&self) -> FavoritesStore {
        FavoritesStore::open(&self.data_dir)
    }

    pub fn shopping_list(&self) -> ShoppingList {
        ShoppingList::open(&self.data_dir)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.policy
    }
}

/// Builder for configuring a [`CookSmart`] finder
///
/// Anything not set explicitly comes from [`AppConfig::default`].
#[derive(Default)]
pub struct CookSmartBuilder {
    config: Option<AppConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    policy: Option<FailurePolicy>,
    data_dir: Option<PathBuf>,
    lookup: Option<Arc<dyn RecipeLookup>>,
}

impl CookSmartBuilder {
    /// Start from a loaded configuration instead of the defaults
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Point the client at a different TheMealDB-compatible API
    ///
    /// # Example
    /// ```
    /// use cooksmart::CookSmart;
    ///
    /// let builder = CookSmart::builder()
    ///     .base_url("http://localhost:8080/api/json/v1/1");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for each HTTP request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Choose what happens when some ingredient lookups fail
    ///
    /// # Example
    /// ```
    /// use cooksmart::{CookSmart, FailurePolicy};
    ///
    /// let builder = CookSmart::builder()
    ///     .failure_policy(FailurePolicy::Partial);
    /// ```
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Directory for favorites and the shopping list
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Use a custom lookup backend instead of the HTTP client
    pub fn lookup(mut self, lookup: Arc<dyn RecipeLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Build the finder
    ///
    /// # Errors
    /// Returns `SearchError` if:
    /// - A custom lookup was combined with HTTP settings
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<CookSmart, SearchError> {
        let mut config = self.config.unwrap_or_default();

        let lookup = match self.lookup {
            Some(_) if self.base_url.is_some() || self.timeout.is_some() => {
                return Err(SearchError::Builder(
                    "base_url() and timeout() have no effect with a custom lookup".to_string(),
                ));
            }
            Some(lookup) => lookup,
            None => {
                if let Some(url) = self.base_url {
                    config.api.base_url = url;
                }
                let timeout = self.timeout.unwrap_or_else(|| config.api.timeout());
                Arc::new(MealDbClient::with_base_url(
                    config.api.base_url.clone(),
                    Some(timeout),
                )?)
            }
        };

        Ok(CookSmart {
            lookup,
            policy: self.policy.unwrap_or(config.search.failure_policy),
            data_dir: self.data_dir.unwrap_or(config.storage.data_dir),
        })
    }
}
