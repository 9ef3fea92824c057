use crate::config::ApiConfig;
use crate::error::SearchError;
use crate::model::{Category, MealsResponse, RecipeDetails, RecipeSummary};
use crate::providers::RecipeLookup;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the TheMealDB JSON API
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a new client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, SearchError> {
        Self::with_base_url(config.base_url.clone(), Some(config.timeout()))
    }

    #[doc(hidden)]
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SearchError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cooksmart/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, SearchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed: MealsResponse<T> = serde_json::from_str(&body)
            .map_err(|e| SearchError::Parse(format!("{} from {}", e, url)))?;

        Ok(parsed.into_vec())
    }
}

#[async_trait]
impl RecipeLookup for MealDbClient {
    fn provider_name(&self) -> &str {
        "themealdb"
    }

    async fn lookup_by_ingredient(&self, term: &str) -> Result<Vec<RecipeSummary>, SearchError> {
        self.get_meals("filter.php", &[("i", term)]).await
    }

    async fn lookup_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RecipeSummary>, SearchError> {
        self.get_meals("filter.php", &[("c", category)]).await
    }

    async fn recipe_details(&self, id: &str) -> Result<Option<RecipeDetails>, SearchError> {
        let meals: Vec<RecipeDetails> = self.get_meals("lookup.php", &[("i", id)]).await?;
        Ok(meals.into_iter().next())
    }

    async fn categories(&self) -> Result<Vec<Category>, SearchError> {
        self.get_meals("list.php", &[("c", "list")]).await
    }
}
