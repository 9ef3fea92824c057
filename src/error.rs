use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport failure talking to the recipe API
    #[error("Failed to fetch recipes: {0}")]
    Http(#[from] reqwest::Error),

    /// The recipe API answered with a non-success status
    #[error("HTTP error! status: {status} ({url})")]
    Status { status: u16, url: String },

    /// The response body could not be understood
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A recipe lookup by id came back empty
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Every ingredient lookup failed under the partial failure policy
    #[error("All ingredient lookups failed: {0}")]
    AllLookupsFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),
}

impl SearchError {
    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::NotFound(_) => "Recipe details not found.",
            SearchError::Config(_) | SearchError::Builder(_) => {
                "The recipe search is not configured correctly."
            }
            _ => "Failed to search recipes. Please try again.",
        }
    }
}

/// Errors raised by the cooking-mode controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CookingError {
    /// The instructions did not contain a single usable step
    #[error("These instructions have no steps to cook from")]
    EmptyInstructions,

    /// An operation that needs an active session was called while inactive
    #[error("Cooking mode is not active")]
    NotActive,

    /// Step index outside the current step sequence
    #[error("Step {index} is out of range (recipe has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },
}

/// Errors from starting a cooking session for a recipe
#[derive(Error, Debug)]
pub enum CookError {
    /// The recipe could not be fetched
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The recipe was fetched but cooking mode refused to start
    #[error(transparent)]
    Cooking(#[from] CookingError),
}

impl CookError {
    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            CookError::Search(e) => e.user_message().to_string(),
            CookError::Cooking(e) => e.to_string(),
        }
    }
}

/// Errors from the local favorites and shopping list stores
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_details() {
        let err = SearchError::Status {
            status: 503,
            url: "https://example.com/filter.php?i=egg".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Failed to search recipes. Please try again."
        );
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_not_found_message() {
        let err = SearchError::NotFound("52772".to_string());
        assert_eq!(err.user_message(), "Recipe details not found.");
    }

    #[test]
    fn test_cook_error_messages() {
        let err = CookError::from(CookingError::EmptyInstructions);
        assert_eq!(
            err.user_message(),
            "These instructions have no steps to cook from"
        );

        let err = CookError::from(SearchError::NotFound("1".to_string()));
        assert_eq!(err.user_message(), "Recipe details not found.");
    }

    #[test]
    fn test_step_out_of_range_display() {
        let err = CookingError::StepOutOfRange { index: 4, len: 3 };
        assert_eq!(
            err.to_string(),
            "Step 4 is out of range (recipe has 3 steps)"
        );
    }
}
