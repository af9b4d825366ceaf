//! Core domain logic for RecipeBook.
//! This crate is the single source of truth for recipe and account
//! invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::difficulty::{classify, Difficulty};
pub use model::recipe::{parse_ingredients, Recipe, RecipeDraft, RecipeId, RecipeValidationError};
pub use model::user::{User, UserId, UserValidationError};
pub use repo::recipe_repo::{RecipeListQuery, RecipeRepository, SqliteRecipeRepository};
pub use repo::user_repo::{NewUser, SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use search::criteria::{CriteriaError, SearchCriteria, SearchForm, COOKING_TIME_PRESETS};
pub use search::recipe_search::{search_recipes, SearchError, SearchOutcome, SearchResult};
pub use search::summary::{SearchSummary, TimeBucket};
pub use service::account_service::{AccountError, AccountService, LoginRequest, SignupRequest};
pub use service::recipe_service::{RecipeDetail, RecipeService, RecipeServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
