//! Recipe use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/list/delete entry points for core callers.
//! - Return read-back records so callers see the stored difficulty and
//!   timestamps.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or classification.
//! - Service layer remains storage-agnostic.

use crate::model::recipe::{Recipe, RecipeDraft, RecipeId};
use crate::repo::recipe_repo::{RecipeListQuery, RecipeRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for recipe use-cases.
#[derive(Debug)]
pub enum RecipeServiceError {
    /// Target recipe does not exist.
    RecipeNotFound(RecipeId),
    /// Persistence-layer failure, including validation.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for RecipeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RecipeNotFound(id) => write!(f, "recipe not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent recipe state: {details}"),
        }
    }
}

impl Error for RecipeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RecipeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::RecipeNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Recipe plus its parsed ingredient list, as shown on a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<String>,
}

/// Recipe service facade over repository implementations.
pub struct RecipeService<R: RecipeRepository> {
    repo: R,
}

impl<R: RecipeRepository> RecipeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one recipe; difficulty is derived from the draft.
    pub fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, RecipeServiceError> {
        let id = self.repo.create_recipe(draft).map_err(|err| {
            warn!("event=recipe_create module=service status=error error={err}");
            err
        })?;
        let recipe = self
            .repo
            .get_recipe(id)?
            .ok_or(RecipeServiceError::InconsistentState(
                "created recipe not found in read-back",
            ))?;
        info!(
            "event=recipe_create module=service status=ok recipe_id={} difficulty={}",
            recipe.id, recipe.difficulty
        );
        Ok(recipe)
    }

    /// Replaces all draft fields of a recipe and reclassifies it.
    pub fn update_recipe(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeServiceError> {
        self.repo.update_recipe(id, draft)?;
        let recipe = self
            .repo
            .get_recipe(id)?
            .ok_or(RecipeServiceError::InconsistentState(
                "updated recipe not found in read-back",
            ))?;
        info!(
            "event=recipe_update module=service status=ok recipe_id={id} difficulty={}",
            recipe.difficulty
        );
        Ok(recipe)
    }

    pub fn get_recipe(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        self.repo.get_recipe(id)
    }

    /// Loads a recipe with its parsed ingredient list.
    pub fn recipe_detail(&self, id: RecipeId) -> Result<RecipeDetail, RecipeServiceError> {
        let recipe = self
            .repo
            .get_recipe(id)?
            .ok_or(RecipeServiceError::RecipeNotFound(id))?;
        let ingredients = recipe.ingredients_list();
        Ok(RecipeDetail {
            recipe,
            ingredients,
        })
    }

    /// Lists recipes newest first.
    pub fn list_recipes(&self, query: &RecipeListQuery) -> RepoResult<Vec<Recipe>> {
        self.repo.list_recipes(query)
    }

    /// Permanently deletes a recipe.
    pub fn delete_recipe(&self, id: RecipeId) -> Result<(), RecipeServiceError> {
        self.repo.delete_recipe(id)?;
        info!("event=recipe_delete module=service status=ok recipe_id={id}");
        Ok(())
    }
}
