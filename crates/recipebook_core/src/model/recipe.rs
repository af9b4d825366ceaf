//! Recipe domain model.
//!
//! # Responsibility
//! - Define the persisted recipe record and the caller-supplied draft.
//! - Parse the free-text ingredient list.
//! - Validate draft fields before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another recipe.
//! - `difficulty` is never supplied by callers; it is derived from the
//!   draft's `cooking_time` and parsed ingredient count at write time.
//! - `created_at <= updated_at`.

use crate::model::difficulty::{classify, Difficulty};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a recipe.
pub type RecipeId = Uuid;

/// Maximum recipe name length, in characters.
pub const RECIPE_NAME_MAX_CHARS: usize = 200;

/// Persisted recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Comma-separated ingredient names, stored as entered.
    pub ingredients: String,
    /// Minutes.
    pub cooking_time: u32,
    pub description: String,
    pub difficulty: Difficulty,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed on every write.
    pub updated_at: i64,
}

impl Recipe {
    /// Returns the parsed ingredient list.
    pub fn ingredients_list(&self) -> Vec<String> {
        parse_ingredients(&self.ingredients)
    }

    /// Difficulty the current field values classify to.
    ///
    /// Equals `difficulty` for every record written through this crate.
    pub fn expected_difficulty(&self) -> Difficulty {
        classify(
            i64::from(self.cooking_time),
            parse_ingredients(&self.ingredients).len(),
        )
    }
}

impl Display for Recipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Caller-supplied recipe fields for create and full-replacement update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub ingredients: String,
    pub cooking_time: u32,
    pub description: String,
}

impl RecipeDraft {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        cooking_time: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            cooking_time,
            description: description.into(),
        }
    }

    /// Number of non-empty ingredients.
    pub fn ingredient_count(&self) -> usize {
        parse_ingredients(&self.ingredients).len()
    }

    /// Difficulty this draft classifies to.
    pub fn difficulty(&self) -> Difficulty {
        classify(i64::from(self.cooking_time), self.ingredient_count())
    }

    /// Validates draft fields before they reach storage.
    ///
    /// # Errors
    /// - `EmptyName` when the trimmed name is empty.
    /// - `NameTooLong` when the name exceeds `RECIPE_NAME_MAX_CHARS`.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        let chars = name.chars().count();
        if chars > RECIPE_NAME_MAX_CHARS {
            return Err(RecipeValidationError::NameTooLong {
                max: RECIPE_NAME_MAX_CHARS,
                actual: chars,
            });
        }
        Ok(())
    }
}

/// Field-level validation failures for recipe drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    EmptyName,
    NameTooLong { max: usize, actual: usize },
}

impl Display for RecipeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "recipe name cannot be empty"),
            Self::NameTooLong { max, actual } => {
                write!(f, "recipe name is {actual} characters; maximum is {max}")
            }
        }
    }
}

impl Error for RecipeValidationError {}

/// Splits comma-separated ingredient text into trimmed, non-empty names.
///
/// Order is preserved. Degenerate input (only commas or whitespace) yields
/// an empty list.
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_ingredients, RecipeDraft, RecipeValidationError};
    use crate::model::difficulty::Difficulty;

    #[test]
    fn parse_ingredients_drops_empty_segments_and_whitespace() {
        assert_eq!(parse_ingredients("a, b ,, c,"), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_ingredients_handles_degenerate_text() {
        assert!(parse_ingredients("").is_empty());
        assert!(parse_ingredients(" , ,,  ").is_empty());
    }

    #[test]
    fn draft_difficulty_uses_parsed_count() {
        let draft = RecipeDraft::new("Toast", "bread, butter,, ,", 5, "");
        assert_eq!(draft.ingredient_count(), 2);
        assert_eq!(draft.difficulty(), Difficulty::Easy);

        let draft = RecipeDraft::new("Salad", "a,b,c,d", 5, "");
        assert_eq!(draft.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn validate_rejects_blank_and_oversized_names() {
        let blank = RecipeDraft::new("   ", "egg", 3, "");
        assert_eq!(blank.validate(), Err(RecipeValidationError::EmptyName));

        let long = RecipeDraft::new("x".repeat(201), "egg", 3, "");
        assert!(matches!(
            long.validate(),
            Err(RecipeValidationError::NameTooLong { actual: 201, .. })
        ));

        assert!(RecipeDraft::new("Egg", "egg", 3, "").validate().is_ok());
    }
}
