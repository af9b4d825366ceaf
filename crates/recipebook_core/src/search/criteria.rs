//! Search criteria and the raw input form they are validated from.
//!
//! # Responsibility
//! - Model the optional recipe filters consumed by `search_recipes`.
//! - Turn loosely typed form input into validated criteria.
//!
//! # Invariants
//! - Text filters are trimmed; blank input means "no filter".
//! - `cooking_time` is a non-negative inclusive upper bound in minutes.

use crate::model::difficulty::Difficulty;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum length of a text filter, in characters.
pub const CRITERIA_TEXT_MAX_CHARS: usize = 120;

/// Upper bounds offered by the search form's cooking-time picker.
pub const COOKING_TIME_PRESETS: [u32; 3] = [10, 30, 60];

/// Validated recipe search filters. All present filters are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the recipe name.
    pub recipe_name: Option<String>,
    /// Case-insensitive substring of the raw ingredients text.
    pub ingredient: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Matches `cooking_time <= value`.
    pub cooking_time: Option<u32>,
    /// Requests chart summaries when at least one recipe matches.
    pub show_chart: bool,
}

impl SearchCriteria {
    /// Returns true when no filter is set.
    pub fn is_unfiltered(&self) -> bool {
        self.recipe_name.is_none()
            && self.ingredient.is_none()
            && self.difficulty.is_none()
            && self.cooking_time.is_none()
    }
}

/// Raw search input as decoded from a transport (query string, CLI flags).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchForm {
    pub recipe_name: Option<String>,
    pub ingredient: Option<String>,
    pub difficulty: Option<String>,
    pub cooking_time: Option<String>,
    pub show_chart: Option<String>,
}

/// Rejected search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidDifficulty(String),
    InvalidCookingTime(String),
}

impl Display for CriteriaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLong { field, max, actual } => {
                write!(f, "`{field}` is {actual} characters; maximum is {max}")
            }
            Self::InvalidDifficulty(value) => write!(
                f,
                "unknown difficulty `{value}`; expected Easy|Medium|Intermediate|Hard"
            ),
            Self::InvalidCookingTime(value) => write!(
                f,
                "cooking time `{value}` must be a non-negative whole number of minutes"
            ),
        }
    }
}

impl Error for CriteriaError {}

impl SearchForm {
    /// Validates the form into search criteria.
    ///
    /// # Errors
    /// - `TooLong` when a text filter exceeds `CRITERIA_TEXT_MAX_CHARS`.
    /// - `InvalidDifficulty` for labels other than the four levels or `All`.
    /// - `InvalidCookingTime` for non-integer or negative values.
    pub fn into_criteria(self) -> Result<SearchCriteria, CriteriaError> {
        let recipe_name = normalize_text("recipe_name", self.recipe_name)?;
        let ingredient = normalize_text("ingredient", self.ingredient)?;

        let difficulty = match non_blank(self.difficulty) {
            None => None,
            Some(value) if value.eq_ignore_ascii_case("all") => None,
            Some(value) => Some(
                Difficulty::parse(&value).ok_or(CriteriaError::InvalidDifficulty(value))?,
            ),
        };

        let cooking_time = match non_blank(self.cooking_time) {
            None => None,
            Some(value) => Some(
                value
                    .parse::<u32>()
                    .map_err(|_| CriteriaError::InvalidCookingTime(value))?,
            ),
        };

        let show_chart = non_blank(self.show_chart).is_some_and(|value| {
            matches!(
                value.to_ascii_lowercase().as_str(),
                "on" | "true" | "1" | "yes"
            )
        });

        Ok(SearchCriteria {
            recipe_name,
            ingredient,
            difficulty,
            cooking_time,
            show_chart,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn normalize_text(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, CriteriaError> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };
    let actual = value.chars().count();
    if actual > CRITERIA_TEXT_MAX_CHARS {
        return Err(CriteriaError::TooLong {
            field,
            max: CRITERIA_TEXT_MAX_CHARS,
            actual,
        });
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::{CriteriaError, SearchCriteria, SearchForm};
    use crate::model::difficulty::Difficulty;

    fn form() -> SearchForm {
        SearchForm::default()
    }

    #[test]
    fn empty_form_is_unfiltered() {
        let criteria = form().into_criteria().unwrap();
        assert_eq!(criteria, SearchCriteria::default());
        assert!(criteria.is_unfiltered());
    }

    #[test]
    fn blank_and_all_values_mean_no_filter() {
        let criteria = SearchForm {
            recipe_name: Some("   ".to_string()),
            ingredient: Some(String::new()),
            difficulty: Some("All".to_string()),
            cooking_time: Some(" ".to_string()),
            show_chart: None,
        }
        .into_criteria()
        .unwrap();
        assert!(criteria.is_unfiltered());
        assert!(!criteria.show_chart);
    }

    #[test]
    fn values_are_trimmed_and_parsed() {
        let criteria = SearchForm {
            recipe_name: Some("  pasta ".to_string()),
            ingredient: Some("egg".to_string()),
            difficulty: Some("medium".to_string()),
            cooking_time: Some("30".to_string()),
            show_chart: Some("on".to_string()),
        }
        .into_criteria()
        .unwrap();
        assert_eq!(criteria.recipe_name.as_deref(), Some("pasta"));
        assert_eq!(criteria.ingredient.as_deref(), Some("egg"));
        assert_eq!(criteria.difficulty, Some(Difficulty::Medium));
        assert_eq!(criteria.cooking_time, Some(30));
        assert!(criteria.show_chart);
    }

    #[test]
    fn non_integer_cooking_time_is_rejected() {
        for raw in ["abc", "-5", "12.5"] {
            let err = SearchForm {
                cooking_time: Some(raw.to_string()),
                ..form()
            }
            .into_criteria()
            .unwrap_err();
            assert_eq!(err, CriteriaError::InvalidCookingTime(raw.to_string()));
        }
    }

    #[test]
    fn unknown_difficulty_and_long_text_are_rejected() {
        let err = SearchForm {
            difficulty: Some("Extreme".to_string()),
            ..form()
        }
        .into_criteria()
        .unwrap_err();
        assert!(matches!(err, CriteriaError::InvalidDifficulty(_)));

        let err = SearchForm {
            ingredient: Some("x".repeat(121)),
            ..form()
        }
        .into_criteria()
        .unwrap_err();
        assert!(matches!(
            err,
            CriteriaError::TooLong {
                field: "ingredient",
                ..
            }
        ));
    }

    #[test]
    fn show_chart_accepts_common_truthy_values() {
        for raw in ["on", "TRUE", "1", "yes"] {
            let criteria = SearchForm {
                show_chart: Some(raw.to_string()),
                ..form()
            }
            .into_criteria()
            .unwrap();
            assert!(criteria.show_chart, "{raw} should enable charts");
        }
        let criteria = SearchForm {
            show_chart: Some("off".to_string()),
            ..form()
        }
        .into_criteria()
        .unwrap();
        assert!(!criteria.show_chart);
    }
}
