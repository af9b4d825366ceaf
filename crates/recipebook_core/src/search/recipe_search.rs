//! Filtered recipe search with optional chart summaries.
//!
//! # Responsibility
//! - Translate `SearchCriteria` into one parameterized SQL query plus
//!   Unicode-aware text matching.
//! - Attach a `SearchSummary` when charts are requested and matched.
//!
//! # Invariants
//! - Filters run against stored values; difficulty is never recomputed.
//! - Result ordering is deterministic: `created_at DESC, id ASC`.
//! - An empty result never carries a summary.

use crate::db::DbError;
use crate::model::recipe::Recipe;
use crate::repo::recipe_repo::{parse_recipe_row, RECIPE_SELECT_SQL};
use crate::repo::RepoError;
use crate::search::criteria::SearchCriteria;
use crate::search::summary::{
    cooking_time_distribution, difficulty_distribution, growth_series, SearchSummary,
};
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for DB interaction and result decoding.
#[derive(Debug)]
pub enum SearchError {
    Db(DbError),
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Matching recipes plus chart data when requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub recipes: Vec<Recipe>,
    pub summary: Option<SearchSummary>,
}

/// Runs a filtered recipe search.
///
/// No criteria returns the whole collection. The growth series inside the
/// summary always covers every stored recipe, not only the matches.
pub fn search_recipes(conn: &Connection, criteria: &SearchCriteria) -> SearchResult<SearchOutcome> {
    let started_at = Instant::now();
    match run_search(conn, criteria) {
        Ok(outcome) => {
            info!(
                "event=recipe_search module=search status=ok filtered={} matches={} summary={} duration_ms={}",
                !criteria.is_unfiltered(),
                outcome.recipes.len(),
                outcome.summary.is_some(),
                started_at.elapsed().as_millis()
            );
            Ok(outcome)
        }
        Err(err) => {
            error!(
                "event=recipe_search module=search status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn run_search(conn: &Connection, criteria: &SearchCriteria) -> SearchResult<SearchOutcome> {
    let recipes = query_matches(conn, criteria)?;

    let summary = if criteria.show_chart && !recipes.is_empty() {
        let created = all_creation_times(conn)?;
        Some(SearchSummary {
            difficulty: difficulty_distribution(&recipes),
            cooking_time: cooking_time_distribution(&recipes),
            growth: growth_series(&created),
        })
    } else {
        None
    };

    Ok(SearchOutcome { recipes, summary })
}

fn query_matches(conn: &Connection, criteria: &SearchCriteria) -> SearchResult<Vec<Recipe>> {
    let mut sql = format!("{RECIPE_SELECT_SQL} WHERE 1 = 1");
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(difficulty) = criteria.difficulty {
        sql.push_str(" AND difficulty = ?");
        bind_values.push(Value::Text(difficulty.label().to_string()));
    }

    if let Some(max_minutes) = criteria.cooking_time {
        sql.push_str(" AND cooking_time <= ?");
        bind_values.push(Value::Integer(i64::from(max_minutes)));
    }

    sql.push_str(" ORDER BY created_at DESC, id ASC");

    // SQLite `LIKE` folds ASCII only, so text filters run here.
    let name_needle = criteria.recipe_name.as_deref().map(str::to_lowercase);
    let ingredient_needle = criteria.ingredient.as_deref().map(str::to_lowercase);

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut recipes = Vec::new();
    while let Some(row) = rows.next()? {
        let recipe = parse_recipe_row(row)?;
        if contains_folded(&recipe.name, name_needle.as_deref())
            && contains_folded(&recipe.ingredients, ingredient_needle.as_deref())
        {
            recipes.push(recipe);
        }
    }

    Ok(recipes)
}

fn all_creation_times(conn: &Connection) -> SearchResult<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT created_at FROM recipes ORDER BY created_at ASC, id ASC;")?;
    let mut rows = stmt.query([])?;
    let mut created = Vec::new();
    while let Some(row) = rows.next()? {
        created.push(row.get(0)?);
    }
    Ok(created)
}

/// Case-insensitive substring test; `None` matches everything.
///
/// `needle` must already be lowercased.
fn contains_folded(haystack: &str, needle: Option<&str>) -> bool {
    needle.map_or(true, |needle| haystack.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::contains_folded;

    #[test]
    fn contains_folded_ignores_unicode_case() {
        assert!(contains_folded("Crème Brûlée", Some("crème")));
        assert!(contains_folded("CRÈME BRÛLÉE", Some("brûlée")));
        assert!(contains_folded("50%_off", Some("%_")));
        assert!(contains_folded("anything", None));
        assert!(!contains_folded("Soup", Some("pasta")));
    }
}
