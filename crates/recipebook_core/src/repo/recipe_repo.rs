//! Recipe repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `recipes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the draft and recompute `difficulty` from it;
//!   no write path accepts a caller-supplied difficulty.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::model::difficulty::Difficulty;
use crate::model::recipe::{Recipe, RecipeDraft, RecipeId};
use crate::repo::{ensure_schema_ready, RepoError, RepoResult, NOW_MS_SQL};
use log::{debug, info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

pub(crate) const RECIPE_SELECT_SQL: &str = "SELECT
    id,
    name,
    ingredients,
    cooking_time,
    description,
    difficulty,
    created_at,
    updated_at
FROM recipes";

const RECIPE_COLUMNS: &[&str] = &[
    "id",
    "name",
    "ingredients",
    "cooking_time",
    "description",
    "difficulty",
    "created_at",
    "updated_at",
];

/// Pagination options for listing recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for recipe CRUD operations.
pub trait RecipeRepository {
    /// Inserts a new recipe and returns its generated id.
    fn create_recipe(&self, draft: &RecipeDraft) -> RepoResult<RecipeId>;
    /// Replaces all caller-owned fields of an existing recipe.
    fn update_recipe(&self, id: RecipeId, draft: &RecipeDraft) -> RepoResult<()>;
    fn get_recipe(&self, id: RecipeId) -> RepoResult<Option<Recipe>>;
    /// Lists recipes newest first (`created_at DESC, id ASC`).
    fn list_recipes(&self, query: &RecipeListQuery) -> RepoResult<Vec<Recipe>>;
    /// Permanently removes one recipe.
    fn delete_recipe(&self, id: RecipeId) -> RepoResult<()>;
}

/// SQLite-backed recipe repository.
pub struct SqliteRecipeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecipeRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this build reads and writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, latest_version(), "recipes", RECIPE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl RecipeRepository for SqliteRecipeRepository<'_> {
    fn create_recipe(&self, draft: &RecipeDraft) -> RepoResult<RecipeId> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let difficulty = draft.difficulty();
        self.conn.execute(
            "INSERT INTO recipes (
                id,
                name,
                ingredients,
                cooking_time,
                description,
                difficulty
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                draft.name.trim(),
                draft.ingredients.as_str(),
                i64::from(draft.cooking_time),
                draft.description.as_str(),
                difficulty.label(),
            ],
        )?;

        info!(
            "event=recipe_insert module=repo status=ok recipe_id={id} difficulty={difficulty}"
        );
        Ok(id)
    }

    fn update_recipe(&self, id: RecipeId, draft: &RecipeDraft) -> RepoResult<()> {
        draft.validate()?;

        let difficulty = draft.difficulty();
        let changed = self.conn.execute(
            &format!(
                "UPDATE recipes
                 SET
                    name = ?1,
                    ingredients = ?2,
                    cooking_time = ?3,
                    description = ?4,
                    difficulty = ?5,
                    updated_at = max({NOW_MS_SQL}, created_at)
                 WHERE id = ?6;"
            ),
            params![
                draft.name.trim(),
                draft.ingredients.as_str(),
                i64::from(draft.cooking_time),
                draft.description.as_str(),
                difficulty.label(),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!(
            "event=recipe_update module=repo status=ok recipe_id={id} difficulty={difficulty}"
        );
        Ok(())
    }

    fn get_recipe(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECIPE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_recipe_row(row)?));
        }

        Ok(None)
    }

    fn list_recipes(&self, query: &RecipeListQuery) -> RepoResult<Vec<Recipe>> {
        let mut sql = format!("{RECIPE_SELECT_SQL} ORDER BY created_at DESC, id ASC");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut recipes = Vec::new();
        while let Some(row) = rows.next()? {
            recipes.push(parse_recipe_row(row)?);
        }

        debug!(
            "event=recipe_list module=repo status=ok count={}",
            recipes.len()
        );
        Ok(recipes)
    }

    fn delete_recipe(&self, id: RecipeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM recipes WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=recipe_delete module=repo status=ok recipe_id={id}");
        Ok(())
    }
}

/// Decodes one row selected with `RECIPE_SELECT_SQL` column names.
pub(crate) fn parse_recipe_row(row: &Row<'_>) -> RepoResult<Recipe> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in recipes.id"))
    })?;

    let difficulty_text: String = row.get("difficulty")?;
    let difficulty = Difficulty::parse(&difficulty_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid difficulty `{difficulty_text}` in recipes.difficulty"
        ))
    })?;

    let raw_time: i64 = row.get("cooking_time")?;
    let cooking_time = u32::try_from(raw_time).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid cooking_time `{raw_time}` in recipes.cooking_time"
        ))
    })?;

    let recipe = Recipe {
        id,
        name: row.get("name")?,
        ingredients: row.get("ingredients")?,
        cooking_time,
        description: row.get("description")?,
        difficulty,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    // Rows edited outside this crate can carry a stale label.
    let expected = recipe.expected_difficulty();
    if expected != recipe.difficulty {
        warn!(
            "event=recipe_read module=repo status=stale_difficulty recipe_id={} stored={} expected={}",
            recipe.id, recipe.difficulty, expected
        );
    }
    Ok(recipe)
}
