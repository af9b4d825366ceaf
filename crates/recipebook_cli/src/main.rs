//! RecipeBook command-line front end.
//!
//! Usage:
//! ```bash
//! recipebook signup --username anna --password secret --confirm secret
//! recipebook login --username anna --password secret
//! recipebook add --name "Quick Salad" --ingredients "lettuce, tomato" --cooking-time 5
//! recipebook list
//! recipebook show <recipe-id>
//! recipebook search --ingredient chicken --cooking-time 60 --chart
//! ```

mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use recipebook_core::db::open_db;
use recipebook_core::{
    init_logging, search_recipes, AccountService, AppConfig, LoginRequest, RecipeDraft,
    RecipeId, RecipeListQuery, RecipeService, SearchForm, SignupRequest, SqliteRecipeRepository,
    SqliteUserRepository,
};
use rusqlite::Connection;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "recipebook",
    version,
    about = "Browse, search and manage a recipe catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database file (overrides RECIPEBOOK_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (overrides RECIPEBOOK_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: String,
    },
    /// Check account credentials
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Add a recipe; difficulty is derived automatically
    Add {
        #[command(flatten)]
        fields: RecipeFields,
    },
    /// Replace all fields of a recipe
    Update {
        id: String,
        #[command(flatten)]
        fields: RecipeFields,
    },
    /// Permanently delete a recipe
    Delete { id: String },
    /// List recipes, newest first
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one recipe with its ingredient list
    Show { id: String },
    /// Search recipes with optional chart data
    Search {
        /// Substring of the recipe name
        #[arg(long)]
        name: Option<String>,
        /// Substring of the ingredient list
        #[arg(long)]
        ingredient: Option<String>,
        /// Easy, Medium, Intermediate, Hard or All
        #[arg(long)]
        difficulty: Option<String>,
        /// Maximum cooking time in minutes (inclusive)
        #[arg(long)]
        cooking_time: Option<String>,
        /// Include difficulty, cooking-time and growth summaries
        #[arg(long)]
        chart: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct RecipeFields {
    #[arg(long)]
    name: String,
    /// Comma-separated ingredient names
    #[arg(long, default_value = "")]
    ingredients: String,
    /// Minutes
    #[arg(long)]
    cooking_time: u32,
    #[arg(long, default_value = "")]
    description: String,
}

impl RecipeFields {
    fn into_draft(self) -> RecipeDraft {
        RecipeDraft::new(self.name, self.ingredients, self.cooking_time, self.description)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("opening database `{}`", config.db_path.display()))?;

    run(cli.command, &conn, &config)
}

fn run(command: Command, conn: &Connection, config: &AppConfig) -> Result<()> {
    match command {
        Command::Signup {
            username,
            email,
            password,
            confirm,
        } => {
            let service = AccountService::new(SqliteUserRepository::try_new(conn)?, config.bcrypt_cost);
            let user = service.sign_up(&SignupRequest {
                username,
                email,
                password1: password,
                password2: confirm,
            })?;
            println!("Account created for {}.", user.username);
        }
        Command::Login { username, password } => {
            let service = AccountService::new(SqliteUserRepository::try_new(conn)?, config.bcrypt_cost);
            let user = service.log_in(&LoginRequest { username, password })?;
            println!("Welcome back, {}.", user.username);
        }
        Command::Add { fields } => {
            let service = recipe_service(conn)?;
            let recipe = service.create_recipe(&fields.into_draft())?;
            println!("Created {} ({}) [{}]", recipe.name, recipe.id, recipe.difficulty);
        }
        Command::Update { id, fields } => {
            let service = recipe_service(conn)?;
            let recipe = service.update_recipe(parse_id(&id)?, &fields.into_draft())?;
            println!("Updated {} ({}) [{}]", recipe.name, recipe.id, recipe.difficulty);
        }
        Command::Delete { id } => {
            recipe_service(conn)?.delete_recipe(parse_id(&id)?)?;
            println!("Deleted {id}.");
        }
        Command::List { limit, offset } => {
            let recipes = recipe_service(conn)?.list_recipes(&RecipeListQuery { limit, offset })?;
            output::print_recipe_table(&recipes);
        }
        Command::Show { id } => {
            let detail = recipe_service(conn)?.recipe_detail(parse_id(&id)?)?;
            output::print_recipe_detail(&detail);
        }
        Command::Search {
            name,
            ingredient,
            difficulty,
            cooking_time,
            chart,
            json,
        } => {
            let criteria = SearchForm {
                recipe_name: name,
                ingredient,
                difficulty,
                cooking_time,
                show_chart: chart.then(|| "on".to_string()),
            }
            .into_criteria()?;
            let outcome = search_recipes(conn, &criteria)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                output::print_recipe_table(&outcome.recipes);
                match (&outcome.summary, chart) {
                    (Some(summary), _) => output::print_summary(summary),
                    (None, true) => {
                        info!("event=recipe_search module=cli status=ok summary=skipped reason=no_matches");
                        println!("No recipes matched; nothing to chart.");
                    }
                    (None, false) => {}
                }
            }
        }
    }

    Ok(())
}

fn recipe_service(conn: &Connection) -> Result<RecipeService<SqliteRecipeRepository<'_>>> {
    Ok(RecipeService::new(SqliteRecipeRepository::try_new(conn)?))
}

fn parse_id(raw: &str) -> Result<RecipeId> {
    RecipeId::parse_str(raw.trim()).with_context(|| format!("`{raw}` is not a recipe id"))
}
