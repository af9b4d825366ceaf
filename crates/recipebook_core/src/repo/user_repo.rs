//! User account repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Usernames are unique case-insensitively (`COLLATE NOCASE` index).
//! - Only password hashes are persisted.

use crate::db::migrations::latest_version;
use crate::model::user::{normalize_email, normalize_username, User, UserId};
use crate::repo::{ensure_schema_ready, is_unique_violation, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const USER_COLUMNS: &[&str] = &["id", "username", "email", "password_hash", "created_at"];

/// Fields required to insert one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

/// Repository interface for account storage.
pub trait UserRepository {
    /// Inserts one account and returns its generated id.
    ///
    /// Fails with `UniqueViolation("username")` when the name is taken.
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId>;
    /// Looks up an account by username, ignoring case.
    fn get_user_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn username_exists(&self, username: &str) -> RepoResult<bool>;
}

/// SQLite-backed account repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, latest_version(), "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId> {
        let username = normalize_username(&user.username)?;
        let email = normalize_email(user.email.as_deref())?;
        if user.password_hash.is_empty() {
            return Err(RepoError::InvalidData(
                "password hash cannot be empty".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        self.conn
            .execute(
                "INSERT INTO users (id, username, email, password_hash)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    id.to_string(),
                    username,
                    email,
                    user.password_hash.as_str()
                ],
            )
            .map_err(|err| {
                if is_unique_violation(&err) {
                    RepoError::UniqueViolation("username")
                } else {
                    RepoError::from(err)
                }
            })?;

        info!("event=user_insert module=repo status=ok user_id={id}");
        Ok(id)
    }

    fn get_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, email, password_hash, created_at
             FROM users
             WHERE username = ?1 COLLATE NOCASE;",
        )?;
        let mut rows = stmt.query([username.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM users WHERE username = ?1 COLLATE NOCASE
            );",
            [username.trim()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in users.id"))
    })?;

    Ok(User {
        id,
        username: row.get("username")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        created_at: row.get("created_at")?,
    })
}
