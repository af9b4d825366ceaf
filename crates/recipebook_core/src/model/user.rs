//! User account model.
//!
//! # Invariants
//! - `password_hash` is a bcrypt hash; plaintext passwords never live here.
//! - `username` matches `USERNAME_RE` and is unique case-insensitively.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type UserId = Uuid;

pub const USERNAME_MAX_CHARS: usize = 150;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("valid username regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Format-level validation failures for account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize, actual: usize },
    InvalidUsername(String),
    InvalidEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username cannot be empty"),
            Self::UsernameTooLong { max, actual } => {
                write!(f, "username is {actual} characters; maximum is {max}")
            }
            Self::InvalidUsername(value) => write!(
                f,
                "username `{value}` may only contain letters, digits and @/./+/-/_"
            ),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for UserValidationError {}

/// Validates and trims a username.
pub fn normalize_username(raw: &str) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }
    let chars = trimmed.chars().count();
    if chars > USERNAME_MAX_CHARS {
        return Err(UserValidationError::UsernameTooLong {
            max: USERNAME_MAX_CHARS,
            actual: chars,
        });
    }
    if !USERNAME_RE.is_match(trimmed) {
        return Err(UserValidationError::InvalidUsername(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Validates an optional email. Blank input means "no email".
pub fn normalize_email(raw: Option<&str>) -> Result<Option<String>, UserValidationError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    if !EMAIL_RE.is_match(value) {
        return Err(UserValidationError::InvalidEmail(value.to_string()));
    }
    Ok(Some(value.to_string()))
}
