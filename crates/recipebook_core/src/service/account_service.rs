//! Account sign-up and log-in use-cases.
//!
//! # Invariants
//! - Plaintext passwords are only held for the duration of one call and
//!   never logged.
//! - Log-in failures do not reveal whether the username exists.

use crate::model::user::{normalize_email, normalize_username, User, UserValidationError};
use crate::repo::user_repo::{NewUser, UserRepository};
use crate::repo::RepoError;
use log::{error, info, warn};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sign-up form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub email: Option<String>,
    pub password1: String,
    pub password2: String,
}

/// Log-in form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Service error for account use-cases.
#[derive(Debug)]
pub enum AccountError {
    Validation(UserValidationError),
    EmptyPassword,
    PasswordMismatch,
    UsernameTaken(String),
    InvalidCredentials,
    Hash(bcrypt::BcryptError),
    Repo(RepoError),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password cannot be empty"),
            Self::PasswordMismatch => write!(f, "passwords do not match"),
            Self::UsernameTaken(username) => {
                write!(f, "username `{username}` is already taken")
            }
            Self::InvalidCredentials => write!(f, "invalid username or password"),
            Self::Hash(err) => write!(f, "password hashing failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Hash(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UserValidationError> for AccountError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<bcrypt::BcryptError> for AccountError {
    fn from(value: bcrypt::BcryptError) -> Self {
        Self::Hash(value)
    }
}

impl From<RepoError> for AccountError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::UserValidation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Account service facade over repository implementations.
pub struct AccountService<R: UserRepository> {
    repo: R,
    bcrypt_cost: u32,
    /// Hash verified on unknown-username log-ins so both failures cost one
    /// bcrypt round.
    dummy_hash: OnceCell<String>,
}

impl<R: UserRepository> AccountService<R> {
    /// Creates a service hashing new passwords at `bcrypt_cost`.
    pub fn new(repo: R, bcrypt_cost: u32) -> Self {
        Self {
            repo,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// - `Validation` for malformed username or email.
    /// - `EmptyPassword` / `PasswordMismatch` for bad password input.
    /// - `UsernameTaken` when the name exists, ignoring case.
    pub fn sign_up(&self, request: &SignupRequest) -> Result<User, AccountError> {
        let username = normalize_username(&request.username)?;
        let email = normalize_email(request.email.as_deref())?;

        if request.password1.is_empty() {
            return Err(AccountError::EmptyPassword);
        }
        if request.password1 != request.password2 {
            return Err(AccountError::PasswordMismatch);
        }
        if self.repo.username_exists(&username)? {
            warn!("event=user_signup module=service status=rejected reason=username_taken");
            return Err(AccountError::UsernameTaken(username));
        }

        let password_hash = bcrypt::hash(&request.password1, self.bcrypt_cost)?;
        let new_user = NewUser {
            username: username.clone(),
            email,
            password_hash,
        };
        match self.repo.create_user(&new_user) {
            Ok(_) => {}
            Err(RepoError::UniqueViolation(_)) => return Err(AccountError::UsernameTaken(username)),
            Err(err) => return Err(err.into()),
        }

        let user = self
            .repo
            .get_user_by_username(&username)?
            .ok_or_else(|| {
                AccountError::Repo(RepoError::InvalidData(
                    "created user not found in read-back".to_string(),
                ))
            })?;
        info!(
            "event=user_signup module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Verifies credentials and returns the matching account.
    ///
    /// # Errors
    /// - `InvalidCredentials` for unknown usernames, wrong passwords and
    ///   unreadable stored hashes alike.
    pub fn log_in(&self, request: &LoginRequest) -> Result<User, AccountError> {
        let Some(user) = self.repo.get_user_by_username(&request.username)? else {
            self.burn_verify(&request.password)?;
            warn!("event=user_login module=service status=rejected");
            return Err(AccountError::InvalidCredentials);
        };

        match bcrypt::verify(&request.password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    "event=user_login module=service status=rejected user_id={}",
                    user.id
                );
                return Err(AccountError::InvalidCredentials);
            }
            // Never log the error text: it can echo the stored hash.
            Err(_) => {
                error!(
                    "event=user_login module=service status=error user_id={} error_code=stored_hash_unreadable",
                    user.id
                );
                return Err(AccountError::InvalidCredentials);
            }
        }

        info!(
            "event=user_login module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Runs one bcrypt verification against a throwaway hash at the
    /// configured cost.
    fn burn_verify(&self, password: &str) -> Result<(), AccountError> {
        let dummy_hash = self
            .dummy_hash
            .get_or_try_init(|| bcrypt::hash("recipebook-unknown-user", self.bcrypt_cost))?;
        let _ = bcrypt::verify(password, dummy_hash);
        Ok(())
    }
}
