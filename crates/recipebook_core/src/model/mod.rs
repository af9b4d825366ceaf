//! Domain model for recipes and accounts.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the difficulty classifier as a pure function.
//!
//! # Invariants
//! - Every recipe is identified by a stable `RecipeId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod difficulty;
pub mod recipe;
pub mod user;
