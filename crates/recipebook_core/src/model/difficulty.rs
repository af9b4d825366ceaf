//! Difficulty classification.
//!
//! # Responsibility
//! - Define the closed set of difficulty labels.
//! - Map `(cooking_time, ingredient_count)` to exactly one label.
//!
//! # Invariants
//! - `classify` is total: every integer input yields one label, no errors.
//! - Cooking time of 30 minutes or more is always `Hard`.
//! - Stored labels never exceed 20 characters.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Cooking time (minutes) below which a recipe counts as short.
const SHORT_COOKING_MINUTES: i64 = 10;
/// Cooking time (minutes) from which a recipe is always `Hard`.
const LONG_COOKING_MINUTES: i64 = 30;
/// Ingredient count from which a short/medium recipe steps up one level.
const MANY_INGREDIENTS: usize = 4;

/// Recipe difficulty derived from cooking time and ingredient count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Intermediate,
    Hard,
}

impl Difficulty {
    /// All labels in ascending order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Intermediate,
        Difficulty::Hard,
    ];

    /// Display/storage label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Intermediate => "Intermediate",
            Self::Hard => "Hard",
        }
    }

    /// Parses a label case-insensitively. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(trimmed))
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a recipe by cooking time (minutes) and ingredient count.
///
/// Guards are mutually exclusive and checked in order; the final arm
/// covers every cooking time of 30 minutes or more.
pub fn classify(cooking_time: i64, ingredient_count: usize) -> Difficulty {
    let many = ingredient_count >= MANY_INGREDIENTS;
    match cooking_time {
        t if t < SHORT_COOKING_MINUTES && !many => Difficulty::Easy,
        t if t < SHORT_COOKING_MINUTES => Difficulty::Medium,
        t if t < LONG_COOKING_MINUTES && !many => Difficulty::Medium,
        t if t < LONG_COOKING_MINUTES => Difficulty::Intermediate,
        _ => Difficulty::Hard,
    }
}
