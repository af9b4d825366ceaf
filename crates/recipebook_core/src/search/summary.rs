//! Chart summaries derived from search results.
//!
//! # Responsibility
//! - Shape recipe sets into `(label, count)` series for chart rendering.
//!
//! # Invariants
//! - Builders are pure and never fail.
//! - Zero-count labels and buckets are omitted, never zero-filled.
//! - Cooking-time buckets are presentation-only and independent of the
//!   difficulty thresholds.

use crate::model::difficulty::Difficulty;
use crate::model::recipe::Recipe;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Presentation grouping of cooking times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    /// Under 10 minutes.
    Quick,
    /// 10 to 29 minutes.
    Medium,
    /// 30 to 59 minutes.
    Long,
    /// 60 minutes or more.
    VeryLong,
}

impl TimeBucket {
    /// Buckets in reporting order.
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Quick,
        TimeBucket::Medium,
        TimeBucket::Long,
        TimeBucket::VeryLong,
    ];

    pub fn for_minutes(minutes: u32) -> Self {
        match minutes {
            0..=9 => Self::Quick,
            10..=29 => Self::Medium,
            30..=59 => Self::Long,
            _ => Self::VeryLong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Quick => "Quick (<10 min)",
            Self::Medium => "Medium (10-29 min)",
            Self::Long => "Long (30-59 min)",
            Self::VeryLong => "Very Long (60+ min)",
        }
    }
}

impl Display for TimeBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Chart data computed for a non-empty search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Matching recipes per difficulty, most frequent first.
    pub difficulty: Vec<(Difficulty, usize)>,
    /// Matching recipes per cooking-time bucket, in bucket order.
    pub cooking_time: Vec<(TimeBucket, usize)>,
    /// Running total of all recipes by UTC creation date, ascending.
    pub growth: Vec<(NaiveDate, usize)>,
}

/// Counts recipes per difficulty label present in `recipes`.
///
/// Sorted by count descending; equal counts keep `Difficulty::ALL` order.
pub fn difficulty_distribution(recipes: &[Recipe]) -> Vec<(Difficulty, usize)> {
    let mut counts: BTreeMap<Difficulty, usize> = BTreeMap::new();
    for recipe in recipes {
        *counts.entry(recipe.difficulty).or_default() += 1;
    }

    let mut distribution: Vec<_> = counts.into_iter().collect();
    // Stable sort keeps ascending label order among ties.
    distribution.sort_by(|left, right| right.1.cmp(&left.1));
    distribution
}

/// Counts recipes per cooking-time bucket, in `TimeBucket::ALL` order.
pub fn cooking_time_distribution(recipes: &[Recipe]) -> Vec<(TimeBucket, usize)> {
    let mut counts: BTreeMap<TimeBucket, usize> = BTreeMap::new();
    for recipe in recipes {
        *counts
            .entry(TimeBucket::for_minutes(recipe.cooking_time))
            .or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Builds the cumulative recipe count keyed by UTC creation date.
///
/// `created_at_ms` may be in any order. When several recipes share a date,
/// that date carries the count after the last of them. Timestamps outside
/// chrono's representable range are skipped.
pub fn growth_series(created_at_ms: &[i64]) -> Vec<(NaiveDate, usize)> {
    let mut ordered = created_at_ms.to_vec();
    ordered.sort_unstable();

    let mut series: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut running = 0;
    for millis in ordered {
        let Some(created) = DateTime::<Utc>::from_timestamp_millis(millis) else {
            continue;
        };
        running += 1;
        series.insert(created.date_naive(), running);
    }
    series.into_iter().collect()
}
