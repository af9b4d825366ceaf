//! Recipe search and chart aggregation entry points.
//!
//! # Responsibility
//! - Validate raw search input into criteria.
//! - Run filtered queries over the recipe store.
//! - Shape matches into chart-ready summaries.

pub mod criteria;
pub mod recipe_search;
pub mod summary;
