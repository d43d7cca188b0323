//! Directory listings: filtering, sorting and grouping of fighters and events.
//!
//! Filtering always runs first (search substring OR'd across fields, AND'd
//! with every active facet), then the sort mode decides both the order and
//! the bucket key.

mod filter;
mod group;

pub use filter::*;
pub use group::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building a listing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Unknown sort mode: {0}")]
    UnknownSort(String),

    #[error("Sort mode '{mode}' is not available for {entity}")]
    UnsupportedSort { mode: SortMode, entity: &'static str },
}

/// How a listing is ordered and bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Alphabetical, bucketed by first letter
    Name,
    /// By weight class, bucketed by weight class
    WeightClass,
    /// By wins descending, no buckets (fighters only)
    Record,
    /// Chronological, bucketed by calendar month (events only)
    Month,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Name => "name",
            SortMode::WeightClass => "weight_class",
            SortMode::Record => "record",
            SortMode::Month => "month",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "name" => Ok(SortMode::Name),
            "weight_class" | "weightclass" => Ok(SortMode::WeightClass),
            "record" => Ok(SortMode::Record),
            "month" | "date" => Ok(SortMode::Month),
            _ => Err(DirectoryError::UnknownSort(s.to_string())),
        }
    }
}

/// Whether a view's data has arrived yet.
///
/// `Loaded(vec![])` is a real answer ("nothing matched") and must not be
/// confused with `NotLoaded`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    #[default]
    NotLoaded,
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            LoadState::NotLoaded => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            LoadState::Loaded(value) => LoadState::Loaded(f(value)),
            LoadState::NotLoaded => LoadState::NotLoaded,
        }
    }
}

impl<T> From<Option<T>> for LoadState<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => LoadState::Loaded(v),
            None => LoadState::NotLoaded,
        }
    }
}
