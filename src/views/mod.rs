//! Page view models assembled from a [`DataSource`](crate::source::DataSource).
//!
//! Each loader issues its queries concurrently. A failed query is logged
//! and leaves its field unloaded; loaders never fail because of the data
//! store. The only errors they return are invalid listing requests.

mod event;
mod home;
mod listing;
mod profile;

pub use event::*;
pub use home::*;
pub use listing::*;
pub use profile::*;

use tracing::warn;

use crate::directory::LoadState;
use crate::source::SourceError;

/// Keep a fetched list, or log the failure and leave it unloaded.
fn settle<T>(what: &str, result: Result<T, SourceError>) -> LoadState<T> {
    match result {
        Ok(value) => LoadState::Loaded(value),
        Err(e) => {
            warn!("Failed to load {}: {}", what, e);
            LoadState::NotLoaded
        }
    }
}

/// Single-row variant: a failed lookup reads as a missing row.
fn settle_row<T>(what: &str, result: Result<Option<T>, SourceError>) -> Option<T> {
    match result {
        Ok(row) => row,
        Err(e) => {
            warn!("Failed to load {}: {}", what, e);
            None
        }
    }
}
