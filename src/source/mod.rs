//! Read-only access to the hosted MMA data store.
//!
//! Views talk to a [`DataSource`]; the production implementation speaks
//! the store's REST-over-tables protocol ([`RestSource`]) and tests and
//! offline runs use a JSON snapshot ([`MemorySource`]).

mod memory;
mod rest;

pub use memory::*;
pub use rest::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::config::ConfigError;
use crate::models::{Event, EventId, Fight, Fighter, FighterId, FighterRecord, RankingEntry};

/// Data source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Data store returned {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Data source not configured: {0}")]
    Config(#[from] ConfigError),
}

/// Table-level queries the views need.
///
/// Single-row lookups return `Ok(None)` when no row matches; list queries
/// return an empty list.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    async fn event(&self, id: &EventId) -> Result<Option<Event>, SourceError>;

    /// Events on or after `date`, ordered by start time.
    async fn events_from(&self, date: NaiveDate, ascending: bool)
        -> Result<Vec<Event>, SourceError>;

    /// Events strictly before `date`, most recent first.
    async fn events_before(&self, date: NaiveDate) -> Result<Vec<Event>, SourceError>;

    /// Every event, unordered.
    async fn events(&self) -> Result<Vec<Event>, SourceError>;

    /// Bouts on an event's card with both fighter summaries embedded.
    async fn fights_for_event(&self, id: &EventId) -> Result<Vec<Fight>, SourceError>;

    async fn fighter(&self, id: &FighterId) -> Result<Option<Fighter>, SourceError>;

    async fn fighters(&self) -> Result<Vec<Fighter>, SourceError>;

    async fn fighters_by_ids(&self, ids: &[FighterId]) -> Result<Vec<Fighter>, SourceError>;

    /// Per-promotion record slices of a fighter.
    async fn records_for_fighter(&self, id: &FighterId)
        -> Result<Vec<FighterRecord>, SourceError>;

    /// Bouts where the fighter occupies either corner.
    async fn fights_for_fighter(&self, id: &FighterId) -> Result<Vec<Fight>, SourceError>;

    async fn rankings(&self) -> Result<Vec<RankingEntry>, SourceError>;
}
