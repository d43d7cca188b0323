use serde::{Deserialize, Serialize};

use super::settle;
use crate::datefmt::month_bucket;
use crate::directory::{
    event_listing, fighter_listing, DirectoryError, EventQuery, FighterQuery, Listing, LoadState,
};
use crate::models::{Event, Fighter, RankingEntry};
use crate::rankings::{
    select_rankings, RankingTable, ORGANIZATIONS, POUND_FOR_POUND, WEIGHT_CLASSES,
};
use crate::source::DataSource;

/// Distinct non-empty values, sorted.
fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut out: Vec<String> = values
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}

fn weight_class_order(name: &str) -> usize {
    WEIGHT_CLASSES
        .iter()
        .position(|wc| *wc == name)
        .unwrap_or(WEIGHT_CLASSES.len())
}

/// Filter choices offered by the fighter directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FighterFacets {
    /// Heaviest first, unknown divisions last
    pub weight_classes: Vec<String>,
    pub organizations: Vec<String>,
    pub statuses: Vec<String>,
}

impl FighterFacets {
    pub fn from_fighters(fighters: &[Fighter]) -> Self {
        let mut weight_classes = distinct(fighters.iter().map(|f| f.weight_class.as_deref()));
        weight_classes.sort_by_key(|wc| weight_class_order(wc));
        Self {
            weight_classes,
            organizations: distinct(fighters.iter().map(|f| f.organization.as_deref())),
            statuses: distinct(fighters.iter().map(|f| f.status.as_deref())),
        }
    }
}

/// The fighter directory page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterDirectory {
    pub listing: LoadState<Listing<Fighter>>,
    pub facets: FighterFacets,
}

impl FighterDirectory {
    pub fn build(fighters: &[Fighter], query: &FighterQuery) -> Result<Self, DirectoryError> {
        Ok(Self {
            listing: LoadState::Loaded(fighter_listing(fighters, query)?),
            facets: FighterFacets::from_fighters(fighters),
        })
    }

    /// Fails only for an invalid sort request, checked before fetching.
    pub async fn load(source: &dyn DataSource, query: &FighterQuery) -> Result<Self, DirectoryError> {
        query.sort_mode()?;
        match settle("fighters", source.fighters().await) {
            LoadState::Loaded(fighters) => Self::build(&fighters, query),
            LoadState::NotLoaded => Ok(Self {
                listing: LoadState::NotLoaded,
                facets: FighterFacets::default(),
            }),
        }
    }
}

/// The event listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventListView {
    pub listing: LoadState<Listing<Event>>,
    pub promotions: Vec<String>,
    /// Month labels in calendar order
    pub months: Vec<String>,
}

impl EventListView {
    pub fn build(events: &[Event], query: &EventQuery) -> Result<Self, DirectoryError> {
        let mut dated: Vec<_> = events.iter().filter_map(|e| e.datetime).collect();
        dated.sort();
        let mut months: Vec<String> = Vec::new();
        for label in dated.into_iter().map(month_bucket) {
            if !months.contains(&label) {
                months.push(label);
            }
        }

        Ok(Self {
            listing: LoadState::Loaded(event_listing(events, query)?),
            promotions: distinct(events.iter().map(|e| e.promotion.as_deref())),
            months,
        })
    }

    pub async fn load(source: &dyn DataSource, query: &EventQuery) -> Result<Self, DirectoryError> {
        query.sort_mode()?;
        match settle("events", source.events().await) {
            LoadState::Loaded(events) => Self::build(&events, query),
            LoadState::NotLoaded => Ok(Self {
                listing: LoadState::NotLoaded,
                promotions: Vec::new(),
                months: Vec::new(),
            }),
        }
    }
}

/// Selection on the rankings page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingsQuery {
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub weight_class: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl RankingsQuery {
    /// Defaults to the first organization.
    pub fn organization(&self) -> &str {
        non_blank(&self.organization).unwrap_or(ORGANIZATIONS[0])
    }

    /// Defaults to the pound-for-pound list.
    pub fn weight_class(&self) -> &str {
        non_blank(&self.weight_class).unwrap_or(POUND_FOR_POUND)
    }

    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// The rankings page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingsView {
    pub organization: String,
    pub weight_class: String,
    pub search: String,
    pub entries: LoadState<Vec<RankingEntry>>,
    pub organizations: Vec<String>,
    /// Pound-for-pound first, then divisions heaviest first
    pub weight_classes: Vec<String>,
}

impl RankingsView {
    pub fn build(table: &RankingTable, query: &RankingsQuery) -> Self {
        let entries = select_rankings(
            table,
            query.organization(),
            query.weight_class(),
            query.search(),
        );
        Self {
            entries: LoadState::Loaded(entries),
            ..Self::empty(query)
        }
    }

    fn empty(query: &RankingsQuery) -> Self {
        let weight_classes = std::iter::once(POUND_FOR_POUND)
            .chain(WEIGHT_CLASSES)
            .map(str::to_string)
            .collect();
        Self {
            organization: query.organization().to_string(),
            weight_class: query.weight_class().to_string(),
            search: query.search().to_string(),
            entries: LoadState::NotLoaded,
            organizations: ORGANIZATIONS.iter().map(|o| o.to_string()).collect(),
            weight_classes,
        }
    }

    pub async fn load(source: &dyn DataSource, query: &RankingsQuery) -> Self {
        match settle("rankings", source.rankings().await) {
            LoadState::Loaded(entries) => Self::build(&RankingTable::from_entries(entries), query),
            LoadState::NotLoaded => Self::empty(query),
        }
    }
}
