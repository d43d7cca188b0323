use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::{apply_filter, DirectoryError, EventQuery, FighterQuery, Searchable, SortMode};
use crate::datefmt::month_bucket;
use crate::models::{Event, Fighter};

/// Bucket label for events without a date.
pub const UNSCHEDULED_BUCKET: &str = "TBA";

/// Bucket label for names that do not start with a character.
const BLANK_NAME_BUCKET: &str = "#";

/// A named bucket of listing entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<T> {
    pub key: String,
    pub members: Vec<T>,
}

/// Ordered listing, either bucketed or flat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum Grouped<T> {
    Buckets(Vec<Group<T>>),
    Flat(Vec<T>),
}

impl<T> Grouped<T> {
    /// Total number of entries across all buckets.
    pub fn len(&self) -> usize {
        match self {
            Grouped::Buckets(groups) => groups.iter().map(|g| g.members.len()).sum(),
            Grouped::Flat(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in listing order.
    pub fn members(&self) -> Vec<&T> {
        match self {
            Grouped::Buckets(groups) => groups.iter().flat_map(|g| g.members.iter()).collect(),
            Grouped::Flat(items) => items.iter().collect(),
        }
    }

    /// Bucket labels in order; empty for flat listings.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Grouped::Buckets(groups) => groups.iter().map(|g| g.key.as_str()).collect(),
            Grouped::Flat(_) => Vec::new(),
        }
    }
}

/// Split `items` into buckets keyed by `key`, buckets in first-encountered order.
pub fn bucket_in_order<T>(items: Vec<T>, key: impl Fn(&T) -> String) -> Vec<Group<T>> {
    let mut groups: Vec<Group<T>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&i) => groups[i].members.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push(Group {
                    key: k,
                    members: vec![item],
                });
            }
        }
    }

    groups
}

/// Sort key for names: trimmed and lowercased.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Uppercased first character of a name's sort key.
pub fn first_letter(name: &str) -> String {
    name_key(name)
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| BLANK_NAME_BUCKET.to_string())
}

/// Order by [`name_key`], raw name as tie-break.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    name_key(a).cmp(&name_key(b)).then_with(|| a.cmp(b))
}

/// Sort fighters in place. All sorts are stable.
pub fn sort_fighters(fighters: &mut [Fighter], mode: SortMode) -> Result<(), DirectoryError> {
    match mode {
        SortMode::Name => fighters.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortMode::WeightClass => fighters.sort_by(|a, b| a.weight_class().cmp(b.weight_class())),
        SortMode::Record => fighters.sort_by(|a, b| b.record().wins.cmp(&a.record().wins)),
        SortMode::Month => {
            return Err(DirectoryError::UnsupportedSort {
                mode,
                entity: "fighters",
            })
        }
    }
    Ok(())
}

/// Sort then bucket a fighter list according to `mode`.
pub fn group_fighters(
    mut fighters: Vec<Fighter>,
    mode: SortMode,
) -> Result<Grouped<Fighter>, DirectoryError> {
    sort_fighters(&mut fighters, mode)?;
    Ok(match mode {
        SortMode::Name => Grouped::Buckets(bucket_in_order(fighters, |f| first_letter(&f.name))),
        SortMode::WeightClass => Grouped::Buckets(bucket_in_order(fighters, |f| {
            f.weight_class().to_string()
        })),
        _ => Grouped::Flat(fighters),
    })
}

/// Sort then bucket an event list according to `mode`.
///
/// Month mode keeps buckets in the order their first event appears in the
/// input, and orders each bucket chronologically.
pub fn group_events(mut events: Vec<Event>, mode: SortMode) -> Result<Grouped<Event>, DirectoryError> {
    match mode {
        SortMode::Name => {
            events.sort_by(|a, b| compare_names(a.display_name(), b.display_name()));
            Ok(Grouped::Buckets(bucket_in_order(events, |e| {
                first_letter(e.display_name())
            })))
        }
        SortMode::Month => {
            let mut groups = bucket_in_order(events, |e| {
                e.datetime
                    .map(month_bucket)
                    .unwrap_or_else(|| UNSCHEDULED_BUCKET.to_string())
            });
            for group in &mut groups {
                group.members.sort_by_key(|e| e.datetime);
            }
            Ok(Grouped::Buckets(groups))
        }
        SortMode::WeightClass | SortMode::Record => Err(DirectoryError::UnsupportedSort {
            mode,
            entity: "events",
        }),
    }
}

/// A filtered, ordered and grouped listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    /// Entries before filtering
    pub total: usize,
    /// Entries that passed the filters
    pub matched: usize,
    pub sort: SortMode,
    pub groups: Grouped<T>,
}

fn resolve_sort(raw: Option<&str>, default: SortMode) -> Result<SortMode, DirectoryError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse(),
        None => Ok(default),
    }
}

impl FighterQuery {
    /// Requested sort mode, name order when unset.
    pub fn sort_mode(&self) -> Result<SortMode, DirectoryError> {
        let mode = resolve_sort(self.sort.as_deref(), SortMode::Name)?;
        if mode == SortMode::Month {
            return Err(DirectoryError::UnsupportedSort {
                mode,
                entity: "fighters",
            });
        }
        Ok(mode)
    }
}

impl EventQuery {
    /// Requested sort mode, month buckets when unset.
    pub fn sort_mode(&self) -> Result<SortMode, DirectoryError> {
        match resolve_sort(self.sort.as_deref(), SortMode::Month)? {
            mode @ (SortMode::Name | SortMode::Month) => Ok(mode),
            mode => Err(DirectoryError::UnsupportedSort {
                mode,
                entity: "events",
            }),
        }
    }
}

/// Build the fighter directory. Defaults to name order.
pub fn fighter_listing(
    fighters: &[Fighter],
    query: &FighterQuery,
) -> Result<Listing<Fighter>, DirectoryError> {
    let sort = query.sort_mode()?;
    let filtered = apply_filter(fighters, |f| query.matches(f));
    let matched = filtered.len();
    Ok(Listing {
        total: fighters.len(),
        matched,
        sort,
        groups: group_fighters(filtered, sort)?,
    })
}

/// Build the event listing. Defaults to month buckets.
pub fn event_listing(events: &[Event], query: &EventQuery) -> Result<Listing<Event>, DirectoryError> {
    let sort = query.sort_mode()?;
    let filtered = apply_filter(events, |e| query.matches(e));
    let matched = filtered.len();
    Ok(Listing {
        total: events.len(),
        matched,
        sort,
        groups: group_events(filtered, sort)?,
    })
}
