use serde::Deserialize;

use crate::datefmt::month_bucket;
use crate::models::{Event, Fighter, RankingEntry};

/// Something that can be matched by the free-text search box.
pub trait Searchable {
    /// Name used for sorting and first-letter buckets.
    fn display_name(&self) -> &str;

    /// Fields the search term is matched against (any one may match).
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match across all search fields.
    /// An empty term matches everything.
    fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

impl Searchable for Fighter {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        [Some(self.name.as_str()), self.nickname.as_deref(), self.country()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Searchable for RankingEntry {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.nickname.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Searchable for Event {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.venue.as_deref(),
            self.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// An exact-match facet is inactive when unset, blank or "all".
fn facet_active(facet: &Option<String>) -> Option<&str> {
    facet
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn facet_matches(facet: &Option<String>, value: Option<&str>) -> bool {
    match facet_active(facet) {
        Some(wanted) => value == Some(wanted),
        None => true,
    }
}

/// Filters and sort mode for the fighter directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FighterQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub weight_class: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl FighterQuery {
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn with_weight_class(mut self, weight_class: &str) -> Self {
        self.weight_class = Some(weight_class.to_string());
        self
    }

    pub fn with_organization(mut self, organization: &str) -> Self {
        self.organization = Some(organization.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    /// Search term AND every active facet.
    pub fn matches(&self, fighter: &Fighter) -> bool {
        fighter.matches_search(self.search.as_deref().unwrap_or(""))
            && facet_matches(&self.weight_class, fighter.weight_class.as_deref())
            && facet_matches(&self.organization, fighter.organization.as_deref())
            && facet_matches(&self.status, fighter.status.as_deref())
    }
}

/// Filters and sort mode for the event listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// Matched against the event's promotion
    #[serde(default)]
    pub organization: Option<String>,
    /// Month bucket label, e.g. "April 2024"
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl EventQuery {
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn with_organization(mut self, organization: &str) -> Self {
        self.organization = Some(organization.to_string());
        self
    }

    pub fn with_month(mut self, month: &str) -> Self {
        self.month = Some(month.to_string());
        self
    }

    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        let month = event.datetime.map(month_bucket);
        event.matches_search(self.search.as_deref().unwrap_or(""))
            && facet_matches(&self.organization, event.promotion.as_deref())
            && facet_matches(&self.month, month.as_deref())
    }
}

/// Keep the items satisfying `predicate`, preserving order.
pub fn apply_filter<T: Clone>(items: &[T], predicate: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| predicate(*item)).cloned().collect()
}
