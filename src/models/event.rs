//! Event model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::EventId;
use crate::datefmt;

/// A fight night from the `events` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,

    #[serde(default)]
    pub name: String,

    /// Scheduled start (UTC); `None` while the date is still to be announced
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub datetime: Option<DateTime<Utc>>,

    #[serde(default)]
    pub venue: Option<String>,

    /// City / region
    #[serde(default)]
    pub location: Option<String>,

    /// Promotion running the card (e.g. "UFC")
    #[serde(default)]
    pub promotion: Option<String>,

    #[serde(default)]
    pub mma_bouts: Option<String>,

    #[serde(default)]
    pub img_url: Option<String>,

    /// Broadcast info (e.g. "Pay Per View + ESPN+")
    #[serde(default)]
    pub broadcast: Option<String>,
}

impl Event {
    pub fn new(id: impl Into<EventId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the start time.
    pub fn with_datetime(mut self, datetime: DateTime<Utc>) -> Self {
        self.datetime = Some(datetime);
        self
    }

    /// Builder method to set venue and location.
    pub fn with_venue(mut self, venue: &str, location: &str) -> Self {
        self.venue = Some(venue.to_string());
        self.location = Some(location.to_string());
        self
    }

    /// Builder method to set the promotion.
    pub fn with_promotion(mut self, promotion: &str) -> Self {
        self.promotion = Some(promotion.to_string());
        self
    }

    /// Calendar date of the event in UTC.
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime.map(|dt| dt.date_naive())
    }

    /// Whether the event starts on or after the given day.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date().is_some_and(|d| d >= today)
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(datefmt::parse_timestamp))
}
