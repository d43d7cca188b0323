use serde::Serialize;

use super::{settle, settle_row};
use crate::card::FightCard;
use crate::datefmt::{format_event_start_et, format_long_date};
use crate::directory::LoadState;
use crate::models::{Event, EventId};
use crate::source::DataSource;

/// One event with its card split into main event and undercard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetailView {
    pub event: Event,
    /// "April 13, 2024"
    pub date: Option<String>,
    /// "Saturday 04.13.2024 at 06:00 PM ET"
    pub starts_at: Option<String>,
    pub card: LoadState<FightCard>,
}

impl EventDetailView {
    /// `None` when the event does not exist or could not be loaded.
    pub async fn load(source: &dyn DataSource, id: &EventId) -> Option<Self> {
        let (event, fights) = tokio::join!(source.event(id), source.fights_for_event(id));

        let event = settle_row("event", event)?;
        let card = settle("fight card", fights).map(FightCard::from_fights);

        Some(Self {
            date: event.date().map(format_long_date),
            starts_at: event.datetime.map(format_event_start_et),
            card,
            event,
        })
    }
}
