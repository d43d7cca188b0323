use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::settle;
use crate::card::select_main_event;
use crate::datefmt::{format_event_start_et, Countdown};
use crate::directory::LoadState;
use crate::models::{Event, Fight};
use crate::source::DataSource;

/// The next event on the schedule, with its headliner and countdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedEvent {
    pub event: Event,
    /// Start time in US Eastern, e.g. "Saturday 04.13.2024 at 06:00 PM ET"
    pub starts_at: Option<String>,
    pub countdown: Option<Countdown>,
    pub main_event: Option<Fight>,
}

impl FeaturedEvent {
    pub async fn load(source: &dyn DataSource, event: Event, now: DateTime<Utc>) -> Self {
        let fights = settle("featured event fights", source.fights_for_event(&event.id).await);
        let main_event = fights
            .as_loaded()
            .and_then(|fights| select_main_event(fights))
            .cloned();

        Self {
            starts_at: event.datetime.map(format_event_start_et),
            countdown: event.datetime.map(|start| Countdown::until(start, now)),
            main_event,
            event,
        }
    }
}

/// Landing page: upcoming and past events split at today's date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub today: NaiveDate,
    /// Events on or after today, soonest first
    pub upcoming: LoadState<Vec<Event>>,
    /// Events before today, most recent first
    pub past: LoadState<Vec<Event>>,
    pub featured: Option<FeaturedEvent>,
}

impl HomeView {
    /// "Today" is the UTC calendar date of `now`.
    pub async fn load(source: &dyn DataSource, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let (upcoming, past) = tokio::join!(
            source.events_from(today, true),
            source.events_before(today)
        );
        let upcoming = settle("upcoming events", upcoming);
        let past = settle("past events", past);

        let next = upcoming
            .as_loaded()
            .and_then(|events| events.first())
            .cloned();
        let featured = match next {
            Some(event) => Some(FeaturedEvent::load(source, event, now).await),
            None => None,
        };

        Self {
            today,
            upcoming,
            past,
            featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::{snapshot, Unreachable};
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_home_splits_events_at_today() {
        let source = snapshot();
        let now = Utc.with_ymd_and_hms(2024, 4, 13, 12, 0, 0).unwrap();
        let home = HomeView::load(&source, now).await;

        let upcoming: Vec<&str> = home
            .upcoming
            .as_loaded()
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(upcoming, vec!["300", "303"]);

        let past: Vec<&str> = home
            .past
            .as_loaded()
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(past, vec!["pfl", "295"]);
    }

    #[tokio::test]
    async fn test_featured_event_has_main_event_and_countdown() {
        let source = snapshot();
        let now = Utc.with_ymd_and_hms(2024, 4, 12, 22, 0, 0).unwrap();
        let home = HomeView::load(&source, now).await;

        let featured = home.featured.unwrap();
        assert_eq!(featured.event.id.as_str(), "300");
        assert_eq!(
            featured.main_event.map(|f| f.id.as_str().to_string()),
            Some("f1".to_string())
        );
        assert_eq!(featured.countdown.unwrap().days, 1);
        assert_eq!(
            featured.starts_at.as_deref(),
            Some("Saturday 04.13.2024 at 06:00 PM ET")
        );
    }

    #[tokio::test]
    async fn test_no_upcoming_events() {
        let source = snapshot();
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let home = HomeView::load(&source, now).await;

        assert_eq!(home.upcoming, LoadState::Loaded(vec![]));
        assert!(home.featured.is_none());
        assert_eq!(home.past.as_loaded().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn test_failed_fetches_leave_fields_unloaded() {
        let home = HomeView::load(&Unreachable, Utc::now()).await;

        assert_eq!(home.upcoming, LoadState::NotLoaded);
        assert_eq!(home.past, LoadState::NotLoaded);
        assert!(home.featured.is_none());
    }
}
