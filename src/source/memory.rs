//! In-memory data source loaded from a JSON snapshot.

use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DataSource, SourceError};
use crate::models::{
    Event, EventId, Fight, Fighter, FighterId, FighterRecord, FighterSummary, RankingEntry,
};

/// Table rows held in memory, mirroring the remote store's tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySource {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub fights: Vec<Fight>,
    #[serde(default)]
    pub fighters: Vec<Fighter>,
    #[serde(default, alias = "records_by_promotion")]
    pub records: Vec<FighterRecord>,
    #[serde(default)]
    pub rankings: Vec<RankingEntry>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot file (a JSON object keyed by table name).
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path)?;
        let source: MemorySource = serde_json::from_str(&contents)?;
        info!(
            events = source.events.len(),
            fighters = source.fighters.len(),
            fights = source.fights.len(),
            "Loaded snapshot {}",
            path.display()
        );
        Ok(source)
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_fights(mut self, fights: Vec<Fight>) -> Self {
        self.fights = fights;
        self
    }

    pub fn with_fighters(mut self, fighters: Vec<Fighter>) -> Self {
        self.fighters = fighters;
        self
    }

    pub fn with_records(mut self, records: Vec<FighterRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_rankings(mut self, rankings: Vec<RankingEntry>) -> Self {
        self.rankings = rankings;
        self
    }

    fn summary(&self, id: &FighterId) -> Option<FighterSummary> {
        self.fighters
            .iter()
            .find(|f| &f.id == id)
            .map(FighterSummary::from)
    }

    /// Fill in fighter summaries the snapshot did not embed.
    fn with_summaries(&self, mut fight: Fight) -> Fight {
        if fight.fighter1.is_none() {
            fight.fighter1 = self.summary(&fight.id_fighter_1);
        }
        if fight.fighter2.is_none() {
            fight.fighter2 = self.summary(&fight.id_fighter_2);
        }
        fight
    }
}

#[async_trait]
impl DataSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn event(&self, id: &EventId) -> Result<Option<Event>, SourceError> {
        Ok(self.events.iter().find(|e| &e.id == id).cloned())
    }

    async fn events_from(
        &self,
        date: NaiveDate,
        ascending: bool,
    ) -> Result<Vec<Event>, SourceError> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.is_upcoming(date))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.datetime);
        if !ascending {
            events.reverse();
        }
        Ok(events)
    }

    async fn events_before(&self, date: NaiveDate) -> Result<Vec<Event>, SourceError> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.datetime.is_some() && !e.is_upcoming(date))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.datetime.cmp(&a.datetime));
        Ok(events)
    }

    async fn events(&self) -> Result<Vec<Event>, SourceError> {
        Ok(self.events.clone())
    }

    async fn fights_for_event(&self, id: &EventId) -> Result<Vec<Fight>, SourceError> {
        Ok(self
            .fights
            .iter()
            .filter(|f| f.id_event.as_ref() == Some(id))
            .map(|f| self.with_summaries(f.clone()))
            .collect())
    }

    async fn fighter(&self, id: &FighterId) -> Result<Option<Fighter>, SourceError> {
        Ok(self.fighters.iter().find(|f| &f.id == id).cloned())
    }

    async fn fighters(&self) -> Result<Vec<Fighter>, SourceError> {
        Ok(self.fighters.clone())
    }

    async fn fighters_by_ids(&self, ids: &[FighterId]) -> Result<Vec<Fighter>, SourceError> {
        Ok(self
            .fighters
            .iter()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect())
    }

    async fn records_for_fighter(
        &self,
        id: &FighterId,
    ) -> Result<Vec<FighterRecord>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|r| &r.id_fighter == id)
            .cloned()
            .collect())
    }

    async fn fights_for_fighter(&self, id: &FighterId) -> Result<Vec<Fight>, SourceError> {
        Ok(self
            .fights
            .iter()
            .filter(|f| f.role_of(id).is_some())
            .map(|f| self.with_summaries(f.clone()))
            .collect())
    }

    async fn rankings(&self) -> Result<Vec<RankingEntry>, SourceError> {
        Ok(self.rankings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, y: i32, m: u32, d: u32) -> Event {
        Event::new(id, format!("Event {id}"))
            .with_datetime(Utc.with_ymd_and_hms(y, m, d, 22, 0, 0).unwrap())
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_events(vec![
                event("old", 2024, 1, 20),
                event("today", 2024, 4, 13),
                event("next", 2024, 5, 4),
                event("older", 2023, 12, 16),
                Event::new("tba", "Date TBA"),
            ])
            .with_fighters(vec![
                Fighter::new("1", "Alex Pereira").with_record("9-2-0"),
                Fighter::new("2", "Jamahal Hill").with_record("12-1-0"),
                Fighter::new("3", "Jiri Prochazka"),
            ])
            .with_fights(vec![
                Fight::new("f1", "1", "2").with_event("today"),
                Fight::new("f2", "3", "1").with_event("old"),
            ])
    }

    #[tokio::test]
    async fn test_events_split_at_date() {
        let source = source();
        let today = NaiveDate::from_ymd_opt(2024, 4, 13).unwrap();

        let upcoming = source.events_from(today, true).await.unwrap();
        let ids: Vec<&str> = upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "next"]);

        let past = source.events_before(today).await.unwrap();
        let ids: Vec<&str> = past.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "older"]);
    }

    #[tokio::test]
    async fn test_fights_embed_fighter_summaries() {
        let source = source();
        let fights = source.fights_for_event(&"today".into()).await.unwrap();

        assert_eq!(fights.len(), 1);
        let red = fights[0].fighter1.as_ref().unwrap();
        assert_eq!(red.name, "Alex Pereira");
        assert_eq!(red.pro_mma_record.as_deref(), Some("9-2-0"));
    }

    #[tokio::test]
    async fn test_fights_for_fighter_either_corner() {
        let source = source();
        let fights = source.fights_for_fighter(&"1".into()).await.unwrap();
        assert_eq!(fights.len(), 2);

        let none = source.fights_for_fighter(&"99".into()).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_missing_rows() {
        let source = source();
        assert!(source.fighter(&"99".into()).await.unwrap().is_none());
        assert!(source.event(&"nope".into()).await.unwrap().is_none());
        let found = source
            .fighters_by_ids(&["2".into(), "3".into(), "99".into()])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"{
                "events": [{"id": 1, "name": "UFC 300", "datetime": "2024-04-13T22:00:00+00:00"}],
                "fighters": [{"id": 10, "name": "Alex Pereira"}],
                "records_by_promotion": [{"id": 1, "id_fighter": 10, "win_ko": 7}]
            }"#,
        )
        .unwrap();

        let source = MemorySource::from_file(&path).unwrap();
        assert_eq!(source.events.len(), 1);
        assert_eq!(source.records[0].win_ko, 7);
        assert!(source.fights.is_empty());

        let records = tokio_test::block_on(source.records_for_fighter(&"10".into())).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_from_file_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            MemorySource::from_file(&path),
            Err(SourceError::Json(_))
        ));
    }
}
