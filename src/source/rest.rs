//! Client for the hosted store's REST-over-tables endpoint.

use std::fmt::Display;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::{DataSource, SourceError};
use crate::config::DataSourceConfig;
use crate::models::{Event, EventId, Fight, Fighter, FighterId, FighterRecord, RankingEntry};

const EVENTS: &str = "events";
const FIGHTS: &str = "fights";
const FIGHTERS: &str = "fighters";
const RECORDS: &str = "records_by_promotion";
const RANKINGS: &str = "rankings";

const FIGHTER_SUMMARY_COLUMNS: &str = "id,name,small_img_url,pro_mma_record,weight_class";

/// Filter, ordering and projection parameters for one table request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    params: Vec<(String, String)>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::select("*")
    }
}

impl TableQuery {
    pub fn select(columns: &str) -> Self {
        Self {
            params: vec![("select".to_string(), columns.to_string())],
        }
    }

    /// Fights with both corners expanded into fighter summaries.
    pub fn fights_with_fighters() -> Self {
        Self::select(&format!(
            "*,fighter1:id_fighter_1({cols}),fighter2:id_fighter_2({cols})",
            cols = FIGHTER_SUMMARY_COLUMNS
        ))
    }

    fn filter(mut self, column: &str, op: &str, value: impl Display) -> Self {
        self.params
            .push((column.to_string(), format!("{op}.{value}")));
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "eq", value)
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "gte", value)
    }

    pub fn lt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "lt", value)
    }

    /// `column IN (values)`.
    pub fn in_list<V: Display>(self, column: &str, values: &[V]) -> Self {
        let list = values
            .iter()
            .map(|v| quote_value(&v.to_string()))
            .collect::<Vec<_>>()
            .join(",");
        self.filter(column, "in", format!("({list})"))
    }

    /// Rows where any of `columns` equals `value`.
    pub fn any_eq(mut self, columns: &[&str], value: impl Display) -> Self {
        let value = quote_value(&value.to_string());
        let clauses = columns
            .iter()
            .map(|c| format!("{c}.eq.{value}"))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push(("or".to_string(), format!("({clauses})")));
        self
    }

    /// Repeated calls add secondary sort keys.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        let key = format!("{column}.{direction}");
        match self.params.iter_mut().find(|(name, _)| name == "order") {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(&key);
            }
            None => self.params.push(("order".to_string(), key)),
        }
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Values containing list punctuation must be double-quoted.
fn quote_value(value: &str) -> String {
    if value.contains([',', '(', ')', '"', '.']) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Data source backed by the remote REST endpoint.
pub struct RestSource {
    client: reqwest::Client,
    base: Url,
    api_key: String,
}

impl RestSource {
    /// `base` is the table endpoint root, e.g. "https://xyz.supabase.co/rest/v1/".
    pub fn new(
        base: Url,
        api_key: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("mma-directory/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base,
            api_key: api_key.into(),
        })
    }

    /// Build from configuration. Missing URL or key is fatal.
    pub fn from_config(config: &DataSourceConfig) -> Result<Self, SourceError> {
        config.validate()?;
        let source = Self::new(config.rest_base()?, config.api_key()?, config.timeout_seconds)?;
        info!("Using data store at {}", source.base);
        Ok(source)
    }

    /// Full request URL for a table query.
    pub fn table_url(&self, table: &str, query: &TableQuery) -> Result<Url, SourceError> {
        let mut url = self.base.join(table)?;
        url.query_pairs_mut().extend_pairs(query.params());
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        table: &str,
        query: TableQuery,
    ) -> Result<Vec<T>, SourceError> {
        let url = self.table_url(table, &query)?;
        debug!("Querying {}", url);

        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                body
            };
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let rows: Vec<T> = serde_json::from_slice(&bytes)?;
        debug!("{} returned {} rows", table, rows.len());
        Ok(rows)
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: TableQuery,
    ) -> Result<Option<T>, SourceError> {
        let rows = self.fetch(table, query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl DataSource for RestSource {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn event(&self, id: &EventId) -> Result<Option<Event>, SourceError> {
        self.fetch_one(EVENTS, TableQuery::default().eq("id", id)).await
    }

    async fn events_from(
        &self,
        date: NaiveDate,
        ascending: bool,
    ) -> Result<Vec<Event>, SourceError> {
        let query = TableQuery::default()
            .gte("datetime", date)
            .order("datetime", ascending);
        self.fetch(EVENTS, query).await
    }

    async fn events_before(&self, date: NaiveDate) -> Result<Vec<Event>, SourceError> {
        let query = TableQuery::default()
            .lt("datetime", date)
            .order("datetime", false);
        self.fetch(EVENTS, query).await
    }

    async fn events(&self) -> Result<Vec<Event>, SourceError> {
        self.fetch(EVENTS, TableQuery::default()).await
    }

    async fn fights_for_event(&self, id: &EventId) -> Result<Vec<Fight>, SourceError> {
        let query = TableQuery::fights_with_fighters().eq("id_event", id);
        self.fetch(FIGHTS, query).await
    }

    async fn fighter(&self, id: &FighterId) -> Result<Option<Fighter>, SourceError> {
        self.fetch_one(FIGHTERS, TableQuery::default().eq("id", id)).await
    }

    async fn fighters(&self) -> Result<Vec<Fighter>, SourceError> {
        self.fetch(FIGHTERS, TableQuery::default()).await
    }

    async fn fighters_by_ids(&self, ids: &[FighterId]) -> Result<Vec<Fighter>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch(FIGHTERS, TableQuery::default().in_list("id", ids))
            .await
    }

    async fn records_for_fighter(
        &self,
        id: &FighterId,
    ) -> Result<Vec<FighterRecord>, SourceError> {
        self.fetch(RECORDS, TableQuery::default().eq("id_fighter", id))
            .await
    }

    async fn fights_for_fighter(&self, id: &FighterId) -> Result<Vec<Fight>, SourceError> {
        let query = TableQuery::fights_with_fighters().any_eq(&["id_fighter_1", "id_fighter_2"], id);
        self.fetch(FIGHTS, query).await
    }

    async fn rankings(&self) -> Result<Vec<RankingEntry>, SourceError> {
        let query = TableQuery::default()
            .order("organization", true)
            .order("weight_class", true)
            .order("rank", true);
        self.fetch(RANKINGS, query).await
    }
}
