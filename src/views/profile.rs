use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::{settle, settle_row};
use crate::calculate::{
    aggregate_methods, has_striking_data, has_takedown_data, striking_accuracy,
    takedown_accuracy, MethodTotals,
};
use crate::datefmt::{fight_date, format_birth_date, format_long_date};
use crate::directory::LoadState;
use crate::models::{
    Fight, FightResult, Fighter, FighterId, FighterRecord, FighterRole, FighterSummary,
    RankingEntry, WinLossRecord,
};
use crate::source::DataSource;

/// Headline numbers derived from a fighter row and its record slices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub record: WinLossRecord,
    pub total_fights: u32,
    pub win_percentage: u32,
    pub methods: MethodTotals,
    /// `None` when the source has no striking numbers for the fighter
    pub striking_accuracy: Option<u32>,
    pub takedown_accuracy: Option<u32>,
}

impl ProfileStats {
    pub fn compute(fighter: &Fighter, records: &[FighterRecord]) -> Self {
        let record = fighter.record();
        let stats = &fighter.stats;
        Self {
            record,
            total_fights: record.total_fights(),
            win_percentage: record.win_percentage(),
            methods: aggregate_methods(records),
            striking_accuracy: has_striking_data(stats).then(|| striking_accuracy(stats)),
            takedown_accuracy: has_takedown_data(stats).then(|| takedown_accuracy(stats)),
        }
    }
}

/// One bout seen from the profiled fighter's corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FightHistoryEntry {
    pub fight: Fight,
    pub role: FighterRole,
    pub result: Option<FightResult>,
    /// "WIN", "LOSE", "DRAW" or "NO CONTEST"
    pub result_label: Option<&'static str>,
    pub opponent: Option<FighterSummary>,
    /// "April 13, 2024"
    pub date: Option<String>,
    #[serde(skip)]
    sort_date: Option<NaiveDate>,
}

/// Tag every fight with the side `fighter_id` fought on.
pub fn annotate_roles(fights: Vec<Fight>, fighter_id: &FighterId) -> Vec<Fight> {
    fights
        .into_iter()
        .map(|mut fight| {
            fight.current_fighter_role = fight.role_of(fighter_id);
            fight
        })
        .collect()
}

/// Distinct opponents in first-seen order.
pub fn opponent_ids(fights: &[Fight], fighter_id: &FighterId) -> Vec<FighterId> {
    let mut seen = HashSet::new();
    fights
        .iter()
        .filter_map(|f| f.opponent_of(fighter_id))
        .filter(|id| seen.insert((*id).clone()))
        .cloned()
        .collect()
}

/// Join fights with opponent rows, most recent first.
///
/// The opponent comes from `opponents` when present, otherwise from the
/// summary embedded in the fight row.
pub fn fight_history(fights: Vec<Fight>, opponents: &[Fighter]) -> Vec<FightHistoryEntry> {
    let mut history: Vec<FightHistoryEntry> = fights
        .into_iter()
        .filter_map(|fight| {
            let role = fight.current_fighter_role?;
            let (opponent_id, embedded) = match role {
                FighterRole::Fighter1 => (&fight.id_fighter_2, &fight.fighter2),
                FighterRole::Fighter2 => (&fight.id_fighter_1, &fight.fighter1),
            };
            let opponent = opponents
                .iter()
                .find(|o| &o.id == opponent_id)
                .map(FighterSummary::from)
                .or_else(|| embedded.clone());

            let sort_date = match (fight.month_day.as_deref(), fight.year) {
                (Some(month_day), Some(year)) => fight_date(month_day, year),
                _ => None,
            };
            let result = fight.result_for(role);

            Some(FightHistoryEntry {
                role,
                result,
                result_label: result.map(|r| r.label()),
                opponent,
                date: sort_date.map(format_long_date),
                sort_date,
                fight,
            })
        })
        .collect();

    history.sort_by(|a, b| b.sort_date.cmp(&a.sort_date));
    history
}

/// Everything the fighter profile page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterProfileView {
    pub fighter: Fighter,
    /// Formatted date of birth
    pub born_on: Option<String>,
    pub stats: ProfileStats,
    /// Current divisional ranking, if the fighter is ranked
    pub ranking: Option<RankingEntry>,
    pub records: LoadState<Vec<FighterRecord>>,
    pub history: LoadState<Vec<FightHistoryEntry>>,
    pub opponents: LoadState<Vec<Fighter>>,
}

impl FighterProfileView {
    /// `None` when the fighter does not exist or could not be loaded.
    pub async fn load(source: &dyn DataSource, id: &FighterId) -> Option<Self> {
        let (fighter, records, fights, rankings) = tokio::join!(
            source.fighter(id),
            source.records_for_fighter(id),
            source.fights_for_fighter(id),
            source.rankings()
        );

        let fighter = settle_row("fighter", fighter)?;
        let records = settle("fighter records", records);
        let fights = settle("fight history", fights).map(|f| annotate_roles(f, id));
        let ranking = settle("rankings", rankings)
            .as_loaded()
            .and_then(|entries| entries.iter().find(|e| &e.fighter_id == id).cloned());

        let opponents = match fights.as_loaded().map(|f| opponent_ids(f, id)) {
            None => LoadState::NotLoaded,
            Some(ids) if ids.is_empty() => LoadState::Loaded(Vec::new()),
            Some(ids) => settle("opponents", source.fighters_by_ids(&ids).await),
        };

        let known = opponents.as_loaded().map(Vec::as_slice).unwrap_or_default();
        let history = fights.map(|f| fight_history(f, known));

        let stats = ProfileStats::compute(
            &fighter,
            records.as_loaded().map(Vec::as_slice).unwrap_or_default(),
        );

        Some(Self {
            born_on: fighter.date_of_birth.as_deref().and_then(format_birth_date),
            stats,
            ranking,
            records,
            history,
            opponents,
            fighter,
        })
    }
}
