//! Divisional rankings and the pound-for-pound composite.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::directory::{compare_names, Searchable};
use crate::models::RankingEntry;

/// Pseudo weight class selecting the cross-division composite.
pub const POUND_FOR_POUND: &str = "Pound-for-Pound";

/// Divisions in display order, heaviest first.
pub const WEIGHT_CLASSES: [&str; 12] = [
    "Heavyweight",
    "Light Heavyweight",
    "Middleweight",
    "Welterweight",
    "Lightweight",
    "Featherweight",
    "Bantamweight",
    "Flyweight",
    "Women's Featherweight",
    "Women's Bantamweight",
    "Women's Flyweight",
    "Women's Strawweight",
];

pub const ORGANIZATIONS: [&str; 4] = ["UFC", "Bellator", "ONE", "PFL"];

const CHAMPION_QUOTA: usize = 5;
const CONTENDER_QUOTA: usize = 10;
const CONTENDERS_PER_DIVISION: usize = 3;
const POUND_FOR_POUND_SIZE: usize = 15;

/// Organization -> weight class -> ordered ranking list (index 0 is the champion).
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankingTable {
    divisions: BTreeMap<String, BTreeMap<String, Vec<RankingEntry>>>,
}

impl RankingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from flat ranking rows, ordering each division by `rank`.
    pub fn from_entries(entries: Vec<RankingEntry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table
                .divisions
                .entry(entry.organization.clone())
                .or_default()
                .entry(entry.weight_class.clone())
                .or_default()
                .push(entry);
        }
        for division in table.divisions.values_mut().flat_map(|wc| wc.values_mut()) {
            division.sort_by_key(|e| e.rank);
        }
        table
    }

    /// Replace one division's list. The list must already be in rank order.
    pub fn insert_division(
        &mut self,
        organization: &str,
        weight_class: &str,
        entries: Vec<RankingEntry>,
    ) {
        self.divisions
            .entry(organization.to_string())
            .or_default()
            .insert(weight_class.to_string(), entries);
    }

    pub fn division(&self, organization: &str, weight_class: &str) -> Option<&[RankingEntry]> {
        self.divisions
            .get(organization)?
            .get(weight_class)
            .map(Vec::as_slice)
    }

    pub fn organizations(&self) -> Vec<&str> {
        self.divisions.keys().map(String::as_str).collect()
    }

    /// Weight classes ranked by an organization, canonical divisions first.
    pub fn weight_classes(&self, organization: &str) -> Vec<&str> {
        let Some(classes) = self.divisions.get(organization) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = classes.keys().map(String::as_str).collect();
        names.sort_by_key(|name| {
            let position = WEIGHT_CLASSES
                .iter()
                .position(|wc| wc == name)
                .unwrap_or(WEIGHT_CLASSES.len());
            (position, *name)
        });
        names
    }

    /// Every division as (organization, weight class, ranking list).
    pub fn divisions(&self) -> impl Iterator<Item = (&str, &str, &[RankingEntry])> {
        self.divisions.iter().flat_map(|(org, classes)| {
            classes
                .iter()
                .map(move |(wc, entries)| (org.as_str(), wc.as_str(), entries.as_slice()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.divisions().all(|(_, _, entries)| entries.is_empty())
    }
}

/// Points descending, then name ascending. Used with stable sorts so equal
/// keys keep their input order.
pub fn compare_points(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.ranking_points
        .cmp(&a.ranking_points)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Compose the pound-for-pound list.
///
/// Each division contributes its champion to the champions pool and up to
/// three next-ranked fighters to the contenders pool. The best five
/// champions and ten contenders are merged, re-ranked by points and capped
/// at fifteen.
pub fn pound_for_pound(table: &RankingTable) -> Vec<RankingEntry> {
    let mut champions: Vec<RankingEntry> = Vec::new();
    let mut contenders: Vec<RankingEntry> = Vec::new();

    for (_, _, entries) in table.divisions() {
        let Some((champion, rest)) = entries.split_first() else {
            continue;
        };
        champions.push(champion.clone());
        contenders.extend(rest.iter().take(CONTENDERS_PER_DIVISION).cloned());
    }

    champions.sort_by(compare_points);
    contenders.sort_by(compare_points);
    champions.truncate(CHAMPION_QUOTA);
    contenders.truncate(CONTENDER_QUOTA);

    let mut combined = champions;
    combined.extend(contenders);
    combined.sort_by(compare_points);
    combined.truncate(POUND_FOR_POUND_SIZE);
    combined
}

/// Rankings list for a selection, narrowed by the search box.
///
/// `weight_class == POUND_FOR_POUND` selects the composite regardless of
/// organization. Unknown divisions yield an empty list.
pub fn select_rankings(
    table: &RankingTable,
    organization: &str,
    weight_class: &str,
    search: &str,
) -> Vec<RankingEntry> {
    let entries = if weight_class == POUND_FOR_POUND {
        pound_for_pound(table)
    } else {
        table
            .division(organization, weight_class)
            .map(<[RankingEntry]>::to_vec)
            .unwrap_or_default()
    };
    entries
        .into_iter()
        .filter(|e| e.matches_search(search))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movement;

    fn entry(id: &str, org: &str, wc: &str, rank: u32, points: u32) -> RankingEntry {
        RankingEntry::new(id, format!("Fighter {id}"), org, wc)
            .with_rank(rank)
            .with_points(points)
    }

    /// A division whose entries score `top`, `top - 50`, ...
    fn division(org: &str, wc: &str, len: u32, top: u32) -> Vec<RankingEntry> {
        (0..len)
            .map(|i| entry(&format!("{org}-{wc}-{i}"), org, wc, i, top - i * 50))
            .collect()
    }

    fn full_table() -> RankingTable {
        let mut table = RankingTable::new();
        let mut top = 1000;
        for org in ORGANIZATIONS {
            for wc in WEIGHT_CLASSES {
                table.insert_division(org, wc, division(org, wc, 15, top));
                top -= 1;
            }
        }
        table
    }

    #[test]
    fn test_two_divisions_scenario() {
        let mut table = RankingTable::new();
        table.insert_division("UFC", "Lightweight", vec![entry("a", "UFC", "Lightweight", 0, 970)]);
        table.insert_division("PFL", "Heavyweight", vec![entry("b", "PFL", "Heavyweight", 0, 990)]);

        let p4p = pound_for_pound(&table);
        assert_eq!(p4p.len(), 2);
        assert_eq!(p4p[0].fighter_id.as_str(), "b");
        assert_eq!(p4p[1].fighter_id.as_str(), "a");
        assert_eq!(p4p[0].weight_class, "Heavyweight");
    }

    #[test]
    fn test_pound_for_pound_is_capped_at_fifteen() {
        let table = full_table();
        let p4p = pound_for_pound(&table);

        assert_eq!(p4p.len(), 15);
        assert!(p4p
            .windows(2)
            .all(|w| w[0].ranking_points >= w[1].ranking_points));
    }

    #[test]
    fn test_pound_for_pound_respects_pool_quotas() {
        let table = full_table();
        let p4p = pound_for_pound(&table);

        let champions: Vec<&RankingEntry> = p4p.iter().filter(|e| e.rank == 0).collect();
        let contenders: Vec<&RankingEntry> = p4p.iter().filter(|e| e.rank > 0).collect();
        assert!(champions.len() <= CHAMPION_QUOTA);
        assert!(contenders.len() <= CONTENDER_QUOTA);
        assert!(contenders.iter().all(|e| e.rank <= 3));

        // every included champion outranks every excluded champion
        let min_included = champions.iter().map(|e| e.ranking_points).min().unwrap();
        let excluded_max = table
            .divisions()
            .filter_map(|(_, _, entries)| entries.first())
            .filter(|e| !p4p.iter().any(|p| p.fighter_id == e.fighter_id))
            .map(|e| e.ranking_points)
            .max()
            .unwrap();
        assert!(min_included > excluded_max);

        // same for the contenders pool: indices 1..=3 of every division
        let min_included = contenders.iter().map(|e| e.ranking_points).min().unwrap();
        let excluded_max = table
            .divisions()
            .flat_map(|(_, _, entries)| entries.iter().skip(1).take(CONTENDERS_PER_DIVISION))
            .filter(|e| !p4p.iter().any(|p| p.fighter_id == e.fighter_id))
            .map(|e| e.ranking_points)
            .max()
            .unwrap();
        assert!(min_included >= excluded_max);
    }

    #[test]
    fn test_contenders_below_third_are_never_drawn() {
        let mut table = RankingTable::new();
        let mut entries = division("UFC", "Welterweight", 4, 900);
        entries.push(entry("fourth", "UFC", "Welterweight", 4, 2000));
        table.insert_division("UFC", "Welterweight", entries);

        let p4p = pound_for_pound(&table);
        let ranks: Vec<u32> = p4p.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(p4p.iter().all(|e| e.fighter_id.as_str() != "fourth"));
    }

    #[test]
    fn test_short_divisions_contribute_what_they_have() {
        let mut table = RankingTable::new();
        table.insert_division("ONE", "Flyweight", division("ONE", "Flyweight", 2, 900));
        table.insert_division("ONE", "Bantamweight", vec![]);

        let p4p = pound_for_pound(&table);
        assert_eq!(p4p.len(), 2);
        assert_eq!(p4p[0].rank, 0);
        assert_eq!(p4p[1].rank, 1);
    }

    #[test]
    fn test_equal_points_break_ties_by_name() {
        let mut table = RankingTable::new();
        let mut zed = entry("z", "UFC", "Flyweight", 0, 950);
        zed.name = "Zed".to_string();
        let mut abe = entry("a", "PFL", "Flyweight", 0, 950);
        abe.name = "Abe".to_string();
        table.insert_division("UFC", "Flyweight", vec![zed]);
        table.insert_division("PFL", "Flyweight", vec![abe]);

        let p4p = pound_for_pound(&table);
        assert_eq!(p4p[0].name, "Abe");
        assert_eq!(p4p[1].name, "Zed");
    }

    #[test]
    fn test_empty_table() {
        let table = RankingTable::new();
        assert!(table.is_empty());
        assert!(pound_for_pound(&table).is_empty());
    }

    #[test]
    fn test_from_entries_orders_by_rank() {
        let table = RankingTable::from_entries(vec![
            entry("c", "UFC", "Middleweight", 2, 800),
            entry("a", "UFC", "Middleweight", 0, 990),
            entry("b", "UFC", "Middleweight", 1, 900),
            entry("h", "UFC", "Heavyweight", 0, 950),
        ]);

        let ids: Vec<&str> = table
            .division("UFC", "Middleweight")
            .unwrap()
            .iter()
            .map(|e| e.fighter_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(table.weight_classes("UFC"), vec!["Heavyweight", "Middleweight"]);
        assert_eq!(table.organizations(), vec!["UFC"]);
        assert!(table.division("UFC", "Flyweight").is_none());
    }

    #[test]
    fn test_select_rankings() {
        let mut table = RankingTable::new();
        let mut champ = entry("a", "UFC", "Lightweight", 0, 990).with_movement(Movement::Up);
        champ.country = Some("Russia".to_string());
        table.insert_division(
            "UFC",
            "Lightweight",
            vec![champ, entry("b", "UFC", "Lightweight", 1, 940)],
        );

        assert_eq!(select_rankings(&table, "UFC", "Lightweight", "").len(), 2);
        assert_eq!(select_rankings(&table, "UFC", "Lightweight", "russia").len(), 1);
        assert_eq!(select_rankings(&table, "PFL", POUND_FOR_POUND, "").len(), 2);
        assert!(select_rankings(&table, "PFL", "Lightweight", "").is_empty());
    }
}
