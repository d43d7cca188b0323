//! Ranking entries.

use serde::{Deserialize, Serialize};

use super::FighterId;

/// Change in position relative to the previous ranking period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Up,
    Down,
    #[default]
    None,
}

/// A fighter's position within one organization's division.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub fighter_id: FighterId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// "W-L-D" record string
    #[serde(default)]
    pub record: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    pub organization: String,

    pub weight_class: String,

    /// Position in the division; 0 is the champion
    #[serde(default)]
    pub rank: u32,

    #[serde(default)]
    pub movement: Movement,

    /// Score used only for ordering across divisions
    #[serde(default)]
    pub ranking_points: u32,

    #[serde(default)]
    pub last_fight_date: Option<String>,

    #[serde(default)]
    pub next_fight_date: Option<String>,
}

impl RankingEntry {
    pub fn new(
        fighter_id: impl Into<FighterId>,
        name: impl Into<String>,
        organization: impl Into<String>,
        weight_class: impl Into<String>,
    ) -> Self {
        Self {
            fighter_id: fighter_id.into(),
            name: name.into(),
            organization: organization.into(),
            weight_class: weight_class.into(),
            ..Default::default()
        }
    }

    pub fn with_points(mut self, ranking_points: u32) -> Self {
        self.ranking_points = ranking_points;
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_row_deserializes() {
        let json = r#"{"fighter_id": 4, "name": "Islam Makhachev", "organization": "UFC",
                       "weight_class": "Lightweight", "rank": 0, "movement": "up",
                       "ranking_points": 995, "record": "26-1-0"}"#;
        let entry: RankingEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.movement, Movement::Up);
        assert_eq!(entry.rank, 0);
        assert_eq!(entry.record.as_deref(), Some("26-1-0"));
    }

    #[test]
    fn test_movement_defaults_to_none() {
        let json = r#"{"fighter_id": "x", "organization": "PFL", "weight_class": "Heavyweight"}"#;
        let entry: RankingEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.movement, Movement::None);
        assert_eq!(entry.ranking_points, 0);
    }
}
