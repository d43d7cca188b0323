//! Bout model.

use serde::{Deserialize, Serialize};

use super::{EventId, FightId, FighterId, FighterSummary};

/// Per-side outcome of a bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FightResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "NC")]
    NoContest,
}

impl FightResult {
    /// Label shown on fight cards.
    pub fn label(&self) -> &'static str {
        match self {
            FightResult::Win => "WIN",
            FightResult::Loss => "LOSE",
            FightResult::Draw => "DRAW",
            FightResult::NoContest => "NO CONTEST",
        }
    }
}

/// Position of a bout on the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum FightType {
    MainEvent,
    CoMainEvent,
    Prelim,
    #[default]
    Undercard,
}

impl From<String> for FightType {
    fn from(raw: String) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "mainevent" | "main" => FightType::MainEvent,
            "comainevent" | "comain" => FightType::CoMainEvent,
            "prelim" | "prelims" | "preliminary" | "earlyprelim" | "earlyprelims" => {
                FightType::Prelim
            }
            _ => FightType::Undercard,
        }
    }
}

impl From<Option<String>> for FightType {
    fn from(raw: Option<String>) -> Self {
        raw.map(FightType::from).unwrap_or_default()
    }
}

impl From<FightType> for String {
    fn from(fight_type: FightType) -> Self {
        fight_type.as_str().to_string()
    }
}

impl FightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FightType::MainEvent => "main_event",
            FightType::CoMainEvent => "co_main_event",
            FightType::Prelim => "prelim",
            FightType::Undercard => "undercard",
        }
    }
}

/// Which corner the profiled fighter occupies in a bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FighterRole {
    #[serde(rename = "fighter_1")]
    Fighter1,
    #[serde(rename = "fighter_2")]
    Fighter2,
}

/// A bout row from the `fights` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fight {
    pub id: FightId,

    pub id_fighter_1: FighterId,

    pub id_fighter_2: FighterId,

    #[serde(default)]
    pub result_fighter_1: Option<FightResult>,

    #[serde(default)]
    pub result_fighter_2: Option<FightResult>,

    /// Finishing method (e.g. "KO/TKO", "Decision")
    #[serde(default)]
    pub finish_by: Option<String>,

    #[serde(default)]
    pub details: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    /// Month and day, e.g. "April 13"
    #[serde(default)]
    pub month_day: Option<String>,

    #[serde(default)]
    pub id_event: Option<EventId>,

    #[serde(default)]
    pub fight_type: FightType,

    /// Embedded fighter sub-objects (present when the query selects them)
    #[serde(default)]
    pub fighter1: Option<FighterSummary>,

    #[serde(default)]
    pub fighter2: Option<FighterSummary>,

    /// Set when the fight was loaded for a fighter profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_fighter_role: Option<FighterRole>,
}

impl Fight {
    pub fn new(
        id: impl Into<FightId>,
        id_fighter_1: impl Into<FighterId>,
        id_fighter_2: impl Into<FighterId>,
    ) -> Self {
        Self {
            id: id.into(),
            id_fighter_1: id_fighter_1.into(),
            id_fighter_2: id_fighter_2.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, fight_type: FightType) -> Self {
        self.fight_type = fight_type;
        self
    }

    pub fn with_event(mut self, event_id: impl Into<EventId>) -> Self {
        self.id_event = Some(event_id.into());
        self
    }

    pub fn with_results(mut self, fighter_1: FightResult, fighter_2: FightResult) -> Self {
        self.result_fighter_1 = Some(fighter_1);
        self.result_fighter_2 = Some(fighter_2);
        self
    }

    pub fn is_main_event(&self) -> bool {
        self.fight_type == FightType::MainEvent
    }

    /// Corner of the given fighter, if they took part.
    pub fn role_of(&self, fighter_id: &FighterId) -> Option<FighterRole> {
        if &self.id_fighter_1 == fighter_id {
            Some(FighterRole::Fighter1)
        } else if &self.id_fighter_2 == fighter_id {
            Some(FighterRole::Fighter2)
        } else {
            None
        }
    }

    /// The other fighter in the bout.
    pub fn opponent_of(&self, fighter_id: &FighterId) -> Option<&FighterId> {
        match self.role_of(fighter_id)? {
            FighterRole::Fighter1 => Some(&self.id_fighter_2),
            FighterRole::Fighter2 => Some(&self.id_fighter_1),
        }
    }

    pub fn result_for(&self, role: FighterRole) -> Option<FightResult> {
        match role {
            FighterRole::Fighter1 => self.result_fighter_1,
            FighterRole::Fighter2 => self.result_fighter_2,
        }
    }
}
