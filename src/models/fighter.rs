//! Fighter model.

use serde::{Deserialize, Deserializer, Serialize};

use super::{EntityId, FighterId, WinLossRecord};
use crate::calculate::parse_record;

/// A fighter row from the `fighters` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub date_of_birth: Option<String>,

    #[serde(default)]
    pub height: Option<String>,

    #[serde(default)]
    pub reach: Option<String>,

    #[serde(default)]
    pub weight_class: Option<String>,

    #[serde(default)]
    pub last_weight_in: Option<String>,

    /// Age as reported by the source (sometimes text, sometimes numeric)
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,

    /// Birthplace
    #[serde(default)]
    pub born: Option<String>,

    /// Country of representation
    #[serde(default)]
    pub country: Option<String>,

    /// Promotion the fighter is signed with (e.g. "UFC")
    #[serde(default)]
    pub organization: Option<String>,

    /// Roster status (e.g. "Champion", "Active")
    #[serde(default)]
    pub status: Option<String>,

    /// Professional record, "W-L-D" with an optional ", N NC" suffix
    #[serde(default, alias = "record")]
    pub pro_mma_record: Option<String>,

    #[serde(default)]
    pub current_mma_streak: Option<String>,

    #[serde(default)]
    pub affiliation: Option<String>,

    #[serde(default)]
    pub head_coach: Option<EntityId>,

    #[serde(default)]
    pub other_coaches: Option<String>,

    #[serde(default)]
    pub last_fight_date: Option<String>,

    #[serde(default)]
    pub next_fight_date: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub total_fights: Option<String>,

    #[serde(default)]
    pub tapology_url: Option<String>,

    #[serde(default)]
    pub profile_img_url: Option<String>,

    #[serde(default)]
    pub small_img_url: Option<String>,

    #[serde(flatten)]
    pub stats: StrikingStats,
}

/// Optional striking and grappling counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikingStats {
    #[serde(default, alias = "significantStrikesLanded", deserialize_with = "lenient_count")]
    pub significant_strikes_landed: Option<u32>,

    #[serde(default, alias = "significantStrikesAttempted", deserialize_with = "lenient_count")]
    pub significant_strikes_attempted: Option<u32>,

    /// Pre-computed by the source; preferred over recomputation
    #[serde(default, alias = "significantStrikeAccuracy", deserialize_with = "lenient_count")]
    pub significant_strike_accuracy: Option<u32>,

    #[serde(default, alias = "takedownsLanded", deserialize_with = "lenient_count")]
    pub takedowns_landed: Option<u32>,

    #[serde(default, alias = "takedownsAttempted", deserialize_with = "lenient_count")]
    pub takedowns_attempted: Option<u32>,

    #[serde(default, alias = "takedownAccuracy", deserialize_with = "lenient_count")]
    pub takedown_accuracy: Option<u32>,
}

impl Fighter {
    /// Create a fighter with only identity fields set.
    pub fn new(id: impl Into<FighterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_record(mut self, record: &str) -> Self {
        self.pro_mma_record = Some(record.to_string());
        self
    }

    pub fn with_weight_class(mut self, weight_class: &str) -> Self {
        self.weight_class = Some(weight_class.to_string());
        self
    }

    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
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

    /// Parsed professional record. Missing or malformed input yields 0-0-0.
    pub fn record(&self) -> WinLossRecord {
        parse_record(self.pro_mma_record.as_deref())
    }

    /// Country of representation, falling back to birthplace.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref().or(self.born.as_deref())
    }

    pub fn weight_class(&self) -> &str {
        self.weight_class.as_deref().unwrap_or("")
    }

}

/// The fighter sub-object embedded in `fights` rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterSummary {
    pub id: FighterId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub small_img_url: Option<String>,

    #[serde(default)]
    pub pro_mma_record: Option<String>,

    #[serde(default)]
    pub weight_class: Option<String>,
}

impl From<&Fighter> for FighterSummary {
    fn from(fighter: &Fighter) -> Self {
        Self {
            id: fighter.id.clone(),
            name: fighter.name.clone(),
            small_img_url: fighter.small_img_url.clone(),
            pro_mma_record: fighter.pro_mma_record.clone(),
            weight_class: fighter.weight_class.clone(),
        }
    }
}

/// Accept a string or a number for free-text columns.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Whole-number counter that tolerates floats (rounded) and numeric text.
/// Negative, oversized or non-numeric values become `None`.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .map(f64::round)
        .filter(|n| n.is_finite() && (0.0..=f64::from(u32::MAX)).contains(n))
        .map(|n| n as u32))
}
