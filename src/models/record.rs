//! Fight records: the headline W-L-D tally and per-promotion slices.

use serde::{Deserialize, Serialize};

use super::fighter::lenient_string;
use super::{FighterId, RecordId};

/// Win/loss/draw record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl WinLossRecord {
    /// Create a new record.
    pub fn new(wins: u32, losses: u32, draws: u32) -> Self {
        Self {
            wins,
            losses,
            draws,
        }
    }

    /// Total fights contested, saturating at `u32::MAX`.
    pub fn total_fights(&self) -> u32 {
        self.wins
            .saturating_add(self.losses)
            .saturating_add(self.draws)
    }

    /// Win percentage rounded to a whole number (0 when no fights).
    pub fn win_percentage(&self) -> u32 {
        let total = self.total_fights();
        if total == 0 {
            0
        } else {
            (f64::from(self.wins) * 100.0 / f64::from(total)).round() as u32
        }
    }
}

impl std::fmt::Display for WinLossRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.draws)
    }
}

/// A fighter's record within one promotion over a date range
/// (a `records_by_promotion` row).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterRecord {
    pub id: RecordId,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub promotion: Option<String>,

    #[serde(default)]
    pub win: u32,
    #[serde(default)]
    pub loss: u32,
    #[serde(default)]
    pub draw: u32,

    #[serde(default, deserialize_with = "lenient_string")]
    pub no_contest: Option<String>,

    #[serde(default)]
    pub win_ko: u32,
    #[serde(default)]
    pub win_sub: u32,
    #[serde(default)]
    pub win_decision: u32,
    #[serde(default)]
    pub win_dq: u32,

    #[serde(default)]
    pub loss_ko: u32,
    #[serde(default)]
    pub loss_sub: u32,
    #[serde(default)]
    pub loss_decision: u32,
    #[serde(default)]
    pub loss_dq: u32,

    pub id_fighter: FighterId,
}

impl FighterRecord {
    /// Wins broken down by method.
    pub fn win_methods(&self) -> MethodBreakdown {
        MethodBreakdown {
            ko_tko: self.win_ko,
            submissions: self.win_sub,
            decisions: self.win_decision,
            disqualifications: self.win_dq,
        }
    }

    /// Losses broken down by method.
    pub fn loss_methods(&self) -> MethodBreakdown {
        MethodBreakdown {
            ko_tko: self.loss_ko,
            submissions: self.loss_sub,
            decisions: self.loss_decision,
            disqualifications: self.loss_dq,
        }
    }
}

/// Result counts by finishing method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBreakdown {
    pub ko_tko: u32,
    pub submissions: u32,
    pub decisions: u32,
    pub disqualifications: u32,
}

impl std::ops::AddAssign for MethodBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        self.ko_tko = self.ko_tko.saturating_add(rhs.ko_tko);
        self.submissions = self.submissions.saturating_add(rhs.submissions);
        self.decisions = self.decisions.saturating_add(rhs.decisions);
        self.disqualifications = self.disqualifications.saturating_add(rhs.disqualifications);
    }
}

impl MethodBreakdown {
    pub fn total(&self) -> u32 {
        self.ko_tko
            .saturating_add(self.submissions)
            .saturating_add(self.decisions)
            .saturating_add(self.disqualifications)
    }
}
