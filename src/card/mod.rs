//! Fight card derivation: main event selection and undercard split.

use serde::Serialize;
use tracing::warn;

use crate::models::Fight;

/// The first fight tagged as main event, if any.
///
/// Cards are expected to carry at most one main event; when several are
/// tagged the first in list order wins.
pub fn select_main_event(fights: &[Fight]) -> Option<&Fight> {
    fights.iter().find(|f| f.is_main_event())
}

/// A card split into its headliner and the remaining bouts.
///
/// Computed once per load and handed to renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FightCard {
    pub main_event: Option<Fight>,
    /// Every other bout, in list order
    pub undercard: Vec<Fight>,
    /// Number of fights tagged main event in the source rows
    pub main_event_tags: usize,
}

impl FightCard {
    pub fn from_fights(fights: Vec<Fight>) -> Self {
        let main_event_tags = fights.iter().filter(|f| f.is_main_event()).count();
        if main_event_tags > 1 {
            warn!(
                tagged = main_event_tags,
                "Card has more than one main event; using the first"
            );
        }

        let main_index = fights.iter().position(Fight::is_main_event);
        let mut main_event = None;
        let mut undercard = Vec::with_capacity(fights.len());
        for (i, fight) in fights.into_iter().enumerate() {
            if Some(i) == main_index {
                main_event = Some(fight);
            } else if !fight.is_main_event() {
                undercard.push(fight);
            }
        }

        Self {
            main_event,
            undercard,
            main_event_tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.main_event.is_none() && self.undercard.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undercard.len() + usize::from(self.main_event.is_some())
    }
}
