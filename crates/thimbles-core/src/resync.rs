//! Baseline resynchronization against the home cup layout
//!
//! Cup trackers drift and swap identities while cups move, and nothing in a
//! single frame reveals it. When the ball is visible (a round is starting or
//! ending) and every home position has a live cup close to it, the scene is back
//! at its starting layout and the home rectangles are the ground truth again.

use crate::config::TrackingConfig;
use crate::geometry::{CupSet, Rect};
use serde::{Deserialize, Serialize};

/// Cup positions recorded once, right after the initial cup detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeLayout {
    cups: Vec<Rect>,
}

/// Outcome of comparing a live cup set with the home layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resync", rename_all = "snake_case")]
pub enum ResyncDecision {
    /// The raw detector saw no ball this frame, so no comparison was made
    NoBall,
    /// Every home cup has a live cup nearby; trackers must be re-seeded from home
    AtHome,
    /// Only `matched` of `expected` home cups have a live cup nearby
    Away { matched: usize, expected: usize },
}

impl ResyncDecision {
    pub fn is_at_home(&self) -> bool {
        matches!(self, ResyncDecision::AtHome)
    }
}

/// Result of [`HomeLayout::reconcile`]: the cup set downstream stages should use
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub cups: CupSet,
    pub decision: ResyncDecision,
}

impl HomeLayout {
    /// Snapshot the initial layout. Requires at least one cup and every slot present.
    pub fn capture(cups: &CupSet) -> Option<Self> {
        if cups.is_empty() {
            return None;
        }
        let rects = cups.slots().iter().copied().collect::<Option<Vec<Rect>>>()?;
        Some(Self { cups: rects })
    }

    pub fn from_rects(rects: Vec<Rect>) -> Option<Self> {
        if rects.is_empty() {
            return None;
        }
        Some(Self { cups: rects })
    }

    pub fn rects(&self) -> &[Rect] {
        &self.cups
    }

    pub fn len(&self) -> usize {
        self.cups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cups.is_empty()
    }

    /// The home layout as a cup set, slot `i` holding home cup `i`
    pub fn to_cup_set(&self) -> CupSet {
        CupSet::from_rects(&self.cups)
    }

    /// Count home cups that have some live cup within the match radius.
    ///
    /// A live cup may satisfy several home cups; slot order is irrelevant.
    pub fn matched_count(&self, live: &CupSet, config: &TrackingConfig) -> usize {
        self.cups
            .iter()
            .filter(|home| {
                live.present()
                    .any(|(_, cup)| home.center_distance(&cup) < config.match_radius)
            })
            .count()
    }

    /// Decide whether the live layout is back at home
    pub fn check(&self, live: &CupSet, ball_detected: bool, config: &TrackingConfig) -> ResyncDecision {
        if !ball_detected {
            return ResyncDecision::NoBall;
        }

        let matched = self.matched_count(live, config);
        let expected = self.cups.len();
        if expected > 0 && matched == expected {
            ResyncDecision::AtHome
        } else {
            ResyncDecision::Away { matched, expected }
        }
    }

    /// Substitute the home layout for the live cup set when the scene is back at home
    pub fn reconcile(&self, live: CupSet, ball_detected: bool, config: &TrackingConfig) -> Reconciled {
        let decision = self.check(&live, ball_detected, config);
        let cups = if decision.is_at_home() {
            log::debug!("cups back at home layout, re-seeding cup identities");
            self.to_cup_set()
        } else {
            live
        };
        Reconciled { cups, decision }
    }
}
