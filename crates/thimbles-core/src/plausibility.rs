//! Spatial sanity checks on raw ball candidates
//!
//! Both checks either pass a candidate through untouched or reject it, and a
//! rejected candidate is treated as "no ball this frame".

use crate::config::TrackingConfig;
use crate::geometry::{CupSet, Rect};
use serde::{Deserialize, Serialize};

/// Why a ball candidate was dropped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rejection", rename_all = "snake_case")]
pub enum Rejection {
    /// Center lies above or below the band spanned by the cups (UI chrome, buttons)
    OutsideBand { center_y: f64, min_y: f64, max_y: f64 },
    /// Center lies inside a cup while the ball is believed hidden (cup-colored artifact)
    InsideCupWhileHidden { cup: usize },
}

/// Reject candidates whose center is outside the cups' vertical band plus margins.
///
/// Passes everything when no cup is present.
pub fn check_vertical_band(candidate: &Rect, cups: &CupSet, config: &TrackingConfig) -> Option<Rejection> {
    let (top, bottom) = cups.vertical_span()?;
    let min_y = top as f64 - config.band_margin_top;
    let max_y = bottom as f64 + config.band_margin_bottom;
    let center_y = candidate.center().y;

    if center_y < min_y || center_y > max_y {
        return Some(Rejection::OutsideBand {
            center_y,
            min_y,
            max_y,
        });
    }
    None
}

/// Reject candidates landing strictly inside a cup while the ball is hidden
pub fn check_hidden_artifact(candidate: &Rect, cups: &CupSet, ball_hidden: bool) -> Option<Rejection> {
    if !ball_hidden {
        return None;
    }

    let center = candidate.center();
    cups.present()
        .find(|(_, cup)| cup.strictly_contains(&center))
        .map(|(cup, _)| Rejection::InsideCupWhileHidden { cup })
}

/// A candidate after filtering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Filtered {
    pub ball: Option<Rect>,
    pub rejection: Option<Rejection>,
}

/// Run both filters on a raw candidate, band first
pub fn filter_ball_candidate(
    candidate: Option<Rect>,
    cups: &CupSet,
    ball_hidden: bool,
    config: &TrackingConfig,
) -> Filtered {
    let Some(rect) = candidate else {
        return Filtered {
            ball: None,
            rejection: None,
        };
    };

    let rejection = check_vertical_band(&rect, cups, config)
        .or_else(|| check_hidden_artifact(&rect, cups, ball_hidden));

    if let Some(reason) = &rejection {
        log::trace!("ball candidate {rect} rejected: {reason:?}");
    }

    Filtered {
        ball: if rejection.is_some() { None } else { Some(rect) },
        rejection,
    }
}
