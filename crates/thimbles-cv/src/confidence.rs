//! Arbitration between the ball detector and the ball tracker
//!
//! The tracker is smooth but drifts; the detector is exact but intermittent.
//! Each frame the monitor decides which one to trust and when the tracker must
//! be restarted from a detection.

use serde::{Deserialize, Serialize};
use thimbles_core::Rect;

/// What the monitor decided this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "ball", rename_all = "snake_case")]
pub enum Verdict {
    /// No tracker running and nothing detected
    Searching,
    /// First detection; the tracker must be started from it
    Acquired(Rect),
    /// Tracker output agrees with the detection, or there is no detection
    Tracked(Rect),
    /// Tracker lost the ball or drifted from the detection; restart it from the detection
    Reseeded(Rect),
    /// Tracker lost the ball and nothing was detected; the tracker stops
    Lost,
}

impl Verdict {
    /// The ball rectangle possession should see this frame
    pub fn ball(&self) -> Option<Rect> {
        match self {
            Verdict::Acquired(rect) | Verdict::Tracked(rect) | Verdict::Reseeded(rect) => Some(*rect),
            Verdict::Searching | Verdict::Lost => None,
        }
    }

    /// Whether the tracker has to be (re)started from [`Verdict::ball`]
    pub fn restarts_tracker(&self) -> bool {
        matches!(self, Verdict::Acquired(_) | Verdict::Reseeded(_))
    }
}

/// Tracks whether a ball tracker is running and arbitrates its output
#[derive(Debug, Clone)]
pub struct ConfidenceMonitor {
    tracking: bool,
    divergence_radius_squared: f64,
}

impl ConfidenceMonitor {
    pub fn new(divergence_radius: f64) -> Self {
        Self {
            tracking: false,
            divergence_radius_squared: divergence_radius * divergence_radius,
        }
    }

    /// Whether the ball tracker should be updated this frame
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn reset(&mut self) {
        self.tracking = false;
    }

    /// Decide between `detection` and `tracked` (the tracker output, if it ran).
    pub fn arbitrate(&mut self, detection: Option<Rect>, tracked: Option<Rect>) -> Verdict {
        let verdict = if !self.tracking {
            match detection {
                Some(ball) => Verdict::Acquired(ball),
                None => Verdict::Searching,
            }
        } else {
            match (detection, tracked) {
                (Some(ball), None) => Verdict::Reseeded(ball),
                (Some(ball), Some(track)) if self.diverged(&ball, &track) => Verdict::Reseeded(ball),
                (_, Some(track)) => Verdict::Tracked(track),
                (None, None) => Verdict::Lost,
            }
        };

        match verdict {
            Verdict::Acquired(_) => {
                log::info!("ball detected, starting ball tracker");
                self.tracking = true;
            }
            Verdict::Reseeded(_) => log::info!("resynchronizing ball tracker with detection"),
            Verdict::Lost => {
                log::debug!("ball tracker and detector both lost the ball");
                self.tracking = false;
            }
            Verdict::Searching | Verdict::Tracked(_) => {}
        }

        verdict
    }

    fn diverged(&self, detection: &Rect, tracked: &Rect) -> bool {
        detection.center().distance_squared(&tracked.center()) > self.divergence_radius_squared
    }
}
