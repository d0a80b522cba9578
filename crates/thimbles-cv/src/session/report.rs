//! Per-frame output handed to renderers

use crate::confidence::Verdict;
use serde::{Deserialize, Serialize};
use thimbles_core::{CupSet, PossessionEvent, Rect, Rejection, ResyncDecision};

/// Whether a ball tracker is following the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    AwaitingBall,
    InPlay,
}

/// Everything a renderer needs about one tick. Read-only by contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame_index: u64,
    pub status: SessionStatus,
    /// Cup slot believed to hold the ball
    pub target: Option<usize>,
    /// Rectangle of the target cup this frame, when present
    pub target_cup: Option<Rect>,
    pub ball_hidden: bool,
    /// Arbitrated ball rectangle fed to possession
    pub ball: Option<Rect>,
    /// Cup set after resynchronization
    pub cups: CupSet,
    /// Ball candidate straight from the detector
    pub raw_detection: Option<Rect>,
    pub rejection: Option<Rejection>,
    pub resync: ResyncDecision,
    pub verdict: Verdict,
    pub events: Vec<PossessionEvent>,
}

impl FrameReport {
    pub fn resynced(&self) -> bool {
        self.resync.is_at_home()
    }

    /// One-line operator summary, cups numbered from 1
    pub fn summary(&self) -> String {
        let target = match self.target {
            Some(cup) => format!("cup #{}", cup + 1),
            None => "none".to_string(),
        };
        let status = match self.status {
            SessionStatus::AwaitingBall => "awaiting ball",
            SessionStatus::InPlay => "in play",
        };
        let mut line = format!(
            "frame {:>5} | {:<13} | target {:<7} | ball {}",
            self.frame_index,
            status,
            target,
            if self.ball_hidden { "hidden" } else { "visible" }
        );
        if self.resynced() {
            line.push_str(" | resync");
        }
        line
    }
}
