//! Playback of recorded sessions

pub mod recording;
pub mod sources;

pub use recording::{RecordedFrame, RecordedSetup, Recording};
pub use sources::{ReplayBallDetector, ReplayBallTracker, ReplayCupTracker};

use crate::locate::locate_cups;
use crate::session::{FrameReport, GameSession, SessionConfig};
use crate::Result;
use thimbles_core::Rect;

/// A game session wired to replay collaborators
pub type ReplaySession =
    GameSession<RecordedFrame, ReplayCupTracker, ReplayBallDetector, ReplayBallTracker>;

/// Result of replaying a whole recording
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// Cup layout located at setup, left to right
    pub cups: Vec<Rect>,
    pub reports: Vec<FrameReport>,
}

impl ReplayOutcome {
    /// Report of the last frame, if any frame was played
    pub fn last(&self) -> Option<&FrameReport> {
        self.reports.last()
    }

    pub fn resync_count(&self) -> usize {
        self.reports.iter().filter(|report| report.resynced()).count()
    }
}

/// Create a replay session that has not been set up yet
pub fn replay_session(config: &SessionConfig) -> ReplaySession {
    GameSession::new(
        config.clone(),
        ReplayCupTracker::new(),
        ReplayBallDetector::new(config.ball.clone()),
        ReplayBallTracker::new(),
    )
}

/// Locate the cups from the recorded setup and play every frame
pub fn replay(recording: &Recording, config: &SessionConfig) -> Result<ReplayOutcome> {
    let cups = locate_cups(
        recording.setup.roi,
        &recording.setup.cup_candidates,
        &config.cup_layout,
    );

    let mut session = replay_session(config);
    session.setup(&RecordedFrame::default(), &cups)?;

    let reports = recording
        .frames
        .iter()
        .map(|frame| session.tick(frame))
        .collect::<Result<Vec<_>>>()?;

    Ok(ReplayOutcome { cups, reports })
}
