//! Collaborators that serve recorded output instead of processing pixels

use super::recording::RecordedFrame;
use crate::locate::select_ball;
use crate::session::config::BallSelectionConfig;
use crate::traits::{BallDetector, BallTracker, CupTracker};
use thimbles_core::{CupSet, Rect};

/// Serves recorded cup tracker slots.
///
/// Re-seeding remaps identities: each seeded slot takes over the recorded slot
/// whose cup is nearest to it at that frame, as a real tracker restarted on those
/// rectangles would.
#[derive(Debug, Clone, Default)]
pub struct ReplayCupTracker {
    mapping: Vec<Option<usize>>,
    reinit_count: usize,
}

impl ReplayCupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the tracker was seeded, including the initial setup
    pub fn reinit_count(&self) -> usize {
        self.reinit_count
    }

    /// Recorded slot currently reported at each output slot
    pub fn mapping(&self) -> &[Option<usize>] {
        &self.mapping
    }
}

impl CupTracker<RecordedFrame> for ReplayCupTracker {
    fn initialize(&mut self, frame: &RecordedFrame, cups: &[Rect]) -> anyhow::Result<()> {
        let mut taken = vec![false; frame.cups.len()];

        self.mapping = cups
            .iter()
            .enumerate()
            .map(|(slot, seed)| {
                let nearest = frame
                    .cups
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| !taken[*j])
                    .filter_map(|(j, cup)| cup.map(|rect| (j, rect.center_distance(seed))))
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(j, _)| j);

                // Nothing recorded yet (setup frame): keep the slot as is.
                let source = if frame.cups.is_empty() { Some(slot) } else { nearest };
                if let Some(seen) = source.and_then(|j| taken.get_mut(j)) {
                    *seen = true;
                }
                source
            })
            .collect();

        self.reinit_count += 1;
        log::debug!("{} cup trackers initialized", self.mapping.len());
        Ok(())
    }

    fn update(&mut self, frame: &RecordedFrame) -> anyhow::Result<CupSet> {
        Ok(self
            .mapping
            .iter()
            .map(|source| source.and_then(|j| frame.cups.get(j).copied().flatten()))
            .collect())
    }
}

/// Applies ball blob selection to the recorded blobs
#[derive(Debug, Clone, Default)]
pub struct ReplayBallDetector {
    config: BallSelectionConfig,
}

impl ReplayBallDetector {
    pub fn new(config: BallSelectionConfig) -> Self {
        Self { config }
    }
}

impl BallDetector<RecordedFrame> for ReplayBallDetector {
    fn detect_ball(&self, frame: &RecordedFrame, max_area: Option<f64>) -> anyhow::Result<Option<Rect>> {
        Ok(select_ball(&frame.blobs, max_area, &self.config))
    }
}

/// Serves the recorded ball tracker output while started
#[derive(Debug, Clone, Default)]
pub struct ReplayBallTracker {
    running: bool,
    starts: usize,
}

impl ReplayBallTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of (re)starts so far
    pub fn starts(&self) -> usize {
        self.starts
    }
}

impl BallTracker<RecordedFrame> for ReplayBallTracker {
    fn start(&mut self, _frame: &RecordedFrame, _ball: Rect) -> anyhow::Result<()> {
        self.running = true;
        self.starts += 1;
        Ok(())
    }

    fn update(&mut self, frame: &RecordedFrame) -> anyhow::Result<Option<Rect>> {
        if !self.running {
            return Ok(None);
        }
        Ok(frame.ball_track)
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
