//! Thimbles frame loop
//!
//! Wires the external collaborators (cup tracker, ball detector, ball tracker)
//! around the possession core, one tick per video frame.

pub mod confidence;
pub mod error;
pub mod locate;
pub mod replay;
pub mod session;

// Re-export commonly used types
pub use confidence::{ConfidenceMonitor, Verdict};
pub use error::SessionError;
pub use locate::{BlobCandidate, locate_cups, select_ball};
pub use replay::{Recording, RecordedFrame};
pub use session::{FrameReport, GameSession, SessionConfig, SessionStatus};

// Error handling
pub type Result<T> = std::result::Result<T, SessionError>;

/// Interfaces of the collaborators the session drives
pub mod traits {
    use thimbles_core::{CupSet, Rect};

    /// Multi-object tracker following the cups between frames
    pub trait CupTracker<F> {
        /// Drop any running trackers and seed one per rectangle, in slot order
        fn initialize(&mut self, frame: &F, cups: &[Rect]) -> anyhow::Result<()>;

        /// Current cup rectangles; a lost cup keeps its slot as `None`
        fn update(&mut self, frame: &F) -> anyhow::Result<CupSet>;
    }

    /// Stateless ball detector
    pub trait BallDetector<F> {
        /// Best ball candidate in the frame, ignoring blobs larger than `max_area`
        fn detect_ball(&self, frame: &F, max_area: Option<f64>) -> anyhow::Result<Option<Rect>>;
    }

    /// Single-object tracker following the ball between frames
    pub trait BallTracker<F> {
        /// Start (or restart) tracking from `ball`
        fn start(&mut self, frame: &F, ball: Rect) -> anyhow::Result<()>;

        /// Tracked ball rectangle, `None` when the tracker lost it
        fn update(&mut self, frame: &F) -> anyhow::Result<Option<Rect>>;

        fn stop(&mut self);
    }
}
