//! Thimbles core
//!
//! Ball possession and cup identity bookkeeping for a three-cup shell game.
//! Everything here is synchronous, allocation-light and total: bad or missing
//! input degrades to a no-op or an event, never an error.

pub mod config;
pub mod geometry;
pub mod plausibility;
pub mod possession;
pub mod resync;

// Re-export commonly used types
pub use config::{ExitPolicy, TrackingConfig};
pub use geometry::{CupSet, Point, Rect};
pub use plausibility::{Filtered, Rejection, filter_ball_candidate};
pub use possession::{PossessionEvent, PossessionState};
pub use resync::{HomeLayout, Reconciled, ResyncDecision};
