//! Turning raw detector blobs into cups and a ball

pub mod ball;
pub mod cups;

pub use ball::select_ball;
pub use cups::locate_cups;

use serde::{Deserialize, Serialize};
use thimbles_core::Rect;

/// A raw blob from a shape or color detector: its bounding box and filled area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlobCandidate {
    pub rect: Rect,
    pub area: f64,
}

impl BlobCandidate {
    pub fn new(rect: Rect, area: f64) -> Self {
        Self { rect, area }
    }

    /// A blob filling its whole bounding box
    pub fn solid(rect: Rect) -> Self {
        Self::new(rect, rect.area())
    }
}
