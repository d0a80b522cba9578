//! Recorded collaborator output, stored as JSON

use crate::locate::BlobCandidate;
use crate::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thimbles_core::Rect;

/// What the capture side saw while the operator set up the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSetup {
    /// Region the operator dragged over the cups
    pub roi: Rect,
    /// Cup-shaped blobs found inside that region
    #[serde(default)]
    pub cup_candidates: Vec<BlobCandidate>,
}

/// Collaborator output for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedFrame {
    /// Cup tracker output in the tracker's slot order
    pub cups: Vec<Option<Rect>>,
    /// Ball-colored blobs found by the detector
    pub blobs: Vec<BlobCandidate>,
    /// Ball tracker output, if it was following the ball
    pub ball_track: Option<Rect>,
}

/// A whole recorded session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub setup: RecordedSetup,
    #[serde(default)]
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let recording: Recording = serde_json::from_str(&text).map_err(|source| SessionError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded {} frames from {}", recording.frames.len(), path.display());
        Ok(recording)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SessionError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
