//! Session configuration

use crate::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thimbles_core::TrackingConfig;

/// Everything a game session can be tuned with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub tracking: TrackingConfig,
    pub cup_layout: CupLayoutConfig,
    pub ball: BallSelectionConfig,
    /// Reseed the ball tracker when it is farther than this (px) from the detection
    pub divergence_radius: f64,
}

/// Initial cup layout location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CupLayoutConfig {
    pub expected_cups: usize,
    /// Candidates must cover more than this fraction of the region of interest
    pub min_area_fraction: f64,
}

/// Ball blob selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSelectionConfig {
    pub min_area: f64,
    /// Ball blobs may be at most this multiple of the mean cup area
    pub max_area_factor: f64,
    /// Accepted width / height range, inclusive
    pub aspect_range: (f64, f64),
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            cup_layout: CupLayoutConfig::default(),
            ball: BallSelectionConfig::default(),
            divergence_radius: 50.0,
        }
    }
}

impl Default for CupLayoutConfig {
    fn default() -> Self {
        Self {
            expected_cups: 3,
            min_area_fraction: 0.02,
        }
    }
}

impl Default for BallSelectionConfig {
    fn default() -> Self {
        Self {
            min_area: 50.0,
            max_area_factor: 1.2,
            aspect_range: (0.6, 1.6),
        }
    }
}

impl SessionConfig {
    /// Configuration for small, steady game windows
    pub fn for_small_window() -> Self {
        Self {
            tracking: TrackingConfig::tight(),
            ball: BallSelectionConfig {
                min_area: 20.0,
                ..Default::default()
            },
            divergence_radius: 30.0,
            ..Default::default()
        }
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SessionError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
