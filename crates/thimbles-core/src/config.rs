//! Tracking tunables

use serde::{Deserialize, Serialize};

/// What assignment does when a visible ball has moved past the exit margin
/// of its current target cup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// Keep the target; it only changes when the ball enters another cup
    #[default]
    Hold,
    /// Clear the target once the ball is beyond the exit margin
    Release,
}

/// Numeric tunables for possession, resynchronization and plausibility filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Rectangle growth (px) when deciding the ball entered a cup
    pub entry_margin: f64,
    /// Rectangle growth (px) when deciding the ball left its target cup
    pub exit_margin: f64,
    pub exit_policy: ExitPolicy,
    /// Prediction-on-loss accepts the nearest cup closer than this many cup widths
    pub loss_tolerance: f64,
    /// Max center distance (px) between a live cup and its home position
    pub match_radius: f64,
    /// Allowed distance (px) above the highest cup for a ball candidate center
    pub band_margin_top: f64,
    /// Allowed distance (px) below the lowest cup for a ball candidate center
    pub band_margin_bottom: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            entry_margin: 30.0,
            exit_margin: 100.0,
            exit_policy: ExitPolicy::Hold,
            loss_tolerance: 3.5,
            match_radius: 50.0,
            band_margin_top: 300.0,
            band_margin_bottom: 300.0,
        }
    }
}

impl TrackingConfig {
    /// Defaults, but a ball that leaves its cup drops the target
    pub fn releasing() -> Self {
        Self {
            exit_policy: ExitPolicy::Release,
            ..Default::default()
        }
    }

    /// Narrower margins for small, low-jitter game windows
    pub fn tight() -> Self {
        Self {
            entry_margin: 15.0,
            exit_margin: 60.0,
            loss_tolerance: 2.5,
            match_radius: 30.0,
            band_margin_top: 150.0,
            band_margin_bottom: 150.0,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_margin_exceeds_entry_margin() {
        for config in [
            TrackingConfig::default(),
            TrackingConfig::releasing(),
            TrackingConfig::tight(),
        ] {
            assert!(config.exit_margin > config.entry_margin);
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TrackingConfig =
            serde_json::from_str(r#"{"entry_margin": 12.0, "exit_policy": "release"}"#).unwrap();
        assert_eq!(config.entry_margin, 12.0);
        assert_eq!(config.exit_policy, ExitPolicy::Release);
        assert_eq!(config.match_radius, 50.0);
    }
}
