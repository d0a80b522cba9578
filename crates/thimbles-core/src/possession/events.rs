//! Typed signals emitted by the possession state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Something the possession state machine noticed during one call.
///
/// Cup indices are zero-based slots; `Display` renders them one-based for operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PossessionEvent {
    /// The visible ball's center landed within the entry margin of a new cup
    EnteredCup { cup: usize },
    /// The ball vanished near this cup, which is now assumed to hold it
    AssumedEntry { cup: usize, distance: f64 },
    /// The ball vanished too far from every cup to guess where it went
    NoTargetTooFar { distance: f64, cup_width: f64 },
    /// Session started without a visible ball; the operator may need to pick the cup
    BallMissingAtInit,
    /// A visible ball moved past the exit margin and the target was released
    ExitedCup { cup: usize },
    /// The ball reappeared outside the cup believed to hold it
    ReappearedOutsideTarget { cup: usize },
    /// The operator picked the cup holding the ball
    ManualOverride { cup: usize },
    /// The operator picked a cup slot that does not exist
    ManualOverrideIgnored { requested: usize, cups: usize },
}

impl PossessionEvent {
    /// Log this event at the level operators expect for it
    pub fn log(&self) {
        match self {
            Self::BallMissingAtInit => log::warn!("{self}"),
            Self::NoTargetTooFar { .. } => log::debug!("{self}"),
            _ => log::info!("{self}"),
        }
    }
}

impl fmt::Display for PossessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnteredCup { cup } => write!(f, "ball entered cup #{}", cup + 1),
            Self::AssumedEntry { cup, distance } => write!(
                f,
                "ball lost near cup #{} ({distance:.1}px), assuming entry",
                cup + 1
            ),
            Self::NoTargetTooFar {
                distance,
                cup_width,
            } => write!(
                f,
                "ball lost far from the cups (dist={distance:.1}, cup width={cup_width}), no target"
            ),
            Self::BallMissingAtInit => write!(
                f,
                "ball not detected at init; select the cup holding it if needed"
            ),
            Self::ExitedCup { cup } => write!(f, "ball left cup #{}", cup + 1),
            Self::ReappearedOutsideTarget { cup } => write!(
                f,
                "ball reappeared outside target cup #{}, re-evaluating",
                cup + 1
            ),
            Self::ManualOverride { cup } => write!(f, "target set manually: cup #{}", cup + 1),
            Self::ManualOverrideIgnored { requested, cups } => write!(
                f,
                "manual target #{} ignored, only {cups} cups tracked",
                requested + 1
            ),
        }
    }
}
