//! Which cup holds the ball
//!
//! `PossessionState` is the only mutable entity of a game session. It moves between
//! two states driven purely by the per-frame input:
//!
//! - visible: a ball rectangle arrived this frame, and the cup whose entry-margin
//!   rectangle contains the ball center becomes the target;
//! - hidden: no ball rectangle this frame. On the visible to hidden edge the last
//!   known ball position is matched against the nearest cup to guess where it went.
//!
//! Losing sight of the ball never clears the target. Only a confirmed entry into a
//! different cup (or an operator override) changes it.

use super::events::PossessionEvent;
use crate::config::{ExitPolicy, TrackingConfig};
use crate::geometry::{CupSet, Rect};
use serde::{Deserialize, Serialize};

/// Possession of the ball for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionState {
    current_ball: Option<Rect>,
    last_known_ball: Option<Rect>,
    target: Option<usize>,
    ball_hidden: bool,
    cups: CupSet,
}

impl PossessionState {
    /// Start a session from the first observation.
    ///
    /// With a ball present the target is seeded by assignment; without one the
    /// target stays empty and `BallMissingAtInit` is emitted.
    pub fn initialize(
        ball: Option<Rect>,
        cups: CupSet,
        config: &TrackingConfig,
    ) -> (Self, Vec<PossessionEvent>) {
        let mut state = Self {
            current_ball: ball,
            last_known_ball: ball,
            target: None,
            ball_hidden: false,
            cups,
        };

        let mut events = Vec::new();
        if state.current_ball.is_some() {
            state.assign_ball_to_cup(config, &mut events);
        } else {
            emit(&mut events, PossessionEvent::BallMissingAtInit);
        }

        (state, events)
    }

    /// Advance one frame.
    pub fn update(
        &mut self,
        ball: Option<Rect>,
        cups: CupSet,
        config: &TrackingConfig,
    ) -> Vec<PossessionEvent> {
        self.cups = cups;
        let mut events = Vec::new();

        match ball {
            Some(ball) => {
                if self.ball_hidden {
                    self.check_reappearance(&ball, &mut events);
                }

                self.ball_hidden = false;
                self.current_ball = Some(ball);
                self.last_known_ball = Some(ball);
                self.assign_ball_to_cup(config, &mut events);
            }
            None => {
                // Only the visible -> hidden edge predicts; staying hidden is a no-op.
                if !self.ball_hidden {
                    self.predict_entry_on_loss(config, &mut events);
                }

                self.ball_hidden = true;
                self.current_ball = None;
            }
        }

        events
    }

    /// Current target slot and its rectangle.
    ///
    /// `None` when there is no target or its slot is out of range or lost this frame.
    pub fn get_target(&self) -> Option<(usize, Rect)> {
        let target = self.target?;
        self.cups.get(target).map(|rect| (target, rect))
    }

    /// Operator override of the target cup. Out-of-range indices leave the state unchanged.
    pub fn set_target_manually(&mut self, index: usize) -> PossessionEvent {
        let event = if index < self.cups.len() {
            self.target = Some(index);
            PossessionEvent::ManualOverride { cup: index }
        } else {
            PossessionEvent::ManualOverrideIgnored {
                requested: index,
                cups: self.cups.len(),
            }
        };
        event.log();
        event
    }

    /// Target slot regardless of whether its cup is present this frame
    pub fn target_index(&self) -> Option<usize> {
        self.target
    }

    pub fn is_ball_hidden(&self) -> bool {
        self.ball_hidden
    }

    pub fn current_ball(&self) -> Option<Rect> {
        self.current_ball
    }

    pub fn last_known_ball(&self) -> Option<Rect> {
        self.last_known_ball
    }

    pub fn cups(&self) -> &CupSet {
        &self.cups
    }

    fn assign_ball_to_cup(&mut self, config: &TrackingConfig, events: &mut Vec<PossessionEvent>) {
        let Some(ball) = self.current_ball else {
            return;
        };
        let center = ball.center();

        // First match wins, so overlapping margins resolve left to right.
        let entered = self
            .cups
            .present()
            .find(|(_, cup)| cup.contains_with_margin(&center, config.entry_margin));

        if let Some((index, _)) = entered {
            if self.target != Some(index) {
                emit(events, PossessionEvent::EnteredCup { cup: index });
            }
            self.target = Some(index);
            return;
        }

        let Some((target, cup)) = self.get_target() else {
            return;
        };
        if cup.contains_with_margin(&center, config.exit_margin) {
            return;
        }

        match config.exit_policy {
            ExitPolicy::Hold => {
                log::trace!("ball outside exit margin of cup #{}, holding target", target + 1);
            }
            ExitPolicy::Release => {
                self.target = None;
                emit(events, PossessionEvent::ExitedCup { cup: target });
            }
        }
    }

    fn predict_entry_on_loss(&mut self, config: &TrackingConfig, events: &mut Vec<PossessionEvent>) {
        let Some(last) = self.last_known_ball else {
            return;
        };
        let center = last.center();

        let nearest = self
            .cups
            .present()
            .map(|(index, cup)| (index, cup, cup.center().distance(&center)))
            .min_by(|a, b| a.2.total_cmp(&b.2));

        let Some((index, cup, distance)) = nearest else {
            return;
        };

        let cup_width = cup.width as f64;
        if distance < cup_width * config.loss_tolerance {
            self.target = Some(index);
            emit(events, PossessionEvent::AssumedEntry { cup: index, distance });
        } else {
            emit(events, PossessionEvent::NoTargetTooFar { distance, cup_width });
        }
    }

    fn check_reappearance(&self, ball: &Rect, events: &mut Vec<PossessionEvent>) {
        if let Some((target, cup)) = self.get_target() {
            if !cup.contains_with_margin(&ball.center(), 0.0) {
                emit(events, PossessionEvent::ReappearedOutsideTarget { cup: target });
            }
        }
    }
}

fn emit(events: &mut Vec<PossessionEvent>, event: PossessionEvent) {
    event.log();
    events.push(event);
}
