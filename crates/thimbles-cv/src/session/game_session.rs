//! One shell game, driven frame by frame

use super::config::SessionConfig;
use super::report::{FrameReport, SessionStatus};
use crate::confidence::{ConfidenceMonitor, Verdict};
use crate::locate::ball::max_ball_area;
use crate::traits::{BallDetector, BallTracker, CupTracker};
use crate::{Result, SessionError};
use std::marker::PhantomData;
use thimbles_core::{
    CupSet, HomeLayout, PossessionEvent, PossessionState, Rect, filter_ball_candidate,
};

/// State that exists only once a cup layout is set up
#[derive(Debug, Clone)]
struct ActiveGame {
    home: HomeLayout,
    possession: PossessionState,
    max_ball_area: Option<f64>,
    frame_index: u64,
}

/// Frame loop of a game session.
///
/// Owns the collaborators and the single [`PossessionState`]. Each [`tick`](Self::tick)
/// runs, strictly in order: cup tracker update, raw ball detection, plausibility
/// filtering, resynchronization against the home layout (driven by the filtered
/// detection), detector/tracker arbitration, possession update.
pub struct GameSession<F, C, D, T> {
    config: SessionConfig,
    cup_tracker: C,
    detector: D,
    ball_tracker: T,
    monitor: ConfidenceMonitor,
    game: Option<ActiveGame>,
    _frame: PhantomData<fn(&F)>,
}

impl<F, C, D, T> GameSession<F, C, D, T>
where
    C: CupTracker<F>,
    D: BallDetector<F>,
    T: BallTracker<F>,
{
    pub fn new(config: SessionConfig, cup_tracker: C, detector: D, ball_tracker: T) -> Self {
        let monitor = ConfidenceMonitor::new(config.divergence_radius);
        Self {
            config,
            cup_tracker,
            detector,
            ball_tracker,
            monitor,
            game: None,
            _frame: PhantomData,
        }
    }

    /// Start a game from the initial cup layout (left to right).
    ///
    /// Records the home layout, seeds the cup tracker and starts possession with no ball.
    pub fn setup(&mut self, frame: &F, cups: &[Rect]) -> Result<Vec<PossessionEvent>> {
        let home = HomeLayout::from_rects(cups.to_vec()).ok_or(SessionError::NoCups)?;

        self.cup_tracker.initialize(frame, cups)?;
        self.ball_tracker.stop();
        self.monitor.reset();

        let cup_set = home.to_cup_set();
        let max_ball_area = max_ball_area(cup_set.mean_area(), &self.config.ball);
        let (possession, events) = PossessionState::initialize(None, cup_set, &self.config.tracking);

        log::info!("{} cups identified, waiting for the ball", home.len());
        self.game = Some(ActiveGame {
            home,
            possession,
            max_ball_area,
            frame_index: 0,
        });
        Ok(events)
    }

    /// Process one frame
    pub fn tick(&mut self, frame: &F) -> Result<FrameReport> {
        let game = self.game.as_mut().ok_or(SessionError::NotSetUp)?;
        let tracking = &self.config.tracking;

        let live = self.cup_tracker.update(frame)?;
        let raw_detection = self.detector.detect_ball(frame, game.max_ball_area)?;

        let filtered = filter_ball_candidate(
            raw_detection,
            &live,
            game.possession.is_ball_hidden(),
            tracking,
        );

        // A visible ball marks a round boundary, the only safe moment to re-seed cup identities.
        // Rejected candidates do not count: a glint or a button must not re-index swapped cups.
        let reconciled = game.home.reconcile(live, filtered.ball.is_some(), tracking);
        if reconciled.decision.is_at_home() {
            self.cup_tracker.initialize(frame, game.home.rects())?;
        }

        let tracked = if self.monitor.is_tracking() {
            self.ball_tracker.update(frame)?
        } else {
            None
        };
        let verdict = self.monitor.arbitrate(filtered.ball, tracked);
        match verdict {
            Verdict::Acquired(ball) | Verdict::Reseeded(ball) => self.ball_tracker.start(frame, ball)?,
            Verdict::Lost => self.ball_tracker.stop(),
            Verdict::Searching | Verdict::Tracked(_) => {}
        }

        let events = game
            .possession
            .update(verdict.ball(), reconciled.cups.clone(), tracking);
        let target_cup = game.possession.get_target().map(|(_, rect)| rect);

        let report = FrameReport {
            frame_index: game.frame_index,
            status: if self.monitor.is_tracking() {
                SessionStatus::InPlay
            } else {
                SessionStatus::AwaitingBall
            },
            target: game.possession.target_index(),
            target_cup,
            ball_hidden: game.possession.is_ball_hidden(),
            ball: verdict.ball(),
            cups: reconciled.cups,
            raw_detection,
            rejection: filtered.rejection,
            resync: reconciled.decision,
            verdict,
            events,
        };

        game.frame_index += 1;
        Ok(report)
    }

    /// Operator override of the cup holding the ball
    pub fn set_target_manually(&mut self, index: usize) -> Result<PossessionEvent> {
        let game = self.game.as_mut().ok_or(SessionError::NotSetUp)?;
        Ok(game.possession.set_target_manually(index))
    }

    /// Abandon the current layout; `setup` must run again before the next tick
    pub fn reset(&mut self) {
        log::info!("session reset, cup layout abandoned");
        self.game = None;
        self.monitor.reset();
        self.ball_tracker.stop();
    }

    pub fn is_set_up(&self) -> bool {
        self.game.is_some()
    }

    pub fn possession(&self) -> Option<&PossessionState> {
        self.game.as_ref().map(|game| &game.possession)
    }

    pub fn home(&self) -> Option<&HomeLayout> {
        self.game.as_ref().map(|game| &game.home)
    }

    /// Cups as possession last saw them
    pub fn cups(&self) -> Option<&CupSet> {
        self.possession().map(PossessionState::cups)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cup_tracker(&self) -> &C {
        &self.cup_tracker
    }

    pub fn ball_tracker(&self) -> &T {
        &self.ball_tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::BlobCandidate;
    use crate::replay::{RecordedFrame, ReplaySession, replay_session};
    use thimbles_core::{Rejection, ResyncDecision};

    fn home() -> Vec<Rect> {
        vec![
            Rect::new(80, 80, 60, 60),
            Rect::new(200, 80, 60, 60),
            Rect::new(320, 80, 60, 60),
        ]
    }

    fn at_home(ball: Option<Rect>) -> RecordedFrame {
        RecordedFrame {
            cups: home().into_iter().map(Some).collect(),
            blobs: ball.into_iter().map(BlobCandidate::solid).collect(),
            ball_track: None,
        }
    }

    fn started() -> Result<ReplaySession> {
        let mut session = replay_session(&SessionConfig::default());
        let events = session.setup(&RecordedFrame::default(), &home())?;
        assert_eq!(events, vec![PossessionEvent::BallMissingAtInit]);
        Ok(session)
    }

    #[test]
    fn test_tick_requires_setup() {
        let mut session = replay_session(&SessionConfig::default());
        assert!(matches!(
            session.tick(&RecordedFrame::default()),
            Err(SessionError::NotSetUp)
        ));
        assert!(matches!(
            session.setup(&RecordedFrame::default(), &[]),
            Err(SessionError::NoCups)
        ));
        assert!(matches!(session.set_target_manually(0), Err(SessionError::NotSetUp)));
    }

    #[test]
    fn test_ball_shown_hidden_and_revealed() -> Result<()> {
        let mut session = started()?;

        let report = session.tick(&at_home(Some(Rect::new(100, 100, 20, 20))))?;
        assert_eq!(report.verdict, Verdict::Acquired(Rect::new(100, 100, 20, 20)));
        assert_eq!(report.status, SessionStatus::InPlay);
        assert_eq!(report.target, Some(0));
        assert_eq!(report.events, vec![PossessionEvent::EnteredCup { cup: 0 }]);
        assert!(report.resynced());

        let report = session.tick(&at_home(None))?;
        assert_eq!(report.verdict, Verdict::Lost);
        assert_eq!(report.status, SessionStatus::AwaitingBall);
        assert!(report.ball_hidden);
        assert_eq!(report.target, Some(0));
        assert!(matches!(report.events[..], [PossessionEvent::AssumedEntry { cup: 0, .. }]));

        // Red glint on cup 2 while the ball is hidden.
        let report = session.tick(&at_home(Some(Rect::new(340, 100, 20, 20))))?;
        assert_eq!(report.rejection, Some(Rejection::InsideCupWhileHidden { cup: 2 }));
        assert_eq!(report.raw_detection, Some(Rect::new(340, 100, 20, 20)));
        assert_eq!(report.verdict, Verdict::Searching);
        assert!(!report.resynced());
        assert_eq!(report.target, Some(0));
        assert!(report.events.is_empty());

        // The ball rolls out just above cup 2.
        let report = session.tick(&at_home(Some(Rect::new(310, 50, 20, 20))))?;
        assert_eq!(report.target, Some(2));
        assert_eq!(report.target_cup, Some(Rect::new(320, 80, 60, 60)));
        assert_eq!(
            report.events,
            vec![
                PossessionEvent::ReappearedOutsideTarget { cup: 0 },
                PossessionEvent::EnteredCup { cup: 2 },
            ]
        );
        assert_eq!(report.frame_index, 3);
        Ok(())
    }

    #[test]
    fn test_candidate_outside_play_band_is_ignored() -> Result<()> {
        let mut session = started()?;
        let report = session.tick(&at_home(Some(Rect::new(200, 600, 20, 20))))?;
        assert!(matches!(report.rejection, Some(Rejection::OutsideBand { .. })));
        assert_eq!(report.ball, None);
        assert_eq!(report.status, SessionStatus::AwaitingBall);
        assert_eq!(report.resync, ResyncDecision::NoBall);
        Ok(())
    }

    #[test]
    fn test_swapped_cup_slots_are_resynchronized() -> Result<()> {
        let mut session = started()?;
        let home = home();

        // The recorded tracker mixed up cups 0 and 2, and the ball is visible.
        let swapped = RecordedFrame {
            cups: vec![Some(home[2]), Some(home[1]), Some(home[0])],
            blobs: vec![BlobCandidate::solid(Rect::new(220, 200, 20, 20))],
            ball_track: None,
        };
        let report = session.tick(&swapped)?;
        assert!(report.resynced());
        assert_eq!(report.cups, CupSet::from_rects(&home));
        assert_eq!(session.cup_tracker().reinit_count(), 2);

        // The re-seeded tracker now reports the recorded slots in home order.
        let next = RecordedFrame {
            blobs: Vec::new(),
            ..swapped
        };
        let report = session.tick(&next)?;
        assert!(!report.resynced());
        assert_eq!(report.cups, CupSet::from_rects(&home));
        Ok(())
    }

    #[test]
    fn test_drifting_ball_tracker_is_reseeded() -> Result<()> {
        let mut session = started()?;
        let ball = Rect::new(210, 100, 20, 20);
        session.tick(&at_home(Some(ball)))?;

        let drifted = RecordedFrame {
            ball_track: Some(Rect::new(330, 100, 20, 20)),
            ..at_home(Some(ball))
        };
        let report = session.tick(&drifted)?;
        assert_eq!(report.verdict, Verdict::Reseeded(ball));
        assert_eq!(report.target, Some(1));
        assert_eq!(session.ball_tracker().starts(), 2);

        let followed = RecordedFrame {
            ball_track: Some(Rect::new(215, 100, 20, 20)),
            ..at_home(None)
        };
        let report = session.tick(&followed)?;
        assert_eq!(report.verdict, Verdict::Tracked(Rect::new(215, 100, 20, 20)));
        assert!(!report.ball_hidden);
        Ok(())
    }

    #[test]
    fn test_manual_override_and_reset() -> Result<()> {
        let mut session = started()?;
        assert_eq!(
            session.set_target_manually(1)?,
            PossessionEvent::ManualOverride { cup: 1 }
        );
        assert_eq!(
            session.set_target_manually(5)?,
            PossessionEvent::ManualOverrideIgnored { requested: 5, cups: 3 }
        );
        assert_eq!(session.possession().and_then(|p| p.target_index()), Some(1));

        session.reset();
        assert!(!session.is_set_up());
        assert!(matches!(session.tick(&at_home(None)), Err(SessionError::NotSetUp)));
        Ok(())
    }
}
