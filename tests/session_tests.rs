// tests/session_tests.rs
use thimbles_core::{CupSet, PossessionEvent, PossessionState, Rect, Rejection, TrackingConfig};
use thimbles_cv::replay::replay;
use thimbles_cv::{Recording, SessionConfig, Verdict};

fn home() -> Vec<Rect> {
    vec![
        Rect::new(80, 80, 60, 60),
        Rect::new(200, 80, 60, 60),
        Rect::new(320, 80, 60, 60),
    ]
}

#[test]
fn test_possession_follows_ball_into_another_cup() {
    let config = TrackingConfig::default();
    let cups = CupSet::from_rects(&home());

    let (mut state, events) = PossessionState::initialize(Some(Rect::new(100, 100, 20, 20)), cups.clone(), &config);
    assert_eq!(state.get_target(), Some((0, Rect::new(80, 80, 60, 60))));
    assert_eq!(events, vec![PossessionEvent::EnteredCup { cup: 0 }]);

    state.update(None, cups.clone(), &config);
    assert!(state.is_ball_hidden());
    assert_eq!(state.target_index(), Some(0));

    let events = state.update(Some(Rect::new(310, 90, 20, 20)), cups, &config);
    assert_eq!(state.target_index(), Some(2));
    assert!(events.contains(&PossessionEvent::EnteredCup { cup: 2 }));
    // Operator messages number cups from 1.
    assert_eq!(PossessionEvent::EnteredCup { cup: 2 }.to_string(), "ball entered cup #3");
}

const SHUFFLED_GAME: &str = r#"{
    "setup": {
        "roi": { "x": 60, "y": 60, "width": 340, "height": 100 },
        "cup_candidates": [
            { "rect": { "x": 320, "y": 80, "width": 60, "height": 60 }, "area": 3600.0 },
            { "rect": { "x": 80, "y": 80, "width": 60, "height": 60 }, "area": 3600.0 },
            { "rect": { "x": 200, "y": 80, "width": 60, "height": 60 }, "area": 3600.0 },
            { "rect": { "x": 85, "y": 85, "width": 50, "height": 50 }, "area": 2500.0 }
        ]
    },
    "frames": [
        {
            "cups": [
                { "x": 80, "y": 80, "width": 60, "height": 60 },
                { "x": 200, "y": 80, "width": 60, "height": 60 },
                { "x": 320, "y": 80, "width": 60, "height": 60 }
            ],
            "blobs": [{ "rect": { "x": 210, "y": 150, "width": 20, "height": 20 }, "area": 400.0 }]
        },
        {
            "cups": [
                { "x": 80, "y": 80, "width": 60, "height": 60 },
                { "x": 200, "y": 80, "width": 60, "height": 60 },
                { "x": 320, "y": 80, "width": 60, "height": 60 }
            ]
        },
        {
            "cups": [
                { "x": 140, "y": 40, "width": 60, "height": 60 },
                { "x": 140, "y": 120, "width": 60, "height": 60 },
                { "x": 320, "y": 80, "width": 60, "height": 60 }
            ]
        },
        {
            "cups": [
                { "x": 200, "y": 80, "width": 60, "height": 60 },
                { "x": 80, "y": 80, "width": 60, "height": 60 },
                { "x": 320, "y": 80, "width": 60, "height": 60 }
            ],
            "blobs": [{ "rect": { "x": 339, "y": 99, "width": 12, "height": 12 }, "area": 144.0 }]
        },
        {
            "cups": [
                { "x": 200, "y": 80, "width": 60, "height": 60 },
                { "x": 80, "y": 80, "width": 60, "height": 60 },
                { "x": 320, "y": 80, "width": 60, "height": 60 }
            ],
            "blobs": [{ "rect": { "x": 90, "y": 150, "width": 20, "height": 20 }, "area": 400.0 }]
        },
        {
            "cups": [
                { "x": 200, "y": 80, "width": 60, "height": 60 },
                { "x": 80, "y": 80, "width": 60, "height": 60 },
                { "x": 320, "y": 80, "width": 60, "height": 60 }
            ],
            "blobs": [{ "rect": { "x": 90, "y": 150, "width": 20, "height": 20 }, "area": 400.0 }],
            "ball_track": { "x": 91, "y": 150, "width": 20, "height": 20 }
        }
    ]
}"#;

#[test]
fn test_replayed_shuffle_is_followed_and_resynchronized() -> anyhow::Result<()> {
    let recording: Recording = serde_json::from_str(SHUFFLED_GAME)?;
    let outcome = replay(&recording, &SessionConfig::default())?;

    // The nested candidate overlaps cup 0 and is dropped; cups come out left to right.
    assert_eq!(outcome.cups, home());
    assert_eq!(outcome.reports.len(), 6);

    let shown = &outcome.reports[0];
    assert_eq!(shown.target, Some(1));
    assert_eq!(shown.events, vec![PossessionEvent::EnteredCup { cup: 1 }]);

    let hidden = &outcome.reports[1];
    assert!(hidden.ball_hidden);
    assert_eq!(hidden.verdict, Verdict::Lost);
    assert!(matches!(hidden.events[..], [PossessionEvent::AssumedEntry { cup: 1, .. }]));

    // Cups 0 and 1 traded places; the target follows cup 1 to the left position.
    let swapped = &outcome.reports[3];
    assert_eq!(swapped.target, Some(1));
    assert_eq!(swapped.target_cup, Some(Rect::new(80, 80, 60, 60)));
    assert_eq!(swapped.rejection, Some(Rejection::InsideCupWhileHidden { cup: 2 }));
    assert!(!swapped.resynced());

    // The reveal brings the scene back home: slots are positions again.
    let revealed = &outcome.reports[4];
    assert!(revealed.resynced());
    assert_eq!(revealed.cups, CupSet::from_rects(&home()));
    assert_eq!(revealed.target, Some(0));
    assert_eq!(revealed.target_cup, Some(Rect::new(80, 80, 60, 60)));
    assert_eq!(
        revealed.events,
        vec![
            PossessionEvent::ReappearedOutsideTarget { cup: 1 },
            PossessionEvent::EnteredCup { cup: 0 },
        ]
    );

    let last = outcome.last().expect("frames were played");
    assert_eq!(last.cups, CupSet::from_rects(&home()));
    assert_eq!(last.verdict, Verdict::Tracked(Rect::new(91, 150, 20, 20)));
    assert_eq!(last.target, Some(0));
    assert!(last.events.is_empty());
    assert_eq!(outcome.resync_count(), 3);
    Ok(())
}

#[test]
fn test_release_policy_drops_target_when_ball_walks_away() -> anyhow::Result<()> {
    let config: SessionConfig = serde_json::from_str(r#"{ "tracking": { "exit_policy": "release" } }"#)?;
    let recording: Recording = serde_json::from_str(
        r#"{
            "setup": {
                "roi": { "x": 60, "y": 60, "width": 340, "height": 100 },
                "cup_candidates": [
                    { "rect": { "x": 80, "y": 80, "width": 60, "height": 60 }, "area": 3600.0 },
                    { "rect": { "x": 200, "y": 80, "width": 60, "height": 60 }, "area": 3600.0 },
                    { "rect": { "x": 320, "y": 80, "width": 60, "height": 60 }, "area": 3600.0 }
                ]
            },
            "frames": [
                {
                    "cups": [
                        { "x": 80, "y": 80, "width": 60, "height": 60 },
                        { "x": 200, "y": 80, "width": 60, "height": 60 },
                        { "x": 320, "y": 80, "width": 60, "height": 60 }
                    ],
                    "blobs": [{ "rect": { "x": 210, "y": 150, "width": 20, "height": 20 }, "area": 400.0 }]
                },
                {
                    "cups": [
                        { "x": 80, "y": 80, "width": 60, "height": 60 },
                        { "x": 200, "y": 80, "width": 60, "height": 60 },
                        { "x": 320, "y": 80, "width": 60, "height": 60 }
                    ],
                    "blobs": [{ "rect": { "x": 220, "y": 300, "width": 20, "height": 20 }, "area": 400.0 }]
                }
            ]
        }"#,
    )?;

    let outcome = replay(&recording, &config)?;
    assert_eq!(outcome.reports[0].target, Some(1));

    let walked = &outcome.reports[1];
    assert_eq!(walked.ball, Some(Rect::new(220, 300, 20, 20)));
    assert_eq!(walked.target, None);
    assert_eq!(walked.target_cup, None);
    assert_eq!(walked.events, vec![PossessionEvent::ExitedCup { cup: 1 }]);
    Ok(())
}

#[test]
fn test_missing_cups_fall_back_to_even_columns() -> anyhow::Result<()> {
    let recording: Recording = serde_json::from_str(
        r#"{ "setup": { "roi": { "x": 0, "y": 0, "width": 300, "height": 100 } } }"#,
    )?;
    let outcome = replay(&recording, &SessionConfig::default())?;
    assert_eq!(
        outcome.cups,
        vec![
            Rect::new(0, 0, 100, 100),
            Rect::new(100, 0, 100, 100),
            Rect::new(200, 0, 100, 100),
        ]
    );
    assert!(outcome.reports.is_empty());
    assert_eq!(outcome.last(), None);
    Ok(())
}
