//! Synthetic shell games for exercising the tracker without a video feed

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thimbles_core::Rect;
use thimbles_cv::locate::BlobCandidate;
use thimbles_cv::replay::{RecordedFrame, RecordedSetup, Recording};

const CUP_WIDTH: i32 = 80;
const CUP_HEIGHT: i32 = 90;
const CUP_Y: i32 = 300;
const CUP_XS: [i32; 3] = [200, 400, 600];
const BALL_SIZE: i32 = 20;
const SHOW_FRAMES: usize = 12;
const HIDE_FRAMES: usize = 6;
const REVEAL_FRAMES: usize = 12;
const SWAP_LIFT: f64 = 40.0;
/// How far the revealed cup is raised; stays inside the resync match radius
const REVEAL_LIFT: i32 = 45;

/// Knobs of a synthetic game
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub seed: u64,
    pub swaps: usize,
    pub frames_per_swap: usize,
    /// Max per-frame jitter (px) on every tracker and detector rectangle
    pub noise: i32,
    /// Chance per hidden frame of a red glint on a cup surface
    pub glint_rate: f64,
    /// Chance per frame of a red UI button far below the table
    pub button_rate: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            swaps: 5,
            frames_per_swap: 15,
            noise: 2,
            glint_rate: 0.05,
            button_rate: 0.05,
        }
    }
}

/// A generated game and its ground truth
#[derive(Debug, Clone)]
pub struct Simulation {
    pub recording: Recording,
    /// Cup (tracker slot) the ball was placed under
    pub ball_cup: usize,
    /// Position (0 = left) the ball's cup ended at
    pub final_position: usize,
    /// Index of the last frame before the reveal
    pub last_hidden_frame: usize,
}

/// Generate a game: show the ball, hide it, shuffle, reveal
pub fn simulate(params: &SimulationParams) -> Simulation {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let home: Vec<Rect> = CUP_XS
        .iter()
        .map(|&x| Rect::new(x, CUP_Y, CUP_WIDTH, CUP_HEIGHT))
        .collect();

    let ball_cup = rng.gen_range(0..home.len());
    // positions[p] = cup currently standing at position p
    let mut positions: Vec<usize> = (0..home.len()).collect();
    let mut frames = Vec::new();

    for _ in 0..SHOW_FRAMES {
        let cups = layout_at_rest(&positions, &home);
        let ball = ball_under(cups[ball_cup]);
        frames.push(frame(&mut rng, params, &cups, Some(ball), false));
    }
    for _ in 0..HIDE_FRAMES {
        let cups = layout_at_rest(&positions, &home);
        frames.push(frame(&mut rng, params, &cups, None, true));
    }

    for _ in 0..params.swaps {
        let a = rng.gen_range(0..home.len());
        let b = (a + rng.gen_range(1..home.len())) % home.len();
        let (cup_a, cup_b) = (positions[a], positions[b]);

        for step in 1..=params.frames_per_swap {
            let t = step as f64 / params.frames_per_swap as f64;
            let lift = (t * std::f64::consts::PI).sin() * SWAP_LIFT;
            let mut cups = layout_at_rest(&positions, &home);
            cups[cup_a] = lerp(home[a], home[b], t, -lift);
            cups[cup_b] = lerp(home[b], home[a], t, lift);
            frames.push(frame(&mut rng, params, &cups, None, true));
        }
        positions.swap(a, b);
    }

    let last_hidden_frame = frames.len() - 1;
    let final_position = positions
        .iter()
        .position(|&cup| cup == ball_cup)
        .unwrap_or(ball_cup);

    for _ in 0..REVEAL_FRAMES {
        let mut cups = layout_at_rest(&positions, &home);
        let ball = ball_under(cups[ball_cup]);
        cups[ball_cup] = cups[ball_cup].offset(0, -REVEAL_LIFT);
        frames.push(frame(&mut rng, params, &cups, Some(ball), false));
    }

    let roi = Rect::new(
        CUP_XS[0] - 30,
        CUP_Y - 30,
        CUP_XS[2] + CUP_WIDTH + 30 - (CUP_XS[0] - 30),
        CUP_HEIGHT + 60,
    );
    let setup = RecordedSetup {
        roi,
        cup_candidates: home.iter().copied().map(BlobCandidate::solid).collect(),
    };

    Simulation {
        recording: Recording { setup, frames },
        ball_cup,
        final_position,
        last_hidden_frame,
    }
}

/// Cup rectangles indexed by cup, each standing at its current position
fn layout_at_rest(positions: &[usize], home: &[Rect]) -> Vec<Rect> {
    let mut cups = home.to_vec();
    for (position, &cup) in positions.iter().enumerate() {
        cups[cup] = home[position];
    }
    cups
}

fn lerp(from: Rect, to: Rect, t: f64, lift: f64) -> Rect {
    let x = from.x as f64 + (to.x - from.x) as f64 * t;
    let y = from.y as f64 + (to.y - from.y) as f64 * t + lift;
    Rect::new(x.round() as i32, y.round() as i32, from.width, from.height)
}

fn ball_under(cup: Rect) -> Rect {
    let center = cup.center();
    Rect::new(
        center.x as i32 - BALL_SIZE / 2,
        cup.bottom() - BALL_SIZE - 5,
        BALL_SIZE,
        BALL_SIZE,
    )
}

fn jitter(rng: &mut StdRng, rect: Rect, noise: i32) -> Rect {
    if noise <= 0 {
        return rect;
    }
    rect.offset(rng.gen_range(-noise..=noise), rng.gen_range(-noise..=noise))
}

fn frame(
    rng: &mut StdRng,
    params: &SimulationParams,
    cups: &[Rect],
    ball: Option<Rect>,
    hidden: bool,
) -> RecordedFrame {
    let mut blobs = Vec::new();
    let mut ball_track = None;

    if let Some(ball) = ball {
        let seen = jitter(rng, ball, params.noise);
        blobs.push(BlobCandidate::new(seen, seen.area() * 0.78));
        ball_track = Some(jitter(rng, ball, params.noise));
    }
    if hidden && rng.gen_bool(params.glint_rate) {
        let cup = cups[rng.gen_range(0..cups.len())];
        let center = cup.center();
        let glint = Rect::new(center.x as i32 - 6, center.y as i32 - 6, 12, 12);
        blobs.push(BlobCandidate::new(glint, 110.0));
    }
    if rng.gen_bool(params.button_rate) {
        blobs.push(BlobCandidate::new(Rect::new(380, 900, 40, 40), 1500.0));
    }

    RecordedFrame {
        cups: cups.iter().map(|&cup| Some(jitter(rng, cup, params.noise))).collect(),
        blobs,
        ball_track,
    }
}
