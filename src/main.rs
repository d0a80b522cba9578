use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use std::path::{Path, PathBuf};
use thimbles_cv::replay::{ReplayOutcome, replay};
use thimbles_cv::{Recording, SessionConfig};

mod simulate;

#[derive(Parser)]
#[command(name = "thimbles")]
#[command(about = "Follow the ball through a three-cup shell game")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded session and print the target cup per frame
    Replay {
        /// Recording (JSON) to play back
        recording: PathBuf,

        /// Session configuration (JSON); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write every frame report to this file (JSON)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Only print the final verdict
        #[arg(long)]
        quiet: bool,
    },

    /// Generate a synthetic game, play it and check the result against the ground truth
    Simulate {
        /// Random seed; a fresh one is drawn when omitted
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = "5")]
        swaps: usize,

        /// Max jitter (px) applied to tracker and detector output
        #[arg(long, default_value = "2")]
        noise: i32,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the generated recording (JSON) for later replays
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    match cli.command {
        Commands::Replay {
            recording,
            config,
            out,
            quiet,
        } => run_replay(&recording, config.as_deref(), out.as_deref(), quiet),
        Commands::Simulate {
            seed,
            swaps,
            noise,
            config,
            save,
        } => run_simulate(seed, swaps, noise, config.as_deref(), save.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load(path).context("loading session configuration"),
        None => Ok(SessionConfig::default()),
    }
}

fn run_replay(recording: &Path, config: Option<&Path>, out: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let recording = Recording::load(recording).context("loading recording")?;
    let outcome = replay(&recording, &config)?;

    if !quiet {
        for report in &outcome.reports {
            println!("{}", report.summary());
            for event in &report.events {
                println!("        {event}");
            }
        }
    }
    print_verdict(&outcome);

    if let Some(out) = out {
        let json = serde_json::to_string_pretty(&outcome.reports)?;
        std::fs::write(out, json).with_context(|| format!("writing reports to {}", out.display()))?;
        log::info!("{} frame reports written to {}", outcome.reports.len(), out.display());
    }
    Ok(())
}

fn run_simulate(
    seed: Option<u64>,
    swaps: usize,
    noise: i32,
    config: Option<&Path>,
    save: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let params = simulate::SimulationParams {
        seed: seed.unwrap_or_else(rand::random),
        swaps,
        noise,
        ..Default::default()
    };
    let sim = simulate::simulate(&params);
    log::info!(
        "seed {}: ball under cup #{}, {} swaps, {} frames",
        params.seed,
        sim.ball_cup + 1,
        params.swaps,
        sim.recording.frames.len()
    );

    if let Some(path) = save {
        sim.recording.save(path).context("saving recording")?;
        log::info!("recording saved to {}", path.display());
    }

    let outcome = replay(&sim.recording, &config)?;
    print_verdict(&outcome);

    let followed = outcome
        .reports
        .get(sim.last_hidden_frame)
        .is_some_and(|report| report.target == Some(sim.ball_cup));
    let revealed = outcome
        .last()
        .is_some_and(|report| report.target == Some(sim.final_position));

    println!(
        "shuffle followed: {} | reveal at position #{}: {}",
        if followed { "yes" } else { "no" },
        sim.final_position + 1,
        if revealed { "yes" } else { "no" }
    );
    Ok(())
}

fn print_verdict(outcome: &ReplayOutcome) {
    println!(
        "{} cups, {} frames, {} resyncs",
        outcome.cups.len(),
        outcome.reports.len(),
        outcome.resync_count()
    );
    match outcome.last().and_then(|report| report.target) {
        Some(cup) => println!("ball is under cup #{}", cup + 1),
        None => println!("ball position unknown"),
    }
}
