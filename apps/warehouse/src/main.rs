//! warehouse — command-line driver for the warehouse simulator.
//!
//! Loads a world file, runs it to completion and prints one block per round:
//!
//! ```text
//! round 1
//! f0 GO [0,1]
//! t0 WAITING 0/500
//! ```
//!
//! followed by the outcome line.  `--output-dir` additionally writes the
//! CSV tables described in `wh-output`.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wh_core::{Round, SimConfig};
use wh_input::load_world;
use wh_output::{CsvWriter, SimOutputObserver, TextLogWriter};
use wh_sim::{RoundReport, SimBuilder, SimObserver, SimStatus, WorldView};
use wh_spatial::AStar;

// ── Arguments ─────────────────────────────────────────────────────────────────

/// Simulate forklifts moving parcels onto trucks.
#[derive(Parser, Debug)]
#[command(name = "warehouse", version)]
struct Args {
    /// World description file.
    input: PathBuf,

    /// Directory for the CSV tables; created if missing.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write an actor snapshot every N rounds.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    snapshot_interval: u64,

    /// Override the round budget from the world file.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_rounds: Option<u64>,

    /// Log the rendered board after every round (debug level).
    #[arg(long)]
    board: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── Observer ──────────────────────────────────────────────────────────────────

type Writers = (TextLogWriter<Stdout>, Option<CsvWriter>);

/// Forwards everything to the output observer and optionally dumps the board.
struct Reporter {
    output:     SimOutputObserver<Writers>,
    show_board: bool,
}

impl SimObserver for Reporter {
    fn on_sim_start(&mut self, world: &WorldView<'_>) {
        self.output.on_sim_start(world);
    }

    fn on_round_start(&mut self, round: Round) {
        self.output.on_round_start(round);
    }

    fn on_round_end(&mut self, report: &RoundReport, world: &WorldView<'_>) {
        self.output.on_round_end(report, world);
        if self.show_board {
            debug!(round = report.round.0, "board\n{}", world.board.render());
        }
    }

    fn on_snapshot(&mut self, round: Round, world: &WorldView<'_>) {
        self.output.on_snapshot(round, world);
    }

    fn on_sim_end(&mut self, final_round: Round, status: SimStatus) {
        self.output.on_sim_end(final_round, status);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let snapshot = load_world(&args.input)
        .with_context(|| format!("cannot load {}", args.input.display()))?;
    info!(
        path      = %args.input.display(),
        parcels   = snapshot.parcels.len(),
        forklifts = snapshot.forklifts.len(),
        trucks    = snapshot.trucks.len(),
        "world loaded"
    );

    let config = SimConfig {
        max_rounds:             args.max_rounds.unwrap_or(snapshot.max_rounds),
        output_interval_rounds: args.snapshot_interval,
    };
    let mut sim = SimBuilder::new(snapshot, AStar::new())
        .config(config)
        .build()
        .context("invalid world")?;

    let csv = match &args.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
            Some(CsvWriter::new(dir).context("cannot open CSV output")?)
        }
        None => None,
    };
    let mut reporter = Reporter {
        output:     SimOutputObserver::new((TextLogWriter::new(io::stdout()), csv)),
        show_board: args.board,
    };

    let status = sim.run(&mut reporter);
    if let Some(e) = reporter.output.take_error() {
        return Err(e).context("writing output");
    }
    info!(status = %status, rounds = sim.round().0, "done");
    Ok(())
}
