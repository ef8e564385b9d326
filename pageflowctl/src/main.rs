use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pageflow_core::deck::{GestureMotion, PageDeck};
use pageflow_core::PagingConfig;
use pageflow_model::{MediaRef, Page};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod script;
mod simulate;

#[derive(Parser)]
#[command(
    name = "pageflowctl",
    about = "Inspect snap decisions and replay carousel gestures"
)]
struct Cli {
    /// Paging config (TOML); defaults apply to omitted keys
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Viewport width; page width is derived from it
    #[arg(long, global = true, default_value_t = 384.0)]
    viewport: f32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute where a released gesture settles
    Snap {
        /// Number of pages in the deck
        #[arg(long)]
        pages: usize,
        /// Focused page when the drag started
        #[arg(long, default_value_t = 0)]
        focus: usize,
        /// Content offset at release
        #[arg(long, allow_hyphen_values = true)]
        offset: f32,
        /// Release velocity in units/s
        #[arg(long, allow_hyphen_values = true, conflicts_with = "elapsed_ms")]
        velocity: Option<f32>,
        /// Drag duration, used when no velocity is given
        #[arg(long)]
        elapsed_ms: Option<u64>,
    },
    /// Replay a gesture script against a deck and print the event transcript
    Simulate {
        /// Deck file: {"pages": [...]}
        #[arg(long)]
        deck: PathBuf,
        /// Script file: {"steps": [...]}
        #[arg(long)]
        script: PathBuf,
        /// Frame interval for drags and animations
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,
    },
}

#[derive(Serialize)]
struct SnapReport {
    focus: usize,
    index: usize,
    offset: f32,
    page_width: f32,
    delta: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PagingConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PagingConfig::default(),
    };

    match cli.command {
        Command::Snap {
            pages,
            focus,
            offset,
            velocity,
            elapsed_ms,
        } => {
            let motion = match (velocity, elapsed_ms) {
                (Some(v), _) => GestureMotion::Velocity(v),
                (None, Some(ms)) => GestureMotion::Elapsed(Duration::from_millis(ms)),
                (None, None) => GestureMotion::AT_REST,
            };
            let mut deck = PageDeck::from_config(cli.viewport, &config);
            deck.load(
                (0..pages)
                    .map(|i| Page::new(format!("page {i}"), MediaRef::default()))
                    .collect(),
            );
            let target = deck.compute_snap_target(offset, motion, focus)?;
            let report = SnapReport {
                focus,
                index: target.index,
                offset: target.offset,
                page_width: deck.geometry().page_width,
                delta: offset - deck.canonical_offset(focus),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Simulate {
            deck,
            script,
            frame_ms,
        } => {
            let pages = script::load_deck(&deck)?;
            let steps = script::load_script(&script)?;
            let mut sim = simulate::Simulation::new(
                pages,
                cli.viewport,
                config,
                Duration::from_millis(frame_ms),
            )?;

            println!("{}", serde_json::to_string(&sim.initial_report())?);
            for report in sim.run(&steps)? {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
    }
    Ok(())
}
