use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

mod game;
mod player;
mod settings;

use settings::Settings;

/// Plays match-two games headlessly with an automatic player.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    rows: Option<u8>,

    #[arg(long)]
    cols: Option<u8>,

    /// Seconds per simulated tick
    #[arg(long)]
    tick: Option<f32>,

    #[arg(long)]
    max_ticks: Option<u32>,

    /// Pick cards by coordinates instead of clicking through the table layout
    #[arg(long)]
    direct: bool,

    /// Number of games to play, each with the next seed
    #[arg(short, long, default_value_t = 1)]
    games: u32,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load_or_default(self.config.as_deref())?;
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.cols = cols;
        }
        if let Some(tick) = self.tick {
            settings.tick = tick;
        }
        if let Some(max_ticks) = self.max_ticks {
            settings.max_ticks = max_ticks;
        }
        if self.direct {
            settings.pointer = false;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_target(false)
        .init();

    let settings = args.settings()?;
    let first_seed = settings.seed.unwrap_or_else(rand::random);
    log::debug!("settings: {:?}", settings);

    for game in 0..u64::from(args.games) {
        let report = game::play(&settings, first_seed.wrapping_add(game))?;
        println!(
            "seed {}: {} in {:.1}s ({} ticks), {} matches, {} misses",
            report.seed,
            if report.cleared { "cleared" } else { "unfinished" },
            report.elapsed_secs,
            report.ticks,
            report.stats.matches(),
            report.stats.mismatches(),
        );
    }

    Ok(())
}
