#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a hex microbe simulation and exports frames.
//!
//! Frames are written as JSON lines to stdout or to `--output`; logs go to
//! stderr and honour `RUST_LOG`.

mod frame_export;

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    num::NonZeroU32,
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use hex_microbes_core::SimulationConfig;
use hex_microbes_system_bootstrap::Bootstrap;
use hex_microbes_system_movement::{MotionWeights, Movement};
use hex_microbes_system_scheduler::Scheduler;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::frame_export::FrameWriter;

/// Simulates ciliates and an amoeba crawling across a hexagonal board.
#[derive(Debug, Parser)]
#[command(name = "hex-microbes", version)]
struct CliArgs {
    /// TOML file holding simulation parameters.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of hexes along the board diagonal.
    #[arg(long)]
    hex_diag: Option<u32>,
    /// Pixel width of a rendered hex.
    #[arg(long)]
    hex_pixel_width: Option<u32>,
    /// Number of rings grown around the amoeba's centre cell.
    #[arg(long)]
    amoeba_radius: Option<u32>,
    /// Distance of each ciliate from its board corner.
    #[arg(long)]
    ciliate_offset: Option<u32>,
    /// Number of ticks to simulate.
    #[arg(long)]
    ticks: Option<u32>,
    /// Seed for the random number generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Upper bound on draws for a single amoeba move.
    #[arg(long)]
    amoeba_max_attempts: Option<u32>,
    /// File receiving the JSON-lines frames instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl CliArgs {
    /// Loads the configuration file, if any, and applies command-line overrides.
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                toml::from_str::<SimulationConfig>(&raw)
                    .with_context(|| format!("failed to parse TOML config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };

        if let Some(value) = self.hex_diag {
            config.hex_diag = value;
        }
        if let Some(value) = self.hex_pixel_width {
            config.hex_pixel_width = value;
        }
        if let Some(value) = self.amoeba_radius {
            config.amoeba_radius = value;
        }
        if let Some(value) = self.ciliate_offset {
            config.ciliate_offset = value;
        }
        if let Some(value) = self.ticks {
            config.ticks = value;
        }
        if let Some(value) = self.seed {
            config.seed = value;
        }
        if let Some(value) = self.amoeba_max_attempts {
            config.amoeba_max_attempts = value;
        }
        Ok(config)
    }

    fn open_output(&self) -> Result<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create output {}", path.display()))?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Entry point for the hex microbe command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let config = args.resolve_config()?;
    config.validate().context("invalid configuration")?;

    let mut world = Bootstrap
        .seed_world(&config)
        .context("failed to seed the board")?;
    let attempts = NonZeroU32::new(config.amoeba_max_attempts)
        .context("amoeba_max_attempts must be at least 1")?;
    let scheduler = Scheduler::new(Movement::new(MotionWeights::default(), attempts)?);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut writer = FrameWriter::new(BufWriter::new(args.open_output()?));
    let summary = scheduler
        .run(&mut world, config.ticks, &mut rng, |frame| writer.write(frame))
        .context("failed to write frames")?;
    let frames = writer.finish().context("failed to flush frames")?;

    info!(
        seed = config.seed,
        frames,
        amoeba_moves = summary.amoeba_moves,
        amoeba_stalls = summary.amoeba_stalls,
        ciliate_moves = summary.ciliate_moves,
        ciliate_holds = summary.ciliate_holds,
        "run complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults() {
        let args = CliArgs::parse_from(["hex-microbes", "--ticks", "3", "--seed", "9"]);
        let config = args.resolve_config().expect("defaults resolve");
        assert_eq!(config.ticks, 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.hex_diag, SimulationConfig::default().hex_diag);
    }

    #[test]
    fn overrides_win_over_the_config_file() {
        let path = std::env::temp_dir().join(format!(
            "hex-microbes-overrides-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "hex_diag = 40\nticks = 10\n").expect("write config");

        let args = CliArgs::parse_from([
            "hex-microbes",
            "--config",
            path.to_str().expect("utf8 path"),
            "--ticks",
            "2",
        ]);
        let config = args.resolve_config().expect("config resolves");
        fs::remove_file(&path).expect("remove config");

        assert_eq!(config.hex_diag, 40);
        assert_eq!(config.ticks, 2);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let path = std::env::temp_dir().join(format!(
            "hex-microbes-unknown-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "hex_diagonal = 40\n").expect("write config");

        let args = CliArgs::parse_from(["hex-microbes", "--config", path.to_str().expect("utf8")]);
        let outcome = args.resolve_config();
        fs::remove_file(&path).expect("remove config");

        assert!(outcome.is_err());
    }
}
