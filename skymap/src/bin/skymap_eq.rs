//! Full-sky star map in equirectangular projection
//!
//! Reads the bright star, constellation name, boundary and line datasets and
//! writes an SVG map of the sky between declinations -60° and +60°.
//!
//! Usage:
//!   skymap_eq --data-dir data/ --output skymap_eq.svg
//!
//! Set `RUST_LOG=info` to see dataset sizes and a summary of what was drawn,
//! `RUST_LOG=debug` to list stars dropped for being too faint.

use std::path::PathBuf;

use anyhow::Context;
use catalog::{DatasetPaths, SkyDatasets};
use clap::Parser;
use log::info;
use skymap::{MapStyle, SkyMapConfig, SkyMapRenderer};

#[derive(Parser, Debug)]
#[command(
    name = "skymap_eq",
    about = "Renders an equirectangular star map with constellation boundaries and lines",
    long_about = None
)]
struct Args {
    /// Directory holding the four dataset CSV files under their standard names
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Bright star dataset (overrides the file in --data-dir)
    #[arg(long)]
    stars: Option<PathBuf>,

    /// Constellation names dataset (overrides the file in --data-dir)
    #[arg(long)]
    constellations: Option<PathBuf>,

    /// Constellation boundary dataset (overrides the file in --data-dir)
    #[arg(long)]
    boundaries: Option<PathBuf>,

    /// Constellation lines dataset (overrides the file in --data-dir)
    #[arg(long)]
    lines: Option<PathBuf>,

    /// Output SVG path
    #[arg(short, long, default_value = "skymap_eq.svg")]
    output: PathBuf,

    /// Pixels per degree
    #[arg(long, default_value_t = SkyMapConfig::default().scale)]
    scale: f64,

    /// Border around the map in pixels
    #[arg(long, default_value_t = SkyMapConfig::default().margin)]
    margin: f64,

    /// Gamma correction applied to star marker sizes
    #[arg(long, default_value_t = SkyMapConfig::default().gamma)]
    gamma: f64,

    /// Marker radius of a 0m star in pixels
    #[arg(long, default_value_t = SkyMapConfig::default().max_radius)]
    max_radius: f64,

    /// JSON file overriding map colours, stroke widths and font sizes
    #[arg(long)]
    style: Option<PathBuf>,
}

impl Args {
    fn dataset_paths(&self) -> DatasetPaths {
        let defaults = DatasetPaths::in_dir(&self.data_dir);
        DatasetPaths {
            stars: self.stars.clone().unwrap_or(defaults.stars),
            constellations: self
                .constellations
                .clone()
                .unwrap_or(defaults.constellations),
            boundaries: self.boundaries.clone().unwrap_or(defaults.boundaries),
            asterisms: self.lines.clone().unwrap_or(defaults.asterisms),
        }
    }

    fn config(&self) -> SkyMapConfig {
        SkyMapConfig {
            scale: self.scale,
            margin: self.margin,
            gamma: self.gamma,
            max_radius: self.max_radius,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.config();
    config.validate()?;

    let style = match &args.style {
        Some(path) => MapStyle::load(path)?,
        None => MapStyle::default(),
    };

    let paths = args.dataset_paths();
    let datasets = SkyDatasets::load(&paths).context("Failed to load datasets")?;

    let renderer = SkyMapRenderer::new(&config, style);
    let map = renderer.render(&datasets);
    let summary = &map.summary;

    info!(
        "Drew {} boundary segments ({} split at 0h), {} asterism lines ({} split, {} skipped)",
        summary.boundaries,
        summary.wrapped_boundaries,
        summary.asterisms,
        summary.wrapped_asterisms,
        summary.skipped_asterisms
    );
    info!(
        "Drew {} stars ({} outside ±60°, {} too faint), {} labels ({} missing)",
        summary.stars,
        summary.stars_outside_band,
        summary.stars_too_faint,
        summary.labels,
        summary.missing_labels
    );

    map.document
        .write_to(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Wrote {}x{} map to {}",
        map.document.width(),
        map.document.height(),
        args.output.display()
    );

    Ok(())
}
