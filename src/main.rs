//! geosim CLI: generate one world and dump diagnostic PNGs.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use thiserror::Error;

use geosim::render::{rasterize, recolor};
use geosim::{GenError, GeoEngine, LodLevel, SimulationConfig, VisualizationMode, WorldData};

#[derive(Parser)]
#[command(name = "geosim")]
#[command(author, version, about = "Deterministic planet terrain generator", long_about = None)]
struct Cli {
    /// World seed. Overrides the seed from --config.
    #[arg(short, long)]
    seed: Option<f64>,

    /// Grid width in cells.
    #[arg(long, default_value = "256")]
    cols: usize,

    /// Grid height in cells.
    #[arg(long, default_value = "128")]
    rows: usize,

    /// Level of detail, 0 (whole planet) ..= 5 (local).
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u8).range(0..=5))]
    lod: u8,

    /// JSON simulation config (`{"world":{..},"geo":{..},"climate":{..}}`).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Visualization mode to export; repeatable.
    #[arg(short, long = "mode")]
    modes: Vec<VisualizationMode>,

    /// Output directory.
    #[arg(short, long, default_value = "artifacts")]
    out: PathBuf,

    /// Write the effective config to <out>/config.json.
    #[arg(long)]
    dump_config: bool,

    /// Write the full world to <out>/world.json.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("io error on {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to write image {}: {source}", path.display())]
    Image { path: PathBuf, source: image::ImageError },
    #[error("json error on {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
    #[error(transparent)]
    Gen(#[from] GenError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.world.seed = seed;
    }
    let lod = LodLevel::from_index(cli.lod).unwrap_or_default();
    let modes = if cli.modes.is_empty() {
        vec![VisualizationMode::Biome, VisualizationMode::Elevation]
    } else {
        cli.modes.clone()
    };

    fs::create_dir_all(&cli.out).map_err(|source| CliError::Io { path: cli.out.clone(), source })?;

    if cli.dump_config {
        write_json(&cli.out.join("config.json"), &config)?;
    }

    eprintln!(
        "Generating {}x{} world with seed={}, plates={}, lod={} ({})",
        cli.cols,
        cli.rows,
        config.world.seed,
        config.geo.plate_count,
        lod.index(),
        lod.config().name
    );

    let engine = GeoEngine::new(config)?;
    let (world, timings) = engine.generate_world_timed(cli.cols, cli.rows, lod)?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    for mode in modes {
        let view = WorldData { cells: recolor(&world.cells, mode), ..world.clone() };
        let path = cli.out.join(format!("{}.png", mode.as_str().to_lowercase()));
        save_png(&path, &view)?;
    }

    if cli.json {
        write_json(&cli.out.join("world.json"), &world)?;
    }

    let stats = world.stats();
    eprintln!("\nStats:");
    eprintln!("  land fraction     {:.3}", stats.land_fraction);
    eprintln!("  lake cells        {}", stats.lake_cells);
    eprintln!("  mean temperature  {:.1} °C", stats.mean_temperature);
    if let Some((x, y)) = stats.max_flow_cell {
        eprintln!("  max flow cell     ({x}, {y})");
    }
    for (biome, count) in &stats.biome_counts {
        eprintln!("  {:26} {count}", biome.name());
    }

    eprintln!("\nDone.");
    Ok(())
}

fn load_config(path: &Path) -> Result<SimulationConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json { path: path.to_path_buf(), source })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|source| CliError::Json { path: path.to_path_buf(), source })?;
    fs::write(path, text).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    info!("saved {}", path.display());
    Ok(())
}

fn save_png(path: &Path, world: &WorldData) -> Result<(), CliError> {
    let rgba = rasterize(world);
    image::save_buffer(path, &rgba, world.cols as u32, world.rows as u32, image::ColorType::Rgba8)
        .map_err(|source| CliError::Image { path: path.to_path_buf(), source })?;
    info!("saved {}", path.display());
    Ok(())
}
