//! curve-editor entrypoint: a thin demonstration CLI over the segmentation,
//! tracking, and frame-cache crates. The GUI this core was extracted from
//! is an external collaborator (spec §1) — this binary exists only to give
//! the library crates a runnable front door, the way `ox-bin` is the thin
//! binary wrapping the `oxidized` editor's `core-*` crates.

mod points_file;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use curve_segments::SegmentedCurve;
use curve_tracking::{update_for_direction, TrackingDirection};
use frame_cache::{Cache, LoaderRegistry};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "curve-editor", version, about = "2D tracking-curve core CLI")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Optional configuration file path (overrides discovery of
    /// `curve-editor.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the queried position at a frame (spec §4.2 `position_at`).
    Position {
        #[arg(long)]
        points: PathBuf,
        #[arg(long)]
        frame: i32,
    },
    /// Lists the built segments and whether each is active.
    Segments {
        #[arg(long)]
        points: PathBuf,
    },
    /// Applies a tracking-direction update and prints the resulting
    /// `frame,x,y,status` rows.
    Direction {
        #[arg(long)]
        points: PathBuf,
        #[arg(long, value_enum)]
        direction: DirectionArg,
        #[arg(long, value_enum)]
        previous: Option<DirectionArg>,
    },
    /// Warms the frame cache around `center` and reports per-frame
    /// retrieval latency before and after warm-up (spec §1's <5ms-after-
    /// warm-up target).
    CacheWarm {
        #[arg(long)]
        images_dir: PathBuf,
        #[arg(long)]
        center: usize,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum DirectionArg {
    Forward,
    Backward,
    Bidirectional,
}

impl From<DirectionArg> for TrackingDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Forward => TrackingDirection::Forward,
            DirectionArg::Backward => TrackingDirection::Backward,
            DirectionArg::Bidirectional => TrackingDirection::Bidirectional,
        }
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_path = Path::new("curve-editor.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }
    let file_appender = tracing_appender::rolling::never(".", "curve-editor.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    let args = Args::parse();
    let config = curve_config::load_from(args.config.clone())?;
    info!(target: "runtime", command = ?args.command, "startup");

    match args.command {
        Command::Position { points, frame } => cmd_position(&points, frame),
        Command::Segments { points } => cmd_segments(&points),
        Command::Direction { points, direction, previous } => {
            cmd_direction(&points, direction.into(), previous.map(Into::into))
        }
        Command::CacheWarm { images_dir, center } => cmd_cache_warm(&images_dir, center, &config),
    }
}

fn cmd_position(points_path: &Path, frame: i32) -> Result<()> {
    let points = points_file::load(points_path)?;
    let curve = SegmentedCurve::build(&points);
    match curve.position_at(frame) {
        Some((x, y)) => println!("{frame}: ({x}, {y})"),
        None => println!("{frame}: no position"),
    }
    Ok(())
}

fn cmd_segments(points_path: &Path) -> Result<()> {
    let points = points_file::load(points_path)?;
    let curve = SegmentedCurve::build(&points);
    for segment in curve.segments() {
        println!(
            "[{}..{}] active={} points={}",
            segment.start_frame,
            segment.end_frame,
            segment.active,
            segment.point_count()
        );
    }
    Ok(())
}

fn cmd_direction(
    points_path: &Path,
    direction: TrackingDirection,
    previous: Option<TrackingDirection>,
) -> Result<()> {
    let points = points_file::load(points_path)?;
    let updated = update_for_direction(&points, direction, previous);
    for p in &updated {
        println!("{},{},{},{}", p.frame, p.x, p.y, p.status.to_legacy_string());
    }
    Ok(())
}

fn cmd_cache_warm(images_dir: &Path, center: usize, config: &curve_config::Config) -> Result<()> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(images_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let loader = Arc::new(LoaderRegistry::new());
    let cache = Cache::new(config.file.cache.max_cache_size, loader)?;
    cache.set_image_sequence(files);

    let cold = Instant::now();
    cache.get_image(center);
    let cold_elapsed = cold.elapsed();

    cache.preload_around(center as i64, config.file.cache.preload_window as i64);
    cache.stop_preload();

    let warm = Instant::now();
    cache.get_image(center);
    let warm_elapsed = warm.elapsed();

    println!("cold miss: {cold_elapsed:?}");
    println!("warm hit:  {warm_elapsed:?}");
    Ok(())
}
