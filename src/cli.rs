//! Command line interface.

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::scenes::SceneKind;

/// Log levels exposed on the command line.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Normal progress output.
    Info,
    /// Verbose diagnostics.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments.
#[derive(Parser)]
#[command(name = "lumapath")]
#[command(about = "A brute-force sphere path tracer")]
pub struct Args {
    /// Set the logging level
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "450", help = "Image height in pixels")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value = "50", help = "Maximum ray bounce depth")]
    pub max_depth: u32,

    /// Seed for the random sampler (omit for entropy seeding)
    #[arg(long, help = "Seed for the random sampler (omit for entropy seeding)")]
    pub seed: Option<u64>,

    /// Scene to render
    #[arg(long, value_enum, default_value = "cover", help = "Scene to render")]
    pub scene: SceneKind,

    /// Visualize surface normals instead of path tracing
    #[arg(long, help = "Visualize surface normals instead of path tracing")]
    pub normals: bool,

    /// Output file path (.ppm, .png, or .exr)
    #[arg(
        short,
        long,
        default_value = "output.ppm",
        help = "Output file path (.ppm, .png, or .exr)"
    )]
    pub output: String,

    /// Send image to TEV for visualization
    #[arg(long, help = "Send image to TEV for visualization")]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long, help = "TEV client IP address and port (automatically enables --tev)")]
    pub tev_address: Option<String>,
}
