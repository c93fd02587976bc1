#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod commands;
pub mod config;
pub mod data;
pub mod domain;
pub mod errors;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate (for make_prediction_set.rs)
pub use analysis::{detect, predict_route, prediction_set};
pub use config::{FORECAST, ForecastConfig, ROUTE_SEGMENTS};
pub use domain::{CalendarDate, Query, Segment, TimeOfDay, Traversal, TraversalLog};
pub use models::{DetectionReport, Prediction, RoutePrediction};

// CLI argument parsing
use {
    clap::{Parser, Subcommand},
    std::path::PathBuf,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file overriding the compiled-in forecast settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file with an ordered segment list (replaces the default route)
    #[arg(long, global = true)]
    pub segments: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Detect segment traversals in a recorded point file
    Detect {
        /// Recorder output, one point per line
        #[arg(long)]
        points: PathBuf,

        /// Traversal log to write
        #[arg(long)]
        out: PathBuf,
    },

    /// Predict the route duration for one departure
    Predict {
        /// Traversal log produced by `detect`
        #[arg(long)]
        traversals: PathBuf,

        /// Departure date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<CalendarDate>,

        /// Departure time (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: TimeOfDay,
    },

    /// List the configured segments and any overlaps between them
    Segments,
}

/// Entry point for the `commute-forecast` binary.
pub fn run(args: Cli) -> anyhow::Result<()> {
    let config = commands::load_config(args.config.as_deref())?;
    let (segments, layout) = commands::resolve_segments(args.segments.as_deref())?;

    match args.command {
        Command::Detect { points, out } => commands::run_detect(&config, &segments, &points, &out),
        Command::Predict {
            traversals,
            date,
            time,
        } => commands::run_predict(&config, &segments, &traversals, date, time),
        Command::Segments => commands::run_segments(&segments, &layout),
    }
}
