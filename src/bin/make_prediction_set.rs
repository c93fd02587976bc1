use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use commute_forecast::commands::{build_prediction_set, load_config, resolve_segments};
use commute_forecast::data::save_prediction_set;
use commute_forecast::domain::CalendarDate;

/// Writes a route prediction for every minute of one day.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Traversal log produced by `commute-forecast detect`
    #[arg(long)]
    traversals: PathBuf,

    /// Output file, one line per minute
    #[arg(long)]
    out: PathBuf,

    /// Day to predict (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<CalendarDate>,

    /// JSON file overriding the compiled-in forecast settings (use the one given to `detect`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON segment list (use the one given to `detect`)
    #[arg(long)]
    segments: Option<PathBuf>,
}

fn main() -> Result<()> {
    // 1. Setup Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // 2. Resolve the same route and settings detection ran with
    let config = load_config(args.config.as_deref())?;
    let (segments, _) = resolve_segments(args.segments.as_deref())?;
    log::info!("🚀 Building prediction set over {} segments", segments.len());

    // 3. Predict every minute
    let (date, set) = build_prediction_set(&config, &segments, &args.traversals, args.date)?;
    log::info!("Predicted {} ({})", date, date.day_of_week());

    // 4. Write
    save_prediction_set(&args.out, &set)?;
    log::info!("✅ Done: {}", args.out.display());

    Ok(())
}
