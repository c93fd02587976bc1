//! Configuration module for the commute forecaster.

mod debug;
mod forecast;
mod route;

// Public
pub mod constants;

// Re-export commonly used items
pub use debug::{DF, LogFlags};
pub use forecast::{
    DetectionSettings, DurationClock, FORECAST, ForecastConfig, IngestSettings, SimilaritySettings,
};
pub use route::{ROUTE_SEGMENTS, load_segments};
