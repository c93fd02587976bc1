mod maths_utils;
mod perf;
pub mod time_utils;

pub use time_utils::{
    TimeUtils, circular_day_distance, format_duration, format_hm, format_hms, wrap_day_secs,
};

pub use maths_utils::weighted_mean_and_stddev;
