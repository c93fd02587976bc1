//! Numeric defaults (Immutable Blueprints). `FORECAST` is assembled from these.

pub mod ingest {
    /// Device clock is UTC; the route is driven in Pacific time (UTC-7 during PDT).
    pub const UTC_OFFSET_HOURS: i32 = -7;
    /// About 28 hours of driving at one record per second.
    pub const POINT_CAPACITY: usize = 100_000;
}

pub mod detection {
    pub const MIN_DURATION_SECS: i64 = 10;
    pub const MAX_DURATION_SECS: i64 = 1_800;
    pub const TRAVERSAL_CAPACITY: usize = 1_000;
}

pub mod similarity {
    /// Gaussian width for the time-of-day kernel (30 minutes).
    pub const TIME_OF_DAY_WIDTH_SECS: f64 = 1_800.0;
    pub const DATE_HALF_LIFE_DAYS: f64 = 30.0;
    pub const MIN_DATE_FACTOR: f64 = 1e-6;

    pub const SAME_DAY_FACTOR: f64 = 2.0;
    pub const ADJACENT_DAY_FACTOR: f64 = 1.2;
    pub const SAME_DAY_CLASS_FACTOR: f64 = 1.2;
}

pub mod prediction_set {
    /// One route prediction per minute of the day.
    pub const MINUTE_STEP_SECS: u32 = 60;
}
