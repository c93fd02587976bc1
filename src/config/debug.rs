//! Debugging feature flags.

pub struct LogFlags {
    /// Log every recorded traversal and every discarded pass.
    pub log_detection: bool,

    /// Log every skipped input line (sentinel or malformed).
    pub log_ingest: bool,

    /// Log each segment leg of a route prediction.
    pub log_prediction: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_detection: true,
    log_ingest: false,
    log_prediction: false,
    log_performance: false,
};
