//! Forecast configuration: ingestion, detection and similarity parameters.

use {
    crate::config::constants::{detection, ingest, similarity},
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
    strum_macros::Display,
};

/// Which clock the detector uses to measure how long a pass took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DurationClock {
    /// Subtract the time-of-day fields only. A pass spanning local midnight comes out
    /// negative and is rejected by the duration bounds.
    #[default]
    #[strum(to_string = "time-of-day")]
    TimeOfDay,
    /// Subtract full date+time instants. Passes spanning midnight are measured correctly.
    #[strum(to_string = "date-time")]
    DateTime,
}

/// Settings applied while turning raw records into points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Whole-hour shift from the recorder's UTC clock to local time (e.g. -7 for PDT).
    pub utc_offset_hours: i32,
    /// Points beyond this many are dropped and the read is flagged as truncated.
    pub point_capacity: usize,
}

/// Settings for the traversal detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Passes shorter than this are treated as a spurious momentary containment.
    pub min_duration_secs: i64,
    /// Passes longer than this are treated as sensor noise (parked, lost fix, ...).
    pub max_duration_secs: i64,
    /// Maximum traversals recorded in one detection pass.
    pub traversal_capacity: usize,
    pub duration_clock: DurationClock,
}

/// Weights that decide how much a historical traversal says about a query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilaritySettings {
    /// Gaussian width of the time-of-day kernel.
    pub time_of_day_width_secs: f64,
    /// Calendar distance at which the recency factor halves.
    pub date_half_life_days: f64,
    /// Floor for the recency factor so old samples never vanish completely.
    pub min_date_factor: f64,

    pub same_day_factor: f64,
    pub adjacent_day_factor: f64,
    /// Extra boost when both days are weekdays, or both are weekend days.
    pub same_day_class_factor: f64,
}

/// The Master Forecast Configuration
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub ingest: IngestSettings,
    pub detection: DetectionSettings,
    pub similarity: SimilaritySettings,
}

pub const FORECAST: ForecastConfig = ForecastConfig {
    ingest: IngestSettings {
        utc_offset_hours: ingest::UTC_OFFSET_HOURS,
        point_capacity: ingest::POINT_CAPACITY,
    },
    detection: DetectionSettings {
        min_duration_secs: detection::MIN_DURATION_SECS,
        max_duration_secs: detection::MAX_DURATION_SECS,
        traversal_capacity: detection::TRAVERSAL_CAPACITY,
        duration_clock: DurationClock::TimeOfDay,
    },
    similarity: SimilaritySettings {
        time_of_day_width_secs: similarity::TIME_OF_DAY_WIDTH_SECS,
        date_half_life_days: similarity::DATE_HALF_LIFE_DAYS,
        min_date_factor: similarity::MIN_DATE_FACTOR,
        same_day_factor: similarity::SAME_DAY_FACTOR,
        adjacent_day_factor: similarity::ADJACENT_DAY_FACTOR,
        same_day_class_factor: similarity::SAME_DAY_CLASS_FACTOR,
    },
};

impl Default for IngestSettings {
    fn default() -> Self {
        FORECAST.ingest
    }
}

impl Default for DetectionSettings {
    fn default() -> Self {
        FORECAST.detection
    }
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        FORECAST.similarity
    }
}

impl DetectionSettings {
    pub fn accepts_duration(&self, duration_secs: i64) -> bool {
        (self.min_duration_secs..=self.max_duration_secs).contains(&duration_secs)
    }
}

impl ForecastConfig {
    /// Reads a JSON override file. Any field left out keeps its compiled-in default.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read forecast config from {}", path.display()))?;
        let config: ForecastConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse forecast config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "detection": { "max_duration_secs": 900, "duration_clock": "date_time" } }"#;
        let config: ForecastConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.detection.max_duration_secs, 900);
        assert_eq!(config.detection.min_duration_secs, 10);
        assert_eq!(config.detection.duration_clock, DurationClock::DateTime);
        assert_eq!(config.ingest.utc_offset_hours, -7);
        assert_eq!(config.similarity.date_half_life_days, 30.0);
    }

    #[test]
    fn test_duration_bounds_are_inclusive() {
        let settings = DetectionSettings::default();
        assert!(settings.accepts_duration(10));
        assert!(settings.accepts_duration(1_800));
        assert!(!settings.accepts_duration(9));
        assert!(!settings.accepts_duration(1_801));
        assert!(!settings.accepts_duration(-600));
    }
}
