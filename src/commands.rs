//! Subcommand bodies for the `commute-forecast` binary.

use {
    crate::{
        analysis::{detect, predict_route, prediction_set},
        config::{DF, FORECAST, ForecastConfig, ROUTE_SEGMENTS, load_segments},
        data::{load_points, load_traversals, save_traversals},
        domain::{CalendarDate, Query, Segment, SegmentLayout, TimeOfDay, validate_segments},
        models::{Prediction, RoutePrediction},
        utils::format_duration,
    },
    anyhow::{Result, bail},
    chrono::Local,
    std::path::Path,
    tabled::{Table, Tabled, settings::Style},
};

pub fn load_config(path: Option<&Path>) -> Result<ForecastConfig> {
    match path {
        Some(path) => {
            let config = ForecastConfig::load(path)?;
            log::info!("Using forecast settings from {}", path.display());
            Ok(config)
        }
        None => Ok(FORECAST),
    }
}

/// Segment list from `path`, or the default route. The list is validated before use.
pub fn resolve_segments(path: Option<&Path>) -> Result<(Vec<Segment>, SegmentLayout)> {
    let segments = match path {
        Some(path) => load_segments(path)?,
        None => ROUTE_SEGMENTS.to_vec(),
    };
    let layout = validate_segments(&segments)?;
    Ok((segments, layout))
}

pub fn run_detect(config: &ForecastConfig, segments: &[Segment], points: &Path, out: &Path) -> Result<()> {
    let ingest = load_points(points, &config.ingest)?;
    if ingest.points.is_empty() {
        bail!("No usable points in {}", points.display());
    }

    let report = detect(&ingest.points, segments, &config.detection);
    save_traversals(out, report.recorded())?;

    println!(
        "Points: {} read, {} incomplete, {} malformed{}",
        ingest.points.len(),
        ingest.skipped_incomplete,
        ingest.skipped_malformed,
        if ingest.truncated { " (truncated at capacity)" } else { "" }
    );
    println!(
        "Traversals: {} recorded, {} out of bounds, {} without exit, {} dropped at capacity",
        report.traversals.len(),
        report.discarded_out_of_bounds,
        report.discarded_no_exit,
        report.dropped_at_capacity
    );
    if report.truncated() {
        log::warn!(
            "Traversal capacity ({}) reached; later passes were not recorded",
            config.detection.traversal_capacity
        );
    }
    Ok(())
}

pub fn run_predict(
    config: &ForecastConfig,
    segments: &[Segment],
    traversals: &Path,
    date: Option<CalendarDate>,
    time: TimeOfDay,
) -> Result<()> {
    let history = load_traversals(traversals, &config.detection)?;
    let date = date.unwrap_or_else(today);
    let query = Query::new(date, time);

    let route = predict_route(segments, history.as_slice(), &query, &config.similarity);

    if DF.log_prediction {
        for leg in &route.legs {
            log::info!(
                "Segment {} from {}: {} ({} samples)",
                leg.segment_id,
                leg.start_time,
                leg.prediction,
                leg.samples
            );
        }
    }

    println!("Departure: {}", query);
    println!("{}", route_table(&route));
    println!(
        "Route total: {} (mean {:.2}s, std dev {:.2}s)",
        format_duration(route.total.mean_secs),
        route.total.mean_secs,
        route.total.std_dev_secs
    );

    let uncovered = route.uncovered_segments();
    if !uncovered.is_empty() {
        log::warn!("No history for segments {:?}; they contribute nothing to the total", uncovered);
    }
    Ok(())
}

/// Route prediction for every minute of `date` (today when `None`) from a stored log.
pub fn build_prediction_set(
    config: &ForecastConfig,
    segments: &[Segment],
    traversals: &Path,
    date: Option<CalendarDate>,
) -> Result<(CalendarDate, Vec<(TimeOfDay, Prediction)>)> {
    let history = load_traversals(traversals, &config.detection)?;
    if history.is_empty() {
        log::warn!("⚠ No traversals in {}. Every prediction will be zero.", traversals.display());
    }

    let date = date.unwrap_or_else(today);
    let set = prediction_set(segments, history.as_slice(), date, &config.similarity);
    Ok((date, set))
}

pub fn run_segments(segments: &[Segment], layout: &SegmentLayout) -> Result<()> {
    let rows: Vec<SegmentRow> = segments.iter().map(SegmentRow::from).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));

    if layout.is_disjoint() {
        println!("No overlapping segments");
    } else {
        for (first, second) in &layout.overlaps {
            println!("Segments {} and {} overlap ({} has priority)", first, second, first);
        }
    }
    Ok(())
}

#[derive(Tabled)]
struct LegRow {
    #[tabled(rename = "Segment")]
    segment: u32,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Mean (s)")]
    mean: String,
    #[tabled(rename = "Std Dev (s)")]
    std_dev: String,
    #[tabled(rename = "Samples")]
    samples: usize,
}

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "Id")]
    id: u32,
    #[tabled(rename = "Min Lat")]
    min_lat: f64,
    #[tabled(rename = "Min Lon")]
    min_lon: f64,
    #[tabled(rename = "Max Lat")]
    max_lat: f64,
    #[tabled(rename = "Max Lon")]
    max_lon: f64,
}

impl From<&Segment> for SegmentRow {
    fn from(segment: &Segment) -> Self {
        SegmentRow {
            id: segment.id,
            min_lat: segment.bounds.min_lat,
            min_lon: segment.bounds.min_lon,
            max_lat: segment.bounds.max_lat,
            max_lon: segment.bounds.max_lon,
        }
    }
}

fn today() -> CalendarDate {
    CalendarDate::from_naive(Local::now().date_naive())
}

fn route_table(route: &RoutePrediction) -> String {
    let rows: Vec<LegRow> = route
        .legs
        .iter()
        .map(|leg| LegRow {
            segment: leg.segment_id,
            start: leg.start_time.to_string(),
            mean: format!("{:.2}", leg.prediction.mean_secs),
            std_dev: format!("{:.2}", leg.prediction.std_dev_secs),
            samples: leg.samples,
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_segments_resolve() {
        let (segments, layout) = resolve_segments(None).unwrap();
        assert_eq!(segments.len(), 12);
        assert!(!layout.is_disjoint());
    }

    #[test]
    fn test_segment_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segments.json");
        std::fs::write(
            &path,
            r#"[{"id":1,"min_lat":0.0,"min_lon":0.0,"max_lat":1.0,"max_lon":1.0},
                {"id":1,"min_lat":2.0,"min_lon":2.0,"max_lat":3.0,"max_lon":3.0}]"#,
        )
        .unwrap();
        assert!(resolve_segments(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("nope.json").as_path())).is_err());
        assert_eq!(load_config(None).unwrap(), FORECAST);
    }

    #[test]
    fn test_prediction_set_uses_custom_segments() {
        let dir = tempfile::tempdir().unwrap();
        let segments_path = dir.path().join("segments.json");
        let log_path = dir.path().join("traversals.csv");
        std::fs::write(
            &segments_path,
            r#"[{"id":41,"min_lat":0.0,"min_lon":0.0,"max_lat":1.0,"max_lon":1.0},
                {"id":42,"min_lat":0.0,"min_lon":2.0,"max_lat":1.0,"max_lon":3.0}]"#,
        )
        .unwrap();
        std::fs::write(
            &log_path,
            "41,120,2025-10-01,08:00:00\n42,300,2025-10-01,08:02:00\n",
        )
        .unwrap();

        let (segments, _) = resolve_segments(Some(segments_path.as_path())).unwrap();
        let date = CalendarDate::new(2025, 10, 2).unwrap();
        let (used_date, set) =
            build_prediction_set(&FORECAST, &segments, &log_path, Some(date)).unwrap();

        assert_eq!(used_date, date);
        assert_eq!(set.len(), 1440);
        // one sample per segment: every minute predicts exactly 120 + 300
        assert!(set.iter().all(|(_, p)| (p.mean_secs - 420.0).abs() < 1e-9));

        // the same log against the default route has nothing to match
        let (_, default_set) =
            build_prediction_set(&FORECAST, ROUTE_SEGMENTS, &log_path, Some(date)).unwrap();
        assert!(default_set.iter().all(|(_, p)| p.is_no_data()));
    }

    #[test]
    fn test_prediction_set_honours_detection_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("traversals.csv");
        std::fs::write(&log_path, "1,1500,2025-10-01,08:00:00\n").unwrap();

        let mut config = FORECAST;
        config.detection.max_duration_secs = 900;
        let date = CalendarDate::new(2025, 10, 2).unwrap();
        let (_, set) = build_prediction_set(&config, ROUTE_SEGMENTS, &log_path, Some(date)).unwrap();
        assert!(set.iter().all(|(_, p)| p.is_no_data()));
    }

    #[test]
    fn test_route_table_lists_every_leg() {
        let route = RoutePrediction {
            total: Prediction::new(300.0, 5.0),
            legs: vec![crate::models::SegmentPrediction {
                segment_id: 7,
                start_time: TimeOfDay::from_hms(8, 0, 0).unwrap(),
                prediction: Prediction::new(300.0, 5.0),
                samples: 4,
            }],
        };
        let table = route_table(&route);
        assert!(table.contains("Segment"));
        assert!(table.contains("08:00:00"));
        assert!(table.contains("300.00"));
    }
}
