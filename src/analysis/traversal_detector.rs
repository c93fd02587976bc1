//! Finds passes through route segments in an ordered point sequence.
//!
//! Single forward pass with a cursor:
//! 1. Test the point under the cursor against segments in configured order; the first hit wins.
//! 2. It is an *entry* if it is the first point, or the previous point was outside that segment.
//! 3. From the entry, walk forward while points stay inside to find the exit index.
//! 4. Duration runs from the entry point to the last point inside (exit - 1).
//! 5. Passes with no exit, or with a duration outside the configured bounds, are discarded.
//!    Either way the cursor jumps past the scanned span so a pass is never counted twice.

use crate::{
    config::{DF, DetectionSettings, DurationClock},
    domain::{Point, RecordOutcome, Segment, Traversal, first_containing},
    models::DetectionReport,
};

/// Result of following one entry to its exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Left the segment after an acceptable duration.
    Valid { exit_idx: usize, duration_secs: u32 },
    /// Left the segment, but the duration is outside the accepted bounds.
    OutOfBounds { exit_idx: usize, duration_secs: i64 },
    /// The sequence ended while still inside. No exit was observed.
    NoExit { end_idx: usize },
}

impl ScanOutcome {
    /// Where the cursor continues after this pass.
    pub fn resume_at(&self) -> usize {
        match *self {
            Self::Valid { exit_idx, .. } | Self::OutOfBounds { exit_idx, .. } => exit_idx,
            Self::NoExit { end_idx } => end_idx,
        }
    }
}

/// Scans `points` against `segments` and returns every valid traversal, in order.
///
/// Deterministic: the same inputs always give the same report.
pub fn detect(
    points: &[Point],
    segments: &[Segment],
    settings: &DetectionSettings,
) -> DetectionReport {
    let mut report = DetectionReport::new(settings.traversal_capacity);
    let mut cursor = 0;

    while cursor < points.len() {
        let entry_idx = cursor;
        let Some((segment, outcome)) = entry_at(points, entry_idx, segments, settings) else {
            cursor += 1;
            continue;
        };
        cursor = outcome.resume_at();

        match outcome {
            ScanOutcome::Valid { duration_secs, .. } => {
                record(&mut report, segment, &points[entry_idx], duration_secs);
            }
            ScanOutcome::OutOfBounds { duration_secs, .. } => {
                report.discarded_out_of_bounds += 1;
                if DF.log_detection {
                    log::debug!(
                        "Discarded pass through segment {} ({}s outside [{}, {}])",
                        segment.id,
                        duration_secs,
                        settings.min_duration_secs,
                        settings.max_duration_secs
                    );
                }
            }
            ScanOutcome::NoExit { .. } => {
                report.discarded_no_exit += 1;
                if DF.log_detection {
                    log::debug!("Points end inside segment {}; pass discarded", segment.id);
                }
            }
        }
    }

    log::info!(
        "Detection complete: {} traversals recorded from {} points ({} out of bounds, {} without exit, {} dropped at capacity)",
        report.traversals.len(),
        points.len(),
        report.discarded_out_of_bounds,
        report.discarded_no_exit,
        report.dropped_at_capacity
    );

    report
}

/// If the point at `cursor` enters a segment, follows it to its exit.
/// Returns `None` when no segment holds the point or the point continues an earlier pass.
fn entry_at<'s>(
    points: &[Point],
    cursor: usize,
    segments: &'s [Segment],
    settings: &DetectionSettings,
) -> Option<(&'s Segment, ScanOutcome)> {
    let point = &points[cursor];
    let segment = &segments[first_containing(segments, &point.position)?];

    let is_entry = cursor == 0 || !segment.contains(&points[cursor - 1].position);
    if !is_entry {
        return None;
    }

    Some((segment, scan_pass(points, cursor, segment, settings)))
}

/// Walks forward from `entry_idx` while points stay inside `segment`.
pub fn scan_pass(
    points: &[Point],
    entry_idx: usize,
    segment: &Segment,
    settings: &DetectionSettings,
) -> ScanOutcome {
    let exit_idx = points[entry_idx..]
        .iter()
        .position(|p| !segment.contains(&p.position))
        .map(|offset| entry_idx + offset);

    let Some(exit_idx) = exit_idx else {
        return ScanOutcome::NoExit {
            end_idx: points.len(),
        };
    };

    // Entry point is inside, so exit_idx > entry_idx.
    let last_inside = &points[exit_idx.max(entry_idx + 1) - 1];
    let duration_secs = measure_duration(&points[entry_idx], last_inside, settings.duration_clock);

    if settings.accepts_duration(duration_secs) {
        ScanOutcome::Valid {
            exit_idx,
            duration_secs: duration_secs as u32,
        }
    } else {
        ScanOutcome::OutOfBounds {
            exit_idx,
            duration_secs,
        }
    }
}

/// Signed seconds from `first` to `last` on the chosen clock.
pub fn measure_duration(first: &Point, last: &Point, clock: DurationClock) -> i64 {
    let time_of_day_delta = last.time.secs() as i64 - first.time.secs() as i64;
    match clock {
        DurationClock::TimeOfDay => time_of_day_delta,
        DurationClock::DateTime => match (first.naive_date_time(), last.naive_date_time()) {
            (Some(start), Some(end)) => (end - start).num_seconds(),
            _ => time_of_day_delta,
        },
    }
}

fn record(report: &mut DetectionReport, segment: &Segment, entry: &Point, duration_secs: u32) {
    let traversal = Traversal {
        segment_id: segment.id,
        duration_secs,
        date: entry.date,
        start_time: entry.time,
    };

    match report.traversals.try_record(traversal) {
        RecordOutcome::Recorded => {
            if DF.log_detection {
                log::info!(
                    "Traversal {}: segment {} on {} at {} took {}s",
                    report.traversals.len(),
                    segment.id,
                    traversal.date,
                    traversal.start_time,
                    duration_secs
                );
            }
        }
        RecordOutcome::AtCapacity => {
            if report.dropped_at_capacity == 0 {
                log::warn!(
                    "Traversal log full ({} entries); further traversals in this pass are not recorded",
                    report.traversals.capacity()
                );
            }
            report.dropped_at_capacity += 1;
        }
    }
}
