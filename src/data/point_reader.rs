//! Reads recorder output (`lat,lon,speed,year,month,day,HH:MM:SS`) into local-time points.
//!
//! The recorder writes a sentinel in place of any field group it could not fill
//! (`INVALID_LAT,INVALID_LNG` with no fix, `INVALID_DATE`, `INVALID_TIME`). Such records are
//! incomplete and are dropped here, as are malformed lines and the header line.

use {
    crate::{
        config::{DF, IngestSettings},
        domain::{CalendarDate, Point, TimeOfDay},
        errors::RecordError,
    },
    anyhow::{Context, Result},
    chrono::{Duration, NaiveTime, Timelike},
    std::{
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

const FIELD_COUNT: usize = 7;
const SENTINELS: [&str; 4] = ["INVALID_LAT", "INVALID_LNG", "INVALID_DATE", "INVALID_TIME"];

/// Points read from one source plus what was left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub points: Vec<Point>,
    pub skipped_incomplete: usize,
    pub skipped_malformed: usize,
    /// A complete point was left out because `point_capacity` was reached.
    pub truncated: bool,
}

/// Parses one record and shifts it from UTC to local time.
///
/// `Ok(None)` means the record is incomplete (carries a sentinel).
pub fn parse_point_record(line: &str, utc_offset_hours: i32) -> Result<Option<Point>, RecordError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();

    if fields.iter().any(|f| SENTINELS.contains(f)) {
        return Ok(None);
    }
    let [lat, lon, speed, year, month, day, time] = fields.as_slice() else {
        return Err(RecordError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    let lat = parse_coordinate("latitude", lat, 90.0)?;
    let lon = parse_coordinate("longitude", lon, 180.0)?;
    let speed: f64 = speed.parse().map_err(|_| RecordError::field("speed", speed))?;
    let year: i32 = year.parse().map_err(|_| RecordError::field("year", year))?;
    let month: u32 = month.parse().map_err(|_| RecordError::field("month", month))?;
    let day: u32 = day.parse().map_err(|_| RecordError::field("day", day))?;

    let utc_date = CalendarDate::try_new(year, month, day)?;
    let utc_time: TimeOfDay = time.parse()?;
    let (date, time) = shift_to_local(utc_date, utc_time, utc_offset_hours)?;

    Ok(Some(Point::new(lat, lon, speed, date, time)))
}

fn parse_coordinate(field: &'static str, raw: &str, limit: f64) -> Result<f64, RecordError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= limit => Ok(v),
        _ => Err(RecordError::field(field, raw)),
    }
}

/// Applies a whole-hour offset; the date rolls with the time across midnight.
fn shift_to_local(
    date: CalendarDate,
    time: TimeOfDay,
    utc_offset_hours: i32,
) -> Result<(CalendarDate, TimeOfDay), RecordError> {
    let invalid = || RecordError::InvalidDate {
        year: date.year,
        month: date.month,
        day: date.day,
    };

    let naive_time = NaiveTime::from_hms_opt(time.hours(), time.minutes(), time.seconds())
        .ok_or_else(|| RecordError::InvalidTime(time.to_string()))?;
    let utc = date.to_naive().ok_or_else(invalid)?.and_time(naive_time);
    let local = utc
        .checked_add_signed(Duration::hours(utc_offset_hours as i64))
        .ok_or_else(invalid)?;

    let local_time = TimeOfDay::new(local.time().num_seconds_from_midnight())
        .ok_or_else(|| RecordError::InvalidTime(local.time().to_string()))?;
    Ok((CalendarDate::from_naive(local.date()), local_time))
}

/// Reads records in order, keeping complete points up to `settings.point_capacity`.
/// The report is only marked truncated when a complete point had to be left out.
pub fn read_points<R: BufRead>(reader: R, settings: &IngestSettings) -> Result<IngestReport> {
    let mut report = IngestReport::default();

    // Byte-split so a corrupt (non UTF-8) line is skipped like any other malformed line
    for (line_no, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.context("Failed to read point data")?;
        let line = String::from_utf8_lossy(&raw);
        if line.trim().is_empty() {
            continue;
        }

        match parse_point_record(&line, settings.utc_offset_hours) {
            Ok(Some(_)) if report.points.len() >= settings.point_capacity => {
                log::warn!(
                    "Maximum point count ({}) reached at line {}; remaining data not read",
                    settings.point_capacity,
                    line_no + 1
                );
                report.truncated = true;
                break;
            }
            Ok(Some(point)) => report.points.push(point),
            Ok(None) => {
                report.skipped_incomplete += 1;
                if DF.log_ingest {
                    log::debug!("Skipping incomplete record at line {}: {}", line_no + 1, line.trim());
                }
            }
            Err(e) => {
                report.skipped_malformed += 1;
                if DF.log_ingest {
                    log::debug!("Skipping malformed line {} ({}): {}", line_no + 1, e, line.trim());
                }
            }
        }
    }

    log::info!(
        "Read {} points ({} incomplete, {} malformed skipped)",
        report.points.len(),
        report.skipped_incomplete,
        report.skipped_malformed
    );

    Ok(report)
}

pub fn load_points(path: &Path, settings: &IngestSettings) -> Result<IngestReport> {
    let file = File::open(path).with_context(|| format!("Failed to open point data {}", path.display()))?;
    read_points(BufReader::new(file), settings)
}
