use {
    crate::domain::{CalendarDate, TimeOfDay},
    chrono::NaiveDateTime,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

/// One complete, local-time position sample.
/// Incomplete records (no fix, no date/time) never become a `Point`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: GeoPosition,
    pub speed_kmh: f64,
    pub date: CalendarDate,
    pub time: TimeOfDay,
}

impl Point {
    pub fn new(lat: f64, lon: f64, speed_kmh: f64, date: CalendarDate, time: TimeOfDay) -> Self {
        Point {
            position: GeoPosition { lat, lon },
            speed_kmh,
            date,
            time,
        }
    }

    pub fn lat(&self) -> f64 {
        self.position.lat
    }

    pub fn lon(&self) -> f64 {
        self.position.lon
    }

    pub fn naive_date_time(&self) -> Option<NaiveDateTime> {
        self.date
            .to_naive()?
            .and_hms_opt(self.time.hours(), self.time.minutes(), self.time.seconds())
    }
}
