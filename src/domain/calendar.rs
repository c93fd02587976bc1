//! Calendar arithmetic on plain (year, month, day) dates.
//!
//! Day-of-week uses Zeller's congruence and day distance uses a proleptic Gregorian
//! day count, so neither depends on a time zone database.

use {
    crate::{errors::RecordError, utils::TimeUtils},
    chrono::{Datelike, NaiveDate},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
    strum_macros::{Display, EnumIter, FromRepr},
};

const MONTH_LENGTHS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    /// Sunday = 0 ... Saturday = 6
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    pub fn is_weekday(self) -> bool {
        !self.is_weekend()
    }

    /// Index distance within the Sunday-first week (Saturday and Sunday are 6 apart).
    pub fn distance(self, other: DayOfWeek) -> u8 {
        self.index().abs_diff(other.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl CalendarDate {
    /// Returns `None` for dates that do not exist (month 13, Feb 30, ...).
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|_| Self { year, month, day })
    }

    pub fn try_new(year: i32, month: u32, day: u32) -> Result<Self, RecordError> {
        Self::new(year, month, day).ok_or(RecordError::InvalidDate { year, month, day })
    }

    /// Zeller's congruence, remapped so Sunday = 0.
    pub fn day_of_week(&self) -> DayOfWeek {
        let (month, year) = if self.month <= 2 {
            (self.month as i64 + 12, self.year as i64 - 1)
        } else {
            (self.month as i64, self.year as i64)
        };
        let k = year.rem_euclid(100);
        let j = year.div_euclid(100);
        // h: 0 = Saturday, 1 = Sunday, ...
        let h = (self.day as i64 + (13 * (month + 1)) / 5 + k + k / 4 + j / 4 + 5 * j).rem_euclid(7);
        let sunday_first = (h + 6) % 7;
        DayOfWeek::from_repr(sunday_first as u8).unwrap_or(DayOfWeek::Sunday)
    }

    /// Days elapsed since a fixed proleptic epoch. Only differences are meaningful.
    pub fn day_number(&self) -> i64 {
        let prior_years = self.year as i64 - 1;
        let mut days = prior_years * 365 + prior_years.div_euclid(4) - prior_years.div_euclid(100)
            + prior_years.div_euclid(400);

        for (idx, len) in MONTH_LENGTHS.iter().enumerate().take((self.month as usize).saturating_sub(1)) {
            days += len;
            if idx == 1 && is_leap_year(self.year) {
                days += 1;
            }
        }

        days + self.day as i64
    }

    /// Absolute number of calendar days between two dates (order does not matter).
    pub fn days_between(&self, other: &CalendarDate) -> i64 {
        (self.day_number() - other.day_number()).abs()
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parses `YYYY-MM-DD`.
impl FromStr for CalendarDate {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.splitn(3, '-');
        let mut next = |field| {
            parts
                .next()
                .and_then(|p| p.trim().parse::<i64>().ok())
                .ok_or_else(|| RecordError::field(field, s))
        };
        let year = next("year")?;
        let month = next("month")?;
        let day = next("day")?;

        let (Ok(year), Ok(month), Ok(day)) = (i32::try_from(year), u32::try_from(month), u32::try_from(day))
        else {
            return Err(RecordError::field("date", s));
        };
        Self::try_new(year, month, day)
    }
}

/// Seconds since local midnight, always in [0, 86400).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);

    pub fn new(secs: u32) -> Option<Self> {
        (secs < TimeUtils::SECS_IN_D).then_some(Self(secs))
    }

    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if hours >= 24 || minutes >= 60 || seconds >= 60 {
            return None;
        }
        Some(Self(hours * TimeUtils::SECS_IN_H + minutes * TimeUtils::SECS_IN_MIN + seconds))
    }

    /// Folds any second count (negative, fractional, past midnight) back into a time of day.
    /// Fractions are truncated.
    pub fn from_secs_wrapping(secs: f64) -> Self {
        let wrapped = crate::utils::wrap_day_secs(secs).floor() as u32;
        Self(wrapped.min(TimeUtils::SECS_IN_D - 1))
    }

    pub fn secs(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    pub fn hours(self) -> u32 {
        self.0 / TimeUtils::SECS_IN_H
    }

    pub fn minutes(self) -> u32 {
        (self.0 % TimeUtils::SECS_IN_H) / TimeUtils::SECS_IN_MIN
    }

    pub fn seconds(self) -> u32 {
        self.0 % TimeUtils::SECS_IN_MIN
    }
}

impl TryFrom<u32> for TimeOfDay {
    type Error = RecordError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        Self::new(secs).ok_or_else(|| RecordError::InvalidTime(secs.to_string()))
    }
}

impl From<TimeOfDay> for u32 {
    fn from(t: TimeOfDay) -> Self {
        t.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&crate::utils::format_hms(self.0))
    }
}

/// Parses `HH:MM:SS` or `HH:MM`.
impl FromStr for TimeOfDay {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(RecordError::InvalidTime(s.to_string()));
        }

        let nums: Option<Vec<u32>> = parts.iter().map(|p| p.trim().parse::<u32>().ok()).collect();
        let nums = nums.ok_or_else(|| RecordError::InvalidTime(s.to_string()))?;

        let seconds = nums.get(2).copied().unwrap_or(0);
        Self::from_hms(nums[0], nums[1], seconds).ok_or_else(|| RecordError::InvalidTime(s.to_string()))
    }
}
