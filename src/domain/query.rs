use {
    crate::domain::{CalendarDate, DayOfWeek, TimeOfDay},
    std::fmt,
};

/// A target date and time of day to predict for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub date: CalendarDate,
    pub time: TimeOfDay,
}

impl Query {
    pub fn new(date: CalendarDate, time: TimeOfDay) -> Self {
        Query { date, time }
    }

    /// Same date, different time of day.
    pub fn at(&self, time: TimeOfDay) -> Self {
        Query { time, ..*self }
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        self.date.day_of_week()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}) {}", self.date, self.day_of_week(), self.time)
    }
}
