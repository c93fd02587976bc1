use {
    crate::{
        domain::{CalendarDate, SegmentId, TimeOfDay},
        errors::RecordError,
    },
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// One validated pass through a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traversal {
    pub segment_id: SegmentId,
    pub duration_secs: u32,
    /// Local date and time of the entry point.
    pub date: CalendarDate,
    pub start_time: TimeOfDay,
}

impl Traversal {
    /// `segmentId,durationSeconds,YYYY-MM-DD,HH:MM:SS`
    pub fn to_log_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.segment_id, self.duration_secs, self.date, self.start_time
        )
    }
}

impl FromStr for Traversal {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        let [id, duration, date, time] = fields.as_slice() else {
            return Err(RecordError::FieldCount {
                expected: 4,
                found: fields.len(),
            });
        };

        Ok(Traversal {
            segment_id: id.parse().map_err(|_| RecordError::field("segment id", id))?,
            duration_secs: duration
                .parse()
                .map_err(|_| RecordError::field("duration", duration))?,
            date: date.parse()?,
            start_time: time.parse()?,
        })
    }
}

/// What happened to a traversal offered to a [`TraversalLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    AtCapacity,
}

/// Append-only traversal history with an explicit capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalLog {
    entries: Vec<Traversal>,
    capacity: usize,
}

impl TraversalLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(4_096)),
            capacity,
        }
    }

    /// Appends unless the log is full. A full log is never an error, the caller decides
    /// whether to report the truncation.
    pub fn try_record(&mut self, traversal: Traversal) -> RecordOutcome {
        if self.is_full() {
            return RecordOutcome::AtCapacity;
        }
        self.entries.push(traversal);
        RecordOutcome::Recorded
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Traversal] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Traversal> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a TraversalLog {
    type Item = &'a Traversal;
    type IntoIter = std::slice::Iter<'a, Traversal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Traversal {
        Traversal {
            segment_id: 3,
            duration_secs: 95,
            date: CalendarDate::new(2025, 3, 7).unwrap(),
            start_time: TimeOfDay::from_hms(8, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_log_line_is_zero_padded() {
        assert_eq!(sample().to_log_line(), "3,95,2025-03-07,08:04:05");
    }

    #[test]
    fn test_log_line_round_trip() {
        let original = sample();
        let parsed: Traversal = original.to_log_line().parse().unwrap();
        assert_eq!(parsed, original);

        let midnight = Traversal {
            segment_id: 12,
            duration_secs: 1_800,
            date: CalendarDate::new(2024, 2, 29).unwrap(),
            start_time: TimeOfDay::MIDNIGHT,
        };
        assert_eq!(midnight.to_log_line(), "12,1800,2024-02-29,00:00:00");
        assert_eq!(midnight.to_log_line().parse::<Traversal>().unwrap(), midnight);
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert_eq!(
            "3,95,2025-03-07".parse::<Traversal>(),
            Err(RecordError::FieldCount { expected: 4, found: 3 })
        );
        assert!("x,95,2025-03-07,08:04:05".parse::<Traversal>().is_err());
        assert!("3,-5,2025-03-07,08:04:05".parse::<Traversal>().is_err());
        assert!("3,95,2025-02-30,08:04:05".parse::<Traversal>().is_err());
        assert!("3,95,2025-03-07,25:00:00".parse::<Traversal>().is_err());
    }

    #[test]
    fn test_log_stops_at_capacity() {
        let mut log = TraversalLog::with_capacity(2);
        assert_eq!(log.try_record(sample()), RecordOutcome::Recorded);
        assert_eq!(log.try_record(sample()), RecordOutcome::Recorded);
        assert!(log.is_full());
        assert_eq!(log.try_record(sample()), RecordOutcome::AtCapacity);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut log = TraversalLog::with_capacity(0);
        assert_eq!(log.try_record(sample()), RecordOutcome::AtCapacity);
        assert!(log.is_empty());
    }
}
