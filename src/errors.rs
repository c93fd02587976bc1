use {crate::domain::SegmentId, thiserror::Error};

/// A text record (point line, traversal line, date or time field) that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
    #[error("date {year:04}-{month:02}-{day:02} does not exist")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("time of day out of range: '{0}'")]
    InvalidTime(String),
}

impl RecordError {
    pub(crate) fn field(field: &'static str, value: &str) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}

/// A segment list that cannot be used for detection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    #[error("no segments configured")]
    Empty,
    #[error("segment id {0} is configured more than once")]
    DuplicateId(SegmentId),
    #[error("segment {0} has a bounding box with min greater than max")]
    InvertedBounds(SegmentId),
    #[error("segment {0} has a non-finite bound")]
    NonFiniteBounds(SegmentId),
}
