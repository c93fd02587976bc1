// Domain types and value objects
mod calendar;
mod point;
mod query;
mod segment;
mod traversal;

pub use calendar::{CalendarDate, DayOfWeek, TimeOfDay, is_leap_year};
pub use point::{GeoPosition, Point};
pub use query::Query;
pub use segment::{
    BoundingBox, Segment, SegmentId, SegmentLayout, first_containing, validate_segments,
};
pub use traversal::{RecordOutcome, Traversal, TraversalLog};
