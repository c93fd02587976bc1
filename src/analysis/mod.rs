// Detection and prediction algorithms
pub mod prediction;
pub mod similarity;
pub mod traversal_detector;

pub use prediction::{predict_route, predict_segment, prediction_set};
pub use similarity::{WeightBreakdown, weight, weight_breakdown};
pub use traversal_detector::{ScanOutcome, detect};
