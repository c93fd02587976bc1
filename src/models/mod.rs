mod detection_report;
mod prediction;

pub use detection_report::DetectionReport;
pub use prediction::{Prediction, RoutePrediction, SegmentPrediction};
