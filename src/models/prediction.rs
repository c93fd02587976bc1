use {
    crate::domain::{SegmentId, TimeOfDay},
    serde::Serialize,
    std::fmt,
};

/// Expected duration and its spread, both in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Prediction {
    pub mean_secs: f64,
    pub std_dev_secs: f64,
}

impl Prediction {
    /// No usable history: zero mean, zero spread.
    pub const NO_DATA: Self = Self {
        mean_secs: 0.0,
        std_dev_secs: 0.0,
    };

    pub fn new(mean_secs: f64, std_dev_secs: f64) -> Self {
        Self {
            mean_secs,
            std_dev_secs,
        }
    }

    pub fn variance(&self) -> f64 {
        self.std_dev_secs * self.std_dev_secs
    }

    pub fn is_no_data(&self) -> bool {
        *self == Self::NO_DATA
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}s ± {:.2}s", self.mean_secs, self.std_dev_secs)
    }
}

/// Prediction for one segment, with the evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentPrediction {
    pub segment_id: SegmentId,
    /// Time of day the segment is expected to be entered.
    pub start_time: TimeOfDay,
    pub prediction: Prediction,
    /// Historical traversals of this segment that contributed.
    pub samples: usize,
}

/// Whole-route prediction plus the per-segment legs it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePrediction {
    pub total: Prediction,
    pub legs: Vec<SegmentPrediction>,
}

impl RoutePrediction {
    /// Segments with no usable history, which contribute nothing to the total.
    pub fn uncovered_segments(&self) -> Vec<SegmentId> {
        self.legs
            .iter()
            .filter(|leg| leg.prediction.is_no_data())
            .map(|leg| leg.segment_id)
            .collect()
    }
}
