//! How relevant is a historical traversal to a query?
//!
//! weight = time-of-day factor × day-of-week factor × recency factor
//!
//! - time of day: Gaussian on the circular distance between the two times.
//! - day of week: same day ×2.0, neighbouring day ×1.2, then ×1.2 again when both
//!   days are weekdays or both are weekend days.
//! - recency: halves every `date_half_life_days`, floored so it never reaches zero.
//!
//! The day-of-week factor can exceed 1, so weights are relative. Only their ratios
//! matter to the weighted statistics downstream.

use crate::{
    config::SimilaritySettings,
    domain::{DayOfWeek, Query, Traversal},
    utils::circular_day_distance,
};

/// The three factors behind one weight, kept apart for inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBreakdown {
    pub time_of_day: f64,
    pub day_of_week: f64,
    pub recency: f64,
}

impl WeightBreakdown {
    pub fn combined(&self) -> f64 {
        self.time_of_day * self.day_of_week * self.recency
    }
}

pub fn weight(traversal: &Traversal, query: &Query, settings: &SimilaritySettings) -> f64 {
    weight_breakdown(traversal, query, settings).combined()
}

pub fn weight_breakdown(
    traversal: &Traversal,
    query: &Query,
    settings: &SimilaritySettings,
) -> WeightBreakdown {
    WeightBreakdown {
        time_of_day: time_of_day_factor(
            traversal.start_time.as_f64(),
            query.time.as_f64(),
            settings.time_of_day_width_secs,
        ),
        day_of_week: day_of_week_factor(traversal.date.day_of_week(), query.day_of_week(), settings),
        recency: recency_factor(traversal.date.days_between(&query.date), settings),
    }
}

/// Gaussian kernel on circular time-of-day distance. 1.0 at zero distance.
pub fn time_of_day_factor(a_secs: f64, b_secs: f64, width_secs: f64) -> f64 {
    let distance = circular_day_distance(a_secs, b_secs);
    if width_secs <= 0.0 {
        return if distance == 0.0 { 1.0 } else { 0.0 };
    }
    let z = distance / width_secs;
    (-0.5 * z * z).exp()
}

pub fn day_of_week_factor(
    traversal_day: DayOfWeek,
    query_day: DayOfWeek,
    settings: &SimilaritySettings,
) -> f64 {
    let mut factor = match traversal_day.distance(query_day) {
        0 => settings.same_day_factor,
        1 => settings.adjacent_day_factor,
        _ => 1.0,
    };

    let same_class = traversal_day.is_weekend() == query_day.is_weekend();
    if same_class {
        factor *= settings.same_day_class_factor;
    }

    factor
}

/// Exponential half-life decay over calendar days, floored at `min_date_factor`.
pub fn recency_factor(days_apart: i64, settings: &SimilaritySettings) -> f64 {
    if settings.date_half_life_days <= 0.0 {
        return if days_apart == 0 { 1.0 } else { settings.min_date_factor };
    }
    let decay = 2f64.powf(-(days_apart.abs() as f64) / settings.date_half_life_days);
    decay.max(settings.min_date_factor)
}
