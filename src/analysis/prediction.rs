//! Similarity-weighted duration prediction, per segment and chained along the route.

use {
    crate::{
        analysis::similarity,
        config::{SimilaritySettings, constants},
        domain::{CalendarDate, Query, Segment, SegmentId, TimeOfDay, Traversal},
        models::{Prediction, RoutePrediction, SegmentPrediction},
        utils::{TimeUtils, weighted_mean_and_stddev, wrap_day_secs},
    },
    rayon::prelude::*,
};

/// Weighted mean and spread of past durations for one segment.
///
/// Returns [`Prediction::NO_DATA`] when the segment has no history (or every weight is zero).
pub fn predict_segment(
    segment_id: SegmentId,
    history: &[Traversal],
    query: &Query,
    settings: &SimilaritySettings,
) -> SegmentPrediction {
    let (durations, weights): (Vec<f64>, Vec<f64>) = history
        .iter()
        .filter(|t| t.segment_id == segment_id)
        .map(|t| (t.duration_secs as f64, similarity::weight(t, query, settings)))
        .unzip();

    let (mean, std_dev) = weighted_mean_and_stddev(&durations, &weights);

    SegmentPrediction {
        segment_id,
        start_time: query.time,
        prediction: Prediction::new(mean, std_dev),
        samples: durations.len(),
    }
}

/// Chains segment predictions in route order.
///
/// Each segment is queried at the time the previous ones are expected to finish.
/// Means add up; variances add up (segments are treated as independent), so the
/// route spread is the root of the summed variances.
pub fn predict_route(
    segments: &[Segment],
    history: &[Traversal],
    query: &Query,
    settings: &SimilaritySettings,
) -> RoutePrediction {
    let mut running_secs = query.time.as_f64();
    let mut total_mean = 0.0;
    let mut total_variance = 0.0;
    let mut legs = Vec::with_capacity(segments.len());

    for segment in segments {
        let leg_query = query.at(TimeOfDay::from_secs_wrapping(running_secs));
        let leg = predict_segment(segment.id, history, &leg_query, settings);

        total_mean += leg.prediction.mean_secs;
        total_variance += leg.prediction.variance();
        running_secs = wrap_day_secs(running_secs + leg.prediction.mean_secs);

        legs.push(leg);
    }

    RoutePrediction {
        total: Prediction::new(total_mean, total_variance.sqrt()),
        legs,
    }
}

/// Route prediction for every minute of `date`, in time order.
pub fn prediction_set(
    segments: &[Segment],
    history: &[Traversal],
    date: CalendarDate,
    settings: &SimilaritySettings,
) -> Vec<(TimeOfDay, Prediction)> {
    let step = constants::prediction_set::MINUTE_STEP_SECS;
    let slots = TimeUtils::SECS_IN_D / step;

    crate::trace_time!("prediction_set", 250_000, {
        (0..slots)
            .into_par_iter()
            .filter_map(|slot| TimeOfDay::new(slot * step))
            .map(|time| {
                let route = predict_route(segments, history, &Query::new(date, time), settings);
                (time, route.total)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn t(segment_id: SegmentId, duration_secs: u32, on: CalendarDate, secs: u32) -> Traversal {
        Traversal {
            segment_id,
            duration_secs,
            date: on,
            start_time: TimeOfDay::new(secs).unwrap(),
        }
    }

    fn route() -> Vec<Segment> {
        vec![
            Segment::new(1, 0.0, 0.0, 1.0, 1.0),
            Segment::new(2, 0.0, 1.0, 1.0, 2.0),
            Segment::new(3, 0.0, 2.0, 1.0, 3.0),
        ]
    }

    fn history() -> Vec<Traversal> {
        let d = date(2025, 3, 4);
        vec![
            t(1, 100, d, 28_800),
            t(1, 200, d, 28_800),
            t(1, 300, d, 28_800),
            t(2, 240, date(2025, 2, 25), 29_000),
            t(2, 360, d, 29_100),
            t(3, 600, date(2025, 1, 14), 30_000),
            t(3, 420, d, 26_000),
            t(3, 480, d, 31_000),
        ]
    }

    #[test]
    fn test_equal_weights_give_plain_statistics() {
        let q = Query::new(date(2025, 3, 4), TimeOfDay::new(28_800).unwrap());
        let leg = predict_segment(1, &history(), &q, &SimilaritySettings::default());

        assert_eq!(leg.samples, 3);
        assert!((leg.prediction.mean_secs - 200.0).abs() < 1e-9);
        assert!((leg.prediction.std_dev_secs - (20_000.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_segment_has_no_data() {
        let q = Query::new(date(2025, 3, 4), TimeOfDay::new(28_800).unwrap());
        let leg = predict_segment(42, &history(), &q, &SimilaritySettings::default());
        assert_eq!(leg.samples, 0);
        assert!(leg.prediction.is_no_data());

        let empty = predict_segment(1, &[], &q, &SimilaritySettings::default());
        assert_eq!(empty.prediction, Prediction::NO_DATA);
    }

    #[test]
    fn test_closer_samples_dominate() {
        // Query at 08:00; a 08:00 sample and a 20:00 sample on the same day
        let d = date(2025, 3, 4);
        let history = vec![t(5, 100, d, 28_800), t(5, 900, d, 72_000)];
        let q = Query::new(d, TimeOfDay::new(28_800).unwrap());
        let leg = predict_segment(5, &history, &q, &SimilaritySettings::default());
        assert!(leg.prediction.mean_secs < 101.0);
    }

    #[test]
    fn test_route_sums_means_and_variances() {
        let segments = route();
        let history = history();
        let settings = SimilaritySettings::default();
        let q = Query::new(date(2025, 3, 5), TimeOfDay::new(28_500).unwrap());

        let route = predict_route(&segments, &history, &q, &settings);
        assert_eq!(route.legs.len(), 3);

        let mean_sum: f64 = route.legs.iter().map(|l| l.prediction.mean_secs).sum();
        let var_sum: f64 = route.legs.iter().map(|l| l.prediction.variance()).sum();
        let std_sum: f64 = route.legs.iter().map(|l| l.prediction.std_dev_secs).sum();

        assert!((route.total.mean_secs - mean_sum).abs() < 1e-9);
        assert!((route.total.std_dev_secs - var_sum.sqrt()).abs() < 1e-9);
        assert!(route.total.std_dev_secs < std_sum);
    }

    #[test]
    fn test_route_legs_start_when_previous_finish() {
        let segments = route();
        let history = history();
        let q = Query::new(date(2025, 3, 5), TimeOfDay::new(28_500).unwrap());
        let route = predict_route(&segments, &history, &q, &SimilaritySettings::default());

        assert_eq!(route.legs[0].start_time.secs(), 28_500);
        let expected_second = (28_500.0 + route.legs[0].prediction.mean_secs).floor() as u32;
        assert_eq!(route.legs[1].start_time.secs(), expected_second);

        // Each leg matches a direct segment query at its start time
        for leg in &route.legs {
            let direct = predict_segment(
                leg.segment_id,
                &history,
                &q.at(leg.start_time),
                &SimilaritySettings::default(),
            );
            assert_eq!(direct, *leg);
        }
    }

    #[test]
    fn test_route_running_time_wraps_midnight() {
        let d = date(2025, 3, 4);
        let history = vec![t(1, 1_200, d, 86_000), t(2, 300, d, 400)];
        let segments = &route()[..2];
        let q = Query::new(d, TimeOfDay::new(86_000).unwrap());

        let route = predict_route(segments, &history, &q, &SimilaritySettings::default());
        assert!((route.legs[0].prediction.mean_secs - 1_200.0).abs() < 1e-9);
        assert_eq!(route.legs[1].start_time.secs(), 800);
    }

    #[test]
    fn test_route_with_gaps_reports_uncovered_segments() {
        let d = date(2025, 3, 4);
        let history = vec![t(1, 100, d, 28_800)];
        let q = Query::new(d, TimeOfDay::new(28_800).unwrap());
        let route = predict_route(&route(), &history, &q, &SimilaritySettings::default());

        assert_eq!(route.uncovered_segments(), vec![2, 3]);
        assert!((route.total.mean_secs - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_prediction_set_covers_every_minute_in_order() {
        let set = prediction_set(&route(), &history(), date(2025, 3, 5), &SimilaritySettings::default());
        assert_eq!(set.len(), 1_440);
        assert_eq!(set[0].0, TimeOfDay::MIDNIGHT);
        assert_eq!(set[1_439].0.secs(), 86_340);
        assert!(set.windows(2).all(|w| w[0].0 < w[1].0));

        let q = Query::new(date(2025, 3, 5), set[480].0);
        let direct = predict_route(&route(), &history(), &q, &SimilaritySettings::default());
        assert_eq!(set[480].1, direct.total);
    }
}
