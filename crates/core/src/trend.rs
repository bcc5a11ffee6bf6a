//! Windowed statistics and trend direction over stored readings.
//!
//! Pure logic -- the caller fetches the window's records and passes them in
//! chronological order. This is a batch recomputation per call; the window
//! is bounded (days), so no incremental state is kept.

use serde::Serialize;

use crate::types::Timestamp;

/// Relative change below which the split-half means are considered stable.
const STABLE_BAND: f64 = 0.05;

/// One data point within the analysis window.
#[derive(Debug, Clone, Copy)]
pub struct TrendSample {
    pub value: f64,
    pub recorded_at: Timestamp,
}

/// Direction of the windowed trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Statistics and direction for one (patient, type, window) query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub direction: TrendDirection,
    pub window_start: Timestamp,
    pub window_end: Timestamp,
}

/// Analyze a chronologically ordered sample window.
///
/// Returns `None` when fewer than 2 data points exist. Direction is
/// classified by splitting the ordered sample in half and comparing the
/// halves' means: a relative change under 5% of the first half's mean is
/// stable, otherwise the sign of the change decides.
pub fn analyze(samples: &[TrendSample]) -> Option<TrendResult> {
    if samples.len() < 2 {
        return None;
    }

    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mid = count / 2;
    let first_mean = values[..mid].iter().sum::<f64>() / mid as f64;
    let second_mean = values[mid..].iter().sum::<f64>() / (count - mid) as f64;

    let direction = if (second_mean - first_mean).abs() < STABLE_BAND * first_mean.abs() {
        TrendDirection::Stable
    } else if second_mean > first_mean {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    Some(TrendResult {
        count,
        mean,
        min,
        max,
        direction,
        window_start: samples[0].recorded_at,
        window_end: samples[count - 1].recorded_at,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn samples(values: &[f64]) -> Vec<TrendSample> {
        let start = Utc::now() - Duration::days(7);
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| TrendSample {
                value,
                recorded_at: start + Duration::hours(i as i64),
            })
            .collect()
    }

    #[test]
    fn fewer_than_two_points_yields_none() {
        assert!(analyze(&samples(&[])).is_none());
        assert!(analyze(&samples(&[70.0])).is_none());
    }

    #[test]
    fn monotonically_rising_heart_rate_is_increasing() {
        // 70 → 90 over a 7-day window.
        let values: Vec<f64> = (0..=20).map(|i| 70.0 + i as f64).collect();
        let result = analyze(&samples(&values)).unwrap();
        assert_eq!(result.direction, TrendDirection::Increasing);
        assert_eq!(result.min, 70.0);
        assert_eq!(result.max, 90.0);
        assert_eq!(result.count, 21);
    }

    #[test]
    fn falling_values_are_decreasing() {
        let values: Vec<f64> = (0..=20).map(|i| 90.0 - i as f64).collect();
        let result = analyze(&samples(&values)).unwrap();
        assert_eq!(result.direction, TrendDirection::Decreasing);
    }

    #[test]
    fn small_relative_change_is_stable() {
        // Second half mean within 5% of the first half mean.
        let result = analyze(&samples(&[100.0, 100.0, 101.0, 102.0])).unwrap();
        assert_eq!(result.direction, TrendDirection::Stable);
    }

    #[test]
    fn statistics_cover_the_window() {
        let result = analyze(&samples(&[60.0, 80.0, 100.0])).unwrap();
        assert_eq!(result.mean, 80.0);
        assert_eq!(result.min, 60.0);
        assert_eq!(result.max, 100.0);
        assert!(result.window_start < result.window_end);
    }
}
