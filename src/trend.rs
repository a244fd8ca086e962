use crate::aggregate::round_one_decimal;
use crate::error::{AnalyticsError, Result};
use crate::models::{TrendDirection, TrendResult};

pub const DEFAULT_TREND_THRESHOLD: f64 = 5.0;

pub fn classify(scores: &[f64]) -> Result<TrendResult> {
    classify_with_threshold(scores, DEFAULT_TREND_THRESHOLD)
}

/// Compares the two most recent terms. A change must exceed `threshold`
/// points in either direction to count as a trend.
pub fn classify_with_threshold(scores: &[f64], threshold: f64) -> Result<TrendResult> {
    let (previous, last) = match scores {
        [.., previous, last] => (*previous, *last),
        _ => {
            return Err(AnalyticsError::InsufficientData {
                needed: 2,
                found: scores.len(),
            })
        }
    };

    if previous == 0.0 {
        return Err(AnalyticsError::DivisionByZero {
            what: "trend magnitude",
        });
    }

    let delta = last - previous;
    let direction = if delta > threshold {
        TrendDirection::Improving
    } else if delta < -threshold {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    Ok(TrendResult {
        direction,
        magnitude_percent: round_one_decimal((delta / previous).abs() * 100.0),
        delta: round_one_decimal(delta),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_direction_against_default_threshold() {
        assert_eq!(
            classify(&[80.0, 90.0]).unwrap().direction,
            TrendDirection::Improving
        );
        assert_eq!(
            classify(&[90.0, 80.0]).unwrap().direction,
            TrendDirection::Declining
        );
        assert_eq!(
            classify(&[80.0, 83.0]).unwrap().direction,
            TrendDirection::Stable
        );
    }

    #[test]
    fn threshold_boundary_is_stable() {
        assert_eq!(
            classify(&[80.0, 85.0]).unwrap().direction,
            TrendDirection::Stable
        );
        assert_eq!(
            classify(&[80.0, 75.0]).unwrap().direction,
            TrendDirection::Stable
        );
    }

    #[test]
    fn only_last_two_terms_matter() {
        let result = classify(&[40.0, 95.0, 80.0, 86.0]).unwrap();
        assert_eq!(result.direction, TrendDirection::Improving);
        assert_eq!(result.delta, 6.0);
    }

    #[test]
    fn magnitude_is_relative_to_previous_term() {
        let result = classify(&[80.0, 86.0]).unwrap();
        assert!((result.magnitude_percent - 7.5).abs() < 1e-9);

        let result = classify(&[80.0, 70.0]).unwrap();
        assert!((result.magnitude_percent - 12.5).abs() < 1e-9);
        assert_eq!(result.delta, -10.0);
    }

    #[test]
    fn short_series_is_reported() {
        assert_eq!(
            classify(&[80.0]),
            Err(AnalyticsError::InsufficientData { needed: 2, found: 1 })
        );
        assert_eq!(
            classify(&[]),
            Err(AnalyticsError::InsufficientData { needed: 2, found: 0 })
        );
    }

    #[test]
    fn zero_baseline_is_reported() {
        assert_eq!(
            classify(&[50.0, 0.0, 10.0]),
            Err(AnalyticsError::DivisionByZero {
                what: "trend magnitude"
            })
        );
    }

    #[test]
    fn custom_threshold_changes_classification() {
        let result = classify_with_threshold(&[80.0, 83.0], 2.0).unwrap();
        assert_eq!(result.direction, TrendDirection::Improving);
    }
}
