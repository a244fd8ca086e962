use crate::error::{AnalyticsError, Result};
use crate::models::{AxisBounds, SubjectRecord};

const AXIS_STEP: f64 = 5.0;

/// Rounds half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn average(scores: &[f64]) -> Result<f64> {
    if scores.is_empty() {
        return Err(AnalyticsError::EmptyInput { what: "score series" });
    }

    let total: f64 = scores.iter().sum();
    Ok(round_one_decimal(total / scores.len() as f64))
}

/// Per-subject averages in the order the subjects were supplied.
pub fn subject_averages(subjects: &[SubjectRecord]) -> Result<Vec<(String, f64)>> {
    subjects
        .iter()
        .map(|subject| Ok((subject.subject_name.clone(), average(&subject.scores)?)))
        .collect()
}

/// Mean across subjects for each term index.
pub fn term_averages(subjects: &[SubjectRecord]) -> Result<Vec<f64>> {
    let first = subjects
        .first()
        .ok_or(AnalyticsError::EmptyInput { what: "subject list" })?;
    let term_count = first.scores.len();

    for subject in subjects {
        if subject.scores.len() != term_count {
            return Err(AnalyticsError::TermCountMismatch {
                subject: subject.subject_name.clone(),
                expected: term_count,
                found: subject.scores.len(),
            });
        }
    }

    (0..term_count)
        .map(|term| {
            let column: Vec<f64> = subjects.iter().map(|s| s.scores[term]).collect();
            average(&column)
        })
        .collect()
}

/// Student average minus class average for one subject.
pub fn class_gap(record: &SubjectRecord) -> Result<f64> {
    let own = average(&record.scores)?;
    let class = average(&record.class_average)?;
    Ok(round_one_decimal(own - class))
}

/// Student average minus school average, when the school baseline is known.
pub fn school_gap(record: &SubjectRecord) -> Result<Option<f64>> {
    match &record.school_average {
        Some(series) => {
            let own = average(&record.scores)?;
            Ok(Some(round_one_decimal(own - average(series)?)))
        }
        None => Ok(None),
    }
}

/// Chart axis range snapped outward to multiples of five.
pub fn axis_bounds(series: &[f64]) -> Result<AxisBounds> {
    if series.is_empty() {
        return Err(AnalyticsError::EmptyInput { what: "chart series" });
    }

    let lowest = series.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let min = (lowest / AXIS_STEP).floor() * AXIS_STEP;
    let mut max = (highest / AXIS_STEP).ceil() * AXIS_STEP;
    if max <= min {
        max = min + AXIS_STEP;
    }

    Ok(AxisBounds { min, max })
}
