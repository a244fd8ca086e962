use crate::aggregate::{self, average};
use crate::attendance;
use crate::config::InsightConfig;
use crate::data::validate_snapshot;
use crate::error::{AnalyticsError, Result};
use crate::models::{StudentInsights, StudentSnapshot, SubjectInsight};
use crate::ranking;
use crate::recommend;
use crate::trend::classify_with_threshold;

pub fn analyze(snapshot: &StudentSnapshot, config: &InsightConfig) -> Result<StudentInsights> {
    config.validate()?;
    validate_snapshot(snapshot)?;

    let mut subjects = Vec::with_capacity(snapshot.subjects.len());
    for record in &snapshot.subjects {
        let trend = match classify_with_threshold(&record.scores, config.trend_threshold) {
            Ok(trend) => Some(trend),
            Err(err @ AnalyticsError::DivisionByZero { .. }) => {
                tracing::warn!(subject = %record.subject_name, error = %err, "subject trend unavailable");
                None
            }
            Err(err) => return Err(err),
        };

        subjects.push(SubjectInsight {
            subject_name: record.subject_name.clone(),
            teacher: record.teacher.clone(),
            average: average(&record.scores)?,
            class_average: average(&record.class_average)?,
            gap_vs_class: aggregate::class_gap(record)?,
            school_average: record.school_average.as_deref().map(average).transpose()?,
            gap_vs_school: aggregate::school_gap(record)?,
            trend,
        });
    }

    let term_averages = aggregate::term_averages(&snapshot.subjects)?;
    let overall_trend = classify_with_threshold(&term_averages, config.trend_threshold)?;

    let all_scores: Vec<f64> = snapshot
        .subjects
        .iter()
        .flat_map(|s| s.scores.iter().copied())
        .collect();
    let axis = aggregate::axis_bounds(&all_scores)?;

    let comparison = ranking::rank(
        subjects
            .iter()
            .map(|s| (s.subject_name.as_str(), s.average)),
    )?;
    let attendance = attendance::summarize_against_school(
        &snapshot.attendance,
        snapshot.school_attendance,
        config,
    );
    let recommendations = recommend::compose(&overall_trend, &comparison);

    tracing::info!(
        student = %snapshot.student.id,
        subjects = subjects.len(),
        trend = overall_trend.direction.label(),
        attendance = attendance.band.label(),
        "analysis complete"
    );

    Ok(StudentInsights {
        student: snapshot.student.clone(),
        terms: snapshot.terms.clone(),
        term_averages,
        axis,
        subjects,
        overall_trend,
        comparison,
        attendance,
        recommendations,
    })
}
