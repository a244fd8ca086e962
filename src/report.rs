use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{StudentInsights, TrendResult};

fn describe_trend(trend: &TrendResult) -> String {
    format!(
        "{} ({:+.1} points, {:.1}%)",
        trend.direction.label(),
        trend.delta,
        trend.magnitude_percent
    )
}

pub fn build_report(insights: &StudentInsights, generated_on: NaiveDate) -> String {
    let mut output = String::new();
    let student = &insights.student;

    let _ = writeln!(output, "# Student Performance Report");
    let _ = writeln!(
        output,
        "Generated for {} ({}, {}) on {}",
        student.name, student.class, student.school, generated_on
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Subject Averages");

    for subject in &insights.subjects {
        let trend = subject
            .trend
            .as_ref()
            .map(describe_trend)
            .unwrap_or_else(|| "trend unavailable".to_string());
        let school = match (subject.school_average, subject.gap_vs_school) {
            (Some(average), Some(gap)) => format!(", school {average:.1} ({gap:+.1})"),
            _ => String::new(),
        };
        let _ = writeln!(
            output,
            "- {} ({}): {:.1} vs class {:.1} ({:+.1}){}, {}",
            subject.subject_name,
            subject.teacher,
            subject.average,
            subject.class_average,
            subject.gap_vs_class,
            school,
            trend
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Comparative Standing");
    let _ = writeln!(
        output,
        "- Strongest: {} ({:.1})",
        insights.comparison.best_subject.name, insights.comparison.best_subject.average
    );
    let _ = writeln!(
        output,
        "- Weakest: {} ({:.1})",
        insights.comparison.worst_subject.name, insights.comparison.worst_subject.average
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Progress");
    for (label, value) in insights.terms.iter().zip(&insights.term_averages) {
        let _ = writeln!(output, "- {label}: {value:.1}");
    }
    let _ = writeln!(
        output,
        "Overall trend: {}",
        describe_trend(&insights.overall_trend)
    );
    let _ = writeln!(
        output,
        "Chart range: {:.0} to {:.0}",
        insights.axis.min, insights.axis.max
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Attendance");
    let _ = writeln!(
        output,
        "- Rate {:.1}% ({})",
        insights.attendance.rate_percent,
        insights.attendance.band.label()
    );
    let _ = writeln!(
        output,
        "- Absent {} days, late {} days ({} days missed)",
        insights.attendance.absent, insights.attendance.late, insights.attendance.days_missed
    );
    if let Some(gap) = insights.attendance.gap_vs_school {
        let _ = writeln!(output, "- Compared with school attendance: {gap:+.1} points");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendations");
    if insights.recommendations.is_empty() {
        let _ = writeln!(output, "No recommendations for this period.");
    } else {
        for line in &insights.recommendations {
            let _ = writeln!(output, "- {line}");
        }
    }

    output
}
