use crate::aggregate::round_one_decimal;
use crate::config::InsightConfig;
use crate::models::{AttendanceBand, AttendanceRecord, AttendanceSummary};

pub fn summarize(record: &AttendanceRecord) -> AttendanceSummary {
    summarize_with(record, &InsightConfig::default())
}

/// The rate is the recorded `present` percentage as-is; absent and late
/// days are counts and do not feed into it.
pub fn summarize_with(record: &AttendanceRecord, config: &InsightConfig) -> AttendanceSummary {
    summarize_against_school(record, None, config)
}

/// Like `summarize_with`, also comparing the rate with a school-wide
/// attendance percentage.
pub fn summarize_against_school(
    record: &AttendanceRecord,
    school_rate: Option<f64>,
    config: &InsightConfig,
) -> AttendanceSummary {
    let band = if record.present >= config.excellent_attendance {
        AttendanceBand::Excellent
    } else if record.present >= config.good_attendance {
        AttendanceBand::Good
    } else {
        AttendanceBand::Concerning
    };

    AttendanceSummary {
        rate_percent: record.present,
        band,
        absent: record.absent,
        late: record.late,
        days_missed: days_missed(record),
        gap_vs_school: school_rate.map(|school| round_one_decimal(record.present - school)),
    }
}

pub fn days_missed(record: &AttendanceRecord) -> u32 {
    record.absent.saturating_add(record.late)
}
