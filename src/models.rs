use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub id: String,
    pub name: String,
    pub class: String,
    pub school: String,
}

/// One subject's score series, one entry per term, with the class average
/// and (when known) the school average for the same terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub subject_name: String,
    pub scores: Vec<f64>,
    pub class_average: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_average: Option<Vec<f64>>,
    pub teacher: String,
}

/// `present` is a percentage while `absent` and `late` are day counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub present: f64,
    pub absent: u32,
    pub late: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSnapshot {
    pub student: StudentInfo,
    pub terms: Vec<String>,
    pub subjects: Vec<SubjectRecord>,
    pub attendance: AttendanceRecord,
    /// School-wide attendance percentage, comparable with `attendance.present`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_attendance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub magnitude_percent: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStanding {
    pub name: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeResult {
    pub best_subject: SubjectStanding,
    pub worst_subject: SubjectStanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceBand {
    Excellent,
    Good,
    Concerning,
}

impl AttendanceBand {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceBand::Excellent => "excellent",
            AttendanceBand::Good => "good",
            AttendanceBand::Concerning => "concerning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub rate_percent: f64,
    pub band: AttendanceBand,
    pub absent: u32,
    pub late: u32,
    pub days_missed: u32,
    pub gap_vs_school: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInsight {
    pub subject_name: String,
    pub teacher: String,
    pub average: f64,
    pub class_average: f64,
    pub gap_vs_class: f64,
    pub school_average: Option<f64>,
    pub gap_vs_school: Option<f64>,
    pub trend: Option<TrendResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentInsights {
    pub student: StudentInfo,
    pub terms: Vec<String>,
    pub term_averages: Vec<f64>,
    pub axis: AxisBounds,
    pub subjects: Vec<SubjectInsight>,
    pub overall_trend: TrendResult,
    pub comparison: ComparativeResult,
    pub attendance: AttendanceSummary,
    pub recommendations: Vec<String>,
}
