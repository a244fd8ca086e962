use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::error::{AnalyticsError, Result};
use crate::models::{AttendanceRecord, StudentInfo, StudentSnapshot, SubjectRecord};

/// Scores normalized from a CSV export.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreImport {
    pub terms: Vec<String>,
    pub subjects: Vec<SubjectRecord>,
}

pub fn demo_snapshot() -> StudentSnapshot {
    // (subject, teacher, scores, class average, school average by term)
    let subjects = vec![
        (
            "Mathematics",
            "Mr. Lee",
            vec![85.0, 88.0, 92.0, 87.0],
            82.0,
            vec![80.0, 82.0, 83.0, 82.0],
        ),
        (
            "English",
            "Ms. Carter",
            vec![78.0, 82.0, 80.0, 85.0],
            80.0,
            vec![78.0, 79.0, 80.0, 80.0],
        ),
        (
            "Science",
            "Dr. Ho",
            vec![90.0, 88.0, 92.0, 94.0],
            85.0,
            vec![83.0, 84.0, 85.0, 85.0],
        ),
        (
            "Chinese",
            "Ms. Chan",
            vec![88.0, 85.0, 89.0, 90.0],
            84.0,
            vec![82.0, 83.0, 84.0, 84.0],
        ),
    ];

    StudentSnapshot {
        student: StudentInfo {
            id: "ST001".to_string(),
            name: "Chan Tai Man".to_string(),
            class: "4A".to_string(),
            school: "Demo Secondary School".to_string(),
        },
        terms: term_labels(4),
        subjects: subjects
            .into_iter()
            .map(|(name, teacher, scores, class_average, school_average)| SubjectRecord {
                subject_name: name.to_string(),
                class_average: vec![class_average; scores.len()],
                scores,
                school_average: Some(school_average),
                teacher: teacher.to_string(),
            })
            .collect(),
        attendance: AttendanceRecord {
            present: 95.0,
            absent: 3,
            late: 2,
        },
        school_attendance: Some(96.0),
    }
}

pub fn term_labels(count: usize) -> Vec<String> {
    (1..=count).map(|term| format!("Term {term}")).collect()
}

fn ensure_finite(subject: &SubjectRecord, series: &'static str, values: &[f64]) -> Result<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(AnalyticsError::NonFiniteScore {
            subject: subject.subject_name.clone(),
            series,
        })
    }
}

/// Checks that every subject has one class (and school, when present)
/// average per score, that every value is finite, and that all subjects
/// cover the same number of terms.
pub fn validate_subjects(subjects: &[SubjectRecord]) -> Result<()> {
    let first = subjects
        .first()
        .ok_or(AnalyticsError::EmptyInput { what: "subject list" })?;
    let expected = first.scores.len();

    for subject in subjects {
        if subject.scores.is_empty() {
            return Err(AnalyticsError::EmptyInput { what: "score series" });
        }
        if subject.scores.len() != subject.class_average.len() {
            return Err(AnalyticsError::SeriesLengthMismatch {
                subject: subject.subject_name.clone(),
                scores: subject.scores.len(),
                class_average: subject.class_average.len(),
            });
        }
        if let Some(school) = &subject.school_average {
            if school.len() != subject.scores.len() {
                return Err(AnalyticsError::SchoolSeriesMismatch {
                    subject: subject.subject_name.clone(),
                    scores: subject.scores.len(),
                    school_average: school.len(),
                });
            }
            ensure_finite(subject, "school average", school)?;
        }
        if subject.scores.len() != expected {
            return Err(AnalyticsError::TermCountMismatch {
                subject: subject.subject_name.clone(),
                expected,
                found: subject.scores.len(),
            });
        }
        ensure_finite(subject, "scores", &subject.scores)?;
        ensure_finite(subject, "class average", &subject.class_average)?;
    }

    Ok(())
}

/// Subject checks plus one term label per score.
pub fn validate_snapshot(snapshot: &StudentSnapshot) -> Result<()> {
    validate_subjects(&snapshot.subjects)?;

    let term_count = snapshot.subjects[0].scores.len();
    if snapshot.terms.len() != term_count {
        return Err(AnalyticsError::TermLabelMismatch {
            labels: snapshot.terms.len(),
            terms: term_count,
        });
    }

    let rates = [Some(snapshot.attendance.present), snapshot.school_attendance];
    if rates.iter().flatten().any(|rate| !rate.is_finite()) {
        return Err(AnalyticsError::NonFiniteScore {
            subject: "attendance".to_string(),
            series: "attendance rate",
        });
    }
    Ok(())
}

pub fn import_csv(csv_path: &Path) -> anyhow::Result<ScoreImport> {
    let reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    import_reader(reader)
}

/// Reads `subject,teacher,term,score,class_average[,school_average]` rows.
/// Every subject must cover exactly the same set of terms.
pub fn import_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> anyhow::Result<ScoreImport> {
    #[derive(Deserialize)]
    struct CsvRow {
        subject: String,
        teacher: String,
        term: u32,
        score: f64,
        class_average: f64,
        #[serde(default)]
        school_average: Option<f64>,
    }

    struct Entry {
        term: u32,
        score: f64,
        class_average: f64,
        school_average: Option<f64>,
    }

    let mut grouped: Vec<(String, String, Vec<Entry>)> = Vec::new();
    let mut terms = BTreeSet::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result.context("malformed score row")?;
        terms.insert(row.term);

        let position = match grouped.iter().position(|(name, _, _)| *name == row.subject) {
            Some(position) => position,
            None => {
                grouped.push((row.subject.clone(), row.teacher.clone(), Vec::new()));
                grouped.len() - 1
            }
        };

        let entries = &mut grouped[position].2;
        if entries.iter().any(|entry| entry.term == row.term) {
            bail!("duplicate score for {} in term {}", row.subject, row.term);
        }
        entries.push(Entry {
            term: row.term,
            score: row.score,
            class_average: row.class_average,
            school_average: row.school_average,
        });
    }

    let expected: Vec<u32> = terms.iter().copied().collect();
    let mut subjects = Vec::with_capacity(grouped.len());

    for (subject_name, teacher, mut entries) in grouped {
        entries.sort_by_key(|entry| entry.term);

        let found: Vec<u32> = entries.iter().map(|entry| entry.term).collect();
        if found != expected {
            return Err(AnalyticsError::TermSetMismatch {
                subject: subject_name,
                expected,
                found,
            }
            .into());
        }

        let school: Vec<f64> = entries.iter().filter_map(|entry| entry.school_average).collect();
        let school_average = match school.len() {
            0 => None,
            n if n == entries.len() => Some(school),
            n => {
                return Err(AnalyticsError::SchoolSeriesMismatch {
                    subject: subject_name,
                    scores: entries.len(),
                    school_average: n,
                }
                .into())
            }
        };

        subjects.push(SubjectRecord {
            subject_name,
            scores: entries.iter().map(|entry| entry.score).collect(),
            class_average: entries.iter().map(|entry| entry.class_average).collect(),
            school_average,
            teacher,
        });
    }

    validate_subjects(&subjects)?;
    tracing::debug!(subjects = subjects.len(), terms = expected.len(), "imported scores");

    Ok(ScoreImport {
        terms: expected.iter().map(|term| format!("Term {term}")).collect(),
        subjects,
    })
}

pub fn load_snapshot(path: &Path) -> anyhow::Result<StudentSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot: StudentSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid snapshot", path.display()))?;
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

pub fn save_snapshot(path: &Path, snapshot: &StudentSnapshot) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
