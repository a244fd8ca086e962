use std::fs;

use groupscholar_performance_insights::aggregate::subject_averages;
use groupscholar_performance_insights::config::InsightConfig;
use groupscholar_performance_insights::data::{demo_snapshot, import_csv, load_snapshot, save_snapshot};
use groupscholar_performance_insights::insights::analyze;
use groupscholar_performance_insights::models::{AttendanceRecord, StudentInfo, StudentSnapshot, TrendDirection};
use groupscholar_performance_insights::ranking::{rank, rank_pairs};
use groupscholar_performance_insights::recommend::compose;
use groupscholar_performance_insights::trend::classify;
use groupscholar_performance_insights::AnalyticsError;

#[test]
fn saved_snapshot_loads_back_and_analyzes() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("snapshot.json");

    save_snapshot(&path, &demo_snapshot()).expect("save snapshot");
    let loaded = load_snapshot(&path).expect("load snapshot");
    assert_eq!(loaded, demo_snapshot());

    let insights = analyze(&loaded, &InsightConfig::default()).expect("analyze");
    assert_eq!(insights.comparison.best_subject.name, "Science");
}

#[test]
fn csv_import_feeds_the_pipeline() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let csv_path = dir.path().join("scores.csv");
    fs::write(
        &csv_path,
        "subject,teacher,term,score,class_average\n\
         Mathematics,Mr. Lee,1,70,72\n\
         Mathematics,Mr. Lee,2,82,74\n\
         English,Ms. Carter,1,88,80\n\
         English,Ms. Carter,2,90,81\n",
    )
    .expect("write csv");

    let imported = import_csv(&csv_path).expect("import csv");
    let snapshot = StudentSnapshot {
        student: StudentInfo {
            id: "ST002".to_string(),
            name: "Wong Siu Ming".to_string(),
            class: "4B".to_string(),
            school: "Demo Secondary School".to_string(),
        },
        terms: imported.terms,
        subjects: imported.subjects,
        attendance: AttendanceRecord {
            present: 88.0,
            absent: 6,
            late: 3,
        },
        school_attendance: Some(92.0),
    };

    let insights = analyze(&snapshot, &InsightConfig::default()).expect("analyze");
    assert_eq!(insights.term_averages, vec![79.0, 86.0]);
    assert_eq!(insights.overall_trend.direction, TrendDirection::Improving);
    assert_eq!(insights.comparison.best_subject.name, "English");
    assert_eq!(insights.comparison.worst_subject.name, "Mathematics");
    assert!(insights.recommendations[0].starts_with("Scores rose"));
    assert_eq!(insights.attendance.days_missed, 9);
    assert_eq!(insights.attendance.gap_vs_school, Some(-4.0));
}

#[test]
fn csv_with_misaligned_terms_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let csv_path = dir.path().join("scores.csv");
    fs::write(
        &csv_path,
        "subject,teacher,term,score,class_average\n\
         Mathematics,Mr. Lee,1,60,70\n\
         Mathematics,Mr. Lee,2,80,70\n\
         English,Ms. Carter,2,75,70\n\
         English,Ms. Carter,3,80,70\n",
    )
    .expect("write csv");

    let err = import_csv(&csv_path).expect_err("terms differ between subjects");
    assert!(matches!(
        err.downcast_ref::<AnalyticsError>(),
        Some(AnalyticsError::TermSetMismatch { .. })
    ));
}

#[test]
fn csv_with_nan_score_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let csv_path = dir.path().join("scores.csv");
    fs::write(
        &csv_path,
        "subject,teacher,term,score,class_average\n\
         Mathematics,Mr. Lee,1,NaN,50\n\
         English,Ms. Carter,1,75,70\n",
    )
    .expect("write csv");

    let err = import_csv(&csv_path).expect_err("NaN score");
    assert!(matches!(
        err.downcast_ref::<AnalyticsError>(),
        Some(AnalyticsError::NonFiniteScore { .. })
    ));
}

#[test]
fn snapshot_with_extra_term_labels_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("snapshot.json");
    let mut snapshot = demo_snapshot();
    snapshot.terms.push("Term 5".to_string());
    save_snapshot(&path, &snapshot).expect("save snapshot");

    let err = load_snapshot(&path).expect_err("five labels for four terms");
    assert_eq!(
        err.downcast_ref::<AnalyticsError>(),
        Some(&AnalyticsError::TermLabelMismatch { labels: 5, terms: 4 })
    );
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("insights.json");
    fs::write(&path, r#"{ "trend_threshold": 2.5, "good_attendance": 85 }"#).expect("write config");

    let config = InsightConfig::load(&path).expect("load config");
    assert_eq!(config.trend_threshold, 2.5);
    assert_eq!(config.good_attendance, 85.0);
    assert_eq!(config.excellent_attendance, 95.0);

    let config = InsightConfig::load_or_default(Some(path.as_path())).expect("load config");
    assert_eq!(config.trend_threshold, 2.5);
}

#[test]
fn missing_or_invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    assert!(InsightConfig::load(&dir.path().join("absent.json")).is_err());
    assert!(InsightConfig::load_or_default(Some(dir.path().join("absent.json").as_path())).is_err());

    let path = dir.path().join("inverted.json");
    fs::write(&path, r#"{ "good_attendance": 99 }"#).expect("write config");
    assert!(InsightConfig::load(&path).is_err());
}

#[test]
fn malformed_snapshot_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"student\": 1 }").expect("write json");

    assert!(load_snapshot(&path).is_err());
}

#[test]
fn ranker_output_always_composes() {
    let snapshot = demo_snapshot();
    let averages = subject_averages(&snapshot.subjects).expect("averages");
    let comparison = rank_pairs(&averages).expect("rank");

    for scores in [[80.0, 90.0], [90.0, 80.0], [80.0, 83.0]] {
        let trend = classify(&scores).expect("classify");
        let first = compose(&trend, &comparison);
        assert_eq!(first, compose(&trend, &comparison));
        assert!(first.len() >= 2);
    }

    let single = rank([("History", 0.0)]).expect("rank single");
    let trend = classify(&[80.0, 90.0]).expect("classify");
    assert!(!compose(&trend, &single).is_empty());
}
