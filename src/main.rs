use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

use groupscholar_performance_insights::config::InsightConfig;
use groupscholar_performance_insights::models::{
    AttendanceRecord, StudentInfo, StudentInsights, StudentSnapshot,
};
use groupscholar_performance_insights::{data, insights, logging, report};

#[derive(Parser)]
#[command(name = "performance-insights")]
#[command(about = "Score and attendance insights for the student dashboard", long_about = None)]
struct Cli {
    /// JSON file overriding the default thresholds
    #[arg(long, global = true, env = "INSIGHTS_CONFIG")]
    config: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the demo student snapshot as JSON
    Seed {
        #[arg(long, default_value = "snapshot.json")]
        out: PathBuf,
    },
    /// Build a snapshot from a CSV of per-term scores
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        class: String,
        #[arg(long, default_value = "")]
        id: String,
        #[arg(long, default_value = "")]
        school: String,
        #[arg(long, default_value_t = 100.0)]
        present: f64,
        #[arg(long, default_value_t = 0)]
        absent: u32,
        #[arg(long, default_value_t = 0)]
        late: u32,
        /// School-wide attendance percentage for comparison
        #[arg(long)]
        school_attendance: Option<f64>,
        #[arg(long, default_value = "snapshot.json")]
        out: PathBuf,
    },
    /// Print averages, trend, standing and recommendations
    Summary {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn load_input(input: Option<&Path>) -> anyhow::Result<StudentSnapshot> {
    match input {
        Some(path) => data::load_snapshot(path),
        None => {
            tracing::info!("no input given, using the demo snapshot");
            Ok(data::demo_snapshot())
        }
    }
}

fn analyze_input(input: Option<&Path>, config: &InsightConfig) -> anyhow::Result<StudentInsights> {
    let snapshot = load_input(input)?;
    insights::analyze(&snapshot, config)
        .with_context(|| format!("failed to analyze scores for {}", snapshot.student.name))
}

fn print_summary(insights: &StudentInsights) {
    println!(
        "{} ({}) across {} terms",
        insights.student.name,
        insights.student.class,
        insights.terms.len()
    );
    for subject in &insights.subjects {
        let trend = subject
            .trend
            .map(|t| t.direction.label())
            .unwrap_or("n/a");
        let school = subject
            .school_average
            .map(|average| format!(", school {average:.1}"))
            .unwrap_or_default();
        println!(
            "- {}: average {:.1}, class {:.1}{}, trend {}",
            subject.subject_name, subject.average, subject.class_average, school, trend
        );
    }
    println!(
        "Best {} ({:.1}), worst {} ({:.1})",
        insights.comparison.best_subject.name,
        insights.comparison.best_subject.average,
        insights.comparison.worst_subject.name,
        insights.comparison.worst_subject.average
    );
    println!(
        "Overall trend {} ({:.1}%), attendance {:.1}% ({})",
        insights.overall_trend.direction.label(),
        insights.overall_trend.magnitude_percent,
        insights.attendance.rate_percent,
        insights.attendance.band.label()
    );
    println!(
        "Absent {} days, late {} days ({} days missed)",
        insights.attendance.absent, insights.attendance.late, insights.attendance.days_missed
    );
    if let Some(gap) = insights.attendance.gap_vs_school {
        println!("Attendance vs school: {gap:+.1} points");
    }
    println!("Recommendations:");
    for line in &insights.recommendations {
        println!("- {line}");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = InsightConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Seed { out } => {
            data::save_snapshot(&out, &data::demo_snapshot())?;
            println!("Demo snapshot written to {}.", out.display());
        }
        Commands::Import {
            csv,
            name,
            class,
            id,
            school,
            present,
            absent,
            late,
            school_attendance,
            out,
        } => {
            let imported = data::import_csv(&csv)?;
            let snapshot = StudentSnapshot {
                student: StudentInfo {
                    id,
                    name,
                    class,
                    school,
                },
                terms: imported.terms,
                subjects: imported.subjects,
                attendance: AttendanceRecord {
                    present,
                    absent,
                    late,
                },
                school_attendance,
            };
            data::save_snapshot(&out, &snapshot)?;
            println!(
                "Imported {} subjects from {} into {}.",
                snapshot.subjects.len(),
                csv.display(),
                out.display()
            );
        }
        Commands::Summary { input, json } => {
            let insights = analyze_input(input.as_deref(), &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
            } else {
                print_summary(&insights);
            }
        }
        Commands::Report { input, out } => {
            let insights = analyze_input(input.as_deref(), &config)?;
            let report = report::build_report(&insights, Utc::now().date_naive());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
