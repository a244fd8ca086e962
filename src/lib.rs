//! Score and attendance analytics behind the student performance dashboard.
//!
//! Data flows one way: subject records are averaged, trends are classified,
//! subjects are ranked, and the results are turned into recommendation lines.

pub mod aggregate;
pub mod attendance;
pub mod config;
pub mod data;
pub mod error;
pub mod insights;
pub mod logging;
pub mod models;
pub mod ranking;
pub mod recommend;
pub mod report;
pub mod trend;

pub use error::{AnalyticsError, Result};
