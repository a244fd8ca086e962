use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("no data points in {what}")]
    EmptyInput { what: &'static str },
    #[error("need at least {needed} data points, found {found}")]
    InsufficientData { needed: usize, found: usize },
    #[error("division by zero while computing {what}")]
    DivisionByZero { what: &'static str },
    #[error("{subject}: {scores} scores but {class_average} class averages")]
    SeriesLengthMismatch {
        subject: String,
        scores: usize,
        class_average: usize,
    },
    #[error("{subject}: expected {expected} terms, found {found}")]
    TermCountMismatch {
        subject: String,
        expected: usize,
        found: usize,
    },
    #[error("{subject}: terms {found:?} do not match {expected:?}")]
    TermSetMismatch {
        subject: String,
        expected: Vec<u32>,
        found: Vec<u32>,
    },
    #[error("{labels} term labels for {terms} terms of scores")]
    TermLabelMismatch { labels: usize, terms: usize },
    #[error("{subject}: non-finite value in {series}")]
    NonFiniteScore {
        subject: String,
        series: &'static str,
    },
    #[error("{subject}: {scores} scores but {school_average} school averages")]
    SchoolSeriesMismatch {
        subject: String,
        scores: usize,
        school_average: usize,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
