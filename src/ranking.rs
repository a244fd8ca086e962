use crate::error::{AnalyticsError, Result};
use crate::models::{ComparativeResult, SubjectStanding};

/// Finds the best and worst subject by average.
///
/// Only a strictly higher (or lower) average replaces the current pick, so
/// on ties the subject yielded first by `averages` wins. Pass a slice to
/// keep insertion order or a `BTreeMap` for alphabetical order.
pub fn rank<'a, I>(averages: I) -> Result<ComparativeResult>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut iter = averages.into_iter();
    let (first_name, first_average) = iter
        .next()
        .ok_or(AnalyticsError::EmptyInput { what: "subject averages" })?;

    let mut best = (first_name, first_average);
    let mut worst = (first_name, first_average);

    for (name, average) in iter {
        if average > best.1 {
            best = (name, average);
        }
        if average < worst.1 {
            worst = (name, average);
        }
    }

    Ok(ComparativeResult {
        best_subject: SubjectStanding {
            name: best.0.to_string(),
            average: best.1,
        },
        worst_subject: SubjectStanding {
            name: worst.0.to_string(),
            average: worst.1,
        },
    })
}

/// Adapter for the owned `(name, average)` pairs produced by
/// `aggregate::subject_averages`.
pub fn rank_pairs(averages: &[(String, f64)]) -> Result<ComparativeResult> {
    rank(averages.iter().map(|(name, average)| (name.as_str(), *average)))
}
