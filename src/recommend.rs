use crate::aggregate::round_one_decimal;
use crate::models::{ComparativeResult, TrendDirection, TrendResult};

/// Best-to-worst gap, in points, at which subjects stop counting as even.
pub const UNEVEN_GAP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePosition {
    Single,
    Balanced,
    Uneven,
}

pub fn relative_position(comparison: &ComparativeResult) -> RelativePosition {
    if comparison.best_subject.name == comparison.worst_subject.name {
        return RelativePosition::Single;
    }

    let gap = comparison.best_subject.average - comparison.worst_subject.average;
    if gap >= UNEVEN_GAP {
        RelativePosition::Uneven
    } else {
        RelativePosition::Balanced
    }
}

/// Recommendation lines for a trend and a best/worst comparison. The output
/// depends only on the inputs and always lists the trend line first.
pub fn compose(trend: &TrendResult, comparison: &ComparativeResult) -> Vec<String> {
    let best = &comparison.best_subject;
    let worst = &comparison.worst_subject;
    let position = relative_position(comparison);
    let mut lines = Vec::with_capacity(3);

    lines.push(match trend.direction {
        TrendDirection::Improving => format!(
            "Scores rose {:.1}% last term. Keep the current study routine.",
            trend.magnitude_percent
        ),
        TrendDirection::Declining => format!(
            "Scores fell {:.1}% last term. Book a review session with each subject teacher.",
            trend.magnitude_percent
        ),
        TrendDirection::Stable => {
            "Scores held steady last term. Set a small stretch goal for next term.".to_string()
        }
    });

    lines.push(match position {
        RelativePosition::Single => format!(
            "Only {} has results so far. Add more subjects to compare progress.",
            best.name
        ),
        RelativePosition::Balanced => format!(
            "Performance is even across subjects, led by {} ({:.1}).",
            best.name, best.average
        ),
        RelativePosition::Uneven => format!(
            "Give extra practice to {} ({:.1}), which trails {} ({:.1}) by {:.1} points.",
            worst.name,
            worst.average,
            best.name,
            best.average,
            round_one_decimal(best.average - worst.average)
        ),
    });

    let follow_up = match (trend.direction, position) {
        (TrendDirection::Declining, RelativePosition::Uneven) => Some(format!(
            "Put {} first in the weekly plan before the next assessment.",
            worst.name
        )),
        (TrendDirection::Declining, _) => Some(
            "Check homework completion and attendance for the last few weeks.".to_string(),
        ),
        (TrendDirection::Improving, RelativePosition::Balanced) => Some(format!(
            "Consider enrichment work in {} to build on the momentum.",
            best.name
        )),
        (TrendDirection::Stable, RelativePosition::Uneven) => Some(format!(
            "Pair {} revision with {} study time to lift the weaker subject.",
            worst.name, best.name
        )),
        _ => None,
    };
    lines.extend(follow_up);

    lines
}
