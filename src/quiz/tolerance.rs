//! Answer tolerance
//!
//! A submitted value is accepted when it lies within an absolute tolerance of the
//! expected answer. Without an explicit override the tolerance is 0.5% of the
//! answer's magnitude, floored by a unit-dependent minimum.

use crate::consts::*;
use crate::problem::{Problem, Unit};

/// Absolute tolerance for a problem
pub fn tolerance(problem: &Problem) -> f64 {
    if let Some(explicit) = problem.tolerance {
        return explicit;
    }

    let percent_tolerance = problem.correct_answer.abs() * PERCENT_TOLERANCE_RATIO;
    percent_tolerance.max(min_tolerance(problem))
}

/// Unit-dependent tolerance floor
fn min_tolerance(problem: &Problem) -> f64 {
    match problem.unit {
        Unit::Percent => MIN_TOLERANCE_PERCENT,
        Unit::Bps => MIN_TOLERANCE_BPS,
        _ if problem.correct_answer.abs() < SMALL_ANSWER_THRESHOLD => MIN_TOLERANCE_SMALL,
        _ => MIN_TOLERANCE_DEFAULT,
    }
}

/// Whether `submitted` counts as a correct answer to `problem`
///
/// Callers must pass a finite value; non-numeric input is rejected before evaluation.
pub fn is_correct(submitted: f64, problem: &Problem) -> bool {
    (submitted - problem.correct_answer).abs() <= tolerance(problem)
}
