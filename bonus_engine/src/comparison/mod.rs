//! Arbitrary comparisons between roll data formulas.
//!
//! Both sides of a comparison have roll data substituted and are then
//! evaluated as arithmetic. When both evaluate, the operator compares the
//! numbers. When either side does not, the substituted strings are compared
//! instead, and the ordering operators mean containment:
//!
//! | operator | string meaning               |
//! |----------|------------------------------|
//! | `EQ`     | `left == right`              |
//! | `LT` `LE`| `left` is a substring of `right` |
//! | `GT` `GE`| `right` is a substring of `left` |

mod expression;
mod substitute;

pub use expression::{evaluate, EvalError};
pub use substitute::replace_formula_data;

use bonus_model::{Actor, Comparison, ComparisonOperator, RollData, RollDataSource};
use tracing::trace;

use crate::context::Subject;

/// Check every comparison against the subject's roll data, with the
/// target's roll data nested under `target` when there is one.
///
/// A comparison missing either operand fails the whole filter.
pub fn arbitrary_comparison(
    subject: &Subject<'_>,
    comparisons: &[Comparison],
    target: Option<&Actor>,
) -> bool {
    if comparisons
        .iter()
        .any(|c| c.one.is_empty() || c.other.is_empty())
    {
        return false;
    }

    let mut data = subject.roll_data();
    if let Some(target) = target {
        data.insert("target", target.roll_data().into_value());
    }

    comparisons.iter().all(|comparison| compare(comparison, &data))
}

/// Check a single comparison against prepared roll data.
pub fn compare(comparison: &Comparison, data: &RollData) -> bool {
    let left = replace_formula_data(&comparison.one, data);
    let right = replace_formula_data(&comparison.other, data);

    match (evaluate(&left), evaluate(&right)) {
        (Ok(l), Ok(r)) => compare_numbers(comparison.operator, l, r),
        (l, r) => {
            trace!(
                left = %left,
                right = %right,
                left_numeric = l.is_ok(),
                right_numeric = r.is_ok(),
                "comparing as strings"
            );
            compare_strings(comparison.operator, &left, &right)
        }
    }
}

fn compare_numbers(operator: ComparisonOperator, left: f64, right: f64) -> bool {
    match operator {
        ComparisonOperator::Eq => left == right,
        ComparisonOperator::Lt => left < right,
        ComparisonOperator::Gt => left > right,
        ComparisonOperator::Le => left <= right,
        ComparisonOperator::Ge => left >= right,
    }
}

fn compare_strings(operator: ComparisonOperator, left: &str, right: &str) -> bool {
    match operator {
        ComparisonOperator::Eq => left == right,
        ComparisonOperator::Lt | ComparisonOperator::Le => right.contains(left),
        ComparisonOperator::Gt | ComparisonOperator::Ge => left.contains(right),
    }
}
