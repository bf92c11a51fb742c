//! Predicates that read the roll context or the target instead of the subject.

use bonus_model::EffectSource;

use super::includes;
use crate::context::EvaluationContext;

const CONCENTRATION: &str = "concentration";

/// A `"concentration"` entry also matches any concentration save.
pub(super) fn throw_types(keys: &[String], context: &EvaluationContext<'_>) -> bool {
    let Some(throw_type) = context.throw_type else {
        return false;
    };
    includes(keys, throw_type.key()) || (context.is_conc_save && includes(keys, CONCENTRATION))
}

pub(super) fn target_effects(status_ids: &[String], context: &EvaluationContext<'_>) -> bool {
    context
        .target
        .is_some_and(|target| target.has_any_status(status_ids))
}

pub(super) fn creature_types(keys: &[String], context: &EvaluationContext<'_>) -> bool {
    context
        .target
        .is_some_and(|target| target.creature_type.matches_any(keys))
}
