//! Predicate registry - one pure predicate per filter kind.
//!
//! [`evaluate`] is the single dispatch point. It applies the shared rule
//! (an empty filter always passes) and then matches the typed filter to its
//! predicate. Item-only predicates fail on actor subjects.

mod actor;
mod item;

use bonus_model::{EffectSource, Filter};

use crate::comparison;
use crate::context::{EvaluationContext, ItemSubject, Subject};

/// Test one filter against the subject.
pub fn evaluate(filter: &Filter, subject: &Subject<'_>, context: &EvaluationContext<'_>) -> bool {
    if filter.is_empty() {
        return true;
    }

    match filter {
        Filter::ItemTypes(keys) => on_item(subject, |s| item::item_types(s, keys)),
        Filter::BaseWeapons(keys) => on_item(subject, |s| item::base_weapons(s, keys)),
        Filter::DamageTypes(keys) => on_item(subject, |s| item::damage_types(s, keys)),
        Filter::SpellSchools(keys) => on_item(subject, |s| item::spell_schools(s, keys)),
        Filter::Abilities(keys) => on_item(subject, |s| item::abilities(s, keys)),
        Filter::SpellComponents(filter) => on_item(subject, |s| item::spell_components(s, filter)),
        Filter::SpellLevels(levels) => on_item(subject, |s| item::spell_levels(s, levels)),
        Filter::AttackTypes(keys) => on_item(subject, |s| item::attack_types(s, keys)),
        Filter::WeaponProperties(filter) => {
            on_item(subject, |s| item::weapon_properties(s, filter))
        }
        Filter::SaveAbilities(keys) => on_item(subject, |s| item::save_abilities(s, keys)),
        Filter::ThrowTypes(keys) => actor::throw_types(keys, context),
        Filter::ArbitraryComparison(comparisons) => {
            comparison::arbitrary_comparison(subject, comparisons, context.target)
        }
        Filter::StatusEffects(status_ids) => subject.has_any_status(status_ids),
        Filter::TargetEffects(status_ids) => actor::target_effects(status_ids, context),
        Filter::CreatureTypes(keys) => actor::creature_types(keys, context),
        Filter::ItemRequirements(requirements) => {
            on_item(subject, |s| item::item_requirements(s, requirements))
        }
    }
}

fn on_item(subject: &Subject<'_>, predicate: impl FnOnce(&ItemSubject<'_>) -> bool) -> bool {
    subject.as_item().is_some_and(predicate)
}

fn includes(keys: &[String], key: &str) -> bool {
    keys.iter().any(|k| k == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, strings};
    use bonus_model::{ActiveEffect, FilterKind, WeaponPropertiesFilter};
    use strum::IntoEnumIterator;

    #[test]
    fn test_empty_filters_always_pass() {
        let actor = fixtures::fighter();
        let rapier = fixtures::rapier();
        let subjects = [Subject::actor(&actor), Subject::item(&rapier, &actor)];

        for kind in FilterKind::iter() {
            let filter = Filter::parse(kind.as_ref(), serde_json::Value::Null).unwrap();
            for subject in &subjects {
                assert!(evaluate(&filter, subject, &EvaluationContext::new()), "{kind}");
            }
        }
    }

    #[test]
    fn test_item_filters_fail_on_actor_subject() {
        let actor = fixtures::fighter();
        let subject = Subject::actor(&actor);
        let context = EvaluationContext::new();

        let filters = [
            Filter::ItemTypes(strings(&["weapon"])),
            Filter::BaseWeapons(strings(&["rapier"])),
            Filter::DamageTypes(strings(&["piercing"])),
            Filter::Abilities(strings(&["str"])),
            Filter::AttackTypes(strings(&["mwak"])),
            Filter::WeaponProperties(WeaponPropertiesFilter {
                needed: vec![],
                unfit: strings(&["two"]),
            }),
        ];
        for filter in &filters {
            assert!(!evaluate(filter, &subject, &context), "{:?}", filter.kind());
        }
    }

    #[test]
    fn test_status_effects_on_either_subject() {
        let actor = fixtures::fighter().with_effect(ActiveEffect::status("blessed"));
        let rapier = fixtures::rapier();
        let filter = Filter::StatusEffects(strings(&["blessed", "hasted"]));
        let context = EvaluationContext::new();

        assert!(evaluate(&filter, &Subject::actor(&actor), &context));
        assert!(evaluate(&filter, &Subject::item(&rapier, &actor), &context));

        let plain = fixtures::fighter();
        assert!(!evaluate(&filter, &Subject::actor(&plain), &context));
    }

    #[test]
    fn test_suppressed_status_does_not_count() {
        let actor = fixtures::fighter().with_effect(ActiveEffect::status("blessed").suppressed());
        let filter = Filter::StatusEffects(strings(&["blessed"]));
        assert!(!evaluate(&filter, &Subject::actor(&actor), &EvaluationContext::new()));
    }
}
