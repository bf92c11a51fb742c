//! Predicates that only apply to items.
//!
//! The registry has already checked that the filter is not empty.

use bonus_model::{
    Ability, ActionType, ItemRequirements, MatchMode, SaveScaling, SpellComponentsFilter,
    WeaponPropertiesFilter,
};

use super::includes;
use crate::context::ItemSubject;

pub(super) fn item_types(subject: &ItemSubject<'_>, keys: &[String]) -> bool {
    includes(keys, subject.item.item_type.as_ref())
}

pub(super) fn base_weapons(subject: &ItemSubject<'_>, keys: &[String]) -> bool {
    let item = subject.item;
    item.is_weapon() && item.base_weapon().is_some_and(|base| includes(keys, base))
}

pub(super) fn damage_types(subject: &ItemSubject<'_>, keys: &[String]) -> bool {
    subject
        .item
        .damage_types()
        .any(|damage_type| includes(keys, damage_type.as_ref()))
}

pub(super) fn spell_schools(subject: &ItemSubject<'_>, keys: &[String]) -> bool {
    let item = subject.item;
    item.is_spell()
        && item
            .spell
            .as_ref()
            .is_some_and(|spell| includes(keys, &spell.school))
}

/// Whether the item's action uses one of the abilities.
///
/// Items on the "default" ability (none set) use: the higher of Str and Dex
/// for finesse weapons (both on a tie), Str for melee weapon attacks, Dex for
/// ranged weapon attacks, and the owner's spellcasting ability for spell
/// attacks and saves. This is the action's ability, not the one setting a
/// save DC; see [`save_abilities`].
pub(super) fn abilities(subject: &ItemSubject<'_>, keys: &[String]) -> bool {
    let ItemSubject { item, owner } = *subject;

    let Some(action_type) = item.action_type else {
        return false;
    };

    if item.ability.is_none() {
        let wants = |ability: Ability| includes(keys, ability.as_ref());

        if item.is_weapon() && item.has_property("fin") {
            let strength = owner.abilities.modifier(Ability::Str);
            let dexterity = owner.abilities.modifier(Ability::Dex);
            if wants(Ability::Str) && strength >= dexterity {
                return true;
            }
            if wants(Ability::Dex) && dexterity >= strength {
                return true;
            }
        }

        match action_type {
            ActionType::Mwak if wants(Ability::Str) => return true,
            ActionType::Rwak if wants(Ability::Dex) => return true,
            action if action.uses_spellcasting() && owner.spellcasting.is_some_and(wants) => {
                return true;
            }
            _ => {}
        }
    }

    item.ability
        .is_some_and(|ability| includes(keys, ability.as_ref()))
}

pub(super) fn spell_components(subject: &ItemSubject<'_>, filter: &SpellComponentsFilter) -> bool {
    let item = subject.item;
    if !item.is_spell() {
        return false;
    }
    let Some(spell) = item.spell.as_ref() else {
        return false;
    };

    let components = &spell.components;
    match filter.match_mode {
        MatchMode::All => filter.types.iter().all(|key| components.has(key)),
        MatchMode::Any => filter.types.iter().any(|key| components.has(key)),
        MatchMode::Unrecognized(_) => false,
    }
}

pub(super) fn spell_levels(subject: &ItemSubject<'_>, levels: &[f64]) -> bool {
    let item = subject.item;
    if !item.is_spell() {
        return false;
    }
    item.spell.as_ref().is_some_and(|spell| {
        let level = f64::from(spell.level);
        levels.iter().any(|candidate| *candidate == level)
    })
}

pub(super) fn attack_types(subject: &ItemSubject<'_>, keys: &[String]) -> bool {
    subject
        .item
        .action_type
        .is_some_and(|action_type| includes(keys, action_type.as_ref()))
}

/// Unfit properties are checked first, so a property listed as both
/// needed and unfit always fails.
pub(super) fn weapon_properties(subject: &ItemSubject<'_>, filter: &WeaponPropertiesFilter) -> bool {
    let item = subject.item;
    if !item.is_weapon() {
        return false;
    }

    if filter.unfit.iter().any(|p| item.has_property(p)) {
        return false;
    }

    if !filter.needed.is_empty() && !filter.needed.iter().any(|p| item.has_property(p)) {
        return false;
    }

    true
}

/// Whether the item's save DC is set by one of the abilities.
pub(super) fn save_abilities(subject: &ItemSubject<'_>, keys: &[String]) -> bool {
    match subject.item.save_scaling() {
        None => false,
        Some(SaveScaling::SPELL) => subject
            .owner
            .spellcasting
            .is_some_and(|ability| includes(keys, ability.as_ref())),
        Some(scaling) => includes(keys, scaling.key()),
    }
}

pub(super) fn item_requirements(subject: &ItemSubject<'_>, requirements: &ItemRequirements) -> bool {
    let item = subject.item;
    requirements.equipped.map_or(true, |equipped| item.equipped == equipped)
        && requirements.attuned.map_or(true, |attuned| item.attuned == attuned)
}
