//! Shared documents for the engine's unit tests.

use bonus_model::{
    Ability, ActionType, Actor, BonusDefinition, BonusId, Candidate, CreatureType, DamageType,
    Item, SaveScaling, SpellComponents,
};

pub fn strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// Str 16 (+3), Dex 12 (+1), no spellcasting.
pub fn fighter() -> Actor {
    Actor::new("Fighter")
        .with_ability(Ability::Str, 16)
        .with_ability(Ability::Dex, 12)
        .with_creature_type(CreatureType::new("humanoid").with_subtype("Human"))
}

/// Int 18 (+4), casts with Intelligence.
pub fn wizard() -> Actor {
    Actor::new("Wizard")
        .with_ability(Ability::Int, 18)
        .with_spellcasting(Ability::Int)
}

pub fn goblin() -> Actor {
    Actor::new("Goblin")
        .with_ability(Ability::Dex, 14)
        .with_creature_type(CreatureType::new("humanoid").with_subtype("Goblinoid"))
}

/// A finesse melee weapon on the default ability.
pub fn rapier() -> Item {
    Item::weapon("Rapier", "rapier")
        .with_action_type(ActionType::Mwak)
        .with_property("fin")
        .with_damage("1d8 + @mod", DamageType::Piercing)
}

pub fn longbow() -> Item {
    Item::weapon("Longbow", "longbow")
        .with_action_type(ActionType::Rwak)
        .with_property("amm")
        .with_property("hvy")
        .with_property("two")
        .with_damage("1d8 + @mod", DamageType::Piercing)
}

/// Level 3 evocation save spell scaling with the spellcasting ability.
pub fn fireball() -> Item {
    Item::spell("Fireball", "evo", 3)
        .with_action_type(ActionType::Save)
        .with_save_scaling(SaveScaling::SPELL)
        .with_damage("8d6", DamageType::Fire)
        .with_components(SpellComponents {
            vocal: true,
            somatic: true,
            material: true,
            ..Default::default()
        })
}

pub fn candidate(definition: BonusDefinition) -> Candidate {
    (BonusId::generate(), definition)
}
