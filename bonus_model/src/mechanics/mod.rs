//! Game mechanics: abilities, damage types, item and action categories.
//!
//! Every enum here carries the short lowercase key the rules system stores
//! on documents (`"str"`, `"mwak"`, `"spell"`). Filters hold those keys as
//! plain strings, so predicates compare against [`AsRef<str>`] rather than
//! parsing filter values into enums.

use serde::{Deserialize, Serialize};

/// The six ability scores.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

/// All damage types in the system.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DamageType {
    // Physical
    Slashing,
    Piercing,
    Bludgeoning,

    // Elemental
    Fire,
    Cold,
    Lightning,
    Thunder,
    Acid,

    // Magical
    Radiant,
    Necrotic,
    Force,
    Psychic,

    Poison,

    // Restoration parts share the damage list.
    Healing,
    TempHp,
}

/// Document types an item can have.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Equipment,
    Consumable,
    Tool,
    Loot,
    Backpack,
    Feat,
    Spell,
    Class,
    Subclass,
    Background,
}

/// How an item is used when activated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionType {
    /// Melee weapon attack.
    Mwak,
    /// Ranged weapon attack.
    Rwak,
    /// Melee spell attack.
    Msak,
    /// Ranged spell attack.
    Rsak,
    /// Saving throw.
    Save,
    Heal,
    /// Ability check.
    Abil,
    Util,
    Other,
}

impl ActionType {
    /// Spell attacks and saving throws default to the spellcasting ability.
    pub fn uses_spellcasting(&self) -> bool {
        matches!(self, ActionType::Msak | ActionType::Rsak | ActionType::Save)
    }
}

/// The roll a bonus definition is written for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BonusKind {
    Attack,
    Damage,
    /// Saving throw DC of an item.
    Save,
    /// Saving throw made by an actor.
    Throw,
    HitDie,
}

/// The type of saving throw an actor is making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThrowType {
    Ability(Ability),
    Death(DeathSave),
}

/// Marker for the `"death"` throw type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathSave {
    Death,
}

impl ThrowType {
    pub const DEATH: ThrowType = ThrowType::Death(DeathSave::Death);

    /// The key stored in `throwTypes` filters.
    pub fn key(&self) -> &'static str {
        match self {
            ThrowType::Ability(ability) => (*ability).into(),
            ThrowType::Death(_) => "death",
        }
    }
}

impl From<Ability> for ThrowType {
    fn from(ability: Ability) -> Self {
        ThrowType::Ability(ability)
    }
}

/// What determines the DC of an item's saving throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SaveScaling {
    Ability(Ability),
    Keyword(ScalingKeyword),
}

/// Non-ability save scaling modes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScalingKeyword {
    /// Uses the owner's spellcasting ability.
    Spell,
    /// A fixed DC.
    Flat,
}

impl SaveScaling {
    pub const SPELL: SaveScaling = SaveScaling::Keyword(ScalingKeyword::Spell);
    pub const FLAT: SaveScaling = SaveScaling::Keyword(ScalingKeyword::Flat);

    /// The key stored on the item (`"int"`, `"spell"`, `"flat"`).
    pub fn key(&self) -> &'static str {
        match self {
            SaveScaling::Ability(ability) => (*ability).into(),
            SaveScaling::Keyword(keyword) => (*keyword).into(),
        }
    }
}
