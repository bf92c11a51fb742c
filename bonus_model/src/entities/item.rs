//! Item definitions: weapons, spells, features and everything else that rolls.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

use super::EntityId;
use crate::mechanics::{Ability, ActionType, DamageType, ItemType, SaveScaling};

/// One damage part of an item, e.g. `1d8 + @mod` slashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamagePart {
    pub formula: String,
    /// Untyped parts contribute no damage type.
    #[serde(default)]
    pub damage_type: Option<DamageType>,
}

/// Components required to cast a spell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellComponents {
    pub vocal: bool,
    pub somatic: bool,
    pub material: bool,
    pub ritual: bool,
    pub concentration: bool,
}

impl SpellComponents {
    /// Look a component up by key. Unknown keys are never present.
    pub fn has(&self, key: &str) -> bool {
        match key {
            "vocal" => self.vocal,
            "somatic" => self.somatic,
            "material" => self.material,
            "ritual" => self.ritual,
            "concentration" => self.concentration,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDetails {
    /// School key, e.g. `"evo"`. Homebrew schools are allowed.
    pub school: String,
    /// Level the spell is cast at. Upcast spells carry the upcast level.
    pub level: u8,
    #[serde(default)]
    pub components: SpellComponents,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponDetails {
    /// Base weapon key, e.g. `"dagger"`.
    #[serde(default)]
    pub base_item: Option<String>,
    /// Keys of the properties the weapon has, e.g. `"fin"`, `"two"`.
    #[serde(default)]
    pub properties: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDetails {
    /// Ability the target saves with.
    #[serde(default)]
    pub ability: Option<Ability>,
    #[serde(default)]
    pub dc: Option<i32>,
    /// What sets the DC.
    #[serde(default)]
    pub scaling: Option<SaveScaling>,
}

/// An item owned by an actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub item_type: ItemType,

    #[serde(default)]
    pub action_type: Option<ActionType>,
    /// Ability used for the action. `None` means "default", which is
    /// worked out from the action type and weapon properties.
    #[serde(default)]
    pub ability: Option<Ability>,
    #[serde(default)]
    pub damage_parts: Vec<DamagePart>,

    #[serde(default)]
    pub spell: Option<SpellDetails>,
    #[serde(default)]
    pub weapon: Option<WeaponDetails>,
    #[serde(default)]
    pub save: Option<SaveDetails>,

    #[serde(default)]
    pub equipped: bool,
    #[serde(default)]
    pub attuned: bool,

    /// Additional attributes exposed to formulas under `@item`.
    #[serde(default)]
    pub extra_data: Map<String, Value>,
}

impl Item {
    /// Create a new item of the given type.
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            item_type,
            action_type: None,
            ability: None,
            damage_parts: Vec::new(),
            spell: None,
            weapon: None,
            save: None,
            equipped: false,
            attuned: false,
            extra_data: Map::new(),
        }
    }

    /// Create a weapon with a base weapon key.
    pub fn weapon(name: impl Into<String>, base_item: impl Into<String>) -> Self {
        let mut item = Self::new(name, ItemType::Weapon);
        item.weapon = Some(WeaponDetails {
            base_item: Some(base_item.into()),
            properties: BTreeSet::new(),
        });
        item
    }

    /// Create a spell of the given school and cast level.
    pub fn spell(name: impl Into<String>, school: impl Into<String>, level: u8) -> Self {
        let mut item = Self::new(name, ItemType::Spell);
        item.spell = Some(SpellDetails {
            school: school.into(),
            level,
            components: SpellComponents::default(),
        });
        item
    }

    pub fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_damage(mut self, formula: impl Into<String>, damage_type: DamageType) -> Self {
        self.damage_parts.push(DamagePart {
            formula: formula.into(),
            damage_type: Some(damage_type),
        });
        self
    }

    /// Add a weapon property. Creates weapon details if missing.
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.weapon
            .get_or_insert_with(WeaponDetails::default)
            .properties
            .insert(property.into());
        self
    }

    /// Set the spell components. Ignored on non-spell items.
    pub fn with_components(mut self, components: SpellComponents) -> Self {
        if let Some(spell) = self.spell.as_mut() {
            spell.components = components;
        }
        self
    }

    pub fn with_save_scaling(mut self, scaling: SaveScaling) -> Self {
        self.save.get_or_insert_with(SaveDetails::default).scaling = Some(scaling);
        self
    }

    pub fn equipped(mut self, equipped: bool) -> Self {
        self.equipped = equipped;
        self
    }

    pub fn attuned(mut self, attuned: bool) -> Self {
        self.attuned = attuned;
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_data.insert(key.into(), value.into());
        self
    }

    pub fn is_weapon(&self) -> bool {
        self.item_type == ItemType::Weapon
    }

    pub fn is_spell(&self) -> bool {
        self.item_type == ItemType::Spell
    }

    /// Base weapon key, if this is a weapon that has one.
    pub fn base_weapon(&self) -> Option<&str> {
        self.weapon.as_ref()?.base_item.as_deref()
    }

    /// Check whether the item has a weapon property.
    pub fn has_property(&self, property: &str) -> bool {
        self.weapon
            .as_ref()
            .is_some_and(|w| w.properties.contains(property))
    }

    /// Damage types of all typed damage parts, in part order.
    pub fn damage_types(&self) -> impl Iterator<Item = DamageType> + '_ {
        self.damage_parts.iter().filter_map(|part| part.damage_type)
    }

    /// Save scaling, if the item has a save with one.
    pub fn save_scaling(&self) -> Option<SaveScaling> {
        self.save.as_ref()?.scaling
    }

    /// The `@item` object of the owner's roll data.
    pub fn to_roll_data(&self) -> Value {
        let mut data = json!({
            "name": self.name,
            "type": self.item_type.to_string(),
            "actionType": self.action_type.map(|a| a.to_string()).unwrap_or_default(),
            "ability": self.ability.map(|a| a.to_string()).unwrap_or_default(),
            "equipped": self.equipped,
            "attuned": self.attuned,
        });
        if let Some(spell) = &self.spell {
            data["level"] = json!(spell.level);
            data["school"] = json!(spell.school);
        }
        if let Some(dc) = self.save.as_ref().and_then(|s| s.dc) {
            data["save"] = json!({ "dc": dc });
        }
        if let Value::Object(map) = &mut data {
            map.extend(self.extra_data.clone());
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_helpers() {
        let rapier = Item::weapon("Rapier", "rapier")
            .with_property("fin")
            .with_damage("1d8 + @mod", DamageType::Piercing);

        assert!(rapier.is_weapon());
        assert_eq!(rapier.base_weapon(), Some("rapier"));
        assert!(rapier.has_property("fin"));
        assert!(!rapier.has_property("two"));
        assert_eq!(rapier.damage_types().collect::<Vec<_>>(), vec![DamageType::Piercing]);
    }

    #[test]
    fn test_untyped_damage_parts_are_skipped() {
        let mut item = Item::new("Odd Relic", ItemType::Equipment);
        item.damage_parts.push(DamagePart {
            formula: "1d4".into(),
            damage_type: None,
        });
        item = item.with_damage("1d6", DamageType::Fire);

        assert_eq!(item.damage_types().collect::<Vec<_>>(), vec![DamageType::Fire]);
    }

    #[test]
    fn test_spell_components() {
        let spell = Item::spell("Bless", "enc", 1).with_components(SpellComponents {
            vocal: true,
            concentration: true,
            ..Default::default()
        });

        let components = spell.spell.as_ref().unwrap().components;
        assert!(components.has("vocal"));
        assert!(components.has("concentration"));
        assert!(!components.has("material"));
        assert!(!components.has("verbal"));
    }

    #[test]
    fn test_components_ignored_on_non_spell() {
        let item = Item::new("Torch", ItemType::Tool).with_components(SpellComponents {
            vocal: true,
            ..Default::default()
        });
        assert!(item.spell.is_none());
    }

    #[test]
    fn test_item_roll_data() {
        let spell = Item::spell("Fireball", "evo", 3)
            .with_action_type(ActionType::Save)
            .with_save_scaling(SaveScaling::SPELL)
            .with_data("uses", json!({ "value": 2 }));

        let data = spell.to_roll_data();
        assert_eq!(data["type"], "spell");
        assert_eq!(data["actionType"], "save");
        assert_eq!(data["level"], 3);
        assert_eq!(data["uses"]["value"], 2);
    }
}
