//! Actor definitions.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{AbilityScores, ActiveEffect, CreatureType, EffectSource, EntityId, RollDataSource};
use crate::mechanics::Ability;
use crate::roll_data::RollData;

/// A character or creature making rolls, or being targeted by them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,

    pub abilities: AbilityScores,
    /// Ability used for spell attacks and spell save DCs.
    pub spellcasting: Option<Ability>,
    pub effects: Vec<ActiveEffect>,
    pub creature_type: CreatureType,

    /// Additional attributes exposed to formulas, merged over the
    /// top level of the roll data.
    #[serde(default)]
    pub extra_data: Map<String, Value>,
}

impl Actor {
    /// Create a new actor with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            abilities: AbilityScores::default(),
            spellcasting: None,
            effects: Vec::new(),
            creature_type: CreatureType::default(),
            extra_data: Map::new(),
        }
    }

    pub fn with_ability(mut self, ability: Ability, score: i32) -> Self {
        self.abilities.set(ability, score);
        self
    }

    pub fn with_spellcasting(mut self, ability: Ability) -> Self {
        self.spellcasting = Some(ability);
        self
    }

    pub fn with_effect(mut self, effect: ActiveEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_creature_type(mut self, creature_type: CreatureType) -> Self {
        self.creature_type = creature_type;
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_data.insert(key.into(), value.into());
        self
    }
}

impl EffectSource for Actor {
    fn effects(&self) -> &[ActiveEffect] {
        &self.effects
    }
}

impl RollDataSource for Actor {
    fn roll_data(&self) -> RollData {
        let mut data = RollData::new();
        data.insert("name", self.name.clone());
        data.insert("abilities", self.abilities.to_roll_data());
        data.insert(
            "attributes",
            json!({
                "spellcasting": self.spellcasting.map(|a| a.to_string()).unwrap_or_default(),
            }),
        );
        data.insert(
            "details",
            json!({
                "type": {
                    "value": self.creature_type.value,
                    "subtype": self.creature_type.subtype,
                    "custom": self.creature_type.custom,
                },
            }),
        );
        data.extend(self.extra_data.clone());
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_actor() {
        let actor = Actor::new("Test Hero");
        assert_eq!(actor.name, "Test Hero");
        assert!(actor.spellcasting.is_none());
        assert!(actor.effects.is_empty());
    }

    #[test]
    fn test_has_any_status() {
        let actor = Actor::new("Doomed")
            .with_effect(ActiveEffect::status("prone"))
            .with_effect(ActiveEffect::status("blinded").disabled());

        assert!(actor.has_any_status(&["deafened".to_string(), "prone".to_string()]));
        assert!(!actor.has_any_status(&["blinded".to_string()]));
    }

    #[test]
    fn test_roll_data() {
        let actor = Actor::new("Wizard")
            .with_ability(Ability::Int, 18)
            .with_spellcasting(Ability::Int)
            .with_creature_type(CreatureType::new("humanoid"))
            .with_data("level", 5);

        let data = actor.roll_data();
        assert_eq!(data.lookup("abilities.int.mod"), Some(&json!(4)));
        assert_eq!(data.lookup("attributes.spellcasting"), Some(&json!("int")));
        assert_eq!(data.lookup("details.type.value"), Some(&json!("humanoid")));
        assert_eq!(data.lookup("level"), Some(&json!(5)));
    }

    #[test]
    fn test_roll_data_without_spellcasting() {
        let data = Actor::new("Fighter").roll_data();
        assert_eq!(data.lookup("attributes.spellcasting"), Some(&json!("")));
    }
}
