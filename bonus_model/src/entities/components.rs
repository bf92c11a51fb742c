//! Component definitions shared by actors and items.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::mechanics::Ability;

/// Ability scores of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

impl AbilityScores {
    /// Get the raw score of an ability.
    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.strength,
            Ability::Dex => self.dexterity,
            Ability::Con => self.constitution,
            Ability::Int => self.intelligence,
            Ability::Wis => self.wisdom,
            Ability::Cha => self.charisma,
        }
    }

    /// Set the raw score of an ability.
    pub fn set(&mut self, ability: Ability, score: i32) {
        let slot = match ability {
            Ability::Str => &mut self.strength,
            Ability::Dex => &mut self.dexterity,
            Ability::Con => &mut self.constitution,
            Ability::Int => &mut self.intelligence,
            Ability::Wis => &mut self.wisdom,
            Ability::Cha => &mut self.charisma,
        };
        *slot = score;
    }

    /// Calculate the modifier of an ability: `floor((score - 10) / 2)`.
    pub fn modifier(&self, ability: Ability) -> i32 {
        (self.score(ability) - 10).div_euclid(2)
    }

    /// Roll data form: `{ "str": { "value": 16, "mod": 3 }, ... }`.
    pub fn to_roll_data(&self) -> Value {
        let mut abilities = serde_json::Map::new();
        for ability in <Ability as strum::IntoEnumIterator>::iter() {
            abilities.insert(
                ability.to_string(),
                json!({ "value": self.score(ability), "mod": self.modifier(ability) }),
            );
        }
        Value::Object(abilities)
    }
}

/// An active effect on an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub label: String,
    /// Status condition this effect represents (`"prone"`, `"blinded"`).
    #[serde(default)]
    pub status_id: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    /// Suppressed effects exist but currently do nothing, e.g. an item
    /// effect on an unequipped item.
    #[serde(default)]
    pub suppressed: bool,
}

impl ActiveEffect {
    /// Create an enabled effect without a status condition.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status_id: None,
            disabled: false,
            suppressed: false,
        }
    }

    /// Create an enabled status condition effect.
    pub fn status(status_id: impl Into<String>) -> Self {
        let status_id = status_id.into();
        Self {
            label: status_id.clone(),
            status_id: Some(status_id),
            disabled: false,
            suppressed: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn suppressed(mut self) -> Self {
        self.suppressed = true;
        self
    }

    /// Check whether the effect currently applies.
    pub fn is_active(&self) -> bool {
        !self.disabled && !self.suppressed
    }
}

/// Creature type classification. `subtype` and `custom` are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureType {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub custom: String,
}

impl CreatureType {
    /// Create a creature type with only the main value set.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = subtype.into();
        self
    }

    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.custom = custom.into();
        self
    }

    /// Check the classification against filter keys: the exact value, or
    /// the lower-cased subtype or custom label.
    pub fn matches_any(&self, keys: &[String]) -> bool {
        let subtype = self.subtype.to_lowercase();
        let custom = self.custom.to_lowercase();
        keys.iter()
            .any(|key| *key == self.value || *key == subtype || *key == custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifiers() {
        let scores = AbilityScores {
            strength: 18,
            dexterity: 14,
            constitution: 12,
            intelligence: 8,
            wisdom: 10,
            charisma: 9,
        };

        assert_eq!(scores.modifier(Ability::Str), 4);
        assert_eq!(scores.modifier(Ability::Dex), 2);
        assert_eq!(scores.modifier(Ability::Con), 1);
        assert_eq!(scores.modifier(Ability::Int), -1);
        assert_eq!(scores.modifier(Ability::Wis), 0);
        // Odd scores below 10 round down.
        assert_eq!(scores.modifier(Ability::Cha), -1);
    }

    #[test]
    fn test_set_score() {
        let mut scores = AbilityScores::default();
        scores.set(Ability::Dex, 18);
        assert_eq!(scores.score(Ability::Dex), 18);
        assert_eq!(scores.modifier(Ability::Dex), 4);
    }

    #[test]
    fn test_ability_roll_data() {
        let mut scores = AbilityScores::default();
        scores.set(Ability::Int, 17);
        let data = scores.to_roll_data();
        assert_eq!(data["int"]["value"], 17);
        assert_eq!(data["int"]["mod"], 3);
        assert_eq!(data["str"]["mod"], 0);
    }

    #[test]
    fn test_effect_activity() {
        assert!(ActiveEffect::status("prone").is_active());
        assert!(!ActiveEffect::status("prone").disabled().is_active());
        assert!(!ActiveEffect::status("prone").suppressed().is_active());
    }

    #[test]
    fn test_creature_type_matching() {
        let creature = CreatureType::new("humanoid")
            .with_subtype("Elf")
            .with_custom("");
        let keys = |k: &[&str]| k.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert!(creature.matches_any(&keys(&["humanoid"])));
        assert!(creature.matches_any(&keys(&["elf"])));
        assert!(!creature.matches_any(&keys(&["Elf"])));
        assert!(!creature.matches_any(&keys(&["undead"])));
    }
}
