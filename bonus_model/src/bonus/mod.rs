//! Bonus definitions: a payload of formulas plus the filters gating it.

mod filter;

pub use filter::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mechanics::BonusKind;

/// Identifier of a bonus, unique within the collection that supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BonusId(pub String);

impl BonusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random 16 character id.
    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(16);
        Self(id)
    }
}

impl std::fmt::Display for BonusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The formulas a bonus adds to a roll. Never parsed by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusPayload {
    /// Added to the roll, e.g. `"1d4 + @abilities.int.mod"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<String>,
    /// Extra dice on a critical hit (damage only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_bonus_dice: Option<String>,
    /// Extra damage on a critical hit (damage only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_bonus_damage: Option<String>,
    /// Death save target value (throw only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_save_target_value: Option<String>,
    /// Lowers the critical range (attack only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_range: Option<String>,
    /// Raises the fumble range (attack only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fumble_range: Option<String>,
}

impl BonusPayload {
    /// A payload with only the main bonus formula.
    pub fn bonus(formula: impl Into<String>) -> Self {
        Self {
            bonus: Some(formula.into()),
            ..Default::default()
        }
    }
}

/// A declarative bonus: applies when every filter passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: BonusKind,
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default)]
    pub bonuses: BonusPayload,
}

impl BonusDefinition {
    /// Create an enabled definition without filters.
    pub fn new(name: impl Into<String>, kind: BonusKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            enabled: true,
            kind,
            filters: FilterSet::new(),
            bonuses: BonusPayload::default(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.insert(filter);
        self
    }

    pub fn with_bonuses(mut self, bonuses: BonusPayload) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_bonus(self, formula: impl Into<String>) -> Self {
        self.with_bonuses(BonusPayload::bonus(formula))
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A definition paired with its id, as supplied to the engine.
pub type Candidate = (BonusId, BonusDefinition);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids() {
        let a = BonusId::generate();
        let b = BonusId::generate();
        assert_eq!(a.0.len(), 16);
        assert_ne!(a, b);
    }

    #[test]
    fn test_deserialize_definition() {
        let definition: BonusDefinition = serde_json::from_value(json!({
            "id": "hgienfid783h0000",
            "enabled": true,
            "type": "damage",
            "name": "Special Fire Spell Bonus",
            "bonuses": {
                "bonus": "1d4 + @abilities.int.mod",
                "criticalBonusDamage": "4d6 + 2"
            },
            "filters": {
                "damageTypes": ["fire"],
                "spellLevels": ["3", "4"]
            }
        }))
        .unwrap();

        assert_eq!(definition.kind, BonusKind::Damage);
        assert_eq!(definition.filters.len(), 2);
        assert!(!definition.filters.has_errors());
        assert_eq!(definition.bonuses.bonus.as_deref(), Some("1d4 + @abilities.int.mod"));
        assert_eq!(definition.bonuses.critical_bonus_damage.as_deref(), Some("4d6 + 2"));
        assert!(definition.bonuses.fumble_range.is_none());
    }

    #[test]
    fn test_deserialize_without_filters() {
        let definition: BonusDefinition = serde_json::from_value(json!({
            "enabled": false,
            "type": "hitdie",
            "bonuses": { "bonus": "2" }
        }))
        .unwrap();

        assert!(!definition.enabled);
        assert!(definition.filters.is_empty());
    }

    #[test]
    fn test_builder() {
        let definition = BonusDefinition::new("Blessed Strikes", BonusKind::Attack)
            .with_filter(Filter::AttackTypes(vec!["mwak".into()]))
            .with_bonus("1d4");

        assert!(definition.enabled);
        assert_eq!(definition.filters.len(), 1);
        assert_eq!(definition.bonuses, BonusPayload::bonus("1d4"));
        assert!(!definition.disabled().enabled);
    }
}
