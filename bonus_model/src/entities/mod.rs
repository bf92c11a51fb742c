//! Documents a bonus can be evaluated against: actors, items and their effects.

mod actor;
mod components;
mod item;

pub use actor::*;
pub use components::*;
pub use item::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roll_data::RollData;

/// Unique identifier for actors and items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that carries active effects.
pub trait EffectSource {
    fn effects(&self) -> &[ActiveEffect];

    /// Check whether at least one enabled, unsuppressed effect has one of
    /// the given status ids.
    fn has_any_status(&self, status_ids: &[String]) -> bool {
        status_ids.iter().any(|id| {
            self.effects()
                .iter()
                .any(|effect| effect.is_active() && effect.status_id.as_deref() == Some(id.as_str()))
        })
    }
}

/// Anything formulas can be resolved against.
pub trait RollDataSource {
    fn roll_data(&self) -> RollData;
}
