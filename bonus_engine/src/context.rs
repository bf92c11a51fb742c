//! What a filter pass evaluates against: the subject and the per-call extras.

use bonus_model::{ActiveEffect, Actor, EffectSource, Item, RollData, RollDataSource, ThrowType};

/// An item together with the actor that owns it.
#[derive(Debug, Clone, Copy)]
pub struct ItemSubject<'a> {
    pub item: &'a Item,
    pub owner: &'a Actor,
}

/// Effects are read from the owner.
impl EffectSource for ItemSubject<'_> {
    fn effects(&self) -> &[ActiveEffect] {
        &self.owner.effects
    }
}

/// The owner's roll data with the item nested under `item`.
impl RollDataSource for ItemSubject<'_> {
    fn roll_data(&self) -> RollData {
        let mut data = self.owner.roll_data();
        data.insert("item", self.item.to_roll_data());
        data
    }
}

/// The document a bonus is tested against.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// Attack, damage and save DC rolls of an item.
    Item(ItemSubject<'a>),
    /// Saving throws and hit die rolls of an actor.
    Actor(&'a Actor),
}

impl<'a> Subject<'a> {
    pub fn item(item: &'a Item, owner: &'a Actor) -> Self {
        Subject::Item(ItemSubject { item, owner })
    }

    pub fn actor(actor: &'a Actor) -> Self {
        Subject::Actor(actor)
    }

    pub fn as_item(&self) -> Option<&ItemSubject<'a>> {
        match self {
            Subject::Item(subject) => Some(subject),
            Subject::Actor(_) => None,
        }
    }

    /// The actor making the roll: the subject itself, or the item's owner.
    pub fn actor_ref(&self) -> &'a Actor {
        match self {
            Subject::Item(subject) => subject.owner,
            Subject::Actor(actor) => actor,
        }
    }
}

impl EffectSource for Subject<'_> {
    fn effects(&self) -> &[ActiveEffect] {
        &self.actor_ref().effects
    }
}

impl RollDataSource for Subject<'_> {
    fn roll_data(&self) -> RollData {
        match self {
            Subject::Item(subject) => subject.roll_data(),
            Subject::Actor(actor) => actor.roll_data(),
        }
    }
}

/// Per-call extras threaded to every predicate of one filter pass.
///
/// `target` is a snapshot taken once when the pass starts; predicates never
/// look the current target up themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationContext<'a> {
    /// Ability (or `death`) of the saving throw being rolled.
    pub throw_type: Option<ThrowType>,
    /// Whether the saving throw is a concentration save.
    pub is_conc_save: bool,
    pub target: Option<&'a Actor>,
}

impl<'a> EvaluationContext<'a> {
    /// A context with no throw details and no target.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_throw(mut self, throw_type: ThrowType, is_conc_save: bool) -> Self {
        self.throw_type = Some(throw_type);
        self.is_conc_save = is_conc_save;
        self
    }

    pub fn with_target(mut self, target: Option<&'a Actor>) -> Self {
        self.target = target;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use serde_json::json;

    #[test]
    fn test_item_subject_reads_owner_effects() {
        let owner = fixtures::fighter().with_effect(ActiveEffect::status("prone"));
        let rapier = fixtures::rapier();
        let subject = Subject::item(&rapier, &owner);

        assert!(subject.has_any_status(&fixtures::strings(&["prone"])));
        assert_eq!(subject.actor_ref().name, owner.name);
    }

    #[test]
    fn test_item_subject_roll_data() {
        let owner = fixtures::wizard();
        let fireball = fixtures::fireball();
        let data = Subject::item(&fireball, &owner).roll_data();

        assert_eq!(data.lookup("abilities.int.mod"), Some(&json!(4)));
        assert_eq!(data.lookup("item.level"), Some(&json!(3)));
        assert_eq!(data.lookup("item.type"), Some(&json!("spell")));
    }

    #[test]
    fn test_actor_subject() {
        let actor = fixtures::fighter();
        let subject = Subject::actor(&actor);

        assert!(subject.as_item().is_none());
        assert_eq!(
            subject.roll_data().lookup("abilities.str.value"),
            Some(&json!(16))
        );
    }
}
