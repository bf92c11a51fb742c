//! Entry points: the hit die, saving throw and item checks.
//!
//! Each check collects the candidate bonuses for its kind, resolves the
//! current target once, builds the [`EvaluationContext`] and hands
//! everything to the [`FilterEngine`].

use bonus_model::{Actor, BonusKind, BonusPayload, Candidate, Item, ThrowType};
use tracing::{debug, instrument};

use crate::context::{EvaluationContext, Subject};
use crate::engine::FilterEngine;

/// Supplies the candidate bonuses that could apply to an actor's roll.
pub trait BonusSource {
    /// Bonuses the actor carries on itself, its items and its effects.
    fn own_bonuses(&self, actor: &Actor, kind: BonusKind) -> Vec<Candidate>;

    /// Bonuses from auras of nearby actors.
    fn aura_bonuses(&self, _actor: &Actor, _kind: BonusKind) -> Vec<Candidate> {
        Vec::new()
    }

    /// Bonuses from template auras the actor stands in.
    fn template_bonuses(&self, _actor: &Actor, _kind: BonusKind) -> Vec<Candidate> {
        Vec::new()
    }

    /// Own bonuses, then aura bonuses, then template aura bonuses.
    fn collect(&self, actor: &Actor, kind: BonusKind) -> Vec<Candidate> {
        let mut candidates = self.own_bonuses(actor, kind);
        candidates.extend(self.aura_bonuses(actor, kind));
        candidates.extend(self.template_bonuses(actor, kind));
        candidates
    }
}

/// Reads the actor the acting user currently targets.
pub trait TargetProvider {
    fn current_target(&self) -> Option<Actor>;
}

/// A provider for sessions where nothing is ever targeted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTarget;

impl TargetProvider for NoTarget {
    fn current_target(&self) -> Option<Actor> {
        None
    }
}

impl TargetProvider for Option<Actor> {
    fn current_target(&self) -> Option<Actor> {
        self.clone()
    }
}

/// An in-memory [`BonusSource`] holding its three candidate lists.
///
/// Candidates are returned when their definition's kind matches the
/// requested one; the actor is not consulted.
#[derive(Debug, Clone, Default)]
pub struct StaticBonusSource {
    pub own: Vec<Candidate>,
    pub auras: Vec<Candidate>,
    pub templates: Vec<Candidate>,
}

impl StaticBonusSource {
    pub fn new(own: Vec<Candidate>) -> Self {
        Self {
            own,
            ..Default::default()
        }
    }

    pub fn with_auras(mut self, auras: Vec<Candidate>) -> Self {
        self.auras = auras;
        self
    }

    pub fn with_templates(mut self, templates: Vec<Candidate>) -> Self {
        self.templates = templates;
        self
    }

    fn of_kind(candidates: &[Candidate], kind: BonusKind) -> Vec<Candidate> {
        candidates
            .iter()
            .filter(|(_, definition)| definition.kind == kind)
            .cloned()
            .collect()
    }
}

impl BonusSource for StaticBonusSource {
    fn own_bonuses(&self, _actor: &Actor, kind: BonusKind) -> Vec<Candidate> {
        Self::of_kind(&self.own, kind)
    }

    fn aura_bonuses(&self, _actor: &Actor, kind: BonusKind) -> Vec<Candidate> {
        Self::of_kind(&self.auras, kind)
    }

    fn template_bonuses(&self, _actor: &Actor, kind: BonusKind) -> Vec<Candidate> {
        Self::of_kind(&self.templates, kind)
    }
}

/// The roll hooks that run an item check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ItemHook {
    Attack,
    Damage,
    /// Saving throw DC shown on the item's card.
    Save,
}

impl From<ItemHook> for BonusKind {
    fn from(hook: ItemHook) -> Self {
        match hook {
            ItemHook::Attack => BonusKind::Attack,
            ItemHook::Damage => BonusKind::Damage,
            ItemHook::Save => BonusKind::Save,
        }
    }
}

/// Runs the checks against a bonus source and a target provider.
pub struct BonusChecker<S, T> {
    source: S,
    targets: T,
    engine: FilterEngine,
}

impl<S: BonusSource, T: TargetProvider> BonusChecker<S, T> {
    pub fn new(source: S, targets: T) -> Self {
        Self::with_engine(source, targets, FilterEngine::with_defaults())
    }

    pub fn with_engine(source: S, targets: T, engine: FilterEngine) -> Self {
        Self {
            source,
            targets,
            engine,
        }
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Bonuses to an actor's hit die roll.
    #[instrument(skip(self, actor), fields(actor = %actor.name))]
    pub fn hit_die_check(&self, actor: &Actor) -> Vec<BonusPayload> {
        self.run(actor, BonusKind::HitDie, Subject::actor(actor), EvaluationContext::new())
    }

    /// Bonuses to an actor's saving throw.
    #[instrument(skip(self, actor, throw_type), fields(actor = %actor.name, throw = throw_type.key()))]
    pub fn throw_check(
        &self,
        actor: &Actor,
        throw_type: ThrowType,
        is_conc_save: bool,
    ) -> Vec<BonusPayload> {
        self.run(
            actor,
            BonusKind::Throw,
            Subject::actor(actor),
            EvaluationContext::new().with_throw(throw_type, is_conc_save),
        )
    }

    /// Bonuses to an item's attack roll, damage roll or save DC. Candidates
    /// are collected from the item's owner.
    #[instrument(skip(self, item, owner, hook), fields(item = %item.name, actor = %owner.name, %hook))]
    pub fn item_check(&self, item: &Item, owner: &Actor, hook: ItemHook) -> Vec<BonusPayload> {
        self.run(owner, hook.into(), Subject::item(item, owner), EvaluationContext::new())
    }

    fn run(
        &self,
        actor: &Actor,
        kind: BonusKind,
        subject: Subject<'_>,
        context: EvaluationContext<'_>,
    ) -> Vec<BonusPayload> {
        let candidates = self.source.collect(actor, kind);
        if candidates.is_empty() {
            return Vec::new();
        }

        let target = self.targets.current_target();
        let context = context.with_target(target.as_ref());
        let payloads = self.engine.evaluate(&candidates, &subject, &context);

        debug!(
            %kind,
            candidates = candidates.len(),
            applied = payloads.len(),
            targeted = target.is_some(),
            "bonus check finished"
        );
        payloads
    }
}
