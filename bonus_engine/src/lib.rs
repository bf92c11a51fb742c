//! # Bonus Engine
//!
//! Decides which conditional bonuses apply to a roll. Candidate bonus
//! definitions come from a [`BonusSource`]; each one applies only when every
//! filter in its filter set passes for the roll's subject.
//!
//! ## Core Components
//!
//! - **registry**: one predicate per filter kind, dispatched by [`registry::evaluate`]
//! - **comparison**: roll data substitution and safe arithmetic for `arbitraryComparison`
//! - **engine**: the conjunctive evaluation of definitions and its configuration
//! - **checks**: the hit die, saving throw and item checks
//!
//! The current target is read once per check and passed to predicates
//! through the [`EvaluationContext`].

pub mod checks;
pub mod comparison;
pub mod context;
pub mod engine;
pub mod registry;

#[cfg(test)]
mod fixtures;

pub use checks::*;
pub use context::*;
pub use engine::*;
