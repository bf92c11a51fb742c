//! # Bonus Model
//!
//! The documents bonus filtering runs against: actors, items, active effects
//! and roll data, plus the bonus definitions themselves with their typed
//! filter sets. This crate holds data only; deciding which bonuses apply
//! lives in `bonus_engine`.

pub mod bonus;
pub mod entities;
pub mod mechanics;
pub mod roll_data;

pub use bonus::*;
pub use entities::*;
pub use mechanics::*;
pub use roll_data::*;
