//! Document model for parsed statblocks.
//!
//! - `Statblock` - the root creature document
//! - `Ability` / `AbilityType` - actions and their category
//! - `Effect` - plain text, power roll or costed effect
//! - `Trait` - passive properties with one or more effects
//!
//! Documents are built once by a reader and only read afterwards.

mod ability;
mod effect;
mod statblock;

pub use ability::{Ability, AbilityType};
pub use effect::{CostedEffect, Effect, NamedEffect, PowerRoll, TierKey, TraitEffect};
pub use statblock::{Ev, Statblock, Trait, TraitBody};
