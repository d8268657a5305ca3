//! Player specializations: archetype passives, triggered abilities and mastery.
//!
//! A specialization is a pure function of `(archetype, mastery_level)`:
//! - [`PassiveBonuses`] raise the player's base stats
//! - [`PassiveAbility`] entries react to [`Trigger`]s raised by the session
//!
//! [`SpecializationEngine`] owns the progression state and recomputes both
//! whenever the mastery level changes.

pub mod ability;
pub mod archetype;
pub mod engine;

pub use ability::{AbilityEffect, AbilityResult, EventContext, PassiveAbility, Trigger, roster};
pub use archetype::{Archetype, PassiveBonuses};
pub use engine::{MasteryGain, SpecializationEngine, SpecializationRecord};
