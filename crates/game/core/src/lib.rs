//! Turn-based combat rules shared by every client.
//!
//! `combat-core` resolves a single fight between a [`Player`] and an
//! [`Enemy`]: attacks, skills, items and defend commands, the status effect
//! pipeline, enemy action selection and the specialization triggers that
//! react to play. All state mutation flows through [`CombatSession`]; the
//! rest of the crate is the vocabulary it is built from.
//!
//! The crate performs no I/O. Randomness, inventory storage, event
//! presentation and enemy catalogs are injected through
//! [`CombatSessionBuilder`].
pub mod combatant;
pub mod config;
pub mod enemy;
pub mod error;
pub mod events;
pub mod inventory;
pub mod player;
pub mod rng;
pub mod session;
pub mod specialization;
pub mod status;

pub use combatant::{Combatant, Vitals};
pub use config::CombatConfig;
pub use enemy::{
    ActionKind, ActionOutcome, BattleView, Bestiary, DecisionPolicy, DecisionTree, Enemy,
    EnemyAction, EnemyActionSelector, EnemyBehavior, EnemyCatalog, EnemyCondition, EnemyRecord,
    EnemyTemplate, EnemyTier, PendingEffect, RewardTable, SpecialAbility, SpecialId, SpecialSpec,
    resolve_action,
};
pub use error::{CombatError, CommandError, ErrorSeverity, RestoreError};
pub use events::{AppliedEffect, CombatEvent, EventLog, EventSink, NullSink, Side};
pub use inventory::{Backpack, Inventory, Item, ItemEffect};
pub use player::{Player, PlayerSave, Skill, SkillEffect};
pub use rng::{PcgRandom, RandomSource, SequenceRandom, StdRandom};
pub use session::{
    CardRarity, CombatOutcome, CombatSession, CombatSessionBuilder, Rewards, Turn, TurnReport,
    roll_rewards,
};
pub use specialization::{
    AbilityEffect, AbilityResult, Archetype, EventContext, MasteryGain, PassiveAbility,
    PassiveBonuses, SpecializationEngine, SpecializationRecord, Trigger,
};
pub use status::{EffectKind, StatusEntry, StatusTable, StatusTick};
