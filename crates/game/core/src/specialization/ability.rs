//! Triggered passive abilities.
//!
//! Each archetype has a fixed roster; an ability is usable once the mastery
//! level reaches its `unlock_level`. Abilities react to [`Trigger`]s raised by
//! the combat session and describe an [`AbilityEffect`] for the session to
//! apply.

use crate::status::EffectKind;

use super::Archetype;

/// Game events that passive abilities listen for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Trigger {
    /// The player's first attack of the combat.
    FirstAttack,
    /// The first time enemy action costs the player health.
    FirstDamage,
    /// Any attack play (basic attack or attacking skill).
    AttackPlayed,
    /// Any defense play (defend or guarding skill).
    DefensePlayed,
    CombatStart,
    /// The player's turn is handing over to the enemy.
    TurnEnd,
    /// A play whose category differs from the previous play.
    MixedPlay,
    /// Cards played this combat; `count` carries the total.
    CardCount,
    /// Consecutive attack plays; `count` carries the chain length.
    AttackChain,
}

/// What an ability does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Applies a status to the enemy.
    ApplyStatus { effect: EffectKind, duration: u32 },
    /// Multiplies the damage of the play that raised the trigger (percent).
    DamageMultiplier { percent: u32 },
    DrawCards { count: u32 },
    GrantDefense { amount: u32 },
    /// Deals `defense * percent / 100` to the enemy.
    ConvertDefense { percent: u32 },
    GrantActionPoint,
}

/// A roster entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassiveAbility {
    pub id: &'static str,
    pub name: &'static str,
    pub trigger: Trigger,
    /// Percent chance to fire, when present.
    pub chance: Option<u32>,
    /// Minimum `EventContext::count`, when present.
    pub threshold: Option<u32>,
    pub effect: AbilityEffect,
    pub unlock_level: u32,
}

/// Extra data attached to a trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventContext {
    pub count: u32,
}

impl EventContext {
    pub fn with_count(count: u32) -> Self {
        Self { count }
    }
}

/// An ability that fired, and the effect it asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityResult {
    pub ability_id: &'static str,
    pub name: &'static str,
    pub trigger: Trigger,
    pub effect: AbilityEffect,
}

impl From<&PassiveAbility> for AbilityResult {
    fn from(ability: &PassiveAbility) -> Self {
        Self {
            ability_id: ability.id,
            name: ability.name,
            trigger: ability.trigger,
            effect: ability.effect,
        }
    }
}

const RED: &[PassiveAbility] = &[
    PassiveAbility {
        id: "bloodlust",
        name: "Bloodlust",
        trigger: Trigger::FirstAttack,
        chance: None,
        threshold: None,
        effect: AbilityEffect::DamageMultiplier { percent: 150 },
        unlock_level: 1,
    },
    PassiveAbility {
        id: "searing_edge",
        name: "Searing Edge",
        trigger: Trigger::AttackPlayed,
        chance: Some(25),
        threshold: None,
        effect: AbilityEffect::ApplyStatus {
            effect: EffectKind::Burning,
            duration: 2,
        },
        unlock_level: 2,
    },
    PassiveAbility {
        id: "battle_rhythm",
        name: "Battle Rhythm",
        trigger: Trigger::AttackChain,
        chance: None,
        threshold: Some(3),
        effect: AbilityEffect::DrawCards { count: 1 },
        unlock_level: 3,
    },
    PassiveAbility {
        id: "vengeance",
        name: "Vengeance",
        trigger: Trigger::FirstDamage,
        chance: None,
        threshold: None,
        effect: AbilityEffect::ApplyStatus {
            effect: EffectKind::Vulnerable,
            duration: 2,
        },
        unlock_level: 5,
    },
];

const BLUE: &[PassiveAbility] = &[
    PassiveAbility {
        id: "bulwark",
        name: "Bulwark",
        trigger: Trigger::CombatStart,
        chance: None,
        threshold: None,
        effect: AbilityEffect::GrantDefense { amount: 5 },
        unlock_level: 1,
    },
    PassiveAbility {
        id: "riposte",
        name: "Riposte",
        trigger: Trigger::DefensePlayed,
        chance: None,
        threshold: None,
        effect: AbilityEffect::ConvertDefense { percent: 50 },
        unlock_level: 2,
    },
    PassiveAbility {
        id: "frost_ward",
        name: "Frost Ward",
        trigger: Trigger::FirstDamage,
        chance: None,
        threshold: None,
        effect: AbilityEffect::ApplyStatus {
            effect: EffectKind::Weak,
            duration: 2,
        },
        unlock_level: 3,
    },
    PassiveAbility {
        id: "fortress",
        name: "Fortress",
        trigger: Trigger::TurnEnd,
        chance: None,
        threshold: None,
        effect: AbilityEffect::GrantDefense { amount: 3 },
        unlock_level: 5,
    },
];

const PURPLE: &[PassiveAbility] = &[
    PassiveAbility {
        id: "flux",
        name: "Flux",
        trigger: Trigger::MixedPlay,
        chance: None,
        threshold: None,
        effect: AbilityEffect::DrawCards { count: 1 },
        unlock_level: 1,
    },
    PassiveAbility {
        id: "hex",
        name: "Hex",
        trigger: Trigger::AttackPlayed,
        chance: Some(20),
        threshold: None,
        effect: AbilityEffect::ApplyStatus {
            effect: EffectKind::Vulnerable,
            duration: 1,
        },
        unlock_level: 2,
    },
    PassiveAbility {
        id: "momentum",
        name: "Momentum",
        trigger: Trigger::CardCount,
        chance: None,
        threshold: Some(5),
        effect: AbilityEffect::GrantActionPoint,
        unlock_level: 3,
    },
    PassiveAbility {
        id: "entropy",
        name: "Entropy",
        trigger: Trigger::CombatStart,
        chance: None,
        threshold: None,
        effect: AbilityEffect::ApplyStatus {
            effect: EffectKind::Weak,
            duration: 2,
        },
        unlock_level: 5,
    },
];

/// Full ability roster of an archetype, locked entries included.
pub fn roster(archetype: Archetype) -> &'static [PassiveAbility] {
    match archetype {
        Archetype::Red => RED,
        Archetype::Blue => BLUE,
        Archetype::Purple => PURPLE,
        Archetype::Neutral => &[],
    }
}
