//! Enemy action resolution.
//!
//! One match arm per action and per special id. Resolution never fails
//! outright: an action that cannot apply comes back with `success: false`
//! and a description, and the turn proceeds as a wasted turn.

use crate::combatant::Combatant;
use crate::config::CombatConfig;

use super::{Enemy, EnemyAction, SpecialAbility};

/// Effect the session must carry over future turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingEffect {
    /// Detonates for `damage` once `turns_left` enemy turns have passed.
    Countdown { turns_left: u32, damage: u32 },
    /// Player skills are blocked for `turns` player turns.
    Lockdown { turns: u32 },
}

/// What one enemy action did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub action: EnemyAction,
    pub success: bool,
    pub description: String,
    /// Health the target actually lost.
    pub damage_dealt: u32,
    /// Health the enemy recovered.
    pub healed: u32,
    pub defense_gained: u32,
    pub pending: Option<PendingEffect>,
}

impl ActionOutcome {
    fn new(action: &EnemyAction, description: String) -> Self {
        Self {
            action: action.clone(),
            success: true,
            description,
            damage_dealt: 0,
            healed: 0,
            defense_gained: 0,
            pending: None,
        }
    }

    fn failed(action: &EnemyAction, description: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::new(action, description.into())
        }
    }
}

/// Applies `action` from `enemy` to `target`.
pub fn resolve_action(
    action: &EnemyAction,
    enemy: &mut Enemy,
    target: &mut dyn Combatant,
    config: &CombatConfig,
) -> ActionOutcome {
    let outcome = match action {
        EnemyAction::Attack { damage } => {
            let dealt = target.take_damage(*damage);
            ActionOutcome {
                damage_dealt: dealt,
                ..ActionOutcome::new(
                    action,
                    format!("{} attacks for {} damage.", enemy.name(), dealt),
                )
            }
        }
        EnemyAction::Defend { amount } => {
            let gained = enemy.add_defense(*amount);
            ActionOutcome {
                defense_gained: gained,
                ..ActionOutcome::new(
                    action,
                    format!("{} braces, gaining {} defense.", enemy.name(), gained),
                )
            }
        }
        EnemyAction::Debuff { effect, duration } => {
            target.add_status_effect(*effect, *duration);
            ActionOutcome::new(
                action,
                format!(
                    "{} inflicts {} for {} turn(s).",
                    enemy.name(),
                    effect,
                    duration
                ),
            )
        }
        EnemyAction::Special(special) => resolve_special(action, special, enemy, target, config),
    };

    tracing::debug!(
        enemy = enemy.name(),
        kind = %action.kind(),
        success = outcome.success,
        damage = outcome.damage_dealt,
        "enemy action resolved"
    );
    outcome
}

fn resolve_special(
    action: &EnemyAction,
    special: &SpecialAbility,
    enemy: &mut Enemy,
    target: &mut dyn Combatant,
    config: &CombatConfig,
) -> ActionOutcome {
    match special {
        SpecialAbility::LifeDrain { amount } => {
            let drained = target.lose_health(*amount);
            let healed = enemy.heal(drained);
            ActionOutcome {
                damage_dealt: drained,
                healed,
                ..ActionOutcome::new(
                    action,
                    format!(
                        "{} drains {} health, recovering {}.",
                        enemy.name(),
                        drained,
                        healed
                    ),
                )
            }
        }
        SpecialAbility::MultiHit { hits } => {
            let per_hit = enemy.attack().saturating_mul(2) / 5;
            let dealt: u32 = (0..*hits).map(|_| target.take_damage(per_hit)).sum();
            ActionOutcome {
                damage_dealt: dealt,
                ..ActionOutcome::new(
                    action,
                    format!(
                        "{} strikes {} times for {} total damage.",
                        enemy.name(),
                        hits,
                        dealt
                    ),
                )
            }
        }
        SpecialAbility::Piercing { damage } => {
            let dealt = target.lose_health(*damage);
            ActionOutcome {
                damage_dealt: dealt,
                ..ActionOutcome::new(
                    action,
                    format!(
                        "{} pierces through defense for {} damage.",
                        enemy.name(),
                        dealt
                    ),
                )
            }
        }
        SpecialAbility::HandCrush { damage_per_card } => {
            let Some(hand) = target.hand_size() else {
                return ActionOutcome::failed(action, "There is no hand to crush.");
            };
            let dealt = target.take_damage(hand.saturating_mul(*damage_per_card));
            ActionOutcome {
                damage_dealt: dealt,
                ..ActionOutcome::new(
                    action,
                    format!(
                        "{} crushes {} cards for {} damage.",
                        enemy.name(),
                        hand,
                        dealt
                    ),
                )
            }
        }
        SpecialAbility::Encrypt { cards } => {
            match target.encrypt_cards(*cards, config.encrypt_duration) {
                Some(encrypted) => ActionOutcome::new(
                    action,
                    format!("{} encrypts {} card(s).", enemy.name(), encrypted),
                ),
                None => ActionOutcome::failed(action, "There are no cards to encrypt."),
            }
        }
        SpecialAbility::Purge { heal } => {
            let healed = enemy.heal(*heal);
            let cleansed = enemy.cleanse_debuffs();
            ActionOutcome {
                healed,
                ..ActionOutcome::new(
                    action,
                    format!(
                        "{} purges {} effect(s) and heals {}.",
                        enemy.name(),
                        cleansed,
                        healed
                    ),
                )
            }
        }
        SpecialAbility::Countdown { turns, damage } => ActionOutcome {
            pending: Some(PendingEffect::Countdown {
                turns_left: (*turns).max(1),
                damage: *damage,
            }),
            ..ActionOutcome::new(
                action,
                format!(
                    "{} begins a countdown: {} damage in {} turn(s).",
                    enemy.name(),
                    damage,
                    (*turns).max(1)
                ),
            )
        },
        SpecialAbility::Lockdown { turns } => ActionOutcome {
            pending: Some(PendingEffect::Lockdown { turns: *turns }),
            ..ActionOutcome::new(
                action,
                format!("{} locks down your skills for {} turn(s).", enemy.name(), turns),
            )
        },
        SpecialAbility::Unknown { id } => {
            tracing::warn!(enemy = enemy.name(), special = %id, "unknown special ability");
            ActionOutcome::failed(action, "The enemy's ability fizzled.")
        }
    }
}
