//! Shared combatant capabilities.
//!
//! Players and enemies carry the same [`Vitals`] and [`StatusTable`] and obey
//! the same damage, defense, healing and status-tick rules. The rules live as
//! default methods on [`Combatant`]; each variant only exposes its storage.
//!
//! All arithmetic saturates: health and defense can never go negative and
//! health never exceeds its maximum.

use crate::config::CombatConfig;
use crate::status::{EffectKind, StatusTable, StatusTick};

/// Health, defense and offense of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub health: u32,
    pub max_health: u32,
    pub defense: u32,
    pub attack: u32,
}

impl Vitals {
    /// Full health, the given attack and defense.
    ///
    /// A zero maximum is raised to 1 so `max_health > 0` always holds.
    pub fn new(max_health: u32, attack: u32, defense: u32) -> Self {
        let max_health = max_health.max(1);
        Self {
            health: max_health,
            max_health,
            defense,
            attack,
        }
    }

    /// Health as a percentage of maximum (0-100).
    pub fn health_percent(&self) -> u32 {
        (self.health as u64 * 100 / self.max_health.max(1) as u64) as u32
    }
}

/// A participant in a combat session.
pub trait Combatant {
    fn name(&self) -> &str;
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;
    fn statuses(&self) -> &StatusTable;
    fn statuses_mut(&mut self) -> &mut StatusTable;

    fn health(&self) -> u32 {
        self.vitals().health
    }

    fn defense(&self) -> u32 {
        self.vitals().defense
    }

    fn is_defeated(&self) -> bool {
        self.vitals().health == 0
    }

    /// Applies incoming damage and returns the health actually lost.
    ///
    /// `vulnerable` multiplies the amount by 1.5 (floored) first. Defense
    /// absorbs what it can, and is itself reduced by the full multiplied
    /// amount, not just the part it absorbed.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let modified = if self.statuses().has(EffectKind::Vulnerable) {
            amount.saturating_mul(3) / 2
        } else {
            amount
        };

        let vitals = self.vitals_mut();
        let through = modified.saturating_sub(vitals.defense);
        vitals.defense = vitals.defense.saturating_sub(modified);

        let lost = through.min(vitals.health);
        vitals.health -= lost;
        lost
    }

    /// Removes health directly, ignoring defense and statuses.
    fn lose_health(&mut self, amount: u32) -> u32 {
        let vitals = self.vitals_mut();
        let lost = amount.min(vitals.health);
        vitals.health -= lost;
        lost
    }

    /// Grants defense and returns the amount actually added.
    ///
    /// `weak` reduces the grant to 75% (floored).
    fn add_defense(&mut self, amount: u32) -> u32 {
        let granted = if self.statuses().has(EffectKind::Weak) {
            amount.saturating_mul(3) / 4
        } else {
            amount
        };

        let vitals = self.vitals_mut();
        vitals.defense = vitals.defense.saturating_add(granted);
        granted
    }

    /// Restores health up to the maximum and returns the amount restored.
    fn heal(&mut self, amount: u32) -> u32 {
        let vitals = self.vitals_mut();
        let healed = amount.min(vitals.max_health.saturating_sub(vitals.health));
        vitals.health += healed;
        healed
    }

    fn add_status_effect(&mut self, kind: EffectKind, duration: u32) -> bool {
        self.statuses_mut().add(kind, duration);
        true
    }

    /// String-keyed variant of [`Combatant::add_status_effect`]; false for
    /// names that are not effect kinds.
    fn add_status_named(&mut self, name: &str, duration: u32) -> bool {
        self.statuses_mut().add_named(name, duration)
    }

    /// Removes every debuff, returning how many kinds were cleared.
    fn cleanse_debuffs(&mut self) -> usize {
        self.statuses_mut().cleanse_debuffs()
    }

    /// Start-of-turn tick.
    ///
    /// Poison deals `ceil(stacks / 2)`, burning deals the configured flat
    /// amount, then every effect loses one count. Tick damage bypasses
    /// defense.
    fn start_turn(&mut self, config: &CombatConfig) -> StatusTick {
        let statuses = self.statuses();
        let poison_damage = statuses.get(EffectKind::Poisoned).div_ceil(2);
        let burn_damage = if statuses.has(EffectKind::Burning) {
            config.burn_damage
        } else {
            0
        };

        let poison_damage = self.lose_health(poison_damage);
        let burn_damage = self.lose_health(burn_damage);
        self.statuses_mut().decay();

        StatusTick {
            poison_damage,
            burn_damage,
            defeated: self.is_defeated(),
        }
    }

    /// Encrypts up to `count` cards for `duration` turns.
    ///
    /// Returns the number encrypted, or `None` when this combatant has no
    /// cards to encrypt.
    fn encrypt_cards(&mut self, _count: u32, _duration: u32) -> Option<u32> {
        None
    }

    /// Cards the combatant currently holds, if it holds any.
    fn hand_size(&self) -> Option<u32> {
        None
    }
}
