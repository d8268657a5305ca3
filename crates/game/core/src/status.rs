//! Status effect table for combatants.
//!
//! Status effects are duration-bearing modifiers. Each kind occupies at most
//! one slot and stores a remaining count: turns for most effects, stacks for
//! the damage-over-time effects.
//!
//! # Stacking
//!
//! - **Additive** (`poisoned`, `burning`): new applications add to the count
//! - **Max-refresh** (everything else): the count becomes `max(current, new)`
//!
//! A count of zero means the effect is absent; zero entries are never stored.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Kinds of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Incoming damage is multiplied by 1.5 before defense.
    Vulnerable,

    /// Defense gains are multiplied by 0.75.
    Weak,

    /// Deals `ceil(stacks / 2)` at turn start, then loses one stack.
    Poisoned,

    /// Deals a flat amount at turn start, then loses one stack.
    Burning,

    /// Enemies cannot use special abilities while frozen.
    Frozen,

    /// The next turn is skipped.
    Stunned,

    /// Some of the player's cards are unreadable until this expires.
    Encrypted,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Halves poison and burn damage taken at turn start.
    AdaptiveResist,
}

/// How a new application combines with an existing count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackPolicy {
    Additive,
    MaxRefresh,
}

impl EffectKind {
    pub const ALL: [EffectKind; CombatConfig::MAX_STATUS_EFFECTS] = [
        EffectKind::Vulnerable,
        EffectKind::Weak,
        EffectKind::Poisoned,
        EffectKind::Burning,
        EffectKind::Frozen,
        EffectKind::Stunned,
        EffectKind::Encrypted,
        EffectKind::AdaptiveResist,
    ];

    pub const fn stack_policy(self) -> StackPolicy {
        match self {
            EffectKind::Poisoned | EffectKind::Burning => StackPolicy::Additive,
            _ => StackPolicy::MaxRefresh,
        }
    }

    /// Debuffs are what a cleanse removes.
    pub const fn is_debuff(self) -> bool {
        !matches!(self, EffectKind::AdaptiveResist)
    }
}

/// A single stored effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEntry {
    pub kind: EffectKind,
    pub remaining: u32,
}

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTable {
    entries: ArrayVec<StatusEntry, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    /// Remaining count for a kind (0 if absent).
    pub fn get(&self, kind: EffectKind) -> u32 {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.remaining)
    }

    /// Checks if an effect is active.
    pub fn has(&self, kind: EffectKind) -> bool {
        self.get(kind) > 0
    }

    /// Applies an effect according to its stack policy.
    ///
    /// A zero duration leaves the table unchanged.
    pub fn add(&mut self, kind: EffectKind, duration: u32) {
        if duration == 0 {
            return;
        }

        if let Some(existing) = self.entries.iter_mut().find(|e| e.kind == kind) {
            existing.remaining = match kind.stack_policy() {
                StackPolicy::Additive => existing.remaining.saturating_add(duration),
                StackPolicy::MaxRefresh => existing.remaining.max(duration),
            };
            return;
        }

        // One slot per kind, so this never overflows.
        let _ = self.entries.try_push(StatusEntry {
            kind,
            remaining: duration,
        });
    }

    /// Applies an effect named by its snake_case id.
    ///
    /// Returns false, leaving the table untouched, when the name is not a
    /// recognized effect kind.
    pub fn add_named(&mut self, name: &str, duration: u32) -> bool {
        match name.parse::<EffectKind>() {
            Ok(kind) => {
                self.add(kind, duration);
                true
            }
            Err(_) => {
                tracing::debug!(name, "ignoring unknown status effect");
                false
            }
        }
    }

    /// Removes an effect, returning the count it had.
    pub fn clear(&mut self, kind: EffectKind) -> u32 {
        let before = self.get(kind);
        self.entries.retain(|e| e.kind != kind);
        before
    }

    /// Removes every debuff, returning how many kinds were removed.
    pub fn cleanse_debuffs(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.kind.is_debuff());
        before - self.entries.len()
    }

    /// Decrements every count by one and drops those that reach zero.
    ///
    /// Returns the kinds that expired on this call.
    pub fn decay(&mut self) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        for entry in self.entries.iter_mut() {
            entry.remaining = entry.remaining.saturating_sub(1);
            if entry.remaining == 0 {
                expired.push(entry.kind);
            }
        }
        self.entries.retain(|e| e.remaining > 0);
        expired
    }

    /// Returns an iterator over active effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter()
    }

    /// Returns true if no effects are active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the start-of-turn tick did to a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTick {
    pub poison_damage: u32,
    pub burn_damage: u32,
    pub defeated: bool,
}

impl StatusTick {
    pub fn total_damage(&self) -> u32 {
        self.poison_damage + self.burn_damage
    }
}
