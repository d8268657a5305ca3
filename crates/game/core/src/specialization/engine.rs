//! Mastery progression and trigger dispatch.

use crate::config::CombatConfig;
use crate::rng::RandomSource;

use super::ability::{AbilityResult, EventContext, PassiveAbility, Trigger, roster};
use super::archetype::{Archetype, PassiveBonuses};

/// Outcome of [`SpecializationEngine::gain_mastery_xp`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MasteryGain {
    pub leveled_up: bool,
    pub levels_gained: u32,
    pub new_level: u32,
    /// Abilities whose unlock level equals `new_level`.
    pub unlocked_abilities: Vec<&'static str>,
}

/// Flat persisted form of a [`SpecializationEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecializationRecord {
    pub archetype: Archetype,
    pub mastery_level: u32,
    pub mastery_xp: u32,
    pub mastery_xp_required: u32,
}

impl Default for SpecializationRecord {
    fn default() -> Self {
        Self {
            archetype: Archetype::Neutral,
            mastery_level: 1,
            mastery_xp: 0,
            mastery_xp_required: CombatConfig::BASE_MASTERY_XP_REQUIRED,
        }
    }
}

/// A player's specialization state.
///
/// Only the archetype and the mastery counters are stored. Unlocked
/// abilities and passive bonuses are looked up from `(archetype, level)` on
/// every access, so they cannot fall out of step with the level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecializationEngine {
    archetype: Archetype,
    mastery_level: u32,
    mastery_xp: u32,
    mastery_xp_required: u32,
}

impl SpecializationEngine {
    /// Fresh specialization at mastery level 1.
    pub fn new(archetype: Archetype) -> Self {
        Self::from_record(SpecializationRecord {
            archetype,
            ..SpecializationRecord::default()
        })
    }

    /// Rebuilds an engine from a persisted record.
    ///
    /// A zero level is read as 1 and a zero XP requirement falls back to
    /// [`CombatConfig::BASE_MASTERY_XP_REQUIRED`].
    pub fn from_record(record: SpecializationRecord) -> Self {
        let mastery_xp_required = match record.mastery_xp_required {
            0 => CombatConfig::BASE_MASTERY_XP_REQUIRED,
            required => required,
        };
        Self {
            archetype: record.archetype,
            mastery_level: record.mastery_level.max(1),
            mastery_xp: record.mastery_xp,
            mastery_xp_required,
        }
    }

    pub fn to_record(&self) -> SpecializationRecord {
        SpecializationRecord {
            archetype: self.archetype,
            mastery_level: self.mastery_level,
            mastery_xp: self.mastery_xp,
            mastery_xp_required: self.mastery_xp_required,
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn mastery_level(&self) -> u32 {
        self.mastery_level
    }

    pub fn mastery_xp(&self) -> u32 {
        self.mastery_xp
    }

    pub fn mastery_xp_required(&self) -> u32 {
        self.mastery_xp_required
    }

    pub fn passive_bonuses(&self) -> PassiveBonuses {
        PassiveBonuses::for_level(self.archetype, self.mastery_level)
    }

    /// Abilities available at the current mastery level.
    pub fn unlocked_abilities(&self) -> impl Iterator<Item = &'static PassiveAbility> + '_ {
        roster(self.archetype)
            .iter()
            .filter(move |ability| ability.unlock_level <= self.mastery_level)
    }

    /// Fires the first unlocked ability listening for `trigger`.
    ///
    /// A chance-gated ability consumes one roll and does nothing when it
    /// misses. A threshold-gated ability does nothing while
    /// `context.count` is below its threshold. Only the first matching
    /// ability is considered.
    pub fn process_game_event(
        &self,
        trigger: Trigger,
        context: &EventContext,
        rng: &mut dyn RandomSource,
    ) -> Option<AbilityResult> {
        let ability = self
            .unlocked_abilities()
            .find(|ability| ability.trigger == trigger)?;

        if let Some(chance) = ability.chance {
            if !rng.chance(chance) {
                tracing::trace!(ability = ability.id, chance, "ability roll missed");
                return None;
            }
        }

        if ability.threshold.is_some_and(|threshold| context.count < threshold) {
            return None;
        }

        tracing::debug!(ability = ability.id, %trigger, "ability triggered");
        Some(AbilityResult::from(ability))
    }

    /// Adds mastery XP, applying as many level-ups as it pays for.
    ///
    /// Each level-up spends the current requirement and then raises it by
    /// half (floored), and always by at least one. Levels stop at `u32::MAX`.
    pub fn gain_mastery_xp(&mut self, amount: u32) -> MasteryGain {
        let start_level = self.mastery_level;
        self.mastery_xp = self.mastery_xp.saturating_add(amount);

        while self.mastery_xp >= self.mastery_xp_required && self.mastery_level < u32::MAX {
            let required = self.mastery_xp_required;
            self.mastery_xp -= required;
            self.mastery_level += 1;
            self.mastery_xp_required = (required.saturating_mul(3) / 2).max(required.saturating_add(1));
        }

        let levels_gained = self.mastery_level - start_level;
        let unlocked_abilities = if levels_gained > 0 {
            roster(self.archetype)
                .iter()
                .filter(|ability| ability.unlock_level == self.mastery_level)
                .map(|ability| ability.id)
                .collect()
        } else {
            Vec::new()
        };

        if levels_gained > 0 {
            tracing::debug!(
                archetype = %self.archetype,
                level = self.mastery_level,
                levels_gained,
                "mastery level up"
            );
        }

        MasteryGain {
            leveled_up: levels_gained > 0,
            levels_gained,
            new_level: self.mastery_level,
            unlocked_abilities,
        }
    }
}

impl Default for SpecializationEngine {
    fn default() -> Self {
        Self::new(Archetype::Neutral)
    }
}
