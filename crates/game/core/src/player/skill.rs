//! Player skills.

use crate::status::EffectKind;

/// One effect of a skill, applied in list order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Deals damage to the enemy through the player attack pipeline, using
    /// `damage` as the base instead of the player's attack.
    Strike { damage: u32 },
    /// Grants the player defense (reduced while weak).
    Guard { defense: u32 },
    /// Applies a status to the enemy.
    Afflict { effect: EffectKind, duration: u32 },
    /// Heals the player.
    Mend { heal: u32 },
}

/// An energy-costed card the player knows.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub energy_cost: u32,
    pub effects: Vec<SkillEffect>,
}

impl Skill {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        energy_cost: u32,
        effects: Vec<SkillEffect>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            energy_cost,
            effects,
        }
    }

    /// Counts as an attack play for passive triggers.
    pub fn is_attack(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, SkillEffect::Strike { .. }))
    }

    /// Counts as a defense play for passive triggers.
    pub fn is_defense(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, SkillEffect::Guard { .. }))
    }
}
