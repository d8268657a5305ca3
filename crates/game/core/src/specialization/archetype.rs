//! Archetypes and their passive bonus tables.

/// Player archetype.
///
/// - **Red**: offense; attack grows with mastery
/// - **Blue**: defense; starting defense and bonus health grow with mastery
/// - **Purple**: hybrid; small bonuses to both plus an extra action point
/// - **Neutral**: no specialization
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Archetype {
    Red,
    Blue,
    Purple,
    #[default]
    Neutral,
}

/// Stat bonuses granted by a specialization at a mastery level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveBonuses {
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub action_points: u32,
}

impl PassiveBonuses {
    /// Level at which purple gains its extra action point.
    pub const PURPLE_ACTION_POINT_LEVEL: u32 = 3;

    /// Bonus table lookup.
    pub fn for_level(archetype: Archetype, mastery_level: u32) -> Self {
        let level = mastery_level.max(1);
        match archetype {
            Archetype::Red => Self {
                attack: level.saturating_mul(2),
                ..Self::default()
            },
            Archetype::Blue => Self {
                defense: level.saturating_mul(2),
                max_health: level.saturating_mul(5),
                ..Self::default()
            },
            Archetype::Purple => Self {
                attack: level,
                defense: level,
                action_points: u32::from(level >= Self::PURPLE_ACTION_POINT_LEVEL),
                ..Self::default()
            },
            Archetype::Neutral => Self::default(),
        }
    }

    /// Per-field increase from `previous` to `self`.
    ///
    /// Tables only grow with level, so this never underflows in practice;
    /// it saturates regardless.
    pub fn gained_since(&self, previous: &Self) -> Self {
        Self {
            attack: self.attack.saturating_sub(previous.attack),
            defense: self.defense.saturating_sub(previous.defense),
            max_health: self.max_health.saturating_sub(previous.max_health),
            action_points: self.action_points.saturating_sub(previous.action_points),
        }
    }
}
