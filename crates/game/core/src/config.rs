/// Combat balance constants and tunable parameters.
///
/// Every field has a default, so a TOML file only needs to name the values it
/// overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Flat damage dealt by `burning` at the start of each turn.
    pub burn_damage: u32,
    /// Chance (0-100) that a player attack is a critical hit.
    pub crit_chance: u32,
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: u32,
    /// Lowest damage a landed player attack can deal after defense.
    pub minimum_damage: u32,
    /// Defense granted by the defend command before the `weak` penalty.
    pub defend_amount: u32,
    /// Turns of `vulnerable` applied by a basic enemy debuff.
    pub debuff_duration: u32,
    /// Turns the `encrypted` status lasts after cards are encrypted.
    pub encrypt_duration: u32,
    /// Upper bound for the player's hand size.
    pub max_hand_size: u32,
    /// Chance (0-100) that an elite drops an uncommon card.
    pub elite_drop_chance: u32,
    /// Chance (0-100) that a normal enemy drops a common card.
    pub normal_drop_chance: u32,
    /// Mastery XP granted for defeating a normal enemy.
    pub normal_mastery_xp: u32,
    /// Mastery XP granted for defeating an elite.
    pub elite_mastery_xp: u32,
    /// Mastery XP granted for defeating a boss.
    pub boss_mastery_xp: u32,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// One slot per status effect kind.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Mastery XP needed to go from level 1 to level 2.
    pub const BASE_MASTERY_XP_REQUIRED: u32 = 100;
    /// Per-level enemy scaling step, in fifths (0.2 per level).
    pub const LEVEL_SCALING_FIFTHS: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BURN_DAMAGE: u32 = 3;
    pub const DEFAULT_CRIT_CHANCE: u32 = 10;
    pub const DEFAULT_CRIT_MULTIPLIER: u32 = 2;
    pub const DEFAULT_MINIMUM_DAMAGE: u32 = 1;
    pub const DEFAULT_DEFEND_AMOUNT: u32 = 5;
    pub const DEFAULT_DEBUFF_DURATION: u32 = 2;
    pub const DEFAULT_ENCRYPT_DURATION: u32 = 2;
    pub const DEFAULT_MAX_HAND_SIZE: u32 = 10;

    pub fn new() -> Self {
        Self {
            burn_damage: Self::DEFAULT_BURN_DAMAGE,
            crit_chance: Self::DEFAULT_CRIT_CHANCE,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            defend_amount: Self::DEFAULT_DEFEND_AMOUNT,
            debuff_duration: Self::DEFAULT_DEBUFF_DURATION,
            encrypt_duration: Self::DEFAULT_ENCRYPT_DURATION,
            max_hand_size: Self::DEFAULT_MAX_HAND_SIZE,
            elite_drop_chance: 70,
            normal_drop_chance: 30,
            normal_mastery_xp: 10,
            elite_mastery_xp: 25,
            boss_mastery_xp: 50,
        }
    }

    /// Same defaults with critical hits disabled, for reproducible damage math.
    pub fn without_crits() -> Self {
        Self {
            crit_chance: 0,
            ..Self::new()
        }
    }

    /// Scales a base stat by the enemy level factor `1 + (level - 1) * 0.2`.
    ///
    /// Computed in integers as `base * (level + 4) / 5`, which floors the
    /// same way the fractional factor does.
    pub fn scale_for_level(base: u32, level: u32) -> u32 {
        let level = level.max(1) as u64;
        let steps = 5 + (level - 1) * Self::LEVEL_SCALING_FIFTHS as u64;
        (base as u64 * steps / 5).min(u32::MAX as u64) as u32
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
