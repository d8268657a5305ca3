//! Enemy action vocabulary.
//!
//! [`ActionKind`] is what a pattern or decision tree asks for. The selector
//! turns it into a concrete [`EnemyAction`] carrying the numbers to apply.

use crate::status::EffectKind;

/// Coarse action categories used by patterns and decision trees.
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
pub enum ActionKind {
    Attack,
    Defend,
    Debuff,
    Special,
}

/// Known special ability ids.
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
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpecialId {
    LifeDrain,
    MultiHit,
    Piercing,
    HandCrush,
    Encrypt,
    Purge,
    Countdown,
    Lockdown,
}

/// A uniquely scripted enemy move.
///
/// Catalogs name specials by string id; ids outside [`SpecialId`] load as
/// [`SpecialAbility::Unknown`] and fizzle when used.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "SpecialSpec", into = "SpecialSpec"))]
pub enum SpecialAbility {
    /// Takes up to `amount` health from the target and heals by what was taken.
    LifeDrain { amount: u32 },
    /// `hits` strikes at 40% of attack each.
    MultiHit { hits: u32 },
    /// Direct health loss that ignores defense.
    Piercing { damage: u32 },
    /// Damage equal to the target's hand size times `damage_per_card`.
    HandCrush { damage_per_card: u32 },
    /// Encrypts `cards` cards in the target's hand.
    Encrypt { cards: u32 },
    /// Heals the enemy and removes all of its debuffs.
    Purge { heal: u32 },
    /// Deals `damage` after `turns` enemy turns.
    Countdown { turns: u32, damage: u32 },
    /// Blocks the player's skills for `turns` player turns.
    Lockdown { turns: u32 },
    Unknown { id: String },
}

impl SpecialAbility {
    /// The recognized id, or `None` for [`SpecialAbility::Unknown`].
    pub fn special_id(&self) -> Option<SpecialId> {
        Some(match self {
            Self::LifeDrain { .. } => SpecialId::LifeDrain,
            Self::MultiHit { .. } => SpecialId::MultiHit,
            Self::Piercing { .. } => SpecialId::Piercing,
            Self::HandCrush { .. } => SpecialId::HandCrush,
            Self::Encrypt { .. } => SpecialId::Encrypt,
            Self::Purge { .. } => SpecialId::Purge,
            Self::Countdown { .. } => SpecialId::Countdown,
            Self::Lockdown { .. } => SpecialId::Lockdown,
            Self::Unknown { .. } => return None,
        })
    }

    /// The catalog id of this special.
    pub fn id(&self) -> &str {
        match self {
            Self::LifeDrain { .. } => SpecialId::LifeDrain.into(),
            Self::MultiHit { .. } => SpecialId::MultiHit.into(),
            Self::Piercing { .. } => SpecialId::Piercing.into(),
            Self::HandCrush { .. } => SpecialId::HandCrush.into(),
            Self::Encrypt { .. } => SpecialId::Encrypt.into(),
            Self::Purge { .. } => SpecialId::Purge.into(),
            Self::Countdown { .. } => SpecialId::Countdown.into(),
            Self::Lockdown { .. } => SpecialId::Lockdown.into(),
            Self::Unknown { id } => id,
        }
    }
}

/// Flat, string-keyed form of a [`SpecialAbility`] as written in catalogs.
///
/// Every payload field defaults to zero so a catalog entry only lists the
/// fields its special reads:
///
/// ```text
/// (id: "multi_hit", hits: 3)
/// (id: "countdown", turns: 3, amount: 20)
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpecialSpec {
    pub id: String,
    pub amount: u32,
    pub hits: u32,
    pub turns: u32,
    pub cards: u32,
}

impl From<SpecialSpec> for SpecialAbility {
    fn from(spec: SpecialSpec) -> Self {
        let Ok(id) = spec.id.parse::<SpecialId>() else {
            return Self::Unknown { id: spec.id };
        };
        match id {
            SpecialId::LifeDrain => Self::LifeDrain {
                amount: spec.amount,
            },
            SpecialId::MultiHit => Self::MultiHit { hits: spec.hits },
            SpecialId::Piercing => Self::Piercing {
                damage: spec.amount,
            },
            SpecialId::HandCrush => Self::HandCrush {
                damage_per_card: spec.amount,
            },
            SpecialId::Encrypt => Self::Encrypt { cards: spec.cards },
            SpecialId::Purge => Self::Purge { heal: spec.amount },
            SpecialId::Countdown => Self::Countdown {
                turns: spec.turns,
                damage: spec.amount,
            },
            SpecialId::Lockdown => Self::Lockdown { turns: spec.turns },
        }
    }
}

impl From<SpecialAbility> for SpecialSpec {
    fn from(special: SpecialAbility) -> Self {
        let id = special.id().to_owned();
        let spec = SpecialSpec {
            id,
            ..SpecialSpec::default()
        };
        match special {
            SpecialAbility::LifeDrain { amount }
            | SpecialAbility::Piercing { damage: amount }
            | SpecialAbility::HandCrush {
                damage_per_card: amount,
            }
            | SpecialAbility::Purge { heal: amount } => SpecialSpec { amount, ..spec },
            SpecialAbility::MultiHit { hits } => SpecialSpec { hits, ..spec },
            SpecialAbility::Encrypt { cards } => SpecialSpec { cards, ..spec },
            SpecialAbility::Countdown { turns, damage } => SpecialSpec {
                turns,
                amount: damage,
                ..spec
            },
            SpecialAbility::Lockdown { turns } => SpecialSpec { turns, ..spec },
            SpecialAbility::Unknown { .. } => spec,
        }
    }
}

/// A concrete enemy action, ready to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    Attack { damage: u32 },
    Defend { amount: u32 },
    Debuff { effect: EffectKind, duration: u32 },
    Special(SpecialAbility),
}

impl EnemyAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Attack { .. } => ActionKind::Attack,
            Self::Defend { .. } => ActionKind::Defend,
            Self::Debuff { .. } => ActionKind::Debuff,
            Self::Special(_) => ActionKind::Special,
        }
    }
}
