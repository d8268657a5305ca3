//! Enemies: catalog templates, live instances and their action selection.
//!
//! An [`EnemyTemplate`] is immutable catalog data. [`Enemy::from_template`]
//! instantiates it for one combat, scaled by the player's level. Live enemies
//! round-trip through the flat [`EnemyRecord`], which stores only what changes
//! during combat; behavior and specials are re-read from the catalog.

pub mod action;
pub mod catalog;
pub mod resolve;
pub mod selector;

pub use action::{ActionKind, EnemyAction, SpecialAbility, SpecialId, SpecialSpec};
pub use catalog::{Bestiary, EnemyCatalog};
pub use resolve::{ActionOutcome, PendingEffect, resolve_action};
pub use selector::{
    BattleView, DecisionPolicy, DecisionTree, EnemyActionSelector, EnemyCondition,
};

use crate::combatant::{Combatant, Vitals};
use crate::config::CombatConfig;
use crate::error::RestoreError;
use crate::status::{EffectKind, StatusTable};

/// Enemy difficulty class; drives card drops and mastery XP.
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
pub enum EnemyTier {
    #[default]
    Normal,
    Elite,
    Boss,
}

/// Currency paid out on victory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardTable {
    pub gold: u32,
    pub credits: u32,
}

impl RewardTable {
    pub fn scaled(&self, level: u32) -> Self {
        Self {
            gold: CombatConfig::scale_for_level(self.gold, level),
            credits: CombatConfig::scale_for_level(self.credits, level),
        }
    }
}

/// How an enemy chooses its actions when no policy is injected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyBehavior {
    /// Cycles through the kinds in order.
    Pattern(Vec<ActionKind>),
    /// Evaluates a decision tree every turn.
    Tree(DecisionTree),
}

impl Default for EnemyBehavior {
    fn default() -> Self {
        Self::Pattern(vec![ActionKind::Attack])
    }
}

/// Immutable catalog definition of an enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: EnemyTier,
    pub health: u32,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewards: RewardTable,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sprite: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: EnemyBehavior,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special_abilities: Vec<SpecialAbility>,
}

impl EnemyTemplate {
    /// Minimal template: pattern `[attack]`, no rewards, no specials.
    pub fn new(id: impl Into<String>, name: impl Into<String>, health: u32, attack: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier: EnemyTier::Normal,
            health,
            attack,
            defense: 0,
            speed: 0,
            rewards: RewardTable::default(),
            description: String::new(),
            sprite: String::new(),
            behavior: EnemyBehavior::default(),
            special_abilities: Vec::new(),
        }
    }

    pub fn with_tier(mut self, tier: EnemyTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_rewards(mut self, gold: u32, credits: u32) -> Self {
        self.rewards = RewardTable { gold, credits };
        self
    }

    pub fn with_behavior(mut self, behavior: EnemyBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_specials(mut self, specials: Vec<SpecialAbility>) -> Self {
        self.special_abilities = specials;
        self
    }
}

/// Flat persisted form of a live [`Enemy`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyRecord {
    pub id: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub statuses: StatusTable,
    pub pattern_index: usize,
}

/// A live enemy in one combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    id: String,
    name: String,
    tier: EnemyTier,
    level: u32,
    speed: u32,
    vitals: Vitals,
    statuses: StatusTable,
    rewards: RewardTable,
    behavior: EnemyBehavior,
    special_abilities: Vec<SpecialAbility>,
    pattern_index: usize,
}

impl Enemy {
    /// Instantiates a template at the given player level.
    ///
    /// Health, attack, defense and rewards are scaled by
    /// [`CombatConfig::scale_for_level`]; current health starts at the scaled
    /// maximum.
    pub fn from_template(template: &EnemyTemplate, level: u32) -> Self {
        let level = level.max(1);
        let scale = |base| CombatConfig::scale_for_level(base, level);
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            tier: template.tier,
            level,
            speed: template.speed,
            vitals: Vitals::new(
                scale(template.health),
                scale(template.attack),
                scale(template.defense),
            ),
            statuses: StatusTable::empty(),
            rewards: template.rewards.scaled(level),
            behavior: template.behavior.clone(),
            special_abilities: template.special_abilities.clone(),
            pattern_index: 0,
        }
    }

    /// Captures the mutable combat state.
    pub fn to_record(&self) -> EnemyRecord {
        EnemyRecord {
            id: self.id.clone(),
            level: self.level,
            health: self.vitals.health,
            max_health: self.vitals.max_health,
            attack: self.vitals.attack,
            defense: self.vitals.defense,
            statuses: self.statuses.clone(),
            pattern_index: self.pattern_index,
        }
    }

    /// Rebuilds a live enemy from a record, reading its template from `catalog`.
    pub fn from_record(
        record: &EnemyRecord,
        catalog: &dyn EnemyCatalog,
    ) -> Result<Self, RestoreError> {
        let template = catalog
            .template(&record.id)
            .ok_or_else(|| RestoreError::UnknownEnemy {
                id: record.id.clone(),
            })?;

        let mut enemy = Self::from_template(template, record.level);
        let max_health = record.max_health.max(1);
        enemy.vitals = Vitals {
            health: record.health.min(max_health),
            max_health,
            defense: record.defense,
            attack: record.attack,
        };
        enemy.statuses = record.statuses.clone();
        enemy.pattern_index = match &enemy.behavior {
            EnemyBehavior::Pattern(pattern) if !pattern.is_empty() => {
                record.pattern_index % pattern.len()
            }
            _ => 0,
        };
        Ok(enemy)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tier(&self) -> EnemyTier {
        self.tier
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn attack(&self) -> u32 {
        self.vitals.attack
    }

    /// Level-scaled currency rewards.
    pub fn rewards(&self) -> RewardTable {
        self.rewards
    }

    pub fn behavior(&self) -> &EnemyBehavior {
        &self.behavior
    }

    pub fn special_abilities(&self) -> &[SpecialAbility] {
        &self.special_abilities
    }

    /// Specials usable right now: none while frozen.
    pub fn can_use_specials(&self) -> bool {
        !self.special_abilities.is_empty() && !self.statuses.has(EffectKind::Frozen)
    }

    pub fn pattern_index(&self) -> usize {
        self.pattern_index
    }

    /// Reads the current pattern entry and advances the cyclic index.
    ///
    /// Tree-driven enemies and empty patterns yield a basic attack.
    pub fn next_pattern_kind(&mut self) -> ActionKind {
        match &self.behavior {
            EnemyBehavior::Pattern(pattern) if !pattern.is_empty() => {
                let kind = pattern[self.pattern_index % pattern.len()];
                self.pattern_index = (self.pattern_index + 1) % pattern.len();
                kind
            }
            _ => ActionKind::Attack,
        }
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn statuses(&self) -> &StatusTable {
        &self.statuses
    }

    fn statuses_mut(&mut self) -> &mut StatusTable {
        &mut self.statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn slime() -> EnemyTemplate {
        EnemyTemplate::new("slime", "Slime", 20, 8)
            .with_defense(3)
            .with_rewards(10, 25)
            .with_behavior(EnemyBehavior::Pattern(vec![
                ActionKind::Attack,
                ActionKind::Defend,
                ActionKind::Debuff,
            ]))
    }

    #[test]
    fn level_scaling_applies_to_stats_and_rewards() {
        let enemy = Enemy::from_template(&slime(), 3);

        assert_eq!(enemy.vitals().max_health, 28);
        assert_eq!(enemy.health(), 28);
        assert_eq!(enemy.attack(), 11);
        assert_eq!(enemy.defense(), 4);
        assert_eq!(enemy.rewards(), RewardTable { gold: 14, credits: 35 });
    }

    #[test]
    fn pattern_cycles() {
        let mut enemy = Enemy::from_template(&slime(), 1);
        let kinds: Vec<_> = (0..4).map(|_| enemy.next_pattern_kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::Attack,
                ActionKind::Defend,
                ActionKind::Debuff,
                ActionKind::Attack
            ]
        );
        assert_eq!(enemy.pattern_index(), 1);
    }

    #[test]
    fn empty_pattern_attacks() {
        let template = slime().with_behavior(EnemyBehavior::Pattern(Vec::new()));
        let mut enemy = Enemy::from_template(&template, 1);
        assert_eq!(enemy.next_pattern_kind(), ActionKind::Attack);
    }

    #[test]
    fn record_round_trip_restores_combat_state() {
        let mut catalog = HashMap::new();
        catalog.insert("slime".to_string(), slime());

        let mut enemy = Enemy::from_template(&slime(), 2);
        enemy.take_damage(10);
        enemy.add_status_effect(EffectKind::Poisoned, 3);
        enemy.next_pattern_kind();

        let restored = Enemy::from_record(&enemy.to_record(), &catalog).unwrap();
        assert_eq!(restored, enemy);
    }

    #[test]
    fn record_for_missing_template_fails() {
        let catalog: HashMap<String, EnemyTemplate> = HashMap::new();
        let record = Enemy::from_template(&slime(), 1).to_record();

        let err = Enemy::from_record(&record, &catalog).unwrap_err();
        assert_eq!(err, RestoreError::UnknownEnemy { id: "slime".into() });
    }

    #[test]
    fn frozen_enemies_cannot_use_specials() {
        let template = slime().with_specials(vec![SpecialAbility::Purge { heal: 5 }]);
        let mut enemy = Enemy::from_template(&template, 1);
        assert!(enemy.can_use_specials());

        enemy.add_status_effect(EffectKind::Frozen, 1);
        assert!(!enemy.can_use_specials());
    }
}
