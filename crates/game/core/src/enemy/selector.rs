//! Enemy action selection.
//!
//! Two strategies, chosen per enemy:
//!
//! - **Pattern**: the template's kinds are read in a cycle
//! - **Policy**: a [`DecisionPolicy`] inspects a read-only [`BattleView`]
//!
//! An injected policy overrides the enemy's own behavior. A tree-driven
//! enemy without an injected policy evaluates its own [`DecisionTree`].
//! Either way the chosen [`ActionKind`] is mapped to a concrete
//! [`EnemyAction`] by the same rules.

use behavior_tree::{Blackboard, Node, evaluate};

use crate::combatant::Combatant;
use crate::config::CombatConfig;
use crate::player::Player;
use crate::rng::RandomSource;
use crate::status::EffectKind;

use super::{ActionKind, Enemy, EnemyAction, EnemyBehavior};

/// Questions a decision tree may ask about the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyCondition {
    /// Enemy health is below this percentage of its maximum.
    SelfHealthBelow { percent: u32 },
    /// Player health is below this percentage of its maximum.
    TargetHealthBelow { percent: u32 },
    TargetDefenseAtLeast { amount: u32 },
    SelfHasStatus(EffectKind),
    TargetHasStatus(EffectKind),
    /// The combat round is at least this number (1-based).
    TurnAtLeast(u32),
    /// The enemy has specials and is not frozen.
    HasSpecials,
}

/// Decision tree over battle conditions yielding an action kind.
pub type DecisionTree = Node<EnemyCondition, ActionKind>;

/// Read-only snapshot handed to decision policies.
#[derive(Clone, Copy, Debug)]
pub struct BattleView<'a> {
    pub enemy: &'a Enemy,
    pub player: &'a Player,
    /// Combat round, starting at 1 on the first enemy turn.
    pub turn_number: u32,
}

impl<'a> BattleView<'a> {
    pub fn new(enemy: &'a Enemy, player: &'a Player, turn_number: u32) -> Self {
        Self {
            enemy,
            player,
            turn_number,
        }
    }
}

impl Blackboard for BattleView<'_> {
    type Condition = EnemyCondition;

    fn check(&self, condition: &EnemyCondition) -> bool {
        match *condition {
            EnemyCondition::SelfHealthBelow { percent } => {
                self.enemy.vitals().health_percent() < percent
            }
            EnemyCondition::TargetHealthBelow { percent } => {
                self.player.vitals().health_percent() < percent
            }
            EnemyCondition::TargetDefenseAtLeast { amount } => self.player.defense() >= amount,
            EnemyCondition::SelfHasStatus(kind) => self.enemy.statuses().has(kind),
            EnemyCondition::TargetHasStatus(kind) => self.player.statuses().has(kind),
            EnemyCondition::TurnAtLeast(turn) => self.turn_number >= turn,
            EnemyCondition::HasSpecials => self.enemy.can_use_specials(),
        }
    }
}

/// Pluggable decision maker for enemy turns.
///
/// Returning `None` makes the enemy fall back to a basic attack.
pub trait DecisionPolicy: Send + Sync {
    fn decide(&self, view: &BattleView<'_>) -> Option<ActionKind>;
}

impl DecisionPolicy for DecisionTree {
    fn decide(&self, view: &BattleView<'_>) -> Option<ActionKind> {
        evaluate(self, view)
    }
}

/// Chooses and concretizes one enemy action per enemy turn.
#[derive(Default)]
pub struct EnemyActionSelector {
    policy: Option<Box<dyn DecisionPolicy>>,
}

impl EnemyActionSelector {
    /// Selector that follows each enemy's own behavior.
    pub fn for_enemy() -> Self {
        Self { policy: None }
    }

    /// Selector that asks `policy` regardless of the enemy's behavior.
    pub fn with_policy(policy: Box<dyn DecisionPolicy>) -> Self {
        Self {
            policy: Some(policy),
        }
    }

    pub fn has_policy(&self) -> bool {
        self.policy.is_some()
    }

    /// Picks the enemy's next action.
    ///
    /// Advances the pattern index for pattern-driven enemies. Consumes one
    /// random value only when a special is picked among several.
    pub fn select_next(
        &self,
        enemy: &mut Enemy,
        player: &Player,
        turn_number: u32,
        config: &CombatConfig,
        rng: &mut dyn RandomSource,
    ) -> EnemyAction {
        let kind = self.choose_kind(enemy, player, turn_number);
        let action = concretize(kind, enemy, config, rng);
        tracing::debug!(enemy = enemy.name(), %kind, ?action, "enemy action selected");
        action
    }

    fn choose_kind(&self, enemy: &mut Enemy, player: &Player, turn_number: u32) -> ActionKind {
        if let Some(policy) = &self.policy {
            let view = BattleView::new(enemy, player, turn_number);
            return policy.decide(&view).unwrap_or(ActionKind::Attack);
        }
        if let EnemyBehavior::Tree(tree) = enemy.behavior() {
            let view = BattleView::new(enemy, player, turn_number);
            return tree.decide(&view).unwrap_or(ActionKind::Attack);
        }
        enemy.next_pattern_kind()
    }
}

impl std::fmt::Debug for EnemyActionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnemyActionSelector")
            .field("policy", &self.policy.is_some())
            .finish()
    }
}

/// Maps a kind to the concrete action for this enemy.
///
/// A special falls back to a basic attack when the enemy has none or is
/// frozen; otherwise one is drawn uniformly.
fn concretize(
    kind: ActionKind,
    enemy: &Enemy,
    config: &CombatConfig,
    rng: &mut dyn RandomSource,
) -> EnemyAction {
    match kind {
        ActionKind::Attack => EnemyAction::Attack {
            damage: enemy.attack(),
        },
        ActionKind::Defend => EnemyAction::Defend {
            amount: enemy.attack().saturating_mul(4) / 5,
        },
        ActionKind::Debuff => EnemyAction::Debuff {
            effect: EffectKind::Vulnerable,
            duration: config.debuff_duration,
        },
        ActionKind::Special => {
            if !enemy.can_use_specials() {
                return EnemyAction::Attack {
                    damage: enemy.attack(),
                };
            }
            let specials = enemy.special_abilities();
            let index = if specials.len() == 1 {
                0
            } else {
                rng.below(specials.len())
            };
            EnemyAction::Special(specials[index].clone())
        }
    }
}
