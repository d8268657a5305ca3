//! The combat turn state machine.
//!
//! A [`CombatSession`] owns one [`Player`] and one [`Enemy`] and alternates
//! between the player turn and the enemy turn until one side falls:
//!
//! ```text
//!   start ──► Player ──(action points spent)──► Enemy ──► Player ...
//!               │                                 │
//!               └──(enemy at 0 health)──► None ◄──┴──(player at 0 health)
//! ```
//!
//! Every entry point either returns a [`TurnReport`] describing what changed,
//! or a [`CommandError`] after which the session is exactly as it was.
//! Passive abilities hook in through [`Trigger`]s raised at fixed points of
//! each command; their effects are applied here since the session owns both
//! combatants.

mod builder;
mod rewards;

pub use builder::CombatSessionBuilder;
pub use rewards::{CardRarity, Rewards, roll_rewards};

use crate::combatant::Combatant;
use crate::config::CombatConfig;
use crate::enemy::{Enemy, EnemyActionSelector, PendingEffect, resolve_action};
use crate::error::{CombatError, CommandError};
use crate::events::{AppliedEffect, CombatEvent, EventSink, Side};
use crate::inventory::{Inventory, ItemEffect};
use crate::player::{Player, SkillEffect};
use crate::rng::RandomSource;
use crate::specialization::{AbilityEffect, AbilityResult, EventContext, Trigger};
use crate::status::EffectKind;

/// Whose turn it is. `None` once combat has ended.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Turn {
    Player,
    Enemy,
    None,
}

/// How a finished combat ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    Victory { rewards: Rewards },
    Defeat,
}

/// What one accepted command or enemy turn produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub events: Vec<CombatEvent>,
    /// Whose turn it is after this step.
    pub turn: Turn,
    /// Set when this step ended the combat.
    pub outcome: Option<CombatOutcome>,
}

/// Category of a card play, for the mixed-play trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayKind {
    Attack,
    Defense,
    Hybrid,
    Other,
}

/// Per-combat bookkeeping behind the play-driven triggers.
#[derive(Clone, Copy, Debug, Default)]
struct PlayTracker {
    attacked: bool,
    damaged: bool,
    attack_chain: u32,
    cards_played: u32,
    last_play: Option<PlayKind>,
}

/// A running combat between one player and one enemy.
pub struct CombatSession {
    player: Player,
    enemy: Enemy,
    config: CombatConfig,
    rng: Box<dyn RandomSource>,
    inventory: Box<dyn Inventory>,
    sink: Box<dyn EventSink>,
    selector: EnemyActionSelector,
    turn: Turn,
    active: bool,
    round: u32,
    outcome: Option<CombatOutcome>,
    countdowns: Vec<PendingEffect>,
    lockdown: u32,
    plays: PlayTracker,
    history: Vec<CombatEvent>,
    step_events: Vec<CombatEvent>,
}

impl CombatSession {
    pub fn builder(player: Player) -> CombatSessionBuilder {
        CombatSessionBuilder::new(player)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enemy turns taken so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> Option<&CombatOutcome> {
        self.outcome.as_ref()
    }

    /// Player turns left during which skills are blocked.
    pub fn lockdown_turns(&self) -> u32 {
        self.lockdown
    }

    /// Countdowns still ticking toward detonation.
    pub fn pending_effects(&self) -> &[PendingEffect] {
        &self.countdowns
    }

    pub fn inventory(&self) -> &dyn Inventory {
        self.inventory.as_ref()
    }

    /// Every event since the session started.
    pub fn history(&self) -> &[CombatEvent] {
        &self.history
    }

    /// Ends the session and hands the player back for saving.
    pub fn into_player(mut self) -> Player {
        self.player.end_defending();
        self.player
    }

    // ========================================================================
    // Player commands
    // ========================================================================

    /// Basic attack with the player's attack stat.
    pub fn player_attack(&mut self) -> Result<TurnReport, CommandError> {
        self.ensure_player_turn()?;
        self.player.spend_action_point();

        let multiplier = self.begin_attack_play();
        let (dealt, critical) = self.strike(self.player.attack(), multiplier);
        self.finish_play(PlayKind::Attack);

        self.record(CombatEvent::PlayerActed {
            description: format!("You attack for {dealt} damage."),
            damage_dealt: dealt,
            critical,
        });
        Ok(self.after_player_command())
    }

    /// Raises defense until the end of the next enemy turn.
    pub fn player_defend(&mut self) -> Result<TurnReport, CommandError> {
        self.ensure_player_turn()?;
        self.player.spend_action_point();
        self.plays.attack_chain = 0;

        let granted = self.player.begin_defending(self.config.defend_amount);
        self.fire(Trigger::DefensePlayed, 0);
        self.finish_play(PlayKind::Defense);

        self.record(CombatEvent::PlayerActed {
            description: format!("You brace, gaining {granted} defense."),
            damage_dealt: 0,
            critical: false,
        });
        Ok(self.after_player_command())
    }

    /// Plays a known skill, paying its energy cost first.
    pub fn player_use_skill(&mut self, skill_id: &str) -> Result<TurnReport, CommandError> {
        self.ensure_player_turn()?;
        if self.lockdown > 0 {
            return Err(self.reject(CommandError::LockedDown {
                turns: self.lockdown,
            }));
        }
        let skill = match self.player.skill(skill_id) {
            Some(skill) => skill.clone(),
            None => {
                return Err(self.reject(CommandError::UnknownSkill {
                    id: skill_id.to_owned(),
                }));
            }
        };
        if !self.player.spend_energy(skill.energy_cost) {
            return Err(self.reject(CommandError::InsufficientEnergy {
                required: skill.energy_cost,
                available: self.player.energy(),
            }));
        }
        self.player.spend_action_point();

        let multiplier = if skill.is_attack() {
            self.begin_attack_play()
        } else {
            self.plays.attack_chain = 0;
            None
        };

        let mut dealt = 0;
        let mut critical = false;
        for effect in &skill.effects {
            match *effect {
                SkillEffect::Strike { damage } => {
                    let (hit, crit) = self.strike(damage, multiplier);
                    dealt += hit;
                    critical |= crit;
                }
                SkillEffect::Guard { defense } => {
                    self.player.add_defense(defense);
                }
                SkillEffect::Afflict { effect, duration } => {
                    self.enemy.add_status_effect(effect, duration);
                }
                SkillEffect::Mend { heal } => {
                    self.player.heal(heal);
                }
            }
        }

        if skill.is_defense() {
            self.fire(Trigger::DefensePlayed, 0);
        }
        let kind = match (skill.is_attack(), skill.is_defense()) {
            (true, true) => PlayKind::Hybrid,
            (true, false) => PlayKind::Attack,
            (false, true) => PlayKind::Defense,
            (false, false) => PlayKind::Other,
        };
        self.finish_play(kind);

        self.record(CombatEvent::PlayerActed {
            description: format!("You use {}.", skill.name),
            damage_dealt: dealt,
            critical,
        });
        Ok(self.after_player_command())
    }

    /// Consumes an item from the inventory and applies it.
    ///
    /// Items cost an action point but are not card plays.
    pub fn player_use_item(&mut self, item_id: &str) -> Result<TurnReport, CommandError> {
        self.ensure_player_turn()?;
        let item = match self
            .inventory
            .find_item(item_id)
            .and_then(|index| self.inventory.remove_at(index))
        {
            Some(item) => item,
            None => {
                return Err(self.reject(CommandError::UnknownItem {
                    id: item_id.to_owned(),
                }));
            }
        };
        self.player.spend_action_point();

        let (description, dealt) = match item.effect {
            ItemEffect::Heal { amount } => {
                let healed = self.player.heal(amount);
                (format!("{} restores {healed} health.", item.name), 0)
            }
            ItemEffect::Fortify { defense } => {
                let granted = self.player.add_defense(defense);
                (format!("{} grants {granted} defense.", item.name), 0)
            }
            ItemEffect::Bomb { damage } => {
                let dealt = self.enemy.take_damage(damage);
                (format!("{} deals {dealt} damage.", item.name), dealt)
            }
            ItemEffect::Energize { energy } => {
                let restored = self.player.restore_energy(energy);
                (format!("{} restores {restored} energy.", item.name), 0)
            }
            ItemEffect::Inflict { effect, duration } => {
                self.enemy.add_status_effect(effect, duration);
                (format!("{} inflicts {effect}.", item.name), 0)
            }
            ItemEffect::Cleanse => {
                let removed = self.player.cleanse_debuffs();
                (format!("{} removes {removed} effect(s).", item.name), 0)
            }
        };

        self.record(CombatEvent::PlayerActed {
            description,
            damage_dealt: dealt,
            critical: false,
        });
        Ok(self.after_player_command())
    }

    /// Gives up the remaining action points and hands the turn over.
    pub fn player_end_turn(&mut self) -> Result<TurnReport, CommandError> {
        self.ensure_player_turn()?;
        self.end_player_turn();
        Ok(self.take_report())
    }

    // ========================================================================
    // Enemy turn
    // ========================================================================

    /// Runs the enemy's turn and, unless combat ends, opens the next player
    /// turn.
    pub fn enemy_turn(&mut self) -> Result<TurnReport, CommandError> {
        if !self.active {
            return Err(self.reject(CommandError::CombatOver));
        }
        if self.turn != Turn::Enemy {
            return Err(self.reject(CommandError::OutOfTurn { turn: self.turn }));
        }
        self.round += 1;

        let stunned = self.enemy.statuses().has(EffectKind::Stunned);
        if stunned {
            self.enemy.statuses_mut().clear(EffectKind::Stunned);
            self.record(CombatEvent::EnemyStunned);
        }

        if self.tick_enemy() {
            return Ok(self.take_report());
        }

        // Countdowns keep ticking while the enemy is stunned.
        let mut health_lost = self.advance_countdowns();
        if !stunned && !self.player.is_defeated() {
            let action = self.selector.select_next(
                &mut self.enemy,
                &self.player,
                self.round,
                &self.config,
                self.rng.as_mut(),
            );
            let outcome = resolve_action(&action, &mut self.enemy, &mut self.player, &self.config);
            match outcome.pending {
                Some(countdown @ PendingEffect::Countdown { .. }) => self.countdowns.push(countdown),
                Some(PendingEffect::Lockdown { turns }) => self.lockdown = self.lockdown.max(turns),
                None => {}
            }
            health_lost += outcome.damage_dealt;
            self.record(CombatEvent::EnemyActed(outcome));
        }

        if health_lost > 0 && !self.plays.damaged {
            self.plays.damaged = true;
            self.fire(Trigger::FirstDamage, health_lost);
        }
        self.player.end_defending();

        if self.player.is_defeated() {
            self.finish_defeat();
        } else if self.enemy.is_defeated() {
            self.finish_victory();
        } else {
            self.begin_player_turn();
        }
        Ok(self.take_report())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Records session start and fires `combat_start`.
    fn open(&mut self) {
        tracing::debug!(
            enemy = self.enemy.id(),
            level = self.enemy.level(),
            player = self.player.name(),
            "combat started"
        );
        self.record(CombatEvent::CombatStarted {
            enemy_id: self.enemy.id().to_owned(),
            enemy_level: self.enemy.level(),
        });
        self.player.refill_for_turn();
        self.fire(Trigger::CombatStart, 0);
        self.record(CombatEvent::TurnChanged { turn: Turn::Player });
        self.history.append(&mut self.step_events);
    }

    fn ensure_player_turn(&self) -> Result<(), CommandError> {
        if !self.active {
            return Err(self.reject(CommandError::CombatOver));
        }
        if self.turn != Turn::Player {
            return Err(self.reject(CommandError::OutOfTurn { turn: self.turn }));
        }
        Ok(())
    }

    fn reject(&self, error: CommandError) -> CommandError {
        tracing::debug!(code = error.error_code(), %error, "command rejected");
        error
    }

    fn record(&mut self, event: CombatEvent) {
        self.sink.emit(&event);
        self.step_events.push(event);
    }

    fn take_report(&mut self) -> TurnReport {
        let events = std::mem::take(&mut self.step_events);
        self.history.extend(events.iter().cloned());
        TurnReport {
            events,
            turn: self.turn,
            outcome: if self.active {
                None
            } else {
                self.outcome.clone()
            },
        }
    }

    /// Raises a trigger and applies whatever ability answers it.
    ///
    /// Returns the damage multiplier when the ability asks for one.
    fn fire(&mut self, trigger: Trigger, count: u32) -> Option<u32> {
        let result = self.player.specialization().process_game_event(
            trigger,
            &EventContext::with_count(count),
            self.rng.as_mut(),
        )?;
        self.apply_ability(result)
    }

    fn apply_ability(&mut self, result: AbilityResult) -> Option<u32> {
        let mut multiplier = None;
        let magnitude = match result.effect {
            AbilityEffect::ApplyStatus { effect, duration } => {
                self.enemy.add_status_effect(effect, duration);
                duration
            }
            AbilityEffect::DamageMultiplier { percent } => {
                multiplier = Some(percent);
                percent
            }
            AbilityEffect::DrawCards { count } => {
                self.player.draw_cards(count, self.config.max_hand_size)
            }
            AbilityEffect::GrantDefense { amount } => self.player.add_defense(amount),
            AbilityEffect::ConvertDefense { percent } => {
                let damage = self.player.defense().saturating_mul(percent) / 100;
                self.enemy.take_damage(damage)
            }
            AbilityEffect::GrantActionPoint => {
                self.player.grant_action_point();
                1
            }
        };

        self.record(CombatEvent::AbilityTriggered {
            ability_id: result.ability_id.to_owned(),
            name: result.name.to_owned(),
            trigger: result.trigger,
            applied: AppliedEffect {
                effect: result.effect,
                magnitude,
            },
        });
        multiplier
    }

    /// Attack-play triggers that fire before the play's effects.
    fn begin_attack_play(&mut self) -> Option<u32> {
        let mut multiplier = None;
        if !self.plays.attacked {
            self.plays.attacked = true;
            multiplier = multiplier.or(self.fire(Trigger::FirstAttack, 0));
        }
        multiplier = multiplier.or(self.fire(Trigger::AttackPlayed, 0));
        self.plays.attack_chain += 1;
        multiplier.or(self.fire(Trigger::AttackChain, self.plays.attack_chain))
    }

    /// Play-count triggers that fire after the play's effects.
    fn finish_play(&mut self, kind: PlayKind) {
        let mixed = kind == PlayKind::Hybrid
            || self.plays.last_play.is_some_and(|last| last != kind);
        self.plays.last_play = Some(kind);
        if mixed {
            self.fire(Trigger::MixedPlay, 0);
        }
        self.plays.cards_played += 1;
        self.fire(Trigger::CardCount, self.plays.cards_played);
    }

    /// Player damage pipeline against the enemy.
    ///
    /// `base` → ability multiplier → critical hit → `vulnerable` ×1.5 →
    /// minus enemy defense, never below the configured minimum. Enemy
    /// defense acts as armor here and is not consumed.
    fn strike(&mut self, base: u32, multiplier: Option<u32>) -> (u32, bool) {
        let mut damage = base;
        if let Some(percent) = multiplier {
            damage = damage.saturating_mul(percent) / 100;
        }
        let critical = self.rng.chance(self.config.crit_chance);
        if critical {
            damage = damage.saturating_mul(self.config.crit_multiplier);
        }
        if self.enemy.statuses().has(EffectKind::Vulnerable) {
            damage = damage.saturating_mul(3) / 2;
        }
        let damage = damage
            .saturating_sub(self.enemy.defense())
            .max(self.config.minimum_damage);

        (self.enemy.lose_health(damage), critical)
    }

    fn after_player_command(&mut self) -> TurnReport {
        if self.enemy.is_defeated() {
            self.finish_victory();
        } else if self.player.action_points() == 0 {
            self.end_player_turn();
        }
        self.take_report()
    }

    fn end_player_turn(&mut self) {
        self.fire(Trigger::TurnEnd, 0);
        self.lockdown = self.lockdown.saturating_sub(1);
        if self.enemy.is_defeated() {
            self.finish_victory();
            return;
        }
        self.set_turn(Turn::Enemy);
    }

    /// Player status tick, then a fresh turn's resources.
    fn begin_player_turn(&mut self) {
        let tick = self.player.start_turn(&self.config);
        if tick.total_damage() > 0 || tick.defeated {
            self.record(CombatEvent::StatusTicked {
                side: Side::Player,
                tick,
            });
        }
        if tick.defeated {
            self.finish_defeat();
            return;
        }
        self.player.refill_for_turn();
        self.set_turn(Turn::Player);
    }

    /// Enemy status tick. Returns true when the tick ended the combat.
    fn tick_enemy(&mut self) -> bool {
        let tick = self.enemy.start_turn(&self.config);
        if tick.total_damage() > 0 || tick.defeated {
            self.record(CombatEvent::StatusTicked {
                side: Side::Enemy,
                tick,
            });
        }
        if tick.defeated {
            self.player.end_defending();
            self.finish_victory();
        }
        tick.defeated
    }

    /// Moves every countdown one enemy turn closer; detonates those at zero.
    ///
    /// Returns the health the player lost.
    fn advance_countdowns(&mut self) -> u32 {
        let mut lost = 0;
        let mut remaining = Vec::with_capacity(self.countdowns.len());
        for effect in std::mem::take(&mut self.countdowns) {
            let PendingEffect::Countdown { turns_left, damage } = effect else {
                continue;
            };
            let turns_left = turns_left.saturating_sub(1);
            if turns_left > 0 {
                remaining.push(PendingEffect::Countdown { turns_left, damage });
                continue;
            }
            let dealt = self.player.take_damage(damage);
            lost += dealt;
            self.record(CombatEvent::PendingResolved {
                effect,
                description: format!("The countdown detonates for {dealt} damage."),
                damage_dealt: dealt,
            });
        }
        self.countdowns = remaining;
        lost
    }

    fn set_turn(&mut self, turn: Turn) {
        self.turn = turn;
        tracing::trace!(%turn, round = self.round, "turn changed");
        self.record(CombatEvent::TurnChanged { turn });
    }

    fn finish_victory(&mut self) {
        let rewards = roll_rewards(&self.enemy, &self.config, self.rng.as_mut());
        self.player.add_currency(rewards.gold, rewards.credits);

        let gain = self.player.gain_mastery_xp(rewards.mastery_xp);
        if gain.leveled_up {
            self.record(CombatEvent::MasteryLevelUp {
                new_level: gain.new_level,
                unlocked_abilities: gain
                    .unlocked_abilities
                    .iter()
                    .map(|id| (*id).to_owned())
                    .collect(),
            });
        }

        tracing::debug!(
            enemy = self.enemy.id(),
            gold = rewards.gold,
            credits = rewards.credits,
            cards = rewards.cards.len(),
            "combat won"
        );
        self.end(CombatOutcome::Victory { rewards });
    }

    fn finish_defeat(&mut self) {
        tracing::debug!(enemy = self.enemy.id(), round = self.round, "combat lost");
        self.end(CombatOutcome::Defeat);
    }

    fn end(&mut self, outcome: CombatOutcome) {
        self.active = false;
        self.turn = Turn::None;
        self.outcome = Some(outcome.clone());
        self.record(CombatEvent::CombatEnded(outcome));
    }
}

impl std::fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatSession")
            .field("player", &self.player)
            .field("enemy", &self.enemy)
            .field("turn", &self.turn)
            .field("active", &self.active)
            .field("round", &self.round)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{ActionKind, EnemyBehavior, EnemyTemplate, SpecialAbility};
    use crate::events::EventLog;
    use crate::inventory::{Backpack, Item};
    use crate::player::{PlayerSave, Skill};
    use crate::rng::SequenceRandom;
    use crate::specialization::{Archetype, SpecializationRecord};

    fn template(behavior: Vec<ActionKind>) -> EnemyTemplate {
        EnemyTemplate::new("grunt", "Grunt", 20, 8)
            .with_defense(3)
            .with_rewards(10, 5)
            .with_behavior(EnemyBehavior::Pattern(behavior))
    }

    fn session_with(player: Player, template: &EnemyTemplate) -> CombatSession {
        let level = player.level();
        CombatSession::builder(player)
            .config(CombatConfig::without_crits())
            .rng(Box::new(SequenceRandom::never()))
            .start_with_enemy(Enemy::from_template(template, level))
    }

    fn session() -> CombatSession {
        session_with(Player::new("hero", 30, 10, 0), &template(vec![ActionKind::Attack]))
    }

    fn specialized(archetype: Archetype, mastery_level: u32) -> Player {
        Player::from_save(PlayerSave {
            attack: 10,
            specialization: SpecializationRecord {
                archetype,
                mastery_level,
                ..SpecializationRecord::default()
            },
            ..PlayerSave::default()
        })
    }

    #[test]
    fn attack_hands_turn_to_enemy() {
        let mut session = session();
        let report = session.player_attack().unwrap();

        assert_eq!(session.enemy().health(), 13);
        assert_eq!(report.turn, Turn::Enemy);
        assert_eq!(session.turn(), Turn::Enemy);
        // Defense is armor for player attacks.
        assert_eq!(session.enemy().defense(), 3);
    }

    #[test]
    fn commands_out_of_turn_change_nothing() {
        let mut session = session();
        session.player_attack().unwrap();
        let player_before = session.player().clone();
        let enemy_before = session.enemy().clone();

        let err = session.player_defend().unwrap_err();
        assert_eq!(err, CommandError::OutOfTurn { turn: Turn::Enemy });
        assert_eq!(session.player(), &player_before);
        assert_eq!(session.enemy(), &enemy_before);
        assert_eq!(session.turn(), Turn::Enemy);
    }

    #[test]
    fn enemy_turn_only_on_enemy_turn() {
        let mut session = session();
        assert_eq!(
            session.enemy_turn().unwrap_err(),
            CommandError::OutOfTurn { turn: Turn::Player }
        );
    }

    #[test]
    fn minimum_damage_applies_against_heavy_armor() {
        let template = template(vec![ActionKind::Attack]).with_defense(50);
        let mut session = session_with(Player::new("hero", 30, 10, 0), &template);
        session.player_attack().unwrap();
        assert_eq!(session.enemy().health(), 19);
    }

    #[test]
    fn vulnerable_enemy_takes_extra_damage() {
        let mut session = session();
        session.enemy.add_status_effect(EffectKind::Vulnerable, 2);
        session.player_attack().unwrap();
        // 10 * 1.5 = 15, minus 3 defense.
        assert_eq!(session.enemy().health(), 8);
    }

    #[test]
    fn critical_hits_double_damage() {
        let player = Player::new("hero", 30, 10, 0);
        let mut session = CombatSession::builder(player)
            .config(CombatConfig::default())
            .rng(Box::new(SequenceRandom::always()))
            .start_with_enemy(Enemy::from_template(&template(vec![ActionKind::Attack]), 1));

        let report = session.player_attack().unwrap();
        assert_eq!(session.enemy().health(), 3);
        assert!(report.events.iter().any(|e| matches!(
            e,
            CombatEvent::PlayerActed { critical: true, .. }
        )));
    }

    #[test]
    fn defend_is_unwound_after_enemy_turn() {
        let mut session = session();
        session.player_defend().unwrap();
        assert_eq!(session.player().defense(), 5);

        session.enemy_turn().unwrap();
        // The 8 damage hit ate the 5 defense; nothing left to unwind.
        assert_eq!(session.player().health(), 27);
        assert_eq!(session.player().defense(), 0);
        assert!(!session.player().is_defending());
    }

    #[test]
    fn unused_defend_bonus_is_removed() {
        let template = template(vec![ActionKind::Defend]);
        let mut session = session_with(Player::new("hero", 30, 10, 0), &template);
        session.player_defend().unwrap();
        session.enemy_turn().unwrap();
        assert_eq!(session.player().defense(), 0);
        assert_eq!(session.enemy().defense(), 3 + 6);
    }

    #[test]
    fn stunned_enemy_loses_its_turn() {
        let mut session = session();
        session.enemy.add_status_effect(EffectKind::Stunned, 2);
        session.player_attack().unwrap();

        let report = session.enemy_turn().unwrap();
        assert!(report.events.contains(&CombatEvent::EnemyStunned));
        assert!(!session.enemy().statuses().has(EffectKind::Stunned));
        assert_eq!(session.player().health(), 30);
        assert_eq!(session.turn(), Turn::Player);
        assert_eq!(session.round(), 1);
    }

    #[test]
    fn poison_tick_can_win_on_the_enemy_turn() {
        let mut session = session();
        session.enemy.add_status_effect(EffectKind::Poisoned, 20);
        session.player_attack().unwrap();
        session.enemy.vitals_mut().health = 5;

        let report = session.enemy_turn().unwrap();
        assert!(matches!(report.outcome, Some(CombatOutcome::Victory { .. })));
        assert_eq!(session.turn(), Turn::None);
        assert_eq!(session.player().health(), 30);
    }

    #[test]
    fn skills_cost_energy_and_reject_cleanly() {
        let player = Player::new("hero", 30, 10, 0).with_skills(vec![Skill::new(
            "cleave",
            "Cleave",
            2,
            vec![SkillEffect::Strike { damage: 12 }],
        )]);
        let mut session = session_with(player, &template(vec![ActionKind::Attack]));

        assert_eq!(
            session.player_use_skill("nova").unwrap_err(),
            CommandError::UnknownSkill { id: "nova".into() }
        );

        session.player_use_skill("cleave").unwrap();
        assert_eq!(session.player().energy(), 1);
        assert_eq!(session.enemy().health(), 11);

        session.enemy_turn().unwrap();
        assert_eq!(session.player().energy(), 3);
        session.player.spend_energy(2);
        let err = session.player_use_skill("cleave").unwrap_err();
        assert_eq!(
            err,
            CommandError::InsufficientEnergy {
                required: 2,
                available: 1
            }
        );
        assert_eq!(session.turn(), Turn::Player);
        assert_eq!(session.player().action_points(), 1);
    }

    #[test]
    fn items_are_consumed() {
        let backpack = Backpack::with_items(vec![Item::new(
            "grenade",
            "Grenade",
            ItemEffect::Bomb { damage: 10 },
        )]);
        let mut session = CombatSession::builder(Player::new("hero", 30, 10, 0))
            .config(CombatConfig::without_crits())
            .rng(Box::new(SequenceRandom::never()))
            .inventory(Box::new(backpack))
            .start_with_enemy(Enemy::from_template(&template(vec![ActionKind::Attack]), 1));

        session.player_use_item("grenade").unwrap();
        // Bombs go through defense like any incoming damage.
        assert_eq!(session.enemy().health(), 13);
        assert_eq!(session.enemy().defense(), 0);
        assert!(session.inventory().is_empty());

        session.enemy_turn().unwrap();
        assert_eq!(
            session.player_use_item("grenade").unwrap_err(),
            CommandError::UnknownItem {
                id: "grenade".into()
            }
        );
    }

    #[test]
    fn lockdown_blocks_skills_for_one_player_turn() {
        let template = template(vec![ActionKind::Special, ActionKind::Attack])
            .with_specials(vec![SpecialAbility::Lockdown { turns: 1 }]);
        let player = Player::new("hero", 30, 10, 0).with_skills(vec![Skill::new(
            "jab",
            "Jab",
            1,
            vec![SkillEffect::Strike { damage: 2 }],
        )]);
        let mut session = session_with(player, &template);

        session.player_attack().unwrap();
        session.enemy_turn().unwrap();
        assert_eq!(
            session.player_use_skill("jab").unwrap_err(),
            CommandError::LockedDown { turns: 1 }
        );
        session.player_attack().unwrap();
        assert_eq!(session.lockdown_turns(), 0);
        session.enemy_turn().unwrap();
        assert!(session.player_use_skill("jab").is_ok());
    }

    #[test]
    fn countdown_detonates_after_its_turns() {
        let template = EnemyTemplate::new("bomber", "Bomber", 200, 1)
            .with_behavior(EnemyBehavior::Pattern(vec![
                ActionKind::Special,
                ActionKind::Defend,
            ]))
            .with_specials(vec![SpecialAbility::Countdown {
                turns: 2,
                damage: 12,
            }]);
        let mut session = session_with(Player::new("hero", 30, 1, 0), &template);

        session.player_end_turn().unwrap();
        session.enemy_turn().unwrap();
        assert_eq!(session.pending_effects().len(), 1);

        session.player_end_turn().unwrap();
        session.enemy_turn().unwrap();
        assert_eq!(session.player().health(), 30);

        session.player_end_turn().unwrap();
        let report = session.enemy_turn().unwrap();
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::PendingResolved { damage_dealt: 12, .. })));
        assert_eq!(session.player().health(), 18);
        // The pattern wrapped around and armed a fresh countdown.
        assert_eq!(
            session.pending_effects(),
            &[PendingEffect::Countdown {
                turns_left: 2,
                damage: 12
            }]
        );
    }

    #[test]
    fn countdown_keeps_ticking_while_the_enemy_is_stunned() {
        let template = EnemyTemplate::new("bomber", "Bomber", 200, 1)
            .with_behavior(EnemyBehavior::Pattern(vec![
                ActionKind::Special,
                ActionKind::Defend,
            ]))
            .with_specials(vec![SpecialAbility::Countdown {
                turns: 2,
                damage: 12,
            }]);
        let mut session = session_with(Player::new("hero", 30, 1, 0), &template);

        session.player_end_turn().unwrap();
        session.enemy_turn().unwrap();
        session.enemy.add_status_effect(EffectKind::Stunned, 1);

        session.player_end_turn().unwrap();
        let report = session.enemy_turn().unwrap();
        assert!(report.events.contains(&CombatEvent::EnemyStunned));
        assert_eq!(
            session.pending_effects(),
            &[PendingEffect::Countdown {
                turns_left: 1,
                damage: 12
            }]
        );

        session.player_end_turn().unwrap();
        session.enemy_turn().unwrap();
        assert_eq!(session.player().health(), 18);
        assert!(session.pending_effects().is_empty());
    }

    #[test]
    fn countdown_can_defeat_the_player_during_a_stun() {
        let template = EnemyTemplate::new("bomber", "Bomber", 200, 1)
            .with_behavior(EnemyBehavior::Pattern(vec![ActionKind::Special]))
            .with_specials(vec![SpecialAbility::Countdown {
                turns: 1,
                damage: 40,
            }]);
        let mut session = session_with(Player::new("hero", 30, 1, 0), &template);

        session.player_end_turn().unwrap();
        session.enemy_turn().unwrap();
        session.enemy.add_status_effect(EffectKind::Stunned, 1);

        session.player_end_turn().unwrap();
        let report = session.enemy_turn().unwrap();
        assert_eq!(report.outcome, Some(CombatOutcome::Defeat));
        assert_eq!(session.player().health(), 0);
        assert_eq!(session.turn(), Turn::None);
    }

    #[test]
    fn red_first_attack_gets_bloodlust() {
        let mut session = session_with(specialized(Archetype::Red, 1), &template(vec![ActionKind::Attack]));
        // attack 10 + 2 bonus = 12, * 1.5 = 18, minus 3.
        session.player_attack().unwrap();
        assert_eq!(session.enemy().health(), 5);

        session.enemy_turn().unwrap();
        session.player_attack().unwrap();
        // 12 - 3 without the multiplier.
        assert_eq!(session.enemy().health(), 0);
    }

    #[test]
    fn blue_starts_with_bulwark() {
        let session = session_with(specialized(Archetype::Blue, 1), &template(vec![ActionKind::Attack]));
        // 2 passive + 5 from bulwark.
        assert_eq!(session.player().defense(), 7);
        assert!(session.history().iter().any(|e| matches!(
            e,
            CombatEvent::AbilityTriggered { trigger: Trigger::CombatStart, .. }
        )));
    }

    fn wall() -> EnemyTemplate {
        EnemyTemplate::new("wall", "Wall", 500, 1)
            .with_behavior(EnemyBehavior::Pattern(vec![ActionKind::Defend]))
    }

    fn fired<'a>(events: &'a [CombatEvent], id: &str) -> Option<&'a AppliedEffect> {
        events.iter().find_map(|event| match event {
            CombatEvent::AbilityTriggered {
                ability_id,
                applied,
                ..
            } if ability_id == id => Some(applied),
            _ => None,
        })
    }

    #[test]
    fn red_battle_rhythm_draws_on_the_third_chained_attack() {
        let mut session = session_with(specialized(Archetype::Red, 3), &wall());

        for _ in 0..2 {
            let report = session.player_attack().unwrap();
            assert!(fired(&report.events, "battle_rhythm").is_none());
            session.enemy_turn().unwrap();
        }

        let report = session.player_attack().unwrap();
        let applied = fired(&report.events, "battle_rhythm").unwrap();
        assert_eq!(applied.effect, AbilityEffect::DrawCards { count: 1 });
        assert_eq!(applied.magnitude, 1);
        assert_eq!(session.player().hand_size(), Some(6));
    }

    #[test]
    fn defending_breaks_the_attack_chain() {
        let mut session = session_with(specialized(Archetype::Red, 3), &wall());

        session.player_attack().unwrap();
        session.enemy_turn().unwrap();
        session.player_attack().unwrap();
        session.enemy_turn().unwrap();
        session.player_defend().unwrap();
        session.enemy_turn().unwrap();

        let report = session.player_attack().unwrap();
        assert!(fired(&report.events, "battle_rhythm").is_none());
    }

    #[test]
    fn blue_riposte_converts_defense_into_damage() {
        let mut session = session_with(specialized(Archetype::Blue, 2), &wall());
        // 4 passive + 5 from bulwark.
        assert_eq!(session.player().defense(), 9);

        let report = session.player_defend().unwrap();
        // Half of the 14 defense held once defending.
        let applied = fired(&report.events, "riposte").unwrap();
        assert_eq!(applied.magnitude, 7);
        assert_eq!(session.enemy().health(), 493);
    }

    #[test]
    fn blue_fortress_adds_defense_as_the_turn_ends() {
        let mut session = session_with(specialized(Archetype::Blue, 5), &wall());
        assert_eq!(session.player().defense(), 15);

        let report = session.player_attack().unwrap();
        let applied = fired(&report.events, "fortress").unwrap();
        assert_eq!(applied.effect, AbilityEffect::GrantDefense { amount: 3 });
        assert_eq!(session.player().defense(), 18);
        assert_eq!(session.turn(), Turn::Enemy);
    }

    #[test]
    fn blue_frost_ward_weakens_the_first_attacker_once() {
        let brute = EnemyTemplate::new("brute", "Brute", 500, 30)
            .with_behavior(EnemyBehavior::Pattern(vec![ActionKind::Attack]));
        let mut session = session_with(specialized(Archetype::Blue, 3), &brute);

        session.player_attack().unwrap();
        let report = session.enemy_turn().unwrap();
        assert!(fired(&report.events, "frost_ward").is_some());
        assert_eq!(session.enemy().statuses().get(EffectKind::Weak), 2);

        session.player_attack().unwrap();
        let report = session.enemy_turn().unwrap();
        assert!(fired(&report.events, "frost_ward").is_none());
        assert_eq!(
            session
                .history()
                .iter()
                .filter(|e| matches!(
                    e,
                    CombatEvent::AbilityTriggered {
                        trigger: Trigger::FirstDamage,
                        ..
                    }
                ))
                .count(),
            1
        );
    }

    #[test]
    fn purple_flux_draws_when_the_play_type_changes() {
        let mut session = session_with(specialized(Archetype::Purple, 1), &wall());

        let report = session.player_attack().unwrap();
        assert!(fired(&report.events, "flux").is_none());
        session.enemy_turn().unwrap();

        let report = session.player_defend().unwrap();
        let applied = fired(&report.events, "flux").unwrap();
        assert_eq!(applied.effect, AbilityEffect::DrawCards { count: 1 });
        assert_eq!(session.player().hand_size(), Some(6));
    }

    #[test]
    fn purple_momentum_grants_an_action_point_at_five_plays() {
        let template = EnemyTemplate::new("wall", "Wall", 500, 1)
            .with_behavior(EnemyBehavior::Pattern(vec![ActionKind::Defend]));
        let mut session = session_with(specialized(Archetype::Purple, 3), &template);
        assert_eq!(session.player().action_points(), 2);

        for _ in 0..4 {
            session.player_defend().unwrap();
            if session.turn() == Turn::Enemy {
                session.enemy_turn().unwrap();
            }
        }
        assert_eq!(session.turn(), Turn::Player);
        let report = session.player_defend().unwrap();
        assert!(report.events.iter().any(|e| matches!(
            e,
            CombatEvent::AbilityTriggered { trigger: Trigger::CardCount, .. }
        )));
        assert_eq!(session.player().action_points(), 2);
        assert_eq!(session.turn(), Turn::Player);
    }

    #[test]
    fn events_reach_the_sink() {
        let log = EventLog::new();
        let mut session = CombatSession::builder(Player::new("hero", 30, 10, 0))
            .config(CombatConfig::without_crits())
            .rng(Box::new(SequenceRandom::never()))
            .sink(Box::new(log.clone()))
            .start_with_enemy(Enemy::from_template(&template(vec![ActionKind::Attack]), 1));

        session.player_attack().unwrap();
        assert_eq!(log.snapshot(), session.history());
    }
}
