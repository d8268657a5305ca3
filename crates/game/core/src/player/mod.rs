//! The player combatant.
//!
//! A [`Player`] is built from a persistent [`PlayerSave`] at combat start and
//! converted back when the session hands it over. Specialization bonuses are
//! folded into the effective stats on construction and on every mastery
//! level-up; the save only stores base values.

pub mod skill;

pub use skill::{Skill, SkillEffect};

use crate::combatant::{Combatant, Vitals};
use crate::specialization::{
    Archetype, MasteryGain, PassiveBonuses, SpecializationEngine, SpecializationRecord,
};
use crate::status::{EffectKind, StatusTable};

/// Persistent player state between combats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerSave {
    pub name: String,
    /// Overall player level; scales the enemies met.
    pub level: u32,
    pub health: u32,
    /// Maximum health before specialization bonuses.
    pub max_health: u32,
    /// Attack before specialization bonuses.
    pub attack: u32,
    /// Starting defense before specialization bonuses.
    pub defense: u32,
    pub max_energy: u32,
    pub hand_size: u32,
    pub gold: u32,
    pub credits: u32,
    pub skills: Vec<Skill>,
    pub specialization: SpecializationRecord,
}

impl Default for PlayerSave {
    fn default() -> Self {
        Self {
            name: "Runner".to_string(),
            level: 1,
            health: 50,
            max_health: 50,
            attack: 6,
            defense: 0,
            max_energy: 3,
            hand_size: 5,
            gold: 0,
            credits: 0,
            skills: Vec::new(),
            specialization: SpecializationRecord::default(),
        }
    }
}

/// The player during a combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    level: u32,
    vitals: Vitals,
    statuses: StatusTable,
    base_attack: u32,
    base_defense: u32,
    base_max_health: u32,
    energy: u32,
    max_energy: u32,
    action_points: u32,
    base_hand_size: u32,
    hand_size: u32,
    encrypted_cards: u32,
    gold: u32,
    credits: u32,
    skills: Vec<Skill>,
    specialization: SpecializationEngine,
    defending: bool,
    defend_bonus: u32,
}

impl Player {
    /// Builds a player with the given combat stats and default save values.
    pub fn new(name: impl Into<String>, max_health: u32, attack: u32, defense: u32) -> Self {
        Self::from_save(PlayerSave {
            name: name.into(),
            health: max_health,
            max_health,
            attack,
            defense,
            ..PlayerSave::default()
        })
    }

    /// Rebuilds a player from its save, applying passive bonuses.
    ///
    /// Saved health is clamped to the effective maximum.
    pub fn from_save(save: PlayerSave) -> Self {
        let specialization = SpecializationEngine::from_record(save.specialization);
        let bonuses = specialization.passive_bonuses();

        let max_health = save.max_health.saturating_add(bonuses.max_health).max(1);
        let vitals = Vitals {
            health: save.health.min(max_health),
            max_health,
            defense: save.defense.saturating_add(bonuses.defense),
            attack: save.attack.saturating_add(bonuses.attack),
        };

        let mut player = Self {
            name: save.name,
            level: save.level.max(1),
            vitals,
            statuses: StatusTable::empty(),
            base_attack: save.attack,
            base_defense: save.defense,
            base_max_health: save.max_health,
            energy: save.max_energy,
            max_energy: save.max_energy,
            action_points: 0,
            base_hand_size: save.hand_size,
            hand_size: save.hand_size,
            encrypted_cards: 0,
            gold: save.gold,
            credits: save.credits,
            skills: save.skills,
            specialization,
            defending: false,
            defend_bonus: 0,
        };
        player.action_points = player.action_points_per_turn();
        player
    }

    /// Captures the persistent part of the player.
    pub fn to_save(&self) -> PlayerSave {
        PlayerSave {
            name: self.name.clone(),
            level: self.level,
            health: self.vitals.health,
            max_health: self.base_max_health,
            attack: self.base_attack,
            defense: self.base_defense,
            max_energy: self.max_energy,
            hand_size: self.base_hand_size,
            gold: self.gold,
            credits: self.credits,
            skills: self.skills.clone(),
            specialization: self.specialization.to_record(),
        }
    }

    /// Switches archetype, keeping mastery progress and recomputing bonuses.
    pub fn with_archetype(self, archetype: Archetype) -> Self {
        let mut save = self.to_save();
        save.specialization.archetype = archetype;
        Self::from_save(save)
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn attack(&self) -> u32 {
        self.vitals.attack
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn action_points(&self) -> u32 {
        self.action_points
    }

    /// Cards currently unreadable. Zero once `encrypted` has expired.
    pub fn encrypted_cards(&self) -> u32 {
        if self.statuses.has(EffectKind::Encrypted) {
            self.encrypted_cards
        } else {
            0
        }
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn specialization(&self) -> &SpecializationEngine {
        &self.specialization
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    fn action_points_per_turn(&self) -> u32 {
        1 + self.specialization.passive_bonuses().action_points
    }

    /// Start-of-turn refill: energy, action points and a fresh hand.
    pub fn refill_for_turn(&mut self) {
        self.energy = self.max_energy;
        self.action_points = self.action_points_per_turn();
        self.hand_size = self.base_hand_size;
        if !self.statuses.has(EffectKind::Encrypted) {
            self.encrypted_cards = 0;
        }
    }

    /// Spends energy if enough is available; false leaves it untouched.
    pub fn spend_energy(&mut self, amount: u32) -> bool {
        if self.energy < amount {
            return false;
        }
        self.energy -= amount;
        true
    }

    pub fn restore_energy(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_energy.saturating_sub(self.energy));
        self.energy += restored;
        restored
    }

    /// Spends one action point and returns how many remain.
    pub fn spend_action_point(&mut self) -> u32 {
        self.action_points = self.action_points.saturating_sub(1);
        self.action_points
    }

    pub fn grant_action_point(&mut self) {
        self.action_points = self.action_points.saturating_add(1);
    }

    /// Draws cards up to `max_hand`, returning how many were drawn.
    pub fn draw_cards(&mut self, count: u32, max_hand: u32) -> u32 {
        let drawn = count.min(max_hand.saturating_sub(self.hand_size));
        self.hand_size += drawn;
        drawn
    }

    /// Raises defense for the coming enemy turn and remembers the grant.
    pub fn begin_defending(&mut self, amount: u32) -> u32 {
        let granted = self.add_defense(amount);
        self.defending = true;
        self.defend_bonus = self.defend_bonus.saturating_add(granted);
        granted
    }

    /// Removes what is left of the defend grant; returns the defense removed.
    pub fn end_defending(&mut self) -> u32 {
        if !self.defending {
            return 0;
        }
        let removed = self.defend_bonus.min(self.vitals.defense);
        self.vitals.defense -= removed;
        self.defending = false;
        self.defend_bonus = 0;
        removed
    }

    pub fn add_currency(&mut self, gold: u32, credits: u32) {
        self.gold = self.gold.saturating_add(gold);
        self.credits = self.credits.saturating_add(credits);
    }

    /// Feeds mastery XP to the specialization and applies any bonus growth.
    ///
    /// Max health grows together with current health. The action point bonus
    /// takes effect from the next refill.
    pub fn gain_mastery_xp(&mut self, amount: u32) -> MasteryGain {
        let before = self.specialization.passive_bonuses();
        let gain = self.specialization.gain_mastery_xp(amount);
        if gain.leveled_up {
            let delta = self.specialization.passive_bonuses().gained_since(&before);
            self.apply_bonus_delta(delta);
        }
        gain
    }

    fn apply_bonus_delta(&mut self, delta: PassiveBonuses) {
        let vitals = &mut self.vitals;
        vitals.attack = vitals.attack.saturating_add(delta.attack);
        vitals.defense = vitals.defense.saturating_add(delta.defense);
        vitals.max_health = vitals.max_health.saturating_add(delta.max_health);
        vitals.health = vitals
            .health
            .saturating_add(delta.max_health)
            .min(vitals.max_health);
    }
}

impl Combatant for Player {
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

    fn encrypt_cards(&mut self, count: u32, duration: u32) -> Option<u32> {
        let readable = self.hand_size.saturating_sub(self.encrypted_cards());
        let encrypted = count.min(readable);
        self.encrypted_cards = self.encrypted_cards() + encrypted;
        self.statuses.add(EffectKind::Encrypted, duration);
        Some(encrypted)
    }

    fn hand_size(&self) -> Option<u32> {
        Some(self.hand_size)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::from_save(PlayerSave::default())
    }
}
