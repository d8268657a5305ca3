//! Session construction with injected collaborators.

use crate::config::CombatConfig;
use crate::enemy::{DecisionPolicy, Enemy, EnemyActionSelector, EnemyCatalog};
use crate::error::RestoreError;
use crate::events::{EventSink, NullSink};
use crate::inventory::{Backpack, Inventory};
use crate::player::Player;
use crate::rng::{PcgRandom, RandomSource};

use super::{CombatSession, PlayTracker, Turn};

/// Builder for [`CombatSession`].
///
/// Every collaborator is optional:
///
/// | collaborator | default |
/// |---|---|
/// | config | [`CombatConfig::default`] |
/// | random source | [`PcgRandom`] seeded with 0 |
/// | inventory | empty [`Backpack`] |
/// | event sink | [`NullSink`] |
/// | decision policy | the enemy's own behavior |
pub struct CombatSessionBuilder {
    player: Player,
    config: CombatConfig,
    rng: Option<Box<dyn RandomSource>>,
    inventory: Option<Box<dyn Inventory>>,
    sink: Option<Box<dyn EventSink>>,
    policy: Option<Box<dyn DecisionPolicy>>,
}

impl CombatSessionBuilder {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            config: CombatConfig::default(),
            rng: None,
            inventory: None,
            sink: None,
            policy: None,
        }
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn inventory(mut self, inventory: Box<dyn Inventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Overrides every enemy's own behavior with `policy`.
    pub fn policy(mut self, policy: Box<dyn DecisionPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Starts a combat against catalog entry `enemy_id`, scaled to the
    /// player's level.
    pub fn start(
        self,
        catalog: &dyn EnemyCatalog,
        enemy_id: &str,
    ) -> Result<CombatSession, RestoreError> {
        let template = catalog
            .template(enemy_id)
            .ok_or_else(|| RestoreError::MissingEnemy {
                id: enemy_id.to_owned(),
            })?;
        let enemy = Enemy::from_template(template, self.player.level());
        Ok(self.start_with_enemy(enemy))
    }

    /// Starts a combat against an already instantiated enemy.
    pub fn start_with_enemy(self, enemy: Enemy) -> CombatSession {
        let selector = match self.policy {
            Some(policy) => EnemyActionSelector::with_policy(policy),
            None => EnemyActionSelector::for_enemy(),
        };

        let mut session = CombatSession {
            player: self.player,
            enemy,
            config: self.config,
            rng: self
                .rng
                .unwrap_or_else(|| Box::new(PcgRandom::default())),
            inventory: self
                .inventory
                .unwrap_or_else(|| Box::new(Backpack::new())),
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
            selector,
            turn: Turn::Player,
            active: true,
            round: 0,
            outcome: None,
            countdowns: Vec::new(),
            lockdown: 0,
            plays: PlayTracker::default(),
            history: Vec::new(),
            step_events: Vec::new(),
        };
        session.open();
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Combatant;
    use crate::enemy::{Bestiary, EnemyTemplate};
    use crate::events::CombatEvent;

    #[test]
    fn start_scales_enemy_to_player_level() {
        let bestiary: Bestiary = [EnemyTemplate::new("imp", "Imp", 10, 5)].into_iter().collect();
        let player = Player::from_save(crate::player::PlayerSave {
            level: 6,
            ..Default::default()
        });

        let session = CombatSessionBuilder::new(player).start(&bestiary, "imp").unwrap();
        assert_eq!(session.enemy().vitals().max_health, 20);
        assert_eq!(session.turn(), Turn::Player);
        assert!(session.is_active());
        assert!(matches!(
            session.history().first(),
            Some(CombatEvent::CombatStarted { enemy_level: 6, .. })
        ));
    }

    #[test]
    fn missing_enemy_is_reported() {
        let err = CombatSessionBuilder::new(Player::default())
            .start(&Bestiary::new(), "lich")
            .unwrap_err();
        assert_eq!(err, RestoreError::MissingEnemy { id: "lich".into() });
    }
}
