//! Victory rewards.

use crate::config::CombatConfig;
use crate::enemy::{Enemy, EnemyTier};
use crate::rng::RandomSource;

/// Rarity of a dropped card.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardRarity {
    Common,
    Uncommon,
    Rare,
}

/// Everything paid out for a victory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub gold: u32,
    pub credits: u32,
    pub cards: Vec<CardRarity>,
    pub mastery_xp: u32,
}

impl Rewards {
    pub fn count_of(&self, rarity: CardRarity) -> usize {
        self.cards.iter().filter(|card| **card == rarity).count()
    }
}

/// Rolls the rewards for defeating `enemy`.
///
/// Currency is the enemy's level-scaled table. Bosses always drop exactly one
/// rare card without a roll; elites and normal enemies roll once against
/// their configured drop chance.
pub fn roll_rewards(enemy: &Enemy, config: &CombatConfig, rng: &mut dyn RandomSource) -> Rewards {
    let table = enemy.rewards();
    let (card, mastery_xp) = match enemy.tier() {
        EnemyTier::Boss => (Some(CardRarity::Rare), config.boss_mastery_xp),
        EnemyTier::Elite => (
            rng.chance(config.elite_drop_chance)
                .then_some(CardRarity::Uncommon),
            config.elite_mastery_xp,
        ),
        EnemyTier::Normal => (
            rng.chance(config.normal_drop_chance)
                .then_some(CardRarity::Common),
            config.normal_mastery_xp,
        ),
    };

    Rewards {
        gold: table.gold,
        credits: table.credits,
        cards: card.into_iter().collect(),
        mastery_xp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::EnemyTemplate;
    use crate::rng::{PcgRandom, SequenceRandom};

    fn enemy(tier: EnemyTier, level: u32) -> Enemy {
        let template = EnemyTemplate::new("foe", "Foe", 30, 5)
            .with_tier(tier)
            .with_rewards(20, 10);
        Enemy::from_template(&template, level)
    }

    #[test]
    fn boss_always_drops_exactly_one_rare() {
        let config = CombatConfig::default();
        for seed in 0..32 {
            let rewards = roll_rewards(&enemy(EnemyTier::Boss, 1), &config, &mut PcgRandom::seeded(seed));
            assert_eq!(rewards.cards, vec![CardRarity::Rare]);
            assert_eq!(rewards.mastery_xp, 50);
        }
    }

    #[test]
    fn elite_drop_follows_the_roll() {
        let config = CombatConfig::default();
        let hit = roll_rewards(&enemy(EnemyTier::Elite, 1), &config, &mut SequenceRandom::new(vec![69]));
        assert_eq!(hit.cards, vec![CardRarity::Uncommon]);

        let miss = roll_rewards(&enemy(EnemyTier::Elite, 1), &config, &mut SequenceRandom::new(vec![70]));
        assert!(miss.cards.is_empty());
        assert_eq!(miss.mastery_xp, 25);
    }

    #[test]
    fn normal_drop_and_scaled_currency() {
        let config = CombatConfig::default();
        let rewards = roll_rewards(&enemy(EnemyTier::Normal, 2), &config, &mut SequenceRandom::new(vec![29]));
        assert_eq!(rewards.cards, vec![CardRarity::Common]);
        assert_eq!(rewards.gold, 24);
        assert_eq!(rewards.credits, 12);
        assert_eq!(rewards.mastery_xp, 10);

        let rewards = roll_rewards(&enemy(EnemyTier::Normal, 1), &config, &mut SequenceRandom::never());
        assert_eq!(rewards.count_of(CardRarity::Common), 0);
    }
}
