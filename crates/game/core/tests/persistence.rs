#![cfg(feature = "serde")]

use combat_core::{
    ActionKind, Archetype, Bestiary, CardRarity, CombatConfig, CombatSession, Combatant, EffectKind, Enemy,
    EnemyBehavior, EnemyCatalog, EnemyRecord, EnemyTemplate, Player, PlayerSave, RestoreError,
    SequenceRandom, Skill, SkillEffect, SpecialAbility, SpecializationEngine,
    SpecializationRecord, Trigger,
};

fn catalog() -> Bestiary {
    [EnemyTemplate::new("lurker", "Lurker", 30, 6)
        .with_defense(2)
        .with_rewards(12, 4)
        .with_behavior(EnemyBehavior::Pattern(vec![
            ActionKind::Attack,
            ActionKind::Defend,
            ActionKind::Special,
        ]))
        .with_specials(vec![SpecialAbility::Countdown {
            turns: 2,
            damage: 15,
        }])]
    .into_iter()
    .collect()
}

#[test]
fn wounded_enemy_survives_a_json_round_trip() {
    let bestiary = catalog();
    let template = bestiary.template("lurker").unwrap();

    let mut enemy = Enemy::from_template(template, 2);
    enemy.take_damage(10);
    enemy.add_status_effect(EffectKind::Poisoned, 3);
    enemy.next_pattern_kind();
    enemy.next_pattern_kind();

    let json = serde_json::to_string(&enemy.to_record()).unwrap();
    let record: EnemyRecord = serde_json::from_str(&json).unwrap();
    let restored = Enemy::from_record(&record, &bestiary).unwrap();

    assert_eq!(restored, enemy);
    assert_eq!(restored.pattern_index(), 2);
    assert_eq!(restored.statuses().get(EffectKind::Poisoned), 3);
}

#[test]
fn restoring_an_uncatalogued_enemy_fails() {
    let record = Enemy::from_template(&EnemyTemplate::new("ghost", "Ghost", 5, 1), 1).to_record();
    let err = Enemy::from_record(&record, &catalog()).unwrap_err();
    assert_eq!(err, RestoreError::UnknownEnemy { id: "ghost".into() });
}

#[test]
fn specialization_record_round_trips() {
    let mut engine = SpecializationEngine::new(Archetype::Purple);
    engine.gain_mastery_xp(250);

    let json = serde_json::to_string(&engine.to_record()).unwrap();
    let record: SpecializationRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record.archetype, Archetype::Purple);
    assert_eq!(record.mastery_level, 3);
    assert_eq!(record.mastery_xp, 0);
    assert_eq!(record.mastery_xp_required, 225);

    let restored = SpecializationEngine::from_record(record);
    assert_eq!(restored.passive_bonuses(), engine.passive_bonuses());
    assert_eq!(restored.passive_bonuses().action_points, 1);
}

#[test]
fn player_save_carries_progress_out_of_combat() {
    let save = PlayerSave {
        name: "Vex".into(),
        attack: 100,
        skills: vec![Skill::new(
            "slash",
            "Slash",
            1,
            vec![SkillEffect::Strike { damage: 8 }],
        )],
        specialization: SpecializationRecord {
            archetype: Archetype::Blue,
            ..SpecializationRecord::default()
        },
        ..PlayerSave::default()
    };

    let bestiary = catalog();
    let mut session = CombatSession::builder(Player::from_save(save))
        .config(CombatConfig::without_crits())
        .rng(Box::new(SequenceRandom::never()))
        .start(&bestiary, "lurker")
        .unwrap();
    session.player_attack().unwrap();
    assert!(!session.is_active());

    let after = session.into_player().to_save();
    assert_eq!(after.gold, 12);
    assert_eq!(after.credits, 4);
    assert_eq!(after.specialization.mastery_xp, 10);
    // Bonuses are never folded into the stored base stats.
    assert_eq!(after.attack, 100);
    assert_eq!(after.max_health, 50);

    let json = serde_json::to_string(&after).unwrap();
    let loaded: PlayerSave = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, after);
    assert_eq!(Player::from_save(loaded).to_save(), after);
}

#[test]
fn sparse_player_save_falls_back_to_defaults() {
    let loaded: PlayerSave = serde_json::from_str(r#"{"name":"Nyx","gold":40}"#).unwrap();
    assert_eq!(loaded.name, "Nyx");
    assert_eq!(loaded.gold, 40);
    assert_eq!(loaded.max_health, PlayerSave::default().max_health);
    assert_eq!(loaded.specialization, SpecializationRecord::default());
}

#[test]
fn specials_serialize_as_flat_specs() {
    let json = serde_json::to_value(SpecialAbility::MultiHit { hits: 3 }).unwrap();
    assert_eq!(json["id"], "multi_hit");
    assert_eq!(json["hits"], 3);

    let unknown: SpecialAbility = serde_json::from_str(r#"{"id":"time_warp"}"#).unwrap();
    assert_eq!(
        unknown,
        SpecialAbility::Unknown {
            id: "time_warp".into()
        }
    );
}

#[test]
fn enum_names_match_their_display_form() {
    for kind in [EffectKind::Vulnerable, EffectKind::AdaptiveResist] {
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json, kind.to_string());
    }
    for kind in [ActionKind::Attack, ActionKind::Special] {
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json, kind.to_string());
    }
    assert_eq!(serde_json::to_value(Archetype::Purple).unwrap(), "purple");
    assert_eq!(serde_json::to_value(Trigger::FirstDamage).unwrap(), "first_damage");
    assert_eq!(serde_json::to_value(CardRarity::Rare).unwrap(), "rare");

    let kind: EffectKind = serde_json::from_str(r#""adaptive_resist""#).unwrap();
    assert_eq!(kind, EffectKind::AdaptiveResist);
    assert!(serde_json::from_str::<EffectKind>(r#""AdaptiveResist""#).is_err());
}
