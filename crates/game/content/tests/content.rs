use std::fs;

use combat_content::{ContentFactory, EnemyLoader};
use combat_core::{
    CombatConfig, CombatOutcome, CombatSession, Combatant, EnemyBehavior, EnemyCatalog,
    EnemyTier, Inventory, Player, SequenceRandom, SkillEffect, SpecialAbility,
};

#[test]
fn bundled_catalogs_load() {
    let factory = ContentFactory::bundled();

    let config = factory.load_config().unwrap();
    assert_eq!(config, CombatConfig::default());

    let bestiary = factory.load_enemies().unwrap();
    assert_eq!(bestiary.len(), 4);
    let warden = bestiary.template("warden").unwrap();
    assert_eq!(warden.tier, EnemyTier::Boss);
    assert!(matches!(warden.behavior, EnemyBehavior::Tree(_)));
    assert!(
        warden
            .special_abilities
            .iter()
            .all(|special| !matches!(special, SpecialAbility::Unknown { .. }))
    );

    let skills = factory.load_skills().unwrap();
    assert!(skills.iter().any(|skill| skill.id == "shock_lance"));

    let backpack = factory.load_backpack().unwrap();
    assert_eq!(backpack.len(), factory.load_items().unwrap().len());
    assert!(backpack.find_item("flashbang").is_some());
}

#[test]
fn loaded_content_drives_a_combat() {
    let factory = ContentFactory::bundled();
    let bestiary = factory.load_enemies().unwrap();
    let skills = factory.load_skills().unwrap();

    let player = Player::new("hero", 50, 10, 0).with_skills(skills);
    let mut session = CombatSession::builder(player)
        .config(factory.load_config().unwrap())
        .rng(Box::new(SequenceRandom::never()))
        .start(&bestiary, "sentry")
        .unwrap();

    session.player_attack().unwrap();
    assert_eq!(session.enemy().health(), 13);
    session.enemy_turn().unwrap();
    session.player_attack().unwrap();
    session.enemy_turn().unwrap();
    let report = session.player_attack().unwrap();

    assert!(matches!(report.outcome, Some(CombatOutcome::Victory { .. })));
    assert_eq!(session.player().credits(), 25);
}

#[test]
fn factory_reads_a_custom_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("enemies.ron"),
        r#"(enemies: [(id: "rat", name: "Rat", health: 4, attack: 1)])"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("skills.ron"),
        r#"(skills: [(id: "jab", name: "Jab", energy_cost: 0, effects: [Strike(damage: 2)])])"#,
    )
    .unwrap();
    fs::write(dir.path().join("config.toml"), "burn_damage = 7\n").unwrap();

    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_enemies().unwrap().len(), 1);
    assert_eq!(
        factory.load_skills().unwrap()[0].effects,
        vec![SkillEffect::Strike { damage: 2 }]
    );
    assert_eq!(factory.load_config().unwrap().burn_damage, 7);
    // No items.ron in this directory.
    assert!(factory.load_items().is_err());
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
}

#[test]
fn load_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enemies.ron");
    fs::write(&path, "(enemies: [(id: \"rat\"").unwrap();

    let err = EnemyLoader::load(&path).unwrap_err().to_string();
    assert!(err.contains("enemies.ron"), "unexpected error: {err}");

    let missing = EnemyLoader::load(&dir.path().join("nope.ron")).unwrap_err();
    assert!(missing.to_string().contains("Failed to read file"));
}
