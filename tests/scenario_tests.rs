//! Standard scenario and persistence tests.

use doomcaster::cards::CardRegistry;
use doomcaster::core::{Difficulty, EngineConfig};
use doomcaster::rules::Engine;
use doomcaster::setup::ScenarioBuilder;

#[test]
fn test_archmage_tiers() {
    let engine = ScenarioBuilder::standard(Difficulty::Archmage).with_seed(5).build();

    for tier in 0..3 {
        let count = engine.areas().iter().filter(|a| a.tier == tier).count();
        assert_eq!(count, 4);
    }
    assert_eq!(engine.revealed_tier(), Some(0));
}

#[test]
fn test_standard_spells_come_from_catalog() {
    let registry = CardRegistry::standard();
    let engine = ScenarioBuilder::standard(Difficulty::Acolyte).with_seed(9).build();

    assert_eq!(engine.offered().count(), 5);
    for id in engine.offered() {
        let spell = engine.spell(id).unwrap();
        let template = registry.spell(&spell.name).unwrap();
        assert_eq!(spell.base_attack, template.attack);
        assert_eq!(spell.element, template.element);
    }
}

#[test]
fn test_different_seeds_deal_differently() {
    let names = |seed: u64| -> Vec<String> {
        let engine = ScenarioBuilder::standard(Difficulty::Archmage).with_seed(seed).build();
        engine.areas().iter().map(|a| a.name.clone()).collect()
    };
    let dealt: Vec<_> = (0..8).map(names).collect();
    assert!(dealt.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn test_snapshot_resumes_mid_game() {
    let mut engine = ScenarioBuilder::standard(Difficulty::Acolyte).with_seed(21).build();
    let spells = engine.collection().to_vec();
    let area = engine.areas()[0].id;
    engine.cast_spell(spells[0], area).unwrap();
    engine.acquire_spell(0).unwrap_err();

    let bytes = engine.snapshot().unwrap();
    let mut restored = Engine::restore(&bytes).unwrap();

    assert_eq!(restored.turn_number(), engine.turn_number());
    assert_eq!(restored.casts_remaining(), engine.casts_remaining());
    assert_eq!(restored.areas(), engine.areas());
    assert_eq!(restored.offer_row(), engine.offer_row());

    // Both branches continue identically.
    let a = engine.cast_spell(spells[3], area);
    let b = restored.cast_spell(spells[3], area);
    assert_eq!(a, b);
    assert_eq!(engine.end_turn(), restored.end_turn());
}

#[test]
fn test_clone_is_an_independent_branch() {
    let mut engine = ScenarioBuilder::standard(Difficulty::Acolyte).build();
    let branch = engine.clone();
    let spell = engine.collection()[0];
    let area = engine.areas()[0].id;

    engine.cast_spell(spell, area).unwrap();

    assert!(branch.history().is_empty());
    assert!(branch.spell(spell).is_some_and(|s| !s.used));
}

#[test]
fn test_config_json_round_trip() {
    let config = EngineConfig::default()
        .with_cast_limit(4)
        .with_difficulty(Difficulty::Archmage)
        .with_seed(77);

    let json = serde_json::to_string(&config).unwrap();
    let back: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);

    let partial: EngineConfig = serde_json::from_str(r#"{"cast_limit": 2}"#).unwrap();
    assert_eq!(partial.cast_limit, 2);
    assert_eq!(partial.collection_capacity, 5);
}

#[test]
fn test_later_stages_defend_together() {
    for difficulty in [Difficulty::Acolyte, Difficulty::Archmage] {
        for seed in 0..10 {
            let engine = ScenarioBuilder::standard(difficulty).with_seed(seed).build();

            for area in engine.areas() {
                assert_eq!(
                    area.is_collective(),
                    area.tier > 0,
                    "{:?} seed {} area {} in tier {}",
                    difficulty,
                    seed,
                    area.name,
                    area.tier
                );
            }
        }
    }
}
