//! Fuse tests.
//!
//! Fusing goes through both entry points: `Engine::fuse_spell` directly and
//! the `FuseWorkflow` selection state machine.

use doomcaster::cards::{AreaTemplate, ModifierKind, ModifierSource, SpellTemplate};
use doomcaster::core::{Action, Element};
use doomcaster::rules::{Engine, FuseError, FuseState, FuseWorkflow};
use doomcaster::setup::ScenarioBuilder;

fn starting_engine() -> Engine {
    ScenarioBuilder::new()
        .with_collection([
            SpellTemplate::new("Shape Water", Element::Water, 0)
                .with_ability("Fuse")
                .with_modifier("+3 ATK"),
            SpellTemplate::new("Conjure Fire", Element::Fire, 5),
            SpellTemplate::new("Gather Wind", Element::Wind, 3),
        ])
        .with_tier([AreaTemplate::new("Towering Fortress", 40)])
        .build()
}

#[test]
fn test_fuse_reduces_collection_by_one() {
    let mut engine = starting_engine();
    let ids = engine.collection().to_vec();

    engine.fuse_spell(ids[0], ids[1]).unwrap();

    assert_eq!(engine.collection().len(), 2);
    assert_eq!(engine.discarded(), &[ids[0]]);
    let target = engine.spell(ids[1]).unwrap();
    assert_eq!(target.modifiers.len(), 1);
    assert_eq!(target.modifiers[0].kind, ModifierKind::Flat(3));
    assert_eq!(target.modifiers[0].source, ModifierSource::Fused { from: ids[0] });
}

#[test]
fn test_fused_spell_hits_harder() {
    let mut engine = starting_engine();
    let ids = engine.collection().to_vec();
    let area = engine.areas()[0].id;

    engine.fuse_spell(ids[0], ids[1]).unwrap();
    let outcome = engine.cast_spell(ids[1], area).unwrap();

    assert_eq!(outcome.attack, 8);
    assert_eq!(engine.area(area).map(|a| a.damage), Some(8));
}

#[test]
fn test_fused_source_cannot_be_cast() {
    let mut engine = starting_engine();
    let ids = engine.collection().to_vec();
    let area = engine.areas()[0].id;

    engine.fuse_spell(ids[0], ids[2]).unwrap();

    assert!(engine.cast_spell(ids[0], area).is_err());
    assert_eq!(
        engine.fuse_spell(ids[0], ids[1]),
        Err(FuseError::UnknownSpell(ids[0]))
    );
}

#[test]
fn test_fuse_is_recorded() {
    let mut engine = starting_engine();
    let ids = engine.collection().to_vec();

    engine.fuse_spell(ids[0], ids[2]).unwrap();

    let last = engine.history().back().map(|r| r.action.clone());
    assert_eq!(last, Some(Action::Fuse { source: ids[0], target: ids[2] }));
}

#[test]
fn test_workflow_self_target_keeps_source() {
    let mut engine = starting_engine();
    let ids = engine.collection().to_vec();
    let mut fuse = FuseWorkflow::new();

    fuse.select_source(&engine, ids[0]).unwrap();
    assert_eq!(
        fuse.select_target(&mut engine, ids[0]),
        Err(FuseError::InvalidFuseSelfTarget)
    );
    assert_eq!(fuse.state(), FuseState::SourceSelected(ids[0]));
    assert_eq!(engine.collection().len(), 3);

    let applied = fuse.select_target(&mut engine, ids[2]).unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(fuse.state(), FuseState::Applied { source: ids[0], target: ids[2] });

    // The source is gone, so it can't be selected again.
    assert_eq!(
        fuse.select_source(&engine, ids[0]),
        Err(FuseError::UnknownSpell(ids[0]))
    );
}

#[test]
fn test_workflow_requires_fuse_ability() {
    let engine = starting_engine();
    let ids = engine.collection().to_vec();
    let mut fuse = FuseWorkflow::new();

    assert_eq!(
        fuse.select_source(&engine, ids[1]),
        Err(FuseError::SourceLacksFuseAbility(ids[1]))
    );
    assert_eq!(fuse.state(), FuseState::Idle);
}
