//! Fusing one spell onto another.
//!
//! A spell with the Fuse ability can be sacrificed to give another
//! collection spell its modifier value. The source goes to the discard
//! pile; the target keeps the new modifiers for the rest of the game.
//!
//! `FuseWorkflow` is the two-click version a host UI drives: pick a source,
//! then pick a target.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::Engine;
use super::error::FuseError;
use crate::cards::{Modifier, Spell};
use crate::core::{Action, SpellId};
use crate::zones::{SpellZone, ZonePosition};

impl Engine {
    /// Check that a spell can be used as a fuse source.
    pub fn check_fuse_source(&self, source: SpellId) -> Result<&Spell, FuseError> {
        let spell = self.collection_spell(source)?;
        if !spell.ability.has_fuse() {
            return Err(FuseError::SourceLacksFuseAbility(source));
        }
        if spell.used {
            return Err(FuseError::SpellAlreadyUsed(source));
        }
        Ok(spell)
    }

    /// Fuse `source` onto `target`.
    ///
    /// Returns the modifiers appended to the target.
    pub fn fuse_spell(&mut self, source: SpellId, target: SpellId) -> Result<Vec<Modifier>, FuseError> {
        let payload = self.check_fuse_source(source)?.fuse_payload();
        if source == target {
            return Err(FuseError::InvalidFuseSelfTarget);
        }
        self.collection_spell(target)?;

        let modifiers: Vec<Modifier> = payload
            .into_iter()
            .map(|kind| Modifier::fused(kind, source))
            .collect();
        if let Some(spell) = self.state.spell_mut(target) {
            for &modifier in &modifiers {
                spell.push_modifier(modifier);
            }
        }
        self.state
            .zones
            .move_to_zone(source, SpellZone::Discard, Some(ZonePosition::Top));
        self.state.record_action(Action::Fuse { source, target });

        debug!(source = %source, target = %target, count = modifiers.len(), "spell fused");
        Ok(modifiers)
    }

    fn collection_spell(&self, id: SpellId) -> Result<&Spell, FuseError> {
        self.state
            .spell(id)
            .filter(|_| self.state.in_collection(id))
            .ok_or(FuseError::UnknownSpell(id))
    }
}

/// Where a fuse interaction stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuseState {
    #[default]
    Idle,
    SourceSelected(SpellId),
    Applied { source: SpellId, target: SpellId },
}

/// Source-then-target fuse selection.
///
/// ```
/// use doomcaster::cards::{AreaTemplate, SpellTemplate};
/// use doomcaster::core::Element;
/// use doomcaster::rules::{FuseError, FuseState, FuseWorkflow};
/// use doomcaster::setup::ScenarioBuilder;
///
/// let mut engine = ScenarioBuilder::new()
///     .with_collection([
///         SpellTemplate::new("Shape Water", Element::Water, 0)
///             .with_ability("Fuse")
///             .with_modifier("+3 ATK"),
///         SpellTemplate::new("Conjure Fire", Element::Fire, 5),
///     ])
///     .with_tier([AreaTemplate::new("Towering Fortress", 40)])
///     .build();
/// let water = engine.collection()[0];
/// let fire = engine.collection()[1];
///
/// let mut fuse = FuseWorkflow::new();
/// fuse.select_source(&engine, water).unwrap();
/// assert_eq!(fuse.select_target(&mut engine, water), Err(FuseError::InvalidFuseSelfTarget));
/// fuse.select_target(&mut engine, fire).unwrap();
///
/// assert_eq!(fuse.state(), FuseState::Applied { source: water, target: fire });
/// assert_eq!(engine.preview_attack(fire).map(|r| r.attack), Some(8));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuseWorkflow {
    state: FuseState,
}

impl FuseWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> FuseState {
        self.state
    }

    /// Choose the spell to fuse away. Replaces any earlier choice.
    pub fn select_source(&mut self, engine: &Engine, source: SpellId) -> Result<(), FuseError> {
        engine.check_fuse_source(source)?;
        self.state = FuseState::SourceSelected(source);
        Ok(())
    }

    /// Choose the spell that receives the modifiers and perform the fuse.
    ///
    /// On error the selected source is kept.
    pub fn select_target(
        &mut self,
        engine: &mut Engine,
        target: SpellId,
    ) -> Result<Vec<Modifier>, FuseError> {
        let FuseState::SourceSelected(source) = self.state else {
            return Err(FuseError::NoSourceSelected);
        };
        if source == target {
            return Err(FuseError::InvalidFuseSelfTarget);
        }
        let modifiers = engine.fuse_spell(source, target)?;
        self.state = FuseState::Applied { source, target };
        Ok(modifiers)
    }

    pub fn reset(&mut self) {
        self.state = FuseState::Idle;
    }
}
