//! The rules engine.
//!
//! `Engine` owns a `GameState` and is the only way to change it. Every
//! operation validates first and mutates after, so a rejected operation
//! leaves no trace. Casting lives in `rules::cast`, fusing in `rules::fuse`.

use im::Vector;
use tracing::{debug, info};

use super::error::{AcquireError, SnapshotError};
use super::outcome::TurnSummary;
use crate::cards::{Area, Spell};
use crate::core::{
    Action, ActionRecord, AreaId, ElementSet, EngineConfig, GameState, SpellId,
};
use crate::effects::{calculate_attack, AttackResult};
use crate::zones::{SpellZone, ZonePosition};

/// Spell effect resolution engine.
///
/// Cloning an engine gives an independent branch of the game.
///
/// ```
/// use doomcaster::cards::{AreaTemplate, SpellTemplate};
/// use doomcaster::core::Element;
/// use doomcaster::setup::ScenarioBuilder;
///
/// let mut engine = ScenarioBuilder::new()
///     .with_collection([SpellTemplate::new("Conjure Fire", Element::Fire, 5)])
///     .with_tier([AreaTemplate::new("Towering Fortress", 40)])
///     .build();
///
/// let spell = engine.collection()[0];
/// let area = engine.areas()[0].id;
/// let outcome = engine.cast_spell(spell, area).unwrap();
///
/// assert_eq!(outcome.area_damage, 5);
/// assert!(!outcome.area_defeated);
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    pub(super) state: GameState,
}

impl Engine {
    /// Wrap a prepared game state.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.state.config
    }

    // === Accessors ===

    /// Spells in the collection, in acquisition order.
    #[must_use]
    pub fn collection(&self) -> &[SpellId] {
        self.state.collection()
    }

    /// The offer row, one entry per slot. A slot is `None` once its spell
    /// was acquired and the supply had nothing to refill it with.
    #[must_use]
    pub fn offer_row(&self) -> &[Option<SpellId>] {
        self.state.offer_slots()
    }

    /// Spells on offer, in slot order.
    pub fn offered(&self) -> impl Iterator<Item = SpellId> + '_ {
        self.state.offer_slots().iter().flatten().copied()
    }

    /// Discard pile, oldest first.
    #[must_use]
    pub fn discarded(&self) -> &[SpellId] {
        self.state.zones.cards_in_zone(SpellZone::Discard)
    }

    #[must_use]
    pub fn supply_size(&self) -> usize {
        self.state.zones.zone_size(SpellZone::Supply)
    }

    #[must_use]
    pub fn spell(&self, id: SpellId) -> Option<&Spell> {
        self.state.spell(id)
    }

    #[must_use]
    pub fn banished(&self) -> &[Spell] {
        self.state.banished()
    }

    #[must_use]
    pub fn areas(&self) -> &[Area] {
        self.state.areas()
    }

    #[must_use]
    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.state.area(id)
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.state.turn_number
    }

    #[must_use]
    pub fn played_elements(&self) -> ElementSet {
        self.state.played_elements
    }

    #[must_use]
    pub fn casts_remaining(&self) -> u32 {
        self.state.casts_remaining()
    }

    #[must_use]
    pub fn revealed_tier(&self) -> Option<usize> {
        self.state.revealed_tier()
    }

    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.state.is_victory()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.state.history
    }

    /// Attack a collection spell would deal if cast now.
    #[must_use]
    pub fn preview_attack(&self, id: SpellId) -> Option<AttackResult> {
        if !self.state.in_collection(id) {
            return None;
        }
        let spell = self.state.spell(id)?;
        Some(calculate_attack(spell, self.state.played_elements))
    }

    // === Offer Row ===

    /// Move the spell in an offer row slot into the collection.
    ///
    /// The emptied slot is refilled from the top of the supply.
    pub fn acquire_spell(&mut self, slot: usize) -> Result<SpellId, AcquireError> {
        let zones = &self.state.zones;
        if zones.is_full(SpellZone::Collection) {
            return Err(AcquireError::CollectionFull {
                capacity: self.state.config.collection_capacity,
            });
        }
        let size = self.state.config.offer_row_size;
        if slot >= size {
            return Err(AcquireError::InvalidOfferSlot { slot, size });
        }
        let id = self
            .state
            .offer_slot(slot)
            .ok_or(AcquireError::EmptyOfferSlot(slot))?;

        self.state.take_offer_slot(slot);
        self.state
            .zones
            .move_to_zone(id, SpellZone::Collection, Some(ZonePosition::Top));
        let refill = self.state.refill_slot(slot);
        self.state.record_action(Action::Acquire { slot, spell: id });

        debug!(spell = %id, slot, refilled = refill.is_some(), "spell acquired");
        Ok(id)
    }

    /// Move a collection spell to the discard pile.
    ///
    /// Returns whether anything moved.
    pub fn discard_spell(&mut self, id: SpellId) -> bool {
        if !self.state.in_collection(id) {
            return false;
        }
        self.state
            .zones
            .move_to_zone(id, SpellZone::Discard, Some(ZonePosition::Top));
        self.state.record_action(Action::Discard { spell: id });
        debug!(spell = %id, "spell discarded");
        true
    }

    // === Turn Lifecycle ===

    /// End the turn: untap every spell, clear damage on undefeated areas,
    /// clear the played elements and cast counters, advance the turn.
    pub fn end_turn(&mut self) -> TurnSummary {
        let mut spells_untapped = 0;
        for spell in self.state.spells_mut().filter(|s| s.used) {
            spell.used = false;
            spells_untapped += 1;
        }

        let mut areas_reset = 0;
        for area in self
            .state
            .areas_mut()
            .iter_mut()
            .filter(|a| !a.defeated && a.damage > 0)
        {
            area.damage = 0;
            areas_reset += 1;
        }

        self.state.record_action(Action::EndTurn);

        let ended_turn = self.state.turn_number;
        let casts = self.state.casts_this_turn;
        let damage_dealt = self.state.turn_damage;
        let areas_defeated = std::mem::take(&mut self.state.turn_defeated);

        self.state.advance_turn();

        info!(
            turn = ended_turn,
            casts,
            damage = damage_dealt,
            defeated = areas_defeated.len(),
            "turn ended"
        );

        TurnSummary {
            ended_turn,
            new_turn: self.state.turn_number,
            casts,
            damage_dealt,
            areas_defeated,
            areas_reset,
            spells_untapped,
        }
    }

    // === Persistence ===

    /// Encode the full game state.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(&self.state)?)
    }

    /// Rebuild an engine from `snapshot` output.
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: GameState = bincode::deserialize(bytes)?;
        Ok(Self::new(state))
    }
}
