//! Game state.
//!
//! `GameState` is the single aggregate the engine owns:
//! - Configuration and turn counters
//! - Zone manager (spell locations)
//! - Spell instances, the banished record and the areas
//! - Per-turn bookkeeping (casts, played elements, damage dealt)
//! - Action history and RNG
//!
//! It is plain data. Rule checks live in `rules`; this module only offers
//! lookups and the bookkeeping every operation shares.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::{Action, ActionRecord};
use super::config::EngineConfig;
use super::element::ElementSet;
use super::entity::{AreaId, SpellId};
use super::rng::GameRng;
use crate::cards::{Area, AreaTemplate, Spell, SpellTemplate};
use crate::zones::{SpellZone, ZoneManager, ZonePosition};

/// Complete state of one game.
///
/// History uses `im::Vector` so cloning an engine for what-if branches
/// stays cheap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub config: EngineConfig,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Action sequence within turn.
    pub action_sequence: u32,

    /// Casts made this turn.
    pub casts_this_turn: u32,

    /// Extra casts granted by combos this turn.
    pub bonus_casts: u32,

    /// Final elements of every spell cast this turn.
    pub played_elements: ElementSet,

    /// Damage delivered to areas this turn.
    pub turn_damage: u64,

    /// Areas defeated this turn, in defeat order.
    pub turn_defeated: Vec<AreaId>,

    /// Spell locations.
    pub zones: ZoneManager,

    /// Offer row by slot. An acquired slot stays put, empty until refilled.
    offer_slots: Vec<Option<SpellId>>,

    /// Spell instances by id. Banished spells are not here.
    spells: FxHashMap<SpellId, Spell>,

    /// Spells removed from the game, in banish order.
    banished: Vec<Spell>,

    /// Areas in setup order.
    areas: Vec<Area>,

    /// Action history.
    pub history: Vector<ActionRecord>,

    /// Deterministic RNG.
    pub rng: GameRng,

    next_spell_id: u32,
    next_area_id: u32,
}

impl GameState {
    /// Create an empty game state.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let mut zones = ZoneManager::new();
        zones.set_capacity(SpellZone::Collection, config.collection_capacity);
        zones.set_capacity(SpellZone::OfferRow, config.offer_row_size);
        let offer_slots = vec![None; config.offer_row_size];

        Self {
            rng: GameRng::new(config.seed),
            config,
            turn_number: 1,
            action_sequence: 0,
            casts_this_turn: 0,
            bonus_casts: 0,
            played_elements: ElementSet::empty(),
            turn_damage: 0,
            turn_defeated: Vec::new(),
            offer_slots,
            zones,
            spells: FxHashMap::default(),
            banished: Vec::new(),
            areas: Vec::new(),
            history: Vector::new(),
            next_spell_id: 0,
            next_area_id: 0,
        }
    }

    // === Spells ===

    /// Instantiate a spell template on top of a zone.
    pub fn add_spell(&mut self, template: &SpellTemplate, zone: SpellZone) -> SpellId {
        let id = SpellId(self.next_spell_id);
        self.next_spell_id += 1;
        self.spells.insert(id, Spell::from_template(id, template));
        self.zones.add_to_zone(id, zone, None);
        id
    }

    #[must_use]
    pub fn spell(&self, id: SpellId) -> Option<&Spell> {
        self.spells.get(&id)
    }

    pub fn spell_mut(&mut self, id: SpellId) -> Option<&mut Spell> {
        self.spells.get_mut(&id)
    }

    /// All spells still in the game, in no particular order.
    pub fn spells(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    pub fn spells_mut(&mut self) -> impl Iterator<Item = &mut Spell> {
        self.spells.values_mut()
    }

    /// Spells in the collection, in acquisition order.
    #[must_use]
    pub fn collection(&self) -> &[SpellId] {
        self.zones.cards_in_zone(SpellZone::Collection)
    }

    #[must_use]
    pub fn in_collection(&self, id: SpellId) -> bool {
        self.zones.is_in_zone(id, SpellZone::Collection)
    }

    /// Remove a spell from the game permanently.
    ///
    /// Returns `false` if the spell was not found.
    pub fn banish(&mut self, id: SpellId) -> bool {
        let Some(spell) = self.spells.remove(&id) else {
            return false;
        };
        self.zones.remove(id);
        self.banished.push(spell);
        true
    }

    #[must_use]
    pub fn banished(&self) -> &[Spell] {
        &self.banished
    }

    // === Offer Row ===

    /// The offer row by slot.
    #[must_use]
    pub fn offer_slots(&self) -> &[Option<SpellId>] {
        &self.offer_slots
    }

    /// Spell shown in an offer row slot.
    #[must_use]
    pub fn offer_slot(&self, slot: usize) -> Option<SpellId> {
        self.offer_slots.get(slot).copied().flatten()
    }

    /// Empty an offer row slot, leaving the spell's zone unchanged.
    pub fn take_offer_slot(&mut self, slot: usize) -> Option<SpellId> {
        self.offer_slots.get_mut(slot)?.take()
    }

    /// Fill empty offer row slots, lowest slot first, from the top of the
    /// supply.
    ///
    /// Returns the number of spells dealt.
    pub fn deal_offer_row(&mut self) -> usize {
        let mut dealt = 0;
        for slot in 0..self.offer_slots.len() {
            if self.offer_slots[slot].is_some() {
                continue;
            }
            if self.refill_slot(slot).is_none() {
                break;
            }
            dealt += 1;
        }
        dealt
    }

    /// Refill one empty offer row slot from the supply top.
    pub fn refill_slot(&mut self, slot: usize) -> Option<SpellId> {
        if self.offer_slots.get(slot)?.is_some() {
            return None;
        }
        let id = self.zones.pop_top(SpellZone::Supply)?;
        self.zones
            .add_to_zone(id, SpellZone::OfferRow, Some(ZonePosition::Top));
        self.offer_slots[slot] = Some(id);
        Some(id)
    }

    /// Return the whole offer row to the bottom of the supply, slot 0
    /// lowest, and deal a fresh one.
    pub fn refresh_offer_row(&mut self) {
        let old_row: Vec<SpellId> = self.offer_slots.iter_mut().filter_map(Option::take).collect();
        for id in old_row.into_iter().rev() {
            self.zones
                .move_to_zone(id, SpellZone::Supply, Some(ZonePosition::Bottom));
        }
        let dealt = self.deal_offer_row();
        debug!(dealt, "offer row refreshed");
    }

    // === Areas ===

    /// Instantiate an area template in a tier.
    pub fn add_area(&mut self, template: &AreaTemplate, tier: usize) -> AreaId {
        let id = AreaId(self.next_area_id);
        self.next_area_id += 1;
        self.areas.push(Area::from_template(id, tier, template));
        id
    }

    #[must_use]
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn areas_mut(&mut self) -> &mut [Area] {
        &mut self.areas
    }

    #[must_use]
    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.area_index(id).map(|i| &self.areas[i])
    }

    pub fn area_mut(&mut self, id: AreaId) -> Option<&mut Area> {
        self.area_index(id).map(|i| &mut self.areas[i])
    }

    fn area_index(&self, id: AreaId) -> Option<usize> {
        self.areas.iter().position(|a| a.id == id)
    }

    /// The lowest tier that still has an undefeated area.
    ///
    /// `None` once every area is defeated.
    #[must_use]
    pub fn revealed_tier(&self) -> Option<usize> {
        self.areas.iter().filter(|a| !a.defeated).map(|a| a.tier).min()
    }

    /// An area is revealed when every area in an earlier tier is defeated.
    #[must_use]
    pub fn is_revealed(&self, area: &Area) -> bool {
        self.revealed_tier().map_or(true, |tier| area.tier <= tier)
    }

    /// Every area has been defeated. A game with no areas is never won.
    #[must_use]
    pub fn is_victory(&self) -> bool {
        !self.areas.is_empty() && self.areas.iter().all(|a| a.defeated)
    }

    // === Casts ===

    /// Casts allowed this turn, including combo allowances.
    #[must_use]
    pub fn casts_allowed(&self) -> u32 {
        self.config.cast_limit.saturating_add(self.bonus_casts)
    }

    #[must_use]
    pub fn casts_remaining(&self) -> u32 {
        self.casts_allowed().saturating_sub(self.casts_this_turn)
    }

    // === Turn Advancement ===

    /// Advance to the next turn, clearing per-turn counters.
    ///
    /// Spell and area resets are done by the engine, which reports them.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.action_sequence = 0;
        self.casts_this_turn = 0;
        self.bonus_casts = 0;
        self.played_elements.clear();
        self.turn_damage = 0;
        self.turn_defeated.clear();
    }

    // === Action History ===

    /// Record an action in history.
    pub fn record_action(&mut self, action: Action) {
        let sequence = self.next_sequence();
        self.history
            .push_back(ActionRecord::new(action, self.turn_number, sequence));
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }
}
