//! Zone manager for spell locations and movement.
//!
//! The `ZoneManager` tracks which zone every spell is in and keeps each zone
//! ordered. Order means something different per zone:
//! - `Supply`: a stack, top is the last element
//! - `OfferRow`: dealing order; slot numbers are kept by `GameState`
//! - `Collection`: acquisition order
//! - `Discard`: a pile, top is the last element
//!
//! Capacities are recorded here but enforced by the rules layer, which needs
//! to reject an operation before anything moves.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::SpellId;
use crate::core::rng::GameRng;

/// The zones a spell can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpellZone {
    /// Face-down stock that refills the offer row.
    Supply,
    /// Face-up row of spells available to acquire.
    OfferRow,
    /// The player's spells, castable each turn.
    Collection,
    /// Spells consumed, fused away or discarded.
    Discard,
}

impl SpellZone {
    pub const ALL: [SpellZone; 4] = [
        SpellZone::Supply,
        SpellZone::OfferRow,
        SpellZone::Collection,
        SpellZone::Discard,
    ];
}

impl fmt::Display for SpellZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpellZone::Supply => "Supply",
            SpellZone::OfferRow => "Offer Row",
            SpellZone::Collection => "Collection",
            SpellZone::Discard => "Discard",
        };
        f.write_str(name)
    }
}

/// Position for inserting a spell into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (end of the list).
    Top,
    /// Add to bottom of zone (start of the list).
    Bottom,
    /// Insert at specific index, clamped to the zone size.
    Index(usize),
}

/// Tracks spell locations across zones.
///
/// ## Usage
///
/// ```
/// use doomcaster::zones::{SpellZone, ZoneManager, ZonePosition};
/// use doomcaster::core::SpellId;
///
/// let mut manager = ZoneManager::new();
///
/// manager.add_to_zone(SpellId(10), SpellZone::Supply, Some(ZonePosition::Top));
/// manager.add_to_zone(SpellId(11), SpellZone::Supply, Some(ZonePosition::Bottom));
///
/// assert_eq!(manager.cards_in_zone(SpellZone::Supply), &[SpellId(11), SpellId(10)]);
/// assert_eq!(manager.pop_top(SpellZone::Supply), Some(SpellId(10)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    /// Spell locations: spell_id -> zone
    locations: FxHashMap<SpellId, SpellZone>,

    /// Ordered spell lists per zone.
    zone_order: FxHashMap<SpellZone, Vec<SpellId>>,

    /// Capacity limits. Zones without an entry are unbounded.
    capacities: FxHashMap<SpellZone, usize>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a zone's capacity.
    pub fn set_capacity(&mut self, zone: SpellZone, capacity: usize) {
        self.capacities.insert(zone, capacity);
    }

    #[must_use]
    pub fn capacity(&self, zone: SpellZone) -> Option<usize> {
        self.capacities.get(&zone).copied()
    }

    /// Check if a bounded zone is at capacity.
    #[must_use]
    pub fn is_full(&self, zone: SpellZone) -> bool {
        self.capacity(zone)
            .is_some_and(|cap| self.zone_size(zone) >= cap)
    }

    /// Add a spell to a zone. `None` places it on top.
    ///
    /// Panics if the spell is already tracked.
    pub fn add_to_zone(&mut self, spell: SpellId, zone: SpellZone, position: Option<ZonePosition>) {
        if self.locations.contains_key(&spell) {
            panic!("{} already exists in zone manager", spell);
        }
        self.locations.insert(spell, zone);
        self.insert_ordered(spell, zone, position);
    }

    /// Move a spell from one zone to another.
    ///
    /// Returns the old zone, or `None` if the spell wasn't found.
    pub fn move_to_zone(
        &mut self,
        spell: SpellId,
        new_zone: SpellZone,
        position: Option<ZonePosition>,
    ) -> Option<SpellZone> {
        let old_zone = self.locations.get(&spell).copied()?;

        if old_zone == new_zone {
            return Some(old_zone);
        }

        if let Some(order) = self.zone_order.get_mut(&old_zone) {
            order.retain(|&s| s != spell);
        }
        self.locations.insert(spell, new_zone);
        self.insert_ordered(spell, new_zone, position);

        Some(old_zone)
    }

    fn insert_ordered(&mut self, spell: SpellId, zone: SpellZone, position: Option<ZonePosition>) {
        let order = self.zone_order.entry(zone).or_default();
        match position.unwrap_or(ZonePosition::Top) {
            ZonePosition::Top => order.push(spell),
            ZonePosition::Bottom => order.insert(0, spell),
            ZonePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, spell);
            }
        }
    }

    /// Remove a spell from the manager entirely.
    ///
    /// Returns the zone it was in, or `None` if not found.
    pub fn remove(&mut self, spell: SpellId) -> Option<SpellZone> {
        let zone = self.locations.remove(&spell)?;

        if let Some(order) = self.zone_order.get_mut(&zone) {
            order.retain(|&s| s != spell);
        }

        Some(zone)
    }

    /// Get the zone a spell is in.
    #[must_use]
    pub fn get_zone(&self, spell: SpellId) -> Option<SpellZone> {
        self.locations.get(&spell).copied()
    }

    /// Check if a spell is in a specific zone.
    #[must_use]
    pub fn is_in_zone(&self, spell: SpellId, zone: SpellZone) -> bool {
        self.locations.get(&spell) == Some(&zone)
    }

    /// Spells in a zone, in order.
    #[must_use]
    pub fn cards_in_zone(&self, zone: SpellZone) -> &[SpellId] {
        self.zone_order.get(&zone).map_or(&[], |v| v.as_slice())
    }

    /// Spell at a position in a zone.
    #[must_use]
    pub fn card_at(&self, zone: SpellZone, index: usize) -> Option<SpellId> {
        self.cards_in_zone(zone).get(index).copied()
    }

    #[must_use]
    pub fn zone_size(&self, zone: SpellZone) -> usize {
        self.cards_in_zone(zone).len()
    }

    /// Get the top spell of a zone (last in the vec).
    #[must_use]
    pub fn top_card(&self, zone: SpellZone) -> Option<SpellId> {
        self.cards_in_zone(zone).last().copied()
    }

    /// Remove and return the top spell of a zone.
    pub fn pop_top(&mut self, zone: SpellZone) -> Option<SpellId> {
        let spell = self.zone_order.get_mut(&zone)?.pop()?;
        self.locations.remove(&spell);
        Some(spell)
    }

    /// Shuffle a zone.
    pub fn shuffle_zone(&mut self, zone: SpellZone, rng: &mut GameRng) {
        if let Some(order) = self.zone_order.get_mut(&zone) {
            rng.shuffle(order);
        }
    }

    /// Get total number of spells tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Check if the manager tracks a spell.
    #[must_use]
    pub fn contains(&self, spell: SpellId) -> bool {
        self.locations.contains_key(&spell)
    }
}
