//! Results reported by engine operations.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Modifier;
use crate::core::{AreaId, Element, SpellId};

/// What happened when a spell was cast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub spell: SpellId,
    pub area: AreaId,

    /// Attack after modifiers and combos.
    pub attack: u32,

    /// Element the spell was cast as.
    pub element: Element,

    /// Damage that reached the area (zero when immune).
    pub delivered: u32,

    pub blocked_by_immunity: bool,

    /// Target area damage after the cast, clamped at defense.
    pub area_damage: u32,

    /// Whether the target area is now defeated.
    pub area_defeated: bool,

    /// Every area defeated by this cast. More than one for collective areas.
    pub defeated_areas: Vec<AreaId>,

    /// Spells discarded to pay a consume cost.
    pub consumed: SmallVec<[SpellId; 3]>,

    /// Extra casts granted by combos.
    pub extra_casts: u32,

    /// Attack contributed by combos.
    pub combo_bonus: i64,

    /// Reward modifiers attached to the spell.
    pub rewards: Vec<Modifier>,

    pub banished: bool,
    pub row_refreshed: bool,
}

/// What `end_turn` reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    pub ended_turn: u32,
    pub new_turn: u32,

    /// Casts made during the ended turn.
    pub casts: u32,

    /// Damage delivered during the ended turn.
    pub damage_dealt: u64,

    /// Areas defeated during the ended turn.
    pub areas_defeated: Vec<AreaId>,

    /// Undefeated areas whose damage was zeroed.
    pub areas_reset: usize,

    /// Spells whose used flag was cleared.
    pub spells_untapped: usize,
}
