//! Action records.
//!
//! Every successful engine operation is appended to the game history as an
//! `ActionRecord`. The history is what a host replays, audits or displays;
//! rejected operations never produce a record.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::{AreaId, SpellId};

/// A completed engine operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// A spell cast at an area. `consumed` lists the spells discarded
    /// to pay a Consume Spell cost.
    Cast {
        spell: SpellId,
        area: AreaId,
        consumed: SmallVec<[SpellId; 3]>,
    },

    /// A spell fused onto another.
    Fuse { source: SpellId, target: SpellId },

    /// A spell taken from the offer row.
    Acquire { slot: usize, spell: SpellId },

    /// A spell discarded from the collection.
    Discard { spell: SpellId },

    /// The turn ended.
    EndTurn,
}

impl Action {
    /// Create a cast action with no consumed spells.
    #[must_use]
    pub fn cast(spell: SpellId, area: AreaId) -> Self {
        Self::Cast {
            spell,
            area,
            consumed: SmallVec::new(),
        }
    }

    /// The spell this action was performed with, if any.
    #[must_use]
    pub fn spell(&self) -> Option<SpellId> {
        match self {
            Action::Cast { spell, .. }
            | Action::Acquire { spell, .. }
            | Action::Discard { spell } => Some(*spell),
            Action::Fuse { source, .. } => Some(*source),
            Action::EndTurn => None,
        }
    }
}

/// A recorded action with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            action,
            turn,
            sequence,
        }
    }
}
