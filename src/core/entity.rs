//! Identifiers for spells and areas.
//!
//! Every spell instance and every area card gets its own id when it enters
//! the game. Ids are allocated monotonically by `GameState` and never reused,
//! so a banished spell's id can never resolve to a different spell later.
//!
//! ## Usage
//!
//! ```
//! use doomcaster::core::{AreaId, SpellId};
//!
//! let spell = SpellId::new(3);
//! let area = AreaId::new(3);
//!
//! assert_eq!(spell.raw(), 3);
//! assert_eq!(format!("{} -> {}", spell, area), "Spell(3) -> Area(3)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a spell instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpellId(pub u32);

impl SpellId {
    /// Create a new spell ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for SpellId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SpellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Spell({})", self.0)
    }
}

/// Unique identifier for an area card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AreaId(pub u32);

impl AreaId {
    /// Create a new area ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for AreaId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Area({})", self.0)
    }
}
