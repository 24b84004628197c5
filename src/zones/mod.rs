//! Zone system for spell locations.
//!
//! ## Key Types
//!
//! - `SpellZone`: Supply, offer row, collection, discard
//! - `ZoneManager`: Spell location tracking and movement
//! - `ZonePosition`: Position specifier for insertion

pub mod manager;

pub use manager::{SpellZone, ZoneManager, ZonePosition};
