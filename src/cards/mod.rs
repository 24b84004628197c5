//! Card system: spells, areas, modifiers and the registry.
//!
//! ## Key Types
//!
//! - `SpellTemplate` / `Spell`: printed spell data and a spell in play
//! - `AreaTemplate` / `Area`: printed area data and an area in play
//! - `Modifier`: persistent attack or element tweak carried by a spell
//! - `CardRegistry`: template lookup, including the standard card set

pub mod area;
pub mod modifier;
pub mod registry;
pub mod spell;

pub use area::{Area, AreaTemplate};
pub use modifier::{Modifier, ModifierKind, ModifierSource};
pub use registry::{CardRegistry, STARTING_SPELLS};
pub use spell::{Spell, SpellTemplate};
