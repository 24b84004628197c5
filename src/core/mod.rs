//! Core engine types: ids, elements, RNG, configuration, actions, state.
//!
//! Everything here is plain data shared by the card, zone and rules layers.

pub mod action;
pub mod config;
pub mod element;
pub mod entity;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{Difficulty, EngineConfig};
pub use element::{Element, ElementSet, UnknownElement};
pub use entity::{AreaId, SpellId};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
