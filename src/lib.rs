//! # doomcaster
//!
//! Spell effect resolution engine for the DoomCaster card game.
//!
//! ## Design Principles
//!
//! 1. **Parse Once**: Ability and modifier text is parsed into structured
//!    effects when a card enters play. Rules never look at strings.
//!
//! 2. **Validate, Then Mutate**: Every operation checks all of its
//!    preconditions before changing anything. A rejected operation returns a
//!    typed error and leaves the game untouched.
//!
//! 3. **Deterministic**: All randomness comes from a seeded RNG whose
//!    position is part of the snapshot.
//!
//! ## Modules
//!
//! - `core`: Ids, elements, RNG, configuration, actions, game state
//! - `cards`: Spell and area templates, instances, modifiers, registry
//! - `zones`: Supply, offer row, collection and discard tracking
//! - `effects`: Ability parsing and attack calculation
//! - `rules`: The `Engine` and its operations
//! - `setup`: Scenario construction

pub mod cards;
pub mod core;
pub mod effects;
pub mod rules;
pub mod setup;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, AreaId, Difficulty, Element, ElementSet, EngineConfig, GameRng,
    GameRngState, GameState, SpellId,
};

pub use crate::cards::{
    Area, AreaTemplate, CardRegistry, Modifier, ModifierKind, ModifierSource, Spell,
    SpellTemplate,
};

pub use crate::zones::{SpellZone, ZoneManager, ZonePosition};

pub use crate::effects::{
    calculate_attack, parse_ability, Ability, AreaAbility, AttackResult, ComboMode, Effect,
};

pub use crate::rules::{
    AcquireError, CastError, CastOptions, DamageOutcome, Engine, FuseError, FuseState,
    FuseWorkflow, SnapshotError, TurnSummary,
};

pub use crate::setup::ScenarioBuilder;
