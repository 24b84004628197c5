//! Game rules: the engine and every operation on it.
//!
//! - `Engine`: owns the game state, exposes accessors and operations
//! - `cast`: spell cast resolution (`cast_spell`, `cast_spell_with`)
//! - `fuse`: `fuse_spell` and the `FuseWorkflow` selection state machine
//! - `error`: typed rejections for each operation
//! - `outcome`: what a cast or end of turn reports back

pub mod cast;
pub mod engine;
pub mod error;
pub mod fuse;
pub mod outcome;

pub use cast::CastOptions;
pub use engine::Engine;
pub use error::{AcquireError, CastError, FuseError, SnapshotError};
pub use fuse::{FuseState, FuseWorkflow};
pub use outcome::{DamageOutcome, TurnSummary};
