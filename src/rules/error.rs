//! Error types for engine operations.
//!
//! Every rule violation is a recoverable error and leaves the state exactly
//! as it was. Panics are reserved for setup mistakes.

use thiserror::Error;

use crate::core::{AreaId, SpellId};

/// Why a cast was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CastError {
    #[error("{0} is not in the collection")]
    UnknownSpell(SpellId),

    #[error("{0} does not exist")]
    UnknownArea(AreaId),

    #[error("{0} is in a tier that has not been revealed")]
    AreaNotRevealed(AreaId),

    #[error("{0} is already defeated")]
    AreaAlreadyDefeated(AreaId),

    #[error("{0} was already cast this turn")]
    SpellAlreadyUsed(SpellId),

    #[error("cast limit reached: {allowed} casts this turn")]
    CastLimitReached { allowed: u32 },

    #[error("consume cost needs {required} other untapped spells, {available} available")]
    InsufficientConsumeFodder { required: u32, available: u32 },

    #[error("{0} has no consume cost, but {1} spells were named to consume")]
    UnexpectedConsumeFodder(AreaId, usize),
}

/// Why a fuse was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FuseError {
    #[error("{0} is not in the collection")]
    UnknownSpell(SpellId),

    #[error("{0} was already cast this turn")]
    SpellAlreadyUsed(SpellId),

    #[error("a spell cannot be fused onto itself")]
    InvalidFuseSelfTarget,

    #[error("{0} has no Fuse ability")]
    SourceLacksFuseAbility(SpellId),

    #[error("no fuse source selected")]
    NoSourceSelected,
}

/// Why an acquisition was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("collection is full ({capacity} spells)")]
    CollectionFull { capacity: usize },

    #[error("offer slot {slot} is out of range (row has {size} slots)")]
    InvalidOfferSlot { slot: usize, size: usize },

    #[error("offer slot {0} is empty")]
    EmptyOfferSlot(usize),
}

/// Snapshot encoding or decoding failed.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}
