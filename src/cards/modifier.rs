//! Modifiers attached to spells.
//!
//! A modifier is a persistent tweak to a spell's attack or element. Spells
//! gain modifiers two ways: another spell is fused onto them, or they defeat
//! an area and take its reward. Modifiers are applied in the order they were
//! attached (see `effects::calculator`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{AreaId, Element, SpellId};

/// What a modifier does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Add a flat amount to attack (`+2 ATK`, `-3 ATK`).
    Flat(i64),

    /// Add `amount` only while the spell's element is `element`
    /// (`Add (2) To [Fire]`).
    ElementBonus { element: Element, amount: i64 },

    /// Reassign the spell's element (`Make [Water]`).
    Attune(Element),

    /// Multiply the running attack (`x2 ATK`). Always at least 1.
    Multiply(u32),
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKind::Flat(n) if *n < 0 => write!(f, "{} ATK", n),
            ModifierKind::Flat(n) => write!(f, "+{} ATK", n),
            ModifierKind::ElementBonus { element, amount } => {
                write!(f, "Add ({}) To [{}]", amount, element)
            }
            ModifierKind::Attune(element) => write!(f, "Make [{}]", element),
            ModifierKind::Multiply(n) => write!(f, "x{} ATK", n),
        }
    }
}

/// Where a modifier came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierSource {
    /// Another spell was fused onto the carrier.
    Fused { from: SpellId },
    /// The carrier defeated an area.
    AreaDefeat { area: AreaId },
}

/// A modifier attached to a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub source: ModifierSource,
}

impl Modifier {
    #[must_use]
    pub fn new(kind: ModifierKind, source: ModifierSource) -> Self {
        Self { kind, source }
    }

    /// A modifier produced by fusing spell `from`.
    #[must_use]
    pub fn fused(kind: ModifierKind, from: SpellId) -> Self {
        Self::new(kind, ModifierSource::Fused { from })
    }

    /// A modifier earned by defeating `area`.
    #[must_use]
    pub fn area_reward(kind: ModifierKind, area: AreaId) -> Self {
        Self::new(kind, ModifierSource::AreaDefeat { area })
    }
}
