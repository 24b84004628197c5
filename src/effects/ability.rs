//! Structured ability descriptors.
//!
//! Ability text is parsed once into an `Ability`: an ordered list of
//! `Effect` clauses. Everything downstream (attack calculation, cast
//! resolution, fusing) matches on these variants and never inspects text.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Element, ElementSet};

/// How a combo's element requirement is satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComboMode {
    /// Any one of the listed elements was played (`[Fire] or [Water]`).
    Any,
    /// Every listed element was played (`[Fire] and [Water]`).
    All,
}

/// One clause of a spell ability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Bonus attack and extra casts when the required elements were
    /// already played this turn.
    Combo {
        requires: ElementSet,
        mode: ComboMode,
        bonus: i64,
        extra_casts: u32,
    },

    /// Unconditional combo: satisfies every `Combo` clause of the same
    /// ability and adds its own bonus.
    FreeCombo { bonus: i64, extra_casts: u32 },

    /// The spell can be fused onto another spell.
    Fuse,

    /// The spell leaves the game after it resolves.
    Banish,

    /// Replace the offer row after the spell resolves.
    RefreshSpellRow,

    /// Reassign the spell's element before damage is calculated.
    Attune(Element),

    /// Discard `n` other spells to pay for the cast. Only meaningful on areas.
    ConsumeSpell(u32),

    /// Bonus attack while the spell's element matches.
    ElementBonus { element: Element, amount: i64 },

    /// Unrecognized text, kept for display.
    NoOp(String),
}

/// A parsed spell ability.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ability {
    effects: SmallVec<[Effect; 2]>,
}

impl Ability {
    /// An ability with no clauses.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build an ability from clauses.
    #[must_use]
    pub fn from_effects(effects: impl IntoIterator<Item = Effect>) -> Self {
        Self {
            effects: effects.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    #[must_use]
    pub fn has_fuse(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::Fuse))
    }

    #[must_use]
    pub fn has_banish(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::Banish))
    }

    #[must_use]
    pub fn refreshes_row(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::RefreshSpellRow))
    }

    #[must_use]
    pub fn has_free_combo(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::FreeCombo { .. }))
    }

    /// The element this ability attunes to. The last `Attune` clause wins.
    #[must_use]
    pub fn attunement(&self) -> Option<Element> {
        self.effects.iter().rev().find_map(|e| match e {
            Effect::Attune(element) => Some(*element),
            _ => None,
        })
    }
}

/// A parsed area ability.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaAbility {
    #[default]
    None,
    /// Casting at this area discards `n` other untapped spells.
    ConsumeSpell(u32),
    /// Areas of the same tier carrying this ability pool their defense and
    /// fall together.
    Collective,
    /// Flavor ability with no rule effect (`Immobile`, `Cursed`).
    Other(String),
}
