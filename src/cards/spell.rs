//! Spell templates and spell instances.
//!
//! `SpellTemplate` is the printed card: name, element, attack, ability text
//! and modifier text. `Spell` is one copy of that card in a game. Ability and
//! modifier text are parsed exactly once, when the instance is created, so
//! rule evaluation never looks at strings again.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::modifier::{Modifier, ModifierKind};
use crate::core::{Element, SpellId};
use crate::effects::{parse_ability, parse_modifier_text, Ability};

/// Static spell card data.
///
/// ```
/// use doomcaster::cards::SpellTemplate;
/// use doomcaster::core::Element;
///
/// let fireball = SpellTemplate::new("Fireball", Element::Fire, 4)
///     .with_ability("Combo [Fire] = +3 ATK")
///     .with_modifier("+3 ATK");
///
/// assert_eq!(fireball.attack, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellTemplate {
    pub name: String,
    pub element: Element,
    pub attack: u32,
    /// Ability text as printed, e.g. `Refresh Spell Row + Banish`.
    pub ability: String,
    /// Modifier text granted when this spell is fused, e.g. `+3 ATK`.
    pub modifier: String,
}

impl SpellTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>, element: Element, attack: u32) -> Self {
        Self {
            name: name.into(),
            element,
            attack,
            ability: String::new(),
            modifier: String::new(),
        }
    }

    #[must_use]
    pub fn with_ability(mut self, text: impl Into<String>) -> Self {
        self.ability = text.into();
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, text: impl Into<String>) -> Self {
        self.modifier = text.into();
        self
    }
}

/// A spell in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,

    /// Current element. Attunement changes it permanently.
    pub element: Element,

    pub base_attack: u32,

    /// Attached modifiers in application order.
    pub modifiers: SmallVec<[Modifier; 4]>,

    /// Cast (tapped) this turn.
    pub used: bool,

    /// Parsed ability.
    pub ability: Ability,

    /// Ability text as printed.
    pub ability_text: String,

    /// Modifiers this spell grants when fused onto another spell.
    pub fuse_modifiers: Vec<ModifierKind>,
}

impl Spell {
    /// Instantiate a template, parsing its ability and modifier text.
    #[must_use]
    pub fn from_template(id: SpellId, template: &SpellTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            element: template.element,
            base_attack: template.attack,
            modifiers: SmallVec::new(),
            used: false,
            ability: parse_ability(&template.ability),
            ability_text: template.ability.clone(),
            fuse_modifiers: parse_modifier_text(&template.modifier),
        }
    }

    /// Modifiers created when this spell is fused.
    ///
    /// Uses the printed modifier value; falls back to half the base
    /// attack when the card prints nothing usable.
    #[must_use]
    pub fn fuse_payload(&self) -> Vec<ModifierKind> {
        if self.fuse_modifiers.is_empty() {
            vec![ModifierKind::Flat(i64::from(self.base_attack / 2))]
        } else {
            self.fuse_modifiers.clone()
        }
    }

    /// Attach a modifier after all existing ones.
    pub fn push_modifier(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
    }

    #[must_use]
    pub fn is_untapped(&self) -> bool {
        !self.used
    }
}
