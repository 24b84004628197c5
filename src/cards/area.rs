//! Area templates and area state.
//!
//! Areas are the targets of spells. Each has a defense pool, an optional
//! elemental immunity, an optional special ability and a reward granted to
//! the spell that defeats it. Damage accumulates within a turn; an area whose
//! damage reaches its defense is defeated for the rest of the game.

use serde::{Deserialize, Serialize};

use super::modifier::ModifierKind;
use crate::core::{AreaId, Element, ElementSet};
use crate::effects::{parse_area_ability, parse_immunity, parse_modifier_text, AreaAbility};

/// Static area card data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaTemplate {
    pub name: String,
    pub defense: u32,
    /// Immunity text, e.g. `Fire, Water` or `None`.
    pub immunity: String,
    /// Ability text, e.g. `Consume Spell (x3)`.
    pub ability: String,
    /// Reward modifier text, e.g. `+2 ATK, Make [Fire]`.
    pub reward: String,
}

impl AreaTemplate {
    /// Create an area template. Panics on zero defense.
    #[must_use]
    pub fn new(name: impl Into<String>, defense: u32) -> Self {
        assert!(defense > 0, "Area defense must be positive");
        Self {
            name: name.into(),
            defense,
            immunity: String::new(),
            ability: String::new(),
            reward: String::new(),
        }
    }

    #[must_use]
    pub fn with_immunity(mut self, text: impl Into<String>) -> Self {
        self.immunity = text.into();
        self
    }

    #[must_use]
    pub fn with_ability(mut self, text: impl Into<String>) -> Self {
        self.ability = text.into();
        self
    }

    #[must_use]
    pub fn with_reward(mut self, text: impl Into<String>) -> Self {
        self.reward = text.into();
        self
    }
}

/// An area in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    /// Tier index; tier 0 is revealed first.
    pub tier: usize,
    pub defense: u32,
    pub immunity: ElementSet,
    pub ability: AreaAbility,
    /// Defends together with the other collective areas of its tier.
    pub collective: bool,
    /// Modifiers granted to the spell that defeats this area.
    pub reward: Vec<ModifierKind>,
    /// Damage taken this turn.
    pub damage: u32,
    pub defeated: bool,
}

impl Area {
    /// Instantiate a template in the given tier.
    #[must_use]
    pub fn from_template(id: AreaId, tier: usize, template: &AreaTemplate) -> Self {
        let ability = parse_area_ability(&template.ability);
        Self {
            id,
            name: template.name.clone(),
            tier,
            defense: template.defense,
            immunity: parse_immunity(&template.immunity),
            collective: matches!(ability, AreaAbility::Collective),
            ability,
            reward: parse_modifier_text(&template.reward),
            damage: 0,
            defeated: false,
        }
    }

    #[must_use]
    pub fn is_immune(&self, element: Element) -> bool {
        self.immunity.contains(element)
    }

    /// Spells that must be consumed to target this area.
    #[must_use]
    pub fn consume_cost(&self) -> u32 {
        match self.ability {
            AreaAbility::ConsumeSpell(n) => n,
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_collective(&self) -> bool {
        self.collective
    }

    /// Defense left before the area is full.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.defense.saturating_sub(self.damage)
    }

    /// Add up to `amount` damage, clamped at defense. Returns the overflow.
    pub fn absorb(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.remaining());
        self.damage += taken;
        amount - taken
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.damage >= self.defense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barrier() -> AreaTemplate {
        AreaTemplate::new("Mirage Barrier", 15)
            .with_immunity("Fire, Water, Earth, Wind")
            .with_ability("Consume Spell (x3)")
            .with_reward("+2 ATK then x2 ATK")
    }

    #[test]
    fn test_from_template() {
        let area = Area::from_template(AreaId(4), 1, &barrier());

        assert_eq!(area.tier, 1);
        assert_eq!(area.consume_cost(), 3);
        assert!(area.is_immune(Element::Earth));
        assert!(!area.is_immune(Element::Void));
        assert_eq!(area.reward, vec![ModifierKind::Flat(2), ModifierKind::Multiply(2)]);
        assert!(!area.is_collective());
    }

    #[test]
    fn test_absorb_clamps() {
        let mut area = Area::from_template(AreaId(0), 0, &AreaTemplate::new("Sky Temple", 10));

        assert_eq!(area.absorb(7), 0);
        assert_eq!(area.remaining(), 3);
        assert_eq!(area.absorb(7), 4);
        assert_eq!(area.damage, 10);
        assert!(area.is_full());
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_zero_defense() {
        let _ = AreaTemplate::new("Nothing", 0);
    }

    #[test]
    fn test_no_immunity() {
        let area = Area::from_template(
            AreaId(0),
            0,
            &AreaTemplate::new("Towering Fortress", 40).with_immunity("None"),
        );
        assert!(area.immunity.is_empty());
        assert_eq!(area.consume_cost(), 0);
    }
}
