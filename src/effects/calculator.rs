//! Attack calculation.
//!
//! `calculate_attack` turns a spell plus the elements already played this
//! turn into a final attack value and element. It never mutates anything:
//! the cast resolver decides what to do with the result.
//!
//! Order of evaluation:
//! 1. Seed with base attack and the current element (an `Attune` ability
//!    clause overrides the element before anything else).
//! 2. Fold attached modifiers left to right, clamping at zero after each step.
//! 3. Apply the ability's own `ElementBonus` clauses against the folded element.
//! 4. Evaluate combo clauses against the played set.

use serde::{Deserialize, Serialize};

use super::ability::{ComboMode, Effect};
use crate::cards::{Modifier, ModifierKind, Spell};
use crate::core::{Element, ElementSet};

/// Result of evaluating a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    /// Final attack, never negative.
    pub attack: u32,
    /// Final element after attunement and modifiers.
    pub element: Element,
    /// Extra casts granted by satisfied combos.
    pub extra_casts: u32,
    /// Attack contributed by satisfied combos.
    pub combo_bonus: i64,
    /// Whether any combo clause was satisfied.
    pub combo_triggered: bool,
}

/// Fold modifiers over a seed attack and element.
///
/// ```
/// use doomcaster::cards::{Modifier, ModifierKind};
/// use doomcaster::core::{Element, SpellId};
/// use doomcaster::effects::fold_modifiers;
///
/// let modifiers = [
///     Modifier::fused(ModifierKind::Flat(-10), SpellId(1)),
///     Modifier::fused(ModifierKind::Flat(3), SpellId(2)),
/// ];
/// // Clamped at zero before the +3 applies.
/// assert_eq!(fold_modifiers(5, Element::Fire, &modifiers), (3, Element::Fire));
/// ```
#[must_use]
pub fn fold_modifiers(base: u32, element: Element, modifiers: &[Modifier]) -> (i64, Element) {
    modifiers
        .iter()
        .fold((i64::from(base), element), |(attack, element), modifier| {
            let (attack, element) = apply_modifier(attack, element, modifier.kind);
            (attack.max(0), element)
        })
}

fn apply_modifier(attack: i64, element: Element, kind: ModifierKind) -> (i64, Element) {
    match kind {
        ModifierKind::Flat(n) => (attack.saturating_add(n), element),
        ModifierKind::ElementBonus { element: wanted, amount } if wanted == element => {
            (attack.saturating_add(amount), element)
        }
        ModifierKind::ElementBonus { .. } => (attack, element),
        ModifierKind::Attune(new_element) => (attack, new_element),
        ModifierKind::Multiply(factor) => (attack.saturating_mul(i64::from(factor)), element),
    }
}

/// Evaluate a spell's attack against the elements already played this turn.
#[must_use]
pub fn calculate_attack(spell: &Spell, played: ElementSet) -> AttackResult {
    let ability = &spell.ability;
    let seed_element = ability.attunement().unwrap_or(spell.element);

    let (mut attack, element) = fold_modifiers(spell.base_attack, seed_element, &spell.modifiers);

    for effect in ability.effects() {
        if let Effect::ElementBonus { element: wanted, amount } = effect {
            if *wanted == element {
                attack = attack.saturating_add(*amount).max(0);
            }
        }
    }

    let free = ability.has_free_combo();
    let mut combo_bonus = 0i64;
    let mut extra_casts = 0u32;
    let mut combo_triggered = false;

    for effect in ability.effects() {
        let (satisfied, bonus, extra) = match effect {
            Effect::Combo { requires, mode, bonus, extra_casts } => {
                let met = free
                    || match mode {
                        ComboMode::Any => requires.intersects(played),
                        ComboMode::All => requires.is_subset(played),
                    };
                (met, *bonus, *extra_casts)
            }
            Effect::FreeCombo { bonus, extra_casts } => (true, *bonus, *extra_casts),
            _ => continue,
        };
        if satisfied {
            combo_triggered = true;
            combo_bonus = combo_bonus.saturating_add(bonus);
            extra_casts = extra_casts.saturating_add(extra);
        }
    }

    let attack = attack.saturating_add(combo_bonus).max(0);

    AttackResult {
        attack: u32::try_from(attack).unwrap_or(u32::MAX),
        element,
        extra_casts,
        combo_bonus,
        combo_triggered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::SpellTemplate;
    use crate::core::{AreaId, SpellId};

    fn spell(template: SpellTemplate) -> Spell {
        Spell::from_template(SpellId(1), &template)
    }

    #[test]
    fn test_plain_attack() {
        let s = spell(SpellTemplate::new("Conjure Fire", Element::Fire, 5));
        let result = calculate_attack(&s, ElementSet::empty());

        assert_eq!(result.attack, 5);
        assert_eq!(result.element, Element::Fire);
        assert_eq!(result.extra_casts, 0);
        assert!(!result.combo_triggered);
    }

    #[test]
    fn test_fold_order_matters() {
        let mut s = spell(SpellTemplate::new("Raise Earth", Element::Earth, 4));
        s.push_modifier(Modifier::area_reward(ModifierKind::Flat(2), AreaId(0)));
        s.push_modifier(Modifier::area_reward(ModifierKind::Multiply(2), AreaId(0)));
        assert_eq!(calculate_attack(&s, ElementSet::empty()).attack, 12);

        let mut s = spell(SpellTemplate::new("Raise Earth", Element::Earth, 4));
        s.push_modifier(Modifier::area_reward(ModifierKind::Multiply(2), AreaId(0)));
        s.push_modifier(Modifier::area_reward(ModifierKind::Flat(2), AreaId(0)));
        assert_eq!(calculate_attack(&s, ElementSet::empty()).attack, 10);
    }

    #[test]
    fn test_attune_modifier_then_element_bonus() {
        let mut s = spell(SpellTemplate::new("Gather Wind", Element::Wind, 3));
        s.push_modifier(Modifier::fused(
            ModifierKind::ElementBonus { element: Element::Fire, amount: 4 },
            SpellId(2),
        ));
        s.push_modifier(Modifier::fused(ModifierKind::Attune(Element::Fire), SpellId(3)));
        s.push_modifier(Modifier::fused(
            ModifierKind::ElementBonus { element: Element::Fire, amount: 2 },
            SpellId(4),
        ));

        let result = calculate_attack(&s, ElementSet::empty());
        // First bonus misses (still Wind), second hits.
        assert_eq!(result.attack, 5);
        assert_eq!(result.element, Element::Fire);
    }

    #[test]
    fn test_ability_attunement_resolves_first() {
        let s = spell(
            SpellTemplate::new("Shift", Element::Fire, 2)
                .with_ability("Attune [Water] + Add (3) To [Water]"),
        );
        let result = calculate_attack(&s, ElementSet::empty());
        assert_eq!(result.element, Element::Water);
        assert_eq!(result.attack, 5);
    }

    #[test]
    fn test_negative_clamped() {
        let mut s = spell(SpellTemplate::new("Unleash Void", Element::Void, 0));
        s.push_modifier(Modifier::area_reward(ModifierKind::Flat(-3), AreaId(5)));
        assert_eq!(calculate_attack(&s, ElementSet::empty()).attack, 0);
    }

    #[test]
    fn test_combo_any() {
        let s = spell(
            SpellTemplate::new("Gather Wind", Element::Wind, 3)
                .with_ability("Combo [Fire] or [Water] or [Earth] = +1 ATK, +1 Spell Cast"),
        );

        let miss = calculate_attack(&s, ElementSet::single(Element::Void));
        assert_eq!(miss.attack, 3);
        assert_eq!(miss.extra_casts, 0);

        let hit = calculate_attack(&s, ElementSet::single(Element::Water));
        assert_eq!(hit.attack, 4);
        assert_eq!(hit.extra_casts, 1);
        assert_eq!(hit.combo_bonus, 1);
        assert!(hit.combo_triggered);
    }

    #[test]
    fn test_combo_all() {
        let s = spell(
            SpellTemplate::new("Storm", Element::Wind, 2)
                .with_ability("Combo [Fire] and [Water] = +5 ATK"),
        );

        assert_eq!(calculate_attack(&s, ElementSet::single(Element::Fire)).attack, 2);

        let both: ElementSet = [Element::Fire, Element::Water].into_iter().collect();
        assert_eq!(calculate_attack(&s, both).attack, 7);
    }

    #[test]
    fn test_free_combo() {
        let s = spell(
            SpellTemplate::new("Wild Surge", Element::Fire, 2)
                .with_ability("Combo [Void] = +2 ATK + Free Combo = +1 ATK, +1 Spell Cast"),
        );
        let result = calculate_attack(&s, ElementSet::empty());
        assert_eq!(result.attack, 5);
        assert_eq!(result.extra_casts, 1);
    }
}
