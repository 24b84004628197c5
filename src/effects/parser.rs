//! Ability and modifier text parsing.
//!
//! Card text follows a handful of fixed shapes:
//!
//! - `Combo [Fire] or [Water] = +1 ATK, +1 Spell Cast`
//! - `Free Combo = +2 ATK`
//! - `Attune [Void]`, `Consume Spell (x3)`, `Add (2) To [Fire]`
//! - `Fuse`, `Banish`, `Refresh Spell Row`, joined with ` + `
//!
//! Parsing is pure and total: text that matches no shape becomes
//! `Effect::NoOp` (or is dropped, for modifier text) with a warning.

use tracing::{debug, warn};

use super::ability::{Ability, AreaAbility, ComboMode, Effect};
use crate::cards::ModifierKind;
use crate::core::{Element, ElementSet};

/// Parse spell ability text.
///
/// ```
/// use doomcaster::effects::{parse_ability, ComboMode, Effect};
/// use doomcaster::core::{Element, ElementSet};
///
/// let ability = parse_ability("Combo [Fire] or [Water] = +1 ATK, +1 Spell Cast");
/// let requires: ElementSet = [Element::Fire, Element::Water].into_iter().collect();
/// assert_eq!(
///     ability.effects(),
///     &[Effect::Combo { requires, mode: ComboMode::Any, bonus: 1, extra_casts: 1 }]
/// );
/// ```
#[must_use]
pub fn parse_ability(text: &str) -> Ability {
    Ability::from_effects(
        text.split(" + ")
            .map(str::trim)
            .filter(|clause| !is_blank(clause))
            .map(parse_clause),
    )
}

/// Parse area ability text.
#[must_use]
pub fn parse_area_ability(text: &str) -> AreaAbility {
    let trimmed = text.trim();
    if is_blank(trimmed) {
        return AreaAbility::None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("consume spell") {
        match consume_count(trimmed) {
            Some(n) => AreaAbility::ConsumeSpell(n),
            None => {
                warn!(text = trimmed, "malformed consume spell count");
                AreaAbility::Other(trimmed.to_string())
            }
        }
    } else if lower == "collective" {
        AreaAbility::Collective
    } else {
        debug!(text = trimmed, "area ability has no rule effect");
        AreaAbility::Other(trimmed.to_string())
    }
}

/// Parse an immunity list such as `Fire, Water`. `None` is the empty set.
#[must_use]
pub fn parse_immunity(text: &str) -> ElementSet {
    text.split(',')
        .map(str::trim)
        .filter(|part| !is_blank(part))
        .filter_map(|part| match part.parse::<Element>() {
            Ok(element) => Some(element),
            Err(err) => {
                warn!(%err, "ignoring immunity entry");
                None
            }
        })
        .collect()
}

/// Parse modifier text such as `+2 ATK, Make [Fire]` or `+2 ATK then x2 ATK`.
///
/// Clauses are returned in application order; unrecognized clauses are
/// skipped.
#[must_use]
pub fn parse_modifier_text(text: &str) -> Vec<ModifierKind> {
    text.split(',')
        .flat_map(split_then)
        .map(str::trim)
        .filter(|clause| !is_blank(clause))
        .filter_map(|clause| {
            let parsed = parse_modifier_clause(clause);
            if parsed.is_none() {
                warn!(text = clause, "unrecognized modifier text");
            }
            parsed
        })
        .collect()
}

fn parse_clause(clause: &str) -> Effect {
    let lower = clause.to_ascii_lowercase();

    let parsed = if lower.starts_with("free combo") {
        parse_free_combo(clause)
    } else if lower.starts_with("combo") {
        parse_combo(clause)
    } else if lower == "fuse" {
        Some(Effect::Fuse)
    } else if lower == "banish" {
        Some(Effect::Banish)
    } else if lower == "refresh spell row" {
        Some(Effect::RefreshSpellRow)
    } else if lower.starts_with("attune") {
        single_bracketed_element(clause).map(Effect::Attune)
    } else if lower.starts_with("consume spell") {
        consume_count(clause).map(Effect::ConsumeSpell)
    } else if lower.starts_with("add") {
        parse_element_bonus(clause)
            .map(|(element, amount)| Effect::ElementBonus { element, amount })
    } else {
        None
    };

    parsed.unwrap_or_else(|| {
        warn!(text = clause, "unrecognized ability text, treating as no-op");
        Effect::NoOp(clause.to_string())
    })
}

fn parse_combo(clause: &str) -> Option<Effect> {
    let (condition, reward) = clause.split_once('=')?;
    let elements = bracketed(condition)
        .into_iter()
        .map(|name| name.parse::<Element>().ok())
        .collect::<Option<Vec<_>>>()?;
    if elements.is_empty() {
        return None;
    }
    let mode = if condition.to_ascii_lowercase().contains(" and ") {
        ComboMode::All
    } else {
        ComboMode::Any
    };
    let (bonus, extra_casts) = parse_reward(reward)?;
    Some(Effect::Combo {
        requires: elements.into_iter().collect(),
        mode,
        bonus,
        extra_casts,
    })
}

fn parse_free_combo(clause: &str) -> Option<Effect> {
    let (bonus, extra_casts) = match clause.split_once('=') {
        Some((_, reward)) => parse_reward(reward)?,
        None => (0, 0),
    };
    Some(Effect::FreeCombo { bonus, extra_casts })
}

/// `+1 ATK, +1 Spell Cast` -> (1, 1).
fn parse_reward(text: &str) -> Option<(i64, u32)> {
    let mut bonus = 0;
    let mut extra_casts = 0;
    let mut matched = false;

    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let lower = part.to_ascii_lowercase();
        if let Some(amount) = lower.strip_suffix("atk") {
            bonus += parse_signed(amount)?;
        } else if let Some(amount) = lower
            .strip_suffix("spell casts")
            .or_else(|| lower.strip_suffix("spell cast"))
        {
            extra_casts += u32::try_from(parse_signed(amount)?).ok()?;
        } else {
            return None;
        }
        matched = true;
    }

    matched.then_some((bonus, extra_casts))
}

fn parse_modifier_clause(clause: &str) -> Option<ModifierKind> {
    let lower = clause.to_ascii_lowercase();

    if let Some(rest) = lower.strip_prefix('x') {
        let factor: u32 = rest.strip_suffix("atk")?.trim().parse().ok()?;
        return (factor >= 1).then_some(ModifierKind::Multiply(factor));
    }
    if lower.starts_with("make") {
        return single_bracketed_element(clause).map(ModifierKind::Attune);
    }
    if lower.starts_with("add") {
        return parse_element_bonus(clause)
            .map(|(element, amount)| ModifierKind::ElementBonus { element, amount });
    }
    let amount = lower.strip_suffix("atk")?;
    parse_signed(amount).map(ModifierKind::Flat)
}

/// `Add (2) To [Fire]` -> (Fire, 2).
fn parse_element_bonus(clause: &str) -> Option<(Element, i64)> {
    let amount = parenthesized(clause)?.trim().parse().ok()?;
    let element = single_bracketed_element(clause)?;
    Some((element, amount))
}

/// `Consume Spell (x3)` -> 3; a bare `Consume Spell` costs one spell.
fn consume_count(clause: &str) -> Option<u32> {
    match parenthesized(clause) {
        Some(inner) => inner
            .trim()
            .trim_start_matches(['x', 'X'])
            .trim()
            .parse()
            .ok(),
        None => Some(1),
    }
}

fn single_bracketed_element(text: &str) -> Option<Element> {
    match bracketed(text).as_slice() {
        [name] => name.parse().ok(),
        _ => None,
    }
}

/// Contents of every `[...]` group, in order.
fn bracketed(text: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('[') {
        let after = &rest[start + 1..];
        match after.find(']') {
            Some(end) => {
                groups.push(after[..end].trim());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    groups
}

/// Contents of the first `(...)` group.
fn parenthesized(text: &str) -> Option<&str> {
    let start = text.find('(')?;
    let end = start + text[start..].find(')')?;
    Some(&text[start + 1..end])
}

fn parse_signed(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed).trim();
    digits.parse().ok()
}

fn split_then(text: &str) -> impl Iterator<Item = &str> {
    text.split(" then ").flat_map(|part| part.split(" Then "))
}

fn is_blank(text: &str) -> bool {
    text.is_empty() || text.eq_ignore_ascii_case("none")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(elements: &[Element]) -> ElementSet {
        elements.iter().copied().collect()
    }

    #[test]
    fn test_combo_any() {
        let ability = parse_ability("Combo [Fire] or [Water] or [Earth] = +1 ATK, +1 Spell Cast");
        assert_eq!(
            ability.effects(),
            &[Effect::Combo {
                requires: set(&[Element::Fire, Element::Water, Element::Earth]),
                mode: ComboMode::Any,
                bonus: 1,
                extra_casts: 1,
            }]
        );
    }

    #[test]
    fn test_combo_all() {
        let ability = parse_ability("Combo [Fire] and [Wind] = +2 ATK");
        assert_eq!(
            ability.effects(),
            &[Effect::Combo {
                requires: set(&[Element::Fire, Element::Wind]),
                mode: ComboMode::All,
                bonus: 2,
                extra_casts: 0,
            }]
        );
    }

    #[test]
    fn test_combo_without_reward_is_noop() {
        let ability = parse_ability("Combo [Fire]");
        assert!(matches!(ability.effects(), [Effect::NoOp(_)]));

        let ability = parse_ability("Combo [Lava] = +2 ATK");
        assert!(matches!(ability.effects(), [Effect::NoOp(_)]));
    }

    #[test]
    fn test_free_combo() {
        assert_eq!(
            parse_ability("Free Combo").effects(),
            &[Effect::FreeCombo { bonus: 0, extra_casts: 0 }]
        );
        assert_eq!(
            parse_ability("Free Combo = +2 ATK, +1 Spell Cast").effects(),
            &[Effect::FreeCombo { bonus: 2, extra_casts: 1 }]
        );
    }

    #[test]
    fn test_keywords_joined() {
        let ability = parse_ability("Refresh Spell Row + Banish");
        assert_eq!(ability.effects(), &[Effect::RefreshSpellRow, Effect::Banish]);
        assert_eq!(parse_ability("fuse").effects(), &[Effect::Fuse]);
    }

    #[test]
    fn test_attune_consume_add() {
        assert_eq!(parse_ability("Attune [Void]").effects(), &[Effect::Attune(Element::Void)]);
        assert_eq!(parse_ability("Consume Spell (x3)").effects(), &[Effect::ConsumeSpell(3)]);
        assert_eq!(parse_ability("Consume Spell").effects(), &[Effect::ConsumeSpell(1)]);
        assert_eq!(
            parse_ability("Add (2) To [Fire]").effects(),
            &[Effect::ElementBonus { element: Element::Fire, amount: 2 }]
        );
    }

    #[test]
    fn test_unknown_and_blank() {
        assert!(parse_ability("").is_empty());
        assert!(parse_ability("None").is_empty());
        assert_eq!(
            parse_ability("Scout Area Card").effects(),
            &[Effect::NoOp("Scout Area Card".to_string())]
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "Attune [Water] + Combo [Fire] and [Earth] = +4 ATK + Banish";
        assert_eq!(parse_ability(text), parse_ability(text));
        assert_eq!(parse_ability(text).effects().len(), 3);
    }

    #[test]
    fn test_area_ability() {
        assert_eq!(parse_area_ability("Consume Spell (x3)"), AreaAbility::ConsumeSpell(3));
        assert_eq!(parse_area_ability("Collective"), AreaAbility::Collective);
        assert_eq!(parse_area_ability("None"), AreaAbility::None);
        assert_eq!(
            parse_area_ability("Immobile"),
            AreaAbility::Other("Immobile".to_string())
        );
    }

    #[test]
    fn test_immunity() {
        assert!(parse_immunity("None").is_empty());
        assert_eq!(
            parse_immunity("Fire, Water, Earth, Wind"),
            set(&[Element::Fire, Element::Water, Element::Earth, Element::Wind])
        );
        assert_eq!(parse_immunity("Void, Plasma"), set(&[Element::Void]));
    }

    #[test]
    fn test_modifier_text() {
        assert_eq!(
            parse_modifier_text("+2 ATK, Make [Fire]"),
            vec![ModifierKind::Flat(2), ModifierKind::Attune(Element::Fire)]
        );
        assert_eq!(
            parse_modifier_text("+2 ATK then x2 ATK"),
            vec![ModifierKind::Flat(2), ModifierKind::Multiply(2)]
        );
        assert_eq!(parse_modifier_text("-3 ATK"), vec![ModifierKind::Flat(-3)]);
        assert_eq!(
            parse_modifier_text("Add (3) To [Earth]"),
            vec![ModifierKind::ElementBonus { element: Element::Earth, amount: 3 }]
        );
        assert!(parse_modifier_text("Re-Fuse").is_empty());
        assert!(parse_modifier_text("x0 ATK").is_empty());
        assert!(parse_modifier_text("").is_empty());
    }
}
