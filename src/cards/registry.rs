//! Card registry for template lookup.
//!
//! The `CardRegistry` stores every spell and area template a game can deal,
//! keyed by card name, and remembers registration order so setups that walk
//! the registry are deterministic. `CardRegistry::standard()` holds the
//! printed DoomCaster card set.

use rustc_hash::FxHashMap;

use super::area::AreaTemplate;
use super::spell::SpellTemplate;
use crate::core::Element;

/// Names of the five spells every player starts with.
pub const STARTING_SPELLS: [&str; 5] = [
    "Conjure Fire",
    "Shape Water",
    "Gather Wind",
    "Raise Earth",
    "Unleash Void",
];

/// Registry of spell and area templates.
///
/// ## Example
///
/// ```
/// use doomcaster::cards::{CardRegistry, SpellTemplate};
/// use doomcaster::core::Element;
///
/// let mut registry = CardRegistry::new();
/// registry.register_spell(SpellTemplate::new("Fireball", Element::Fire, 4));
///
/// let found = registry.spell("Fireball").unwrap();
/// assert_eq!(found.attack, 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    spells: Vec<SpellTemplate>,
    areas: Vec<AreaTemplate>,
    spell_index: FxHashMap<String, usize>,
    area_index: FxHashMap<String, usize>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The printed card set.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        let spells = [
            SpellTemplate::new("Conjure Fire", Element::Fire, 5).with_modifier("+3 ATK"),
            SpellTemplate::new("Shape Water", Element::Water, 0)
                .with_ability("Fuse")
                .with_modifier("+3 ATK"),
            SpellTemplate::new("Gather Wind", Element::Wind, 3)
                .with_ability("Combo [Fire] or [Water] or [Earth] = +1 ATK, +1 Spell Cast")
                .with_modifier("+2 ATK"),
            SpellTemplate::new("Raise Earth", Element::Earth, 4)
                .with_ability("Scout Area Card")
                .with_modifier("+2 ATK"),
            SpellTemplate::new("Unleash Void", Element::Void, 0)
                .with_ability("Refresh Spell Row + Banish")
                .with_modifier("+3 ATK"),
            SpellTemplate::new("Wrath of Midas", Element::Earth, 4)
                .with_ability("Shift Area Card")
                .with_modifier("+3 ATK"),
            SpellTemplate::new("Fireball", Element::Fire, 4)
                .with_ability("Combo [Fire] = +3 ATK")
                .with_modifier("+3 ATK"),
            SpellTemplate::new("Tsunami", Element::Water, 4)
                .with_ability("Refresh Spell Row")
                .with_modifier("Re-Fuse"),
        ];
        for spell in spells {
            registry.register_spell(spell);
        }

        let areas = [
            AreaTemplate::new("Towering Fortress", 40)
                .with_ability("Immobile")
                .with_reward("+5 ATK"),
            AreaTemplate::new("Charred Ruins", 15)
                .with_immunity("Fire")
                .with_reward("+2 ATK, Make [Fire]"),
            AreaTemplate::new("Sunken Citadel", 15)
                .with_immunity("Water")
                .with_reward("+2 ATK, Make [Water]"),
            AreaTemplate::new("Mining Fields", 20)
                .with_immunity("Earth")
                .with_reward("+2 ATK, Make [Earth]"),
            AreaTemplate::new("Sky Temple", 10)
                .with_immunity("Wind")
                .with_reward("+2 ATK, Make [Wind]"),
            AreaTemplate::new("Cursed Lands", 10)
                .with_immunity("Void")
                .with_ability("Cursed")
                .with_reward("-3 ATK"),
            AreaTemplate::new("Mirage Barrier", 15)
                .with_immunity("Fire, Water, Earth, Wind")
                .with_ability("Consume Spell (x3)")
                .with_reward("+2 ATK then x2 ATK"),
            AreaTemplate::new("Rainbow Falls", 20)
                .with_immunity("Fire, Water, Earth, Wind")
                .with_reward("x2 ATK"),
        ];
        for area in areas {
            registry.register_area(area);
        }

        registry
    }

    /// Register a spell template.
    ///
    /// Panics if a spell with the same name already exists.
    pub fn register_spell(&mut self, spell: SpellTemplate) {
        if self.spell_index.contains_key(&spell.name) {
            panic!("Spell {:?} already registered", spell.name);
        }
        self.spell_index.insert(spell.name.clone(), self.spells.len());
        self.spells.push(spell);
    }

    /// Register an area template.
    ///
    /// Panics if an area with the same name already exists.
    pub fn register_area(&mut self, area: AreaTemplate) {
        if self.area_index.contains_key(&area.name) {
            panic!("Area {:?} already registered", area.name);
        }
        self.area_index.insert(area.name.clone(), self.areas.len());
        self.areas.push(area);
    }

    #[must_use]
    pub fn spell(&self, name: &str) -> Option<&SpellTemplate> {
        self.spell_index.get(name).map(|&i| &self.spells[i])
    }

    #[must_use]
    pub fn area(&self, name: &str) -> Option<&AreaTemplate> {
        self.area_index.get(name).map(|&i| &self.areas[i])
    }

    /// Spell templates in registration order.
    pub fn spells(&self) -> impl Iterator<Item = &SpellTemplate> {
        self.spells.iter()
    }

    /// Area templates in registration order.
    pub fn areas(&self) -> impl Iterator<Item = &AreaTemplate> {
        self.areas.iter()
    }

    #[must_use]
    pub fn spell_count(&self) -> usize {
        self.spells.len()
    }

    #[must_use]
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Area;
    use crate::core::AreaId;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register_spell(SpellTemplate::new("Test Spell", Element::Wind, 2));
        registry.register_area(AreaTemplate::new("Test Area", 10));

        assert_eq!(registry.spell("Test Spell").map(|s| s.attack), Some(2));
        assert_eq!(registry.area("Test Area").map(|a| a.defense), Some(10));
        assert!(registry.spell("Missing").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_spell_panics() {
        let mut registry = CardRegistry::new();
        registry.register_spell(SpellTemplate::new("A", Element::Fire, 1));
        registry.register_spell(SpellTemplate::new("A", Element::Water, 2));
    }

    #[test]
    fn test_standard_set() {
        let registry = CardRegistry::standard();

        assert_eq!(registry.spell_count(), 8);
        assert_eq!(registry.area_count(), 8);
        for name in STARTING_SPELLS {
            assert!(registry.spell(name).is_some(), "missing {}", name);
        }

        let names: Vec<_> = registry.spells().map(|s| s.name.as_str()).collect();
        assert_eq!(names[0], "Conjure Fire");
        assert_eq!(names[7], "Tsunami");
    }

    #[test]
    fn test_standard_keeps_printed_text() {
        let registry = CardRegistry::standard();

        let scout = registry.spell("Raise Earth").map(|s| s.ability.as_str());
        assert_eq!(scout, Some("Scout Area Card"));
        let tsunami = registry.spell("Tsunami").map(|s| s.modifier.as_str());
        assert_eq!(tsunami, Some("Re-Fuse"));
        let fortress = registry.area("Towering Fortress").map(|a| a.ability.as_str());
        assert_eq!(fortress, Some("Immobile"));

        let cursed = registry.area("Cursed Lands").map(|t| Area::from_template(AreaId(0), 0, t));
        assert!(cursed.is_some_and(|a| a.consume_cost() == 0 && !a.is_collective()));
    }
}
