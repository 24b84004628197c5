//! The five elements and compact element sets.
//!
//! Elements drive immunity, combos, attunement and element-conditional
//! modifiers. `ElementSet` packs any subset of the five elements into a
//! single byte so played-element tracking and immunity checks are cheap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A spell or immunity element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Wind,
    Void,
}

impl Element {
    /// All elements in canonical order.
    pub const ALL: [Element; 5] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Wind,
        Element::Void,
    ];

    /// Display name as printed on cards.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Wind => "Wind",
            Element::Void => "Void",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when text does not name one of the five elements.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown element `{0}`")]
pub struct UnknownElement(pub String);

impl FromStr for Element {
    type Err = UnknownElement;

    /// Case-insensitive; surrounding whitespace and brackets are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']').trim();
        Element::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownElement(s.to_string()))
    }
}

/// A set of elements stored as a bit mask.
///
/// ```
/// use doomcaster::core::{Element, ElementSet};
///
/// let mut played = ElementSet::empty();
/// played.insert(Element::Fire);
///
/// let immunity: ElementSet = [Element::Fire, Element::Water].into_iter().collect();
/// assert!(immunity.contains(Element::Fire));
/// assert!(played.is_subset(immunity));
/// assert_eq!(immunity.to_string(), "Fire, Water");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementSet(u8);

impl ElementSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// A set holding one element.
    #[must_use]
    pub const fn single(element: Element) -> Self {
        Self(element.bit())
    }

    /// Add an element. Returns true if it was not already present.
    pub fn insert(&mut self, element: Element) -> bool {
        let had = self.contains(element);
        self.0 |= element.bit();
        !had
    }

    #[must_use]
    pub const fn contains(self, element: Element) -> bool {
        self.0 & element.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if the two sets share at least one element.
    #[must_use]
    pub const fn intersects(self, other: ElementSet) -> bool {
        self.0 & other.0 != 0
    }

    /// True if every element of `self` is in `other`.
    #[must_use]
    pub const fn is_subset(self, other: ElementSet) -> bool {
        self.0 & !other.0 == 0
    }

    #[must_use]
    pub const fn union(self, other: ElementSet) -> ElementSet {
        Self(self.0 | other.0)
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate in canonical element order.
    pub fn iter(self) -> impl Iterator<Item = Element> {
        Element::ALL.into_iter().filter(move |e| self.contains(*e))
    }
}

impl FromIterator<Element> for ElementSet {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut set = ElementSet::empty();
        for element in iter {
            set.insert(element);
        }
        set
    }
}

impl From<Element> for ElementSet {
    fn from(element: Element) -> Self {
        Self::single(element)
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let names: Vec<_> = self.iter().map(Element::name).collect();
        f.write_str(&names.join(", "))
    }
}
