//! Engine configuration.
//!
//! `EngineConfig` carries every tunable rule constant: the per-turn cast
//! limit, collection and offer row capacities, the fallback reward for
//! defeating an area, the difficulty (which decides how areas are split into
//! tiers) and the seed. It is plain data, serializable with serde, and built
//! with `with_*` methods.

use serde::{Deserialize, Serialize};

/// Difficulty level. Decides how many areas each tier holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Two tiers: three areas, then two.
    #[default]
    Acolyte,
    /// Three tiers of four areas each.
    Archmage,
}

impl Difficulty {
    /// Number of areas in each tier, from first revealed to last.
    #[must_use]
    pub fn tier_sizes(self) -> &'static [usize] {
        match self {
            Difficulty::Acolyte => &[3, 2],
            Difficulty::Archmage => &[4, 4, 4],
        }
    }

    /// Total number of areas dealt at setup.
    #[must_use]
    pub fn area_count(self) -> usize {
        self.tier_sizes().iter().sum()
    }
}

/// Rule constants for one game.
///
/// ```
/// use doomcaster::core::{Difficulty, EngineConfig};
///
/// let config = EngineConfig::default()
///     .with_cast_limit(4)
///     .with_difficulty(Difficulty::Archmage);
///
/// assert_eq!(config.cast_limit, 4);
/// assert_eq!(config.collection_capacity, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Spells that may be cast per turn before combo allowances.
    pub cast_limit: u32,

    /// Maximum spells held in the collection.
    pub collection_capacity: usize,

    /// Number of spells dealt face up in the offer row.
    pub offer_row_size: usize,

    /// Flat attack bonus awarded for defeating an area that has no reward text.
    pub area_defeat_bonus: i64,

    /// Difficulty (tier layout for standard scenarios).
    pub difficulty: Difficulty,

    /// Seed for supply and area shuffling.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cast_limit: 3,
            collection_capacity: 5,
            offer_row_size: 5,
            area_defeat_bonus: 2,
            difficulty: Difficulty::Acolyte,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cast_limit(mut self, limit: u32) -> Self {
        self.cast_limit = limit;
        self
    }

    #[must_use]
    pub fn with_collection_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Collection capacity must be at least 1");
        self.collection_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_offer_row_size(mut self, size: usize) -> Self {
        self.offer_row_size = size;
        self
    }

    #[must_use]
    pub fn with_area_defeat_bonus(mut self, bonus: i64) -> Self {
        self.area_defeat_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.cast_limit, 3);
        assert_eq!(config.collection_capacity, 5);
        assert_eq!(config.offer_row_size, 5);
        assert_eq!(config.area_defeat_bonus, 2);
        assert_eq!(config.difficulty, Difficulty::Acolyte);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_cast_limit(1)
            .with_collection_capacity(8)
            .with_offer_row_size(3)
            .with_area_defeat_bonus(5)
            .with_seed(9);

        assert_eq!(config.cast_limit, 1);
        assert_eq!(config.collection_capacity, 8);
        assert_eq!(config.offer_row_size, 3);
        assert_eq!(config.area_defeat_bonus, 5);
        assert_eq!(config.seed, 9);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn test_zero_capacity() {
        let _ = EngineConfig::new().with_collection_capacity(0);
    }

    #[test]
    fn test_tier_sizes() {
        assert_eq!(Difficulty::Acolyte.tier_sizes(), &[3, 2]);
        assert_eq!(Difficulty::Acolyte.area_count(), 5);
        assert_eq!(Difficulty::Archmage.area_count(), 12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"cast_limit": 2}"#).unwrap();
        assert_eq!(config.cast_limit, 2);
        assert_eq!(config.collection_capacity, 5);

        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
