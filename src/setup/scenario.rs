//! Scenario construction.

use tracing::info;

use crate::cards::{AreaTemplate, CardRegistry, SpellTemplate, STARTING_SPELLS};
use crate::core::{Difficulty, EngineConfig, GameState};
use crate::rules::Engine;
use crate::zones::SpellZone;

/// Copies of each catalog spell shuffled into the standard supply.
const SUPPLY_COPIES: usize = 2;

/// How areas are laid out at build time.
#[derive(Clone, Debug)]
enum AreaLayout {
    /// Explicit tiers, in reveal order.
    Tiers(Vec<Vec<AreaTemplate>>),
    /// Shuffle a pool and deal it into the difficulty's tier sizes.
    Dealt(Vec<AreaTemplate>),
}

/// Builder for a ready-to-play `Engine`.
///
/// ```
/// use doomcaster::core::Difficulty;
/// use doomcaster::setup::ScenarioBuilder;
///
/// let engine = ScenarioBuilder::standard(Difficulty::Archmage).with_seed(7).build();
///
/// assert_eq!(engine.collection().len(), 5);
/// assert_eq!(engine.areas().len(), 12);
/// assert_eq!(engine.offered().count(), 5);
/// assert_eq!(engine.revealed_tier(), Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    config: EngineConfig,
    collection: Vec<SpellTemplate>,
    supply: Vec<SpellTemplate>,
    shuffle_supply: bool,
    combined_stages: bool,
    areas: AreaLayout,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            collection: Vec::new(),
            supply: Vec::new(),
            shuffle_supply: false,
            combined_stages: false,
            areas: AreaLayout::Tiers(Vec::new()),
        }
    }
}

impl ScenarioBuilder {
    /// An empty scenario: no spells, no areas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard game: five starting spells, a shuffled supply holding
    /// two copies of every catalog spell, and the catalog areas dealt into
    /// the difficulty's tiers. Every tier after the first is a combined
    /// defense.
    #[must_use]
    pub fn standard(difficulty: Difficulty) -> Self {
        let registry = CardRegistry::standard();

        let collection = STARTING_SPELLS
            .iter()
            .filter_map(|name| registry.spell(name).cloned())
            .collect();
        let supply = registry
            .spells()
            .flat_map(|t| std::iter::repeat(t.clone()).take(SUPPLY_COPIES))
            .collect();
        let catalog: Vec<AreaTemplate> = registry.areas().cloned().collect();
        let pool = catalog
            .iter()
            .cycle()
            .take(difficulty.area_count())
            .cloned()
            .collect();

        Self {
            config: EngineConfig::default().with_difficulty(difficulty),
            collection,
            supply,
            shuffle_supply: true,
            combined_stages: true,
            areas: AreaLayout::Dealt(pool),
        }
    }

    /// Replace the whole configuration, difficulty and seed included.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Spells that start in the collection.
    #[must_use]
    pub fn with_collection(mut self, spells: impl IntoIterator<Item = SpellTemplate>) -> Self {
        self.collection.extend(spells);
        self
    }

    /// Spells in the supply. The first listed is dealt first unless the
    /// supply is shuffled.
    #[must_use]
    pub fn with_supply(mut self, spells: impl IntoIterator<Item = SpellTemplate>) -> Self {
        self.supply.extend(spells);
        self
    }

    #[must_use]
    pub fn shuffle_supply(mut self, shuffle: bool) -> Self {
        self.shuffle_supply = shuffle;
        self
    }

    /// Make every tier after the first collective: its areas share damage
    /// and fall together.
    #[must_use]
    pub fn combined_stages(mut self, combined: bool) -> Self {
        self.combined_stages = combined;
        self
    }

    /// Append a tier of areas. Replaces a dealt layout.
    ///
    /// Panics if the tier is empty.
    #[must_use]
    pub fn with_tier(mut self, areas: impl IntoIterator<Item = AreaTemplate>) -> Self {
        let tier: Vec<_> = areas.into_iter().collect();
        assert!(!tier.is_empty(), "Tier must contain at least one area");
        let mut tiers = match std::mem::replace(&mut self.areas, AreaLayout::Tiers(Vec::new())) {
            AreaLayout::Tiers(tiers) => tiers,
            AreaLayout::Dealt(_) => Vec::new(),
        };
        tiers.push(tier);
        self.areas = AreaLayout::Tiers(tiers);
        self
    }

    /// Build the engine and deal the offer row.
    ///
    /// Panics if the starting collection exceeds its capacity.
    #[must_use]
    pub fn build(self) -> Engine {
        assert!(
            self.collection.len() <= self.config.collection_capacity,
            "Starting collection of {} exceeds capacity {}",
            self.collection.len(),
            self.config.collection_capacity
        );

        let seed = self.config.seed;
        let tier_sizes = self.config.difficulty.tier_sizes();
        let mut state = GameState::new(self.config);

        for template in &self.collection {
            state.add_spell(template, SpellZone::Collection);
        }
        // Top of the supply is the end of the list.
        for template in self.supply.iter().rev() {
            state.add_spell(template, SpellZone::Supply);
        }
        if self.shuffle_supply {
            state.zones.shuffle_zone(SpellZone::Supply, &mut state.rng);
        }

        let tiers = match self.areas {
            AreaLayout::Tiers(tiers) => tiers,
            AreaLayout::Dealt(mut pool) => {
                state.rng.shuffle(&mut pool);
                deal_tiers(pool, tier_sizes)
            }
        };
        for (tier, areas) in tiers.iter().enumerate() {
            for template in areas {
                let id = state.add_area(template, tier);
                if self.combined_stages && tier > 0 {
                    if let Some(area) = state.area_mut(id) {
                        area.collective = true;
                    }
                }
            }
        }

        state.deal_offer_row();

        info!(
            seed,
            collection = state.collection().len(),
            supply = state.zones.zone_size(SpellZone::Supply),
            areas = state.areas().len(),
            tiers = tiers.len(),
            "scenario ready"
        );
        Engine::new(state)
    }
}

/// Split a pool into consecutive tiers of the given sizes. Leftover areas
/// join the last tier.
fn deal_tiers(pool: Vec<AreaTemplate>, sizes: &[usize]) -> Vec<Vec<AreaTemplate>> {
    let mut tiers = Vec::with_capacity(sizes.len());
    let mut rest = pool.into_iter();
    for &size in sizes {
        let tier: Vec<_> = rest.by_ref().take(size).collect();
        if tier.is_empty() {
            break;
        }
        tiers.push(tier);
    }
    let leftover: Vec<_> = rest.collect();
    if let Some(last) = tiers.last_mut() {
        last.extend(leftover);
    }
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Element;

    #[test]
    fn test_standard_acolyte() {
        let engine = ScenarioBuilder::standard(Difficulty::Acolyte).build();

        let names: Vec<_> = engine
            .collection()
            .iter()
            .filter_map(|&id| engine.spell(id))
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, STARTING_SPELLS);

        let tiers: Vec<_> = engine.areas().iter().map(|a| a.tier).collect();
        assert_eq!(tiers, vec![0, 0, 0, 1, 1]);
        let collective: Vec<_> = engine.areas().iter().map(|a| a.is_collective()).collect();
        assert_eq!(collective, vec![false, false, false, true, true]);
        assert_eq!(engine.offered().count(), 5);
        assert_eq!(engine.supply_size(), 16 - 5);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = ScenarioBuilder::standard(Difficulty::Archmage).with_seed(11).build();
        let b = ScenarioBuilder::standard(Difficulty::Archmage).with_seed(11).build();

        let names = |e: &Engine| -> Vec<String> {
            e.offered()
                .filter_map(|id| e.spell(id))
                .map(|s| s.name.clone())
                .collect()
        };
        assert_eq!(names(&a), names(&b));
        assert_eq!(a.areas(), b.areas());
    }

    #[test]
    fn test_custom_supply_order() {
        let engine = ScenarioBuilder::new()
            .with_config(EngineConfig::default().with_offer_row_size(2))
            .with_supply([
                SpellTemplate::new("First", Element::Fire, 1),
                SpellTemplate::new("Second", Element::Fire, 1),
                SpellTemplate::new("Third", Element::Fire, 1),
            ])
            .build();

        let row: Vec<_> = engine
            .offered()
            .filter_map(|id| engine.spell(id))
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(row, vec!["First", "Second"]);
        assert_eq!(engine.supply_size(), 1);
    }

    #[test]
    fn test_explicit_tiers() {
        let engine = ScenarioBuilder::new()
            .with_tier([AreaTemplate::new("A", 5), AreaTemplate::new("B", 5)])
            .with_tier([AreaTemplate::new("C", 5)])
            .build();

        assert_eq!(engine.areas()[2].tier, 1);
        assert_eq!(engine.revealed_tier(), Some(0));
        assert!(engine.areas().iter().all(|a| !a.is_collective()));

        let combined = ScenarioBuilder::new()
            .combined_stages(true)
            .with_tier([AreaTemplate::new("A", 5)])
            .with_tier([AreaTemplate::new("B", 5), AreaTemplate::new("C", 5)])
            .build();
        assert!(!combined.areas()[0].is_collective());
        assert!(combined.areas()[1..].iter().all(|a| a.is_collective()));
    }

    #[test]
    #[should_panic(expected = "at least one area")]
    fn test_empty_tier_panics() {
        let _ = ScenarioBuilder::new().with_tier(Vec::new());
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn test_oversized_collection_panics() {
        let _ = ScenarioBuilder::standard(Difficulty::Acolyte)
            .with_config(EngineConfig::default().with_collection_capacity(3))
            .build();
    }

    #[test]
    fn test_deal_tiers_leftover() {
        let pool: Vec<_> = (0..5).map(|i| AreaTemplate::new(format!("A{}", i), 1)).collect();
        let tiers = deal_tiers(pool, &[2, 2]);
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[1].len(), 3);
    }
}
