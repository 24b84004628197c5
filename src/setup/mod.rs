//! Scenario setup: the standard card set dealt into difficulty tiers, or a
//! hand-built layout for tests and puzzles.

mod scenario;

pub use scenario::ScenarioBuilder;
