//! Spell cast resolution.
//!
//! A cast is checked completely before anything changes:
//! spell and area lookups, tier reveal, defeat, tapped state, cast
//! allowance and the area's consume cost. Only then does the engine
//! discard the consumed spells, apply damage, hand out rewards, mark the
//! spell used and run its banish and refresh keywords.

use smallvec::SmallVec;
use tracing::{debug, info};

use super::engine::Engine;
use super::error::CastError;
use super::outcome::DamageOutcome;
use crate::cards::{Modifier, ModifierKind};
use crate::core::{Action, AreaId, Element, SpellId};
use crate::effects::{calculate_attack, AttackResult};
use crate::zones::{SpellZone, ZonePosition};

/// Caller choices for a cast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CastOptions {
    /// Spells to discard for a Consume Spell cost. `None` lets the engine
    /// pick the weakest untapped spells. Naming spells for an area without
    /// a consume cost is rejected.
    pub fodder: Option<SmallVec<[SpellId; 3]>>,
}

impl CastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the spells to consume.
    #[must_use]
    pub fn with_fodder(mut self, fodder: impl IntoIterator<Item = SpellId>) -> Self {
        self.fodder = Some(fodder.into_iter().collect());
        self
    }
}

/// Everything a validated cast will do.
struct CastPlan {
    spell: SpellId,
    area: AreaId,
    attunement: Option<Element>,
    attack: AttackResult,
    blocked: bool,
    consumed: SmallVec<[SpellId; 3]>,
    banish: bool,
    refresh: bool,
}

impl Engine {
    /// Cast a collection spell at an area.
    ///
    /// Consume costs are paid with the weakest untapped spells.
    pub fn cast_spell(&mut self, spell: SpellId, area: AreaId) -> Result<DamageOutcome, CastError> {
        self.cast_spell_with(spell, area, &CastOptions::default())
    }

    /// Cast a collection spell at an area with explicit options.
    pub fn cast_spell_with(
        &mut self,
        spell: SpellId,
        area: AreaId,
        options: &CastOptions,
    ) -> Result<DamageOutcome, CastError> {
        let plan = self.plan_cast(spell, area, options)?;
        Ok(self.apply_cast(plan))
    }

    fn plan_cast(
        &self,
        spell_id: SpellId,
        area_id: AreaId,
        options: &CastOptions,
    ) -> Result<CastPlan, CastError> {
        let state = &self.state;

        let spell = state
            .spell(spell_id)
            .filter(|_| state.in_collection(spell_id))
            .ok_or(CastError::UnknownSpell(spell_id))?;
        let area = state.area(area_id).ok_or(CastError::UnknownArea(area_id))?;
        if !state.is_revealed(area) {
            return Err(CastError::AreaNotRevealed(area_id));
        }
        if area.defeated {
            return Err(CastError::AreaAlreadyDefeated(area_id));
        }
        if spell.used {
            return Err(CastError::SpellAlreadyUsed(spell_id));
        }
        if state.casts_this_turn >= state.casts_allowed() {
            return Err(CastError::CastLimitReached {
                allowed: state.casts_allowed(),
            });
        }

        let required = area.consume_cost();
        if required == 0 {
            if let Some(named) = options.fodder.as_ref().filter(|f| !f.is_empty()) {
                return Err(CastError::UnexpectedConsumeFodder(area_id, named.len()));
            }
        }
        let consumed = self.select_fodder(spell_id, required, options)?;

        let attack = calculate_attack(spell, state.played_elements);
        let blocked = area.is_immune(attack.element);

        Ok(CastPlan {
            spell: spell_id,
            area: area_id,
            attunement: spell.ability.attunement(),
            attack,
            blocked,
            consumed,
            banish: spell.ability.has_banish(),
            refresh: spell.ability.refreshes_row(),
        })
    }

    /// Pick or check the spells that pay a consume cost.
    fn select_fodder(
        &self,
        caster: SpellId,
        required: u32,
        options: &CastOptions,
    ) -> Result<SmallVec<[SpellId; 3]>, CastError> {
        if required == 0 {
            return Ok(SmallVec::new());
        }
        let state = &self.state;
        let eligible = |id: SpellId| {
            id != caster
                && state.in_collection(id)
                && state.spell(id).is_some_and(|s| s.is_untapped())
        };
        let needed = required as usize;

        match &options.fodder {
            Some(chosen) => {
                let mut valid: SmallVec<[SpellId; 3]> = SmallVec::new();
                for &id in chosen {
                    if eligible(id) && !valid.contains(&id) {
                        valid.push(id);
                    }
                }
                if valid.len() == chosen.len() && valid.len() == needed {
                    Ok(valid)
                } else {
                    Err(CastError::InsufficientConsumeFodder {
                        required,
                        available: u32::try_from(valid.len()).unwrap_or(u32::MAX),
                    })
                }
            }
            None => {
                let mut candidates: Vec<(u32, usize, SpellId)> = state
                    .collection()
                    .iter()
                    .enumerate()
                    .filter(|(_, id)| eligible(**id))
                    .filter_map(|(pos, &id)| {
                        let spell = state.spell(id)?;
                        Some((calculate_attack(spell, state.played_elements).attack, pos, id))
                    })
                    .collect();
                if candidates.len() < needed {
                    return Err(CastError::InsufficientConsumeFodder {
                        required,
                        available: u32::try_from(candidates.len()).unwrap_or(u32::MAX),
                    });
                }
                candidates.sort_unstable();
                Ok(candidates.into_iter().take(needed).map(|(_, _, id)| id).collect())
            }
        }
    }

    fn apply_cast(&mut self, plan: CastPlan) -> DamageOutcome {
        let CastPlan {
            spell: spell_id,
            area: area_id,
            attunement,
            attack,
            blocked,
            consumed,
            banish,
            refresh,
        } = plan;
        let delivered = if blocked { 0 } else { attack.attack };

        if let (Some(element), Some(spell)) = (attunement, self.state.spell_mut(spell_id)) {
            spell.element = element;
        }

        for &id in &consumed {
            self.state
                .zones
                .move_to_zone(id, SpellZone::Discard, Some(ZonePosition::Top));
        }

        let (absorbed, defeated_areas) = self.apply_damage(area_id, delivered, attack.element);
        self.state.turn_damage += u64::from(absorbed);
        self.state.turn_defeated.extend(defeated_areas.iter().copied());

        let rewards = if banish {
            Vec::new()
        } else {
            self.grant_rewards(spell_id, &defeated_areas)
        };

        if let Some(spell) = self.state.spell_mut(spell_id) {
            spell.used = true;
        }
        self.state.casts_this_turn += 1;
        self.state.bonus_casts = self.state.bonus_casts.saturating_add(attack.extra_casts);
        self.state.played_elements.insert(attack.element);

        if banish {
            self.state.banish(spell_id);
        }
        if refresh {
            self.state.refresh_offer_row();
            info!(spell = %spell_id, "spell row refreshed");
        }

        self.state.record_action(Action::Cast {
            spell: spell_id,
            area: area_id,
            consumed: consumed.clone(),
        });

        let (area_damage, area_defeated) = self
            .state
            .area(area_id)
            .map_or((0, false), |a| (a.damage, a.defeated));

        debug!(
            spell = %spell_id,
            area = %area_id,
            attack = attack.attack,
            element = %attack.element,
            delivered,
            blocked,
            area_damage,
            "spell cast"
        );
        if self.state.is_victory() && !defeated_areas.is_empty() {
            info!(turn = self.state.turn_number, "every area defeated");
        }

        DamageOutcome {
            spell: spell_id,
            area: area_id,
            attack: attack.attack,
            element: attack.element,
            delivered,
            blocked_by_immunity: blocked,
            area_damage,
            area_defeated,
            defeated_areas,
            consumed,
            extra_casts: attack.extra_casts,
            combo_bonus: attack.combo_bonus,
            rewards,
            banished: banish,
            row_refreshed: refresh,
        }
    }

    /// Add damage to the target, spilling into collective siblings that are
    /// not immune to the element.
    ///
    /// Returns the damage absorbed and the areas defeated.
    fn apply_damage(
        &mut self,
        target: AreaId,
        delivered: u32,
        element: Element,
    ) -> (u32, Vec<AreaId>) {
        let Some(area) = self.state.area(target) else {
            return (0, Vec::new());
        };

        let group: Vec<AreaId> = if area.is_collective() {
            let tier = area.tier;
            std::iter::once(target)
                .chain(
                    self.state
                        .areas()
                        .iter()
                        .filter(|a| {
                            a.id != target && a.tier == tier && a.is_collective() && !a.defeated
                        })
                        .map(|a| a.id),
                )
                .collect()
        } else {
            vec![target]
        };

        let mut remaining = delivered;
        for &id in &group {
            if remaining == 0 {
                break;
            }
            if let Some(area) = self.state.area_mut(id).filter(|a| !a.is_immune(element)) {
                remaining = area.absorb(remaining);
            }
        }
        let absorbed = delivered - remaining;

        let all_full = group
            .iter()
            .all(|&id| self.state.area(id).is_some_and(|a| a.is_full()));
        if !all_full {
            return (absorbed, Vec::new());
        }

        for &id in &group {
            if let Some(area) = self.state.area_mut(id) {
                area.defeated = true;
                info!(area = %id, name = %area.name, "area defeated");
            }
        }
        (absorbed, group)
    }

    /// Attach each defeated area's reward to the casting spell.
    fn grant_rewards(&mut self, spell_id: SpellId, defeated: &[AreaId]) -> Vec<Modifier> {
        let fallback = ModifierKind::Flat(self.state.config.area_defeat_bonus);
        let rewards: Vec<Modifier> = defeated
            .iter()
            .filter_map(|&id| self.state.area(id))
            .flat_map(|area| {
                let kinds = if area.reward.is_empty() {
                    vec![fallback]
                } else {
                    area.reward.clone()
                };
                kinds
                    .into_iter()
                    .map(move |kind| Modifier::area_reward(kind, area.id))
            })
            .collect();

        if let Some(spell) = self.state.spell_mut(spell_id) {
            for &modifier in &rewards {
                spell.push_modifier(modifier);
            }
        }
        rewards
    }
}
