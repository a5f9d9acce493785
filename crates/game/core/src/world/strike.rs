//! Shared per-call context for everything that deals damage.
//!
//! Skills, the ultimate and projectile controllers never hold references to
//! the roster or to each other. The simulation builds a [`HitContext`] for the
//! duration of a call and passes it down explicitly.

use crate::combat::{CritProfile, resolve_hit};
use crate::config::CombatConfig;
use crate::element::{AffinityTable, Element};
use crate::env::{Dice, TargetQuery};
use crate::events::CombatEvent;

use super::common::{EnemyId, Vec2};
use super::enemy::EnemyRoster;

/// Read-only snapshot of the projectile/skill owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OwnerView {
    pub position: Vec2,
    /// Unit direction the owner last moved in.
    pub facing: Vec2,
    pub element: Element,
}

impl OwnerView {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            facing: Vec2::RIGHT,
            element: Element::None,
        }
    }
}

/// Attacker-side parameters of one hit.
#[derive(Clone, Copy, Debug)]
pub struct Strike<'s> {
    /// Skill name reported in events.
    pub source: &'s str,
    pub base: f32,
    pub element: Element,
    pub crit: CritProfile,
    /// Where the hit comes from; knockback pushes away from here.
    pub origin: Vec2,
}

/// Mutable world access for the duration of one damage-dealing call.
pub struct HitContext<'a> {
    pub now: f32,
    pub config: &'a CombatConfig,
    pub affinity: AffinityTable,
    pub enemies: &'a mut EnemyRoster,
    pub query: &'a dyn TargetQuery,
    pub dice: &'a mut Dice,
    pub events: &'a mut Vec<CombatEvent>,
}

impl HitContext<'_> {
    /// Resolves a hit against a living enemy and writes the result back.
    ///
    /// Returns the damage removed from the target, or `None` if the target is
    /// gone or already dead.
    pub fn strike(&mut self, target: EnemyId, strike: &Strike<'_>) -> Option<f32> {
        let target_element = self.enemies.alive(target)?.element;
        let roll = self.dice.next_unit();
        let hit = resolve_hit(
            strike.base,
            strike.element,
            target_element,
            strike.crit,
            roll,
            &self.affinity,
        );

        let enemy = self.enemies.get_mut(target)?;
        let applied = enemy.take_hit(hit.amount, self.config.defense_mitigation);
        self.events.push(CombatEvent::DamageDealt {
            source: strike.source.to_owned(),
            target,
            amount: applied,
            is_crit: hit.is_crit,
            element: strike.element,
        });

        if let Some(status) = hit.status
            && enemy.is_alive()
        {
            enemy.apply_status(
                status,
                self.now + self.config.status_duration,
                strike.origin,
                self.config.knockback_distance,
            );
            self.events
                .push(CombatEvent::StatusApplied { target, status });
        }
        Some(applied)
    }

    pub fn within(&self, center: Vec2, radius: f32) -> Vec<EnemyId> {
        self.query.within(&*self.enemies, center, radius)
    }

    pub fn nearest(&self, center: Vec2, range: f32) -> Option<EnemyId> {
        self.query.nearest(&*self.enemies, center, range)
    }

    /// Position of a living enemy.
    pub fn position_of(&self, id: EnemyId) -> Option<Vec2> {
        self.enemies.alive(id).map(|e| e.position)
    }

    /// Regular crit profile plus an extra chance from passive skills.
    pub fn regular_crit(&self, bonus_chance: f32) -> CritProfile {
        CritProfile::new(self.config.crit_chance, self.config.crit_multiplier)
            .with_bonus_chance(bonus_chance)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Test harness owning everything a [`HitContext`] borrows.

    use super::*;
    use crate::definitions::EnemyTemplate;
    use crate::env::LinearScan;

    pub struct Arena {
        pub config: CombatConfig,
        pub enemies: EnemyRoster,
        pub query: LinearScan,
        pub dice: Dice,
        pub events: Vec<CombatEvent>,
        pub now: f32,
    }

    impl Arena {
        pub fn new() -> Self {
            Self {
                config: CombatConfig {
                    crit_chance: 0.0,
                    ultimate_crit_chance: 0.0,
                    ..CombatConfig::default()
                },
                enemies: EnemyRoster::new(),
                query: LinearScan,
                dice: Dice::pcg(7),
                events: Vec::new(),
                now: 0.0,
            }
        }

        pub fn spawn(&mut self, x: f32, y: f32) -> EnemyId {
            self.spawn_with(EnemyTemplate::new("dummy"), x, y)
        }

        pub fn spawn_with(&mut self, template: EnemyTemplate, x: f32, y: f32) -> EnemyId {
            self.enemies.spawn(&template, Vec2::new(x, y))
        }

        pub fn ctx(&mut self) -> HitContext<'_> {
            HitContext {
                now: self.now,
                config: &self.config,
                affinity: AffinityTable::new(self.config.element_bonus),
                enemies: &mut self.enemies,
                query: &self.query,
                dice: &mut self.dice,
                events: &mut self.events,
            }
        }

        pub fn damage_events(&self) -> Vec<EnemyId> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    CombatEvent::DamageDealt { target, .. } => Some(*target),
                    _ => None,
                })
                .collect()
        }

        pub fn health(&self, id: EnemyId) -> f32 {
            self.enemies.get(id).map_or(0.0, |e| e.health)
        }
    }
}
