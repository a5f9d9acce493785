//! Throw-then-return projectiles.
//!
//! ```text
//! throw ──► Throwing ──range or target cap──► ReachingMax ──pause──► Returning ──caught──► destroyed
//! ```
//!
//! A flight hits each enemy at most once. The owner is only collided with
//! while returning.

use std::collections::BTreeSet;

use crate::skill::BoomerangParams;
use crate::world::{EnemyId, HitContext, OwnerView, Strike, Vec2};

use super::Payload;
use super::targeting::{acquire, direction_to};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoomerangPhase {
    Throwing,
    /// Hovering at the turning point.
    ReachingMax { remaining: f32 },
    Returning,
}

#[derive(Clone, Debug)]
pub struct Boomerang {
    pub position: Vec2,
    pub direction: Vec2,
    pub traveled: f32,
    pub age: f32,
    pub phase: BoomerangPhase,
    hits: BTreeSet<EnemyId>,
    payload: Payload,
}

impl Boomerang {
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn has_hit(&self, id: EnemyId) -> bool {
        self.hits.contains(&id)
    }
}

/// A flight that made it back to the owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Catch {
    pub hits: usize,
    /// Health to restore to the owner (0 unless heal-on-return).
    pub heal: f32,
}

/// Controller for a boomerang skill. Owns its flights.
#[derive(Clone, Debug)]
pub struct BoomerangController {
    skill: String,
    params: BoomerangParams,
    flights: Vec<Boomerang>,
}

impl BoomerangController {
    pub fn new(skill: impl Into<String>, params: BoomerangParams) -> Self {
        Self {
            skill: skill.into(),
            params,
            flights: Vec::new(),
        }
    }

    pub fn params(&self) -> &BoomerangParams {
        &self.params
    }

    pub fn flights(&self) -> &[Boomerang] {
        &self.flights
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Throws a new flight toward the acquired target, or along the owner's
    /// facing when there is none. Returns false at the concurrency cap.
    pub fn throw(&mut self, owner: &OwnerView, payload: Payload, ctx: &mut HitContext<'_>) -> bool {
        if self.flights.len() >= self.params.max_concurrent as usize {
            return false;
        }
        let target = acquire(
            self.params.targeting,
            self.params.targeting_range,
            owner,
            ctx,
        );
        let direction = direction_to(target, owner.position, ctx)
            .or_else(|| owner.facing.normalized())
            .unwrap_or(Vec2::RIGHT);
        self.flights.push(Boomerang {
            position: owner.position,
            direction,
            traveled: 0.0,
            age: 0.0,
            phase: BoomerangPhase::Throwing,
            hits: BTreeSet::new(),
            payload,
        });
        tracing::trace!(skill = %self.skill, ?target, "boomerang thrown");
        true
    }

    /// Advances every flight and returns the flights caught this tick.
    pub fn tick(&mut self, dt: f32, owner: &OwnerView, ctx: &mut HitContext<'_>) -> Vec<Catch> {
        let mut caught = Vec::new();
        let Self {
            skill,
            params,
            flights,
        } = self;
        flights.retain_mut(|flight| match advance(flight, skill, params, dt, owner, ctx) {
            Step::Flying => true,
            Step::Expired => false,
            Step::Caught(catch) => {
                caught.push(catch);
                false
            }
        });
        caught
    }

    pub fn clear(&mut self) {
        self.flights.clear();
    }
}

enum Step {
    Flying,
    Expired,
    Caught(Catch),
}

fn advance(
    flight: &mut Boomerang,
    skill: &str,
    params: &BoomerangParams,
    dt: f32,
    owner: &OwnerView,
    ctx: &mut HitContext<'_>,
) -> Step {
    flight.age += dt;
    if flight.age >= params.lifetime {
        return Step::Expired;
    }

    match flight.phase {
        BoomerangPhase::Throwing => {
            let step = params.throw_speed * dt;
            flight.position += flight.direction * step;
            flight.traveled += step;
            collide(flight, skill, params, ctx);
            if flight.traveled >= params.max_range
                || flight.hit_count() >= params.max_targets as usize
            {
                flight.phase = BoomerangPhase::ReachingMax {
                    remaining: ctx.config.boomerang_pause,
                };
                tracing::trace!(
                    skill,
                    traveled = flight.traveled,
                    hits = flight.hit_count(),
                    "boomerang reached max"
                );
            }
            Step::Flying
        }
        BoomerangPhase::ReachingMax { remaining } => {
            let remaining = remaining - dt;
            flight.phase = if remaining <= 0.0 {
                BoomerangPhase::Returning
            } else {
                BoomerangPhase::ReachingMax { remaining }
            };
            Step::Flying
        }
        BoomerangPhase::Returning => {
            flight.position = flight
                .position
                .move_towards(owner.position, params.return_speed * dt);
            collide(flight, skill, params, ctx);
            if flight.position.distance(owner.position) > ctx.config.catch_radius {
                return Step::Flying;
            }

            let hits = flight.hit_count();
            let heal = if params.heal_on_return && hits > 0 {
                flight.payload.damage * params.heal_percent * hits as f32
            } else {
                0.0
            };
            tracing::debug!(skill, hits, heal, "boomerang returned");
            Step::Caught(Catch { hits, heal })
        }
    }
}

/// Strikes every touching enemy not yet hit by this flight, up to the target cap.
fn collide(flight: &mut Boomerang, skill: &str, params: &BoomerangParams, ctx: &mut HitContext<'_>) {
    let strike = Strike {
        source: skill,
        base: flight.payload.damage,
        element: flight.payload.element,
        crit: flight.payload.crit,
        origin: flight.position,
    };
    for id in ctx.within(flight.position, params.collision_radius) {
        if flight.hit_count() >= params.max_targets as usize {
            break;
        }
        if flight.has_hit(id) {
            continue;
        }
        if ctx.strike(id, &strike).is_some() {
            flight.hits.insert(id);
        }
    }
}
