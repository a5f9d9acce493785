//! Orbit-then-launch projectiles.
//!
//! ```text
//! spawn ──► Orbiting(angle, rotation) ──rotation ≥ 360·orbits──► Launched ──contact──► destroyed
//!                 │                                                  │
//!                 └────────────── lifetime expired ──────────────────┴──► destroyed
//! ```

use std::collections::BTreeMap;

use crate::env::closest;
use crate::skill::{OrbitParams, SpawnMode};
use crate::world::{EnemyId, HitContext, OwnerView, Strike, Vec2};

use super::Payload;
use super::targeting::{acquire, direction_to};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitPhase {
    Orbiting,
    Launched { direction: Vec2 },
}

/// One projectile owned by an [`OrbitController`].
#[derive(Clone, Debug)]
pub struct OrbitingProjectile {
    /// Current angle around the owner, degrees in `[0, 360)`.
    pub angle: f32,
    /// Total degrees travelled while orbiting.
    pub rotation: f32,
    pub position: Vec2,
    pub age: f32,
    pub target: Option<EnemyId>,
    pub phase: OrbitPhase,
    payload: Payload,
    /// Last orbital hit time per enemy.
    last_hit: BTreeMap<EnemyId, f32>,
}

impl OrbitingProjectile {
    pub fn is_launched(&self) -> bool {
        matches!(self.phase, OrbitPhase::Launched { .. })
    }
}

/// Controller for an orbiting-projectile skill. Owns its projectiles.
#[derive(Clone, Debug)]
pub struct OrbitController {
    skill: String,
    params: OrbitParams,
    projectiles: Vec<OrbitingProjectile>,
    spawn_timer: f32,
}

impl OrbitController {
    pub fn new(skill: impl Into<String>, params: OrbitParams) -> Self {
        Self {
            skill: skill.into(),
            params,
            projectiles: Vec::new(),
            spawn_timer: 0.0,
        }
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    pub fn projectiles(&self) -> &[OrbitingProjectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Scheduler activation. Single mode spawns one projectile; continuous
    /// mode spawns from [`tick`](Self::tick) instead.
    pub fn activate(&mut self, owner: &OwnerView, payload: Payload, ctx: &mut HitContext<'_>) {
        if self.params.spawn == SpawnMode::Single {
            self.spawn(owner, payload, ctx);
        }
    }

    /// Spawns one projectile at a random angle, if under the cap.
    pub fn spawn(&mut self, owner: &OwnerView, payload: Payload, ctx: &mut HitContext<'_>) -> bool {
        if self.projectiles.len() >= self.params.max_projectiles as usize {
            return false;
        }
        let angle = ctx.dice.range(0.0, 360.0);
        let target = acquire(
            self.params.targeting,
            self.params.targeting_range,
            owner,
            ctx,
        );
        self.projectiles.push(OrbitingProjectile {
            angle,
            rotation: 0.0,
            position: owner.position + Vec2::from_angle_deg(angle) * self.params.orbit_radius,
            age: 0.0,
            target,
            phase: OrbitPhase::Orbiting,
            payload,
            last_hit: BTreeMap::new(),
        });
        tracing::trace!(skill = %self.skill, ?target, "orbiting projectile spawned");
        true
    }

    /// Advances every projectile by `dt`.
    ///
    /// `active` gates continuous spawning; `payload` is the damage snapshot
    /// used for projectiles spawned this tick.
    pub fn tick(
        &mut self,
        dt: f32,
        owner: &OwnerView,
        active: bool,
        payload: Payload,
        ctx: &mut HitContext<'_>,
    ) {
        if let SpawnMode::Continuous { interval } = self.params.spawn
            && active
        {
            self.spawn_timer += dt;
            if self.spawn_timer >= interval {
                self.spawn_timer = 0.0;
                self.spawn(owner, payload, ctx);
            }
        }

        let Self {
            skill,
            params,
            projectiles,
            ..
        } = self;
        projectiles.retain_mut(|p| advance(p, skill, params, dt, owner, ctx));
    }

    /// Destroys every projectile (run end, skill removal).
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.spawn_timer = 0.0;
    }
}

/// Returns false when the projectile is destroyed.
fn advance(
    p: &mut OrbitingProjectile,
    skill: &str,
    params: &OrbitParams,
    dt: f32,
    owner: &OwnerView,
    ctx: &mut HitContext<'_>,
) -> bool {
    p.age += dt;
    if p.age >= params.lifetime {
        return false;
    }

    match p.phase {
        OrbitPhase::Orbiting => {
            let step = params.orbit_speed * dt;
            p.angle = (p.angle + step).rem_euclid(360.0);
            p.rotation += step.abs();
            let radial = Vec2::from_angle_deg(p.angle);
            p.position = owner.position + radial * params.orbit_radius;

            let strike = Strike {
                source: skill,
                base: p.payload.damage,
                element: p.payload.element,
                crit: p.payload.crit,
                origin: p.position,
            };
            for id in ctx.within(p.position, params.orbital_damage_radius) {
                let ready = p
                    .last_hit
                    .get(&id)
                    .is_none_or(|at| ctx.now - at >= params.orbital_damage_interval);
                if ready && ctx.strike(id, &strike).is_some() {
                    p.last_hit.insert(id, ctx.now);
                }
            }

            if p.rotation >= 360.0 * params.orbits as f32 {
                launch(p, params, owner, radial, ctx);
                tracing::debug!(skill, target = ?p.target, "orbiting projectile launched");
            }
            true
        }
        OrbitPhase::Launched { direction } => {
            p.position += direction * (params.launch_speed * dt);
            let contacts = ctx.within(p.position, params.hit_radius);
            let hit = closest(
                contacts.iter().filter_map(|id| ctx.enemies.alive(*id)),
                p.position,
            );
            match hit {
                Some(id) => {
                    let strike = Strike {
                        source: skill,
                        base: p.payload.damage,
                        element: p.payload.element,
                        crit: p.payload.crit,
                        origin: p.position,
                    };
                    ctx.strike(id, &strike);
                    false
                }
                None => true,
            }
        }
    }
}

/// Points the projectile at its target, re-acquiring if the original died,
/// or along the orbit tangent when nothing is available.
fn launch(
    p: &mut OrbitingProjectile,
    params: &OrbitParams,
    owner: &OwnerView,
    radial: Vec2,
    ctx: &mut HitContext<'_>,
) {
    if p.target.and_then(|id| ctx.position_of(id)).is_none() {
        p.target = acquire(params.targeting, params.targeting_range, owner, ctx);
    }
    let tangent = if params.orbit_speed >= 0.0 {
        radial.perp()
    } else {
        -radial.perp()
    };
    let direction = direction_to(p.target, p.position, ctx).unwrap_or(tangent);
    p.phase = OrbitPhase::Launched { direction };
}
