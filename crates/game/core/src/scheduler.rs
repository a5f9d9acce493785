//! Passive activation of attack and defense skills.
//!
//! Two accumulators advance with the clock. When one reaches the owner's
//! activation interval for its category, every active and ready skill of that
//! category fires once and starts its own cooldown; the accumulator then
//! restarts from zero.

use crate::events::CombatEvent;
use crate::projectile::Payload;
use crate::skill::{AcquiredSkill, BehaviorController, SkillCategory, SkillLoadout};
use crate::stats::{Bonus, BuffSource, CharacterStats, StatKind, TimedBuff};
use crate::world::{HitContext, OwnerView, Strike};

/// Which categories fired during a [`PassiveScheduler::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fired {
    pub attack: bool,
    pub defense: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PassiveScheduler {
    attack_timer: f32,
    defense_timer: f32,
}

impl PassiveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attack_timer(&self) -> f32 {
        self.attack_timer
    }

    pub fn defense_timer(&self) -> f32 {
        self.defense_timer
    }

    /// Advances both accumulators and reports which ones reached their interval.
    pub fn tick(&mut self, dt: f32, attack_interval: f32, defense_interval: f32) -> Fired {
        Fired {
            attack: advance(&mut self.attack_timer, dt, attack_interval),
            defense: advance(&mut self.defense_timer, dt, defense_interval),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn advance(timer: &mut f32, dt: f32, interval: f32) -> bool {
    *timer += dt;
    if *timer >= interval {
        *timer = 0.0;
        true
    } else {
        false
    }
}

/// Fires every active, ready skill of `category`. Returns how many fired.
///
/// Defense skills also grant a flat defense buff worth their total defense for
/// exactly one defense interval, replacing the buff that same copy granted
/// last time. Copies of one skill stack.
pub fn fire(
    category: SkillCategory,
    loadout: &mut SkillLoadout,
    owner: &mut CharacterStats,
    view: &OwnerView,
    ctx: &mut HitContext<'_>,
) -> usize {
    let crit = ctx.regular_crit(loadout.crit_bonus());
    let skills = match category {
        SkillCategory::Attack => loadout.attack_mut(),
        SkillCategory::Defense => loadout.defense_mut(),
        SkillCategory::Ultimate => return 0,
    };

    let mut fired = 0;
    for skill in skills.iter_mut().filter(|s| s.is_active() && s.is_ready()) {
        let payload = skill.payload(owner.attack(), owner.element(), crit);
        if category == SkillCategory::Defense {
            let defense = skill.total_defense();
            if defense > 0.0 {
                owner.apply_buff(TimedBuff::new(
                    BuffSource::Skill(skill.slot()),
                    StatKind::Defense,
                    Bonus::flat(defense),
                    ctx.now + owner.defense_interval(),
                ));
            }
        }
        apply_effect(skill, category, payload, owner, view, ctx);
        skill.start_cooldown(ctx.config.min_cooldown);
        fired += 1;
    }
    if fired > 0 {
        tracing::trace!(?category, fired, "passive activation");
    }
    fired
}

fn apply_effect(
    skill: &mut AcquiredSkill,
    category: SkillCategory,
    payload: Payload,
    owner: &mut CharacterStats,
    view: &OwnerView,
    ctx: &mut HitContext<'_>,
) {
    let name = skill.name().to_owned();
    match skill.controller_mut() {
        BehaviorController::None => {
            if category != SkillCategory::Attack {
                return;
            }
            if let Some(target) = ctx.nearest(view.position, ctx.config.direct_attack_range) {
                ctx.strike(
                    target,
                    &Strike {
                        source: &name,
                        base: payload.damage,
                        element: payload.element,
                        crit: payload.crit,
                        origin: view.position,
                    },
                );
            }
        }
        BehaviorController::HealthRegen { heal } => {
            let healed = owner.heal(*heal);
            if healed > 0.0 {
                ctx.events.push(CombatEvent::Heal {
                    source: name,
                    amount: healed,
                });
            }
        }
        BehaviorController::CriticalStrike { .. } => {}
        BehaviorController::Orbit(orbit) => orbit.activate(view, payload, ctx),
        BehaviorController::Boomerang(boomerang) => {
            boomerang.throw(view, payload, ctx);
        }
    }
}

/// Advances every projectile controller by `dt`.
///
/// Boomerangs caught this tick heal the owner.
pub fn tick_projectiles(
    dt: f32,
    loadout: &mut SkillLoadout,
    owner: &mut CharacterStats,
    view: &OwnerView,
    ctx: &mut HitContext<'_>,
) {
    let crit = ctx.regular_crit(loadout.crit_bonus());
    for skill in loadout.skills_mut() {
        let payload = skill.payload(owner.attack(), owner.element(), crit);
        let active = skill.is_active();
        let name = skill.name().to_owned();
        match skill.controller_mut() {
            BehaviorController::Orbit(orbit) => orbit.tick(dt, view, active, payload, ctx),
            BehaviorController::Boomerang(boomerang) => {
                for catch in boomerang.tick(dt, view, ctx) {
                    let healed = owner.heal(catch.heal);
                    if healed > 0.0 {
                        ctx.events.push(CombatEvent::Heal {
                            source: name.clone(),
                            amount: healed,
                        });
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::definitions::EnemyTemplate;
    use crate::skill::{BoomerangParams, SkillBehavior, SkillDefinition};
    use crate::stats::BaseStats;
    use crate::world::Vec2;
    use crate::world::fixtures::Arena;

    fn owner() -> CharacterStats {
        CharacterStats::new(BaseStats::default(), 100.0)
    }

    fn tough() -> EnemyTemplate {
        EnemyTemplate {
            max_health: 1_000.0,
            speed: 0.0,
            ..EnemyTemplate::new("post")
        }
    }

    fn acquire(loadout: &mut SkillLoadout, stats: &mut CharacterStats, def: SkillDefinition) {
        loadout.try_acquire(Arc::new(def), stats).expect("acquire");
    }

    #[test]
    fn accumulators_fire_at_interval_and_restart() {
        let mut scheduler = PassiveScheduler::new();
        assert_eq!(scheduler.tick(0.5, 1.0, 2.0), Fired::default());
        assert_eq!(
            scheduler.tick(0.5, 1.0, 2.0),
            Fired {
                attack: true,
                defense: false
            }
        );
        assert_eq!(scheduler.attack_timer(), 0.0);
        assert_eq!(scheduler.defense_timer(), 1.0);
        assert!(scheduler.tick(1.0, 1.0, 2.0).defense);
    }

    #[test]
    fn direct_attack_hits_nearest_in_range_and_starts_cooldown() {
        let mut arena = Arena::new();
        let near = arena.spawn_with(tough(), 2.0, 0.0);
        arena.spawn_with(tough(), 4.0, 0.0);
        let mut stats = owner();
        let mut loadout = SkillLoadout::new(0.1);
        acquire(
            &mut loadout,
            &mut stats,
            SkillDefinition::builder("jab", SkillCategory::Attack)
                .damage(5.0)
                .cooldown(3.0)
                .build(),
        );

        let view = OwnerView::at(Vec2::ZERO);
        let fired = fire(SkillCategory::Attack, &mut loadout, &mut stats, &view, &mut arena.ctx());
        assert_eq!(fired, 1);
        assert_eq!(arena.damage_events(), vec![near]);
        // skill damage plus owner attack
        assert_eq!(arena.health(near), 1_000.0 - 15.0);
        assert_eq!(loadout.attack()[0].cooldown_remaining(), 3.0);

        let fired = fire(SkillCategory::Attack, &mut loadout, &mut stats, &view, &mut arena.ctx());
        assert_eq!(fired, 0);
    }

    #[test]
    fn direct_attack_ignores_enemies_out_of_range() {
        let mut arena = Arena::new();
        arena.spawn_with(tough(), 50.0, 0.0);
        let mut stats = owner();
        let mut loadout = SkillLoadout::new(0.1);
        acquire(
            &mut loadout,
            &mut stats,
            SkillDefinition::builder("jab", SkillCategory::Attack)
                .damage(5.0)
                .build(),
        );
        fire(
            SkillCategory::Attack,
            &mut loadout,
            &mut stats,
            &OwnerView::at(Vec2::ZERO),
            &mut arena.ctx(),
        );
        assert!(arena.damage_events().is_empty());
    }

    #[test]
    fn inactive_skills_do_not_fire() {
        let mut arena = Arena::new();
        arena.spawn_with(tough(), 1.0, 0.0);
        let mut stats = owner();
        let mut loadout = SkillLoadout::new(0.1);
        acquire(
            &mut loadout,
            &mut stats,
            SkillDefinition::builder("jab", SkillCategory::Attack).build(),
        );
        loadout.toggle(0);
        let fired = fire(
            SkillCategory::Attack,
            &mut loadout,
            &mut stats,
            &OwnerView::at(Vec2::ZERO),
            &mut arena.ctx(),
        );
        assert_eq!(fired, 0);
    }

    #[test]
    fn defense_buff_replaces_and_expires_after_one_interval() {
        let mut arena = Arena::new();
        let mut stats = owner();
        let mut loadout = SkillLoadout::new(0.1);
        acquire(
            &mut loadout,
            &mut stats,
            SkillDefinition::builder("bulwark", SkillCategory::Defense)
                .defense(4.0)
                .build(),
        );
        let base_defense = stats.defense();
        let view = OwnerView::at(Vec2::ZERO);

        fire(SkillCategory::Defense, &mut loadout, &mut stats, &view, &mut arena.ctx());
        arena.now = 1.0;
        fire(SkillCategory::Defense, &mut loadout, &mut stats, &view, &mut arena.ctx());
        assert_eq!(stats.buffs().len(), 1);
        assert_eq!(stats.defense(), base_defense + 4.0);

        let interval = stats.defense_interval();
        stats.expire_buffs(1.0 + interval - 0.01);
        assert_eq!(stats.defense(), base_defense + 4.0);
        stats.expire_buffs(1.0 + interval);
        assert_eq!(stats.defense(), base_defense);
    }

    #[test]
    fn held_copies_of_a_defense_skill_stack_their_buffs() {
        let mut arena = Arena::new();
        let mut stats = owner();
        let mut loadout = SkillLoadout::new(0.1);
        for _ in 0..2 {
            acquire(
                &mut loadout,
                &mut stats,
                SkillDefinition::builder("bulwark", SkillCategory::Defense)
                    .defense(4.0)
                    .build(),
            );
        }
        let base_defense = stats.defense();
        let view = OwnerView::at(Vec2::ZERO);

        let fired = fire(SkillCategory::Defense, &mut loadout, &mut stats, &view, &mut arena.ctx());
        assert_eq!(fired, 2);
        assert_eq!(stats.buffs().len(), 2);
        assert_eq!(stats.defense(), base_defense + 8.0);

        // refiring replaces each copy's own buff instead of compounding
        arena.now = 1.0;
        fire(SkillCategory::Defense, &mut loadout, &mut stats, &view, &mut arena.ctx());
        assert_eq!(stats.buffs().len(), 2);
        assert_eq!(stats.defense(), base_defense + 8.0);

        stats.expire_buffs(1.0 + stats.defense_interval());
        assert_eq!(stats.defense(), base_defense);
    }

    #[test]
    fn health_regen_skill_heals_owner() {
        let mut arena = Arena::new();
        let mut stats = owner();
        stats.take_damage(30.0, 0.0);
        let mut loadout = SkillLoadout::new(0.1);
        acquire(
            &mut loadout,
            &mut stats,
            SkillDefinition::builder("mend", SkillCategory::Defense)
                .behavior(SkillBehavior::HealthRegen { heal: 12.0 })
                .build(),
        );
        let health = stats.health();
        fire(
            SkillCategory::Defense,
            &mut loadout,
            &mut stats,
            &OwnerView::at(Vec2::ZERO),
            &mut arena.ctx(),
        );
        assert_eq!(stats.health(), health + 12.0);
        assert!(arena.events.iter().any(|e| matches!(
            e,
            CombatEvent::Heal { amount, .. } if *amount == 12.0
        )));
    }

    #[test]
    fn boomerang_skill_throws_and_heals_on_catch() {
        let mut arena = Arena::new();
        arena.spawn_with(tough(), 2.0, 0.0);
        let mut stats = owner();
        stats.take_damage(50.0, 0.0);
        let mut loadout = SkillLoadout::new(0.1);
        acquire(
            &mut loadout,
            &mut stats,
            SkillDefinition::builder("glaive", SkillCategory::Attack)
                .damage(10.0)
                .behavior(SkillBehavior::Boomerang(BoomerangParams {
                    max_range: 4.0,
                    heal_on_return: true,
                    heal_percent: 0.1,
                    ..BoomerangParams::default()
                }))
                .build(),
        );
        let view = OwnerView::at(Vec2::ZERO);
        fire(SkillCategory::Attack, &mut loadout, &mut stats, &view, &mut arena.ctx());
        assert_eq!(loadout.live_projectiles(), 1);

        let health = stats.health();
        for _ in 0..200 {
            tick_projectiles(0.05, &mut loadout, &mut stats, &view, &mut arena.ctx());
            if loadout.live_projectiles() == 0 {
                break;
            }
        }
        assert_eq!(loadout.live_projectiles(), 0);
        // (10 skill + 10 attack) * 0.1 * 1 hit
        assert!((stats.health() - (health + 2.0)).abs() < 1e-4);
    }
}
