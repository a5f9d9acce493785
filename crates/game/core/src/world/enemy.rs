//! Live enemies and the roster that owns them.

use std::collections::BTreeMap;

use crate::combat::{StatusEffectKind, StatusEffects, mitigate};
use crate::definitions::EnemyTemplate;
use crate::element::Element;

use super::common::{EnemyId, Vec2};

/// A spawned enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub template: String,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub defense: f32,
    pub speed: f32,
    pub contact_damage: f32,
    pub contact_cooldown: f32,
    /// Seconds until this enemy may deal contact damage again.
    pub contact_timer: f32,
    pub element: Element,
    pub radius: f32,
    pub xp_reward: f32,
    pub coin_reward: u32,
    pub status: StatusEffects,
    /// Displacement still to be applied from a knockback hit.
    pub pending_knockback: Option<Vec2>,
}

impl Enemy {
    pub fn from_template(id: EnemyId, template: &EnemyTemplate, position: Vec2) -> Self {
        Self {
            id,
            template: template.id.clone(),
            position,
            health: template.max_health,
            max_health: template.max_health,
            defense: template.defense,
            speed: template.speed,
            contact_damage: template.contact_damage,
            contact_cooldown: template.contact_cooldown,
            contact_timer: 0.0,
            element: template.element,
            radius: template.radius,
            xp_reward: template.xp_reward,
            coin_reward: template.coin_reward,
            status: StatusEffects::empty(),
            pending_knockback: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Applies a hit after defense mitigation. Returns the damage removed.
    pub fn take_hit(&mut self, raw: f32, mitigation: f32) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        let applied = mitigate(raw, self.defense, mitigation).min(self.health);
        self.health -= applied;
        applied
    }

    /// Applies an elemental status until `expires_at`.
    ///
    /// Knockback is queued as a displacement away from `origin` and applied on
    /// the next movement step.
    pub fn apply_status(
        &mut self,
        kind: StatusEffectKind,
        expires_at: f32,
        origin: Vec2,
        knockback_distance: f32,
    ) {
        self.status.add(kind, expires_at);
        if kind == StatusEffectKind::KnockedBack {
            let away = (self.position - origin).normalized().unwrap_or(Vec2::RIGHT);
            self.pending_knockback = Some(away * knockback_distance);
        }
    }

    /// Movement speed after status effects at `now`.
    pub fn effective_speed(&self, now: f32) -> f32 {
        if self.status.has(StatusEffectKind::Frozen, now) {
            0.0
        } else if self.status.has(StatusEffectKind::Slowed, now) {
            self.speed * 0.5
        } else {
            self.speed
        }
    }
}

/// Live enemies keyed by id. Iteration order is ascending id.
#[derive(Clone, Debug, Default)]
pub struct EnemyRoster {
    next_id: u32,
    enemies: BTreeMap<EnemyId, Enemy>,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, template: &EnemyTemplate, position: Vec2) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies
            .insert(id, Enemy::from_template(id, template, position));
        id
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    /// The enemy if it exists and is still alive.
    pub fn alive(&self, id: EnemyId) -> Option<&Enemy> {
        self.get(id).filter(|e| e.is_alive())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.values_mut()
    }

    /// Removes and returns every dead enemy, ascending id.
    pub fn remove_dead(&mut self) -> Vec<Enemy> {
        let dead: Vec<EnemyId> = self
            .enemies
            .values()
            .filter(|e| !e.is_alive())
            .map(|e| e.id)
            .collect();
        dead.into_iter()
            .filter_map(|id| self.enemies.remove(&id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> EnemyTemplate {
        EnemyTemplate {
            max_health: 30.0,
            defense: 4.0,
            speed: 2.0,
            ..EnemyTemplate::new("slime")
        }
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut roster = EnemyRoster::new();
        let a = roster.spawn(&template(), Vec2::ZERO);
        roster.get_mut(a).map(|e| e.take_hit(100.0, 0.5));
        assert_eq!(roster.remove_dead().len(), 1);
        let b = roster.spawn(&template(), Vec2::ZERO);
        assert_eq!(a, EnemyId(0));
        assert_eq!(b, EnemyId(1));
    }

    #[test]
    fn hits_are_mitigated_by_enemy_defense() {
        let mut enemy = Enemy::from_template(EnemyId(0), &template(), Vec2::ZERO);
        assert_eq!(enemy.take_hit(10.0, 0.5), 8.0);
        assert_eq!(enemy.health, 22.0);
        assert_eq!(enemy.take_hit(1.0, 0.5), 0.0);
    }

    #[test]
    fn status_changes_speed() {
        let mut enemy = Enemy::from_template(EnemyId(0), &template(), Vec2::ZERO);
        enemy.apply_status(StatusEffectKind::Slowed, 2.0, Vec2::ZERO, 1.0);
        assert_eq!(enemy.effective_speed(1.0), 1.0);
        enemy.apply_status(StatusEffectKind::Frozen, 2.0, Vec2::ZERO, 1.0);
        assert_eq!(enemy.effective_speed(1.0), 0.0);
        assert_eq!(enemy.effective_speed(2.0), 2.0);
    }

    #[test]
    fn knockback_points_away_from_origin() {
        let mut enemy = Enemy::from_template(EnemyId(0), &template(), Vec2::new(0.0, 3.0));
        enemy.apply_status(StatusEffectKind::KnockedBack, 1.0, Vec2::ZERO, 1.5);
        assert_eq!(enemy.pending_knockback, Some(Vec2::new(0.0, 1.5)));
    }
}
