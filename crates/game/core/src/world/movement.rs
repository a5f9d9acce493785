//! Enemy chase movement and contact damage.

use super::common::{EnemyId, Vec2};
use super::enemy::EnemyRoster;

/// Moves every living enemy toward `target`.
///
/// Pending knockback is applied first and consumes the enemy's step. Frozen
/// enemies stay in place; slowed enemies move at half speed.
pub fn chase(roster: &mut EnemyRoster, target: Vec2, dt: f32, now: f32) {
    for enemy in roster.iter_mut().filter(|e| e.is_alive()) {
        if let Some(push) = enemy.pending_knockback.take() {
            enemy.position += push;
            continue;
        }
        let step = enemy.effective_speed(now) * dt;
        if step > 0.0 {
            enemy.position = enemy.position.move_towards(target, step);
        }
    }
}

/// A single contact hit against the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactHit {
    pub enemy: EnemyId,
    pub damage: f32,
}

/// Collects contact hits from enemies touching the player and restarts their
/// per-enemy contact cooldown.
pub fn contact_hits(
    roster: &mut EnemyRoster,
    player: Vec2,
    player_radius: f32,
    dt: f32,
) -> Vec<ContactHit> {
    let mut hits = Vec::new();
    for enemy in roster.iter_mut().filter(|e| e.is_alive()) {
        enemy.contact_timer = (enemy.contact_timer - dt).max(0.0);
        let touching = enemy.position.distance(player) <= enemy.radius + player_radius;
        if touching && enemy.contact_timer <= 0.0 && enemy.contact_damage > 0.0 {
            enemy.contact_timer = enemy.contact_cooldown;
            hits.push(ContactHit {
                enemy: enemy.id,
                damage: enemy.contact_damage,
            });
        }
    }
    hits
}
