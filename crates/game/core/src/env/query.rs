//! Spatial target queries over the enemy roster.

use crate::world::{Enemy, EnemyId, EnemyRoster, Vec2};

/// Target/spatial query collaborator.
///
/// Implementations may keep an acceleration structure; [`rebuild`](Self::rebuild)
/// is called once per tick after enemies moved. Results only ever contain
/// living enemies and are deterministic: `within` is ordered by id and
/// `nearest` breaks distance ties by the lower id.
pub trait TargetQuery: Send {
    fn rebuild(&mut self, _enemies: &EnemyRoster) {}

    /// Living enemies whose collision circle intersects the query circle.
    fn within(&self, enemies: &EnemyRoster, center: Vec2, radius: f32) -> Vec<EnemyId>;

    /// Closest living enemy whose center lies within `range` of `center`.
    fn nearest(&self, enemies: &EnemyRoster, center: Vec2, range: f32) -> Option<EnemyId>;
}

/// True when the enemy's circle touches the circle at `center` with `radius`.
pub fn intersects(enemy: &Enemy, center: Vec2, radius: f32) -> bool {
    let reach = radius + enemy.radius;
    enemy.position.distance(center) <= reach
}

/// Picks the closest candidate to `center`, lower id on ties.
pub fn closest<'a>(
    candidates: impl IntoIterator<Item = &'a Enemy>,
    center: Vec2,
) -> Option<EnemyId> {
    candidates
        .into_iter()
        .map(|e| (e.position.distance(center), e.id))
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, id)| id)
}

/// Brute-force query: scans every enemy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearScan;

impl TargetQuery for LinearScan {
    fn within(&self, enemies: &EnemyRoster, center: Vec2, radius: f32) -> Vec<EnemyId> {
        enemies
            .iter()
            .filter(|e| e.is_alive() && intersects(e, center, radius))
            .map(|e| e.id)
            .collect()
    }

    fn nearest(&self, enemies: &EnemyRoster, center: Vec2, range: f32) -> Option<EnemyId> {
        closest(
            enemies
                .iter()
                .filter(|e| e.is_alive() && e.position.distance(center) <= range),
            center,
        )
    }
}
