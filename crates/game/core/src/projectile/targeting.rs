//! Target acquisition shared by projectile controllers.

use crate::env::closest;
use crate::skill::TargetingMode;
use crate::world::{EnemyId, HitContext, OwnerView, Vec2};

/// Half-angle of the facing cone, as the cosine (60°).
const FACING_CONE_COS: f32 = 0.5;

/// Picks a target for a projectile spawned by `owner`.
///
/// Returns `None` when nothing qualifies; callers fall back to a direction.
pub fn acquire(
    mode: TargetingMode,
    range: f32,
    owner: &OwnerView,
    ctx: &mut HitContext<'_>,
) -> Option<EnemyId> {
    match mode {
        TargetingMode::None => None,
        TargetingMode::Nearest => ctx.nearest(owner.position, range),
        TargetingMode::Random => {
            let candidates = in_range(owner.position, range, ctx);
            let index = ctx.dice.index(candidates.len())?;
            candidates.get(index).copied()
        }
        TargetingMode::Facing => {
            let facing = owner.facing.normalized().unwrap_or(Vec2::RIGHT);
            let candidates = in_range(owner.position, range, ctx);
            closest(
                candidates
                    .iter()
                    .filter_map(|id| ctx.enemies.alive(*id))
                    .filter(|e| {
                        (e.position - owner.position)
                            .normalized()
                            .is_some_and(|dir| dir.x * facing.x + dir.y * facing.y >= FACING_CONE_COS)
                    }),
                owner.position,
            )
        }
    }
}

fn in_range(center: Vec2, range: f32, ctx: &HitContext<'_>) -> Vec<EnemyId> {
    ctx.within(center, range)
        .into_iter()
        .filter(|id| {
            ctx.enemies
                .alive(*id)
                .is_some_and(|e| e.position.distance(center) <= range)
        })
        .collect()
}

/// Unit direction from `from` toward a living target, if any.
pub fn direction_to(target: Option<EnemyId>, from: Vec2, ctx: &HitContext<'_>) -> Option<Vec2> {
    let position = ctx.position_of(target?)?;
    (position - from).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::fixtures::Arena;

    #[test]
    fn facing_ignores_enemies_behind() {
        let mut arena = Arena::new();
        let _behind = arena.spawn(-1.0, 0.0);
        let ahead = arena.spawn(4.0, 0.5);
        let owner = OwnerView::at(Vec2::ZERO);

        let target = acquire(TargetingMode::Facing, 10.0, &owner, &mut arena.ctx());
        assert_eq!(target, Some(ahead));

        let nearest = acquire(TargetingMode::Nearest, 10.0, &owner, &mut arena.ctx());
        assert_eq!(nearest, Some(EnemyId(0)));
    }

    #[test]
    fn random_stays_in_range() {
        let mut arena = Arena::new();
        let near = arena.spawn(1.0, 0.0);
        arena.spawn(50.0, 0.0);
        let owner = OwnerView::at(Vec2::ZERO);
        for _ in 0..20 {
            let target = acquire(TargetingMode::Random, 5.0, &owner, &mut arena.ctx());
            assert_eq!(target, Some(near));
        }
    }

    #[test]
    fn none_mode_never_targets() {
        let mut arena = Arena::new();
        arena.spawn(1.0, 0.0);
        let owner = OwnerView::at(Vec2::ZERO);
        assert_eq!(acquire(TargetingMode::None, 5.0, &owner, &mut arena.ctx()), None);
    }
}
