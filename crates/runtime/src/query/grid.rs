//! Uniform-grid [`TargetQuery`] for large enemy counts.

use rustc_hash::FxHashMap;
use skirmish_core::env::{closest, intersects};
use skirmish_core::{EnemyId, EnemyRoster, TargetQuery, Vec2};

type Cell = (i32, i32);

/// Buckets living enemies into square cells on every rebuild.
///
/// Queries only visit the cells overlapping the search circle, widened by the
/// largest enemy radius seen at rebuild. Ordering matches the linear scan:
/// `within` by id, `nearest` ties broken by the lower id.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: FxHashMap<Cell, Vec<EnemyId>>,
    max_radius: f32,
}

impl SpatialGrid {
    pub const DEFAULT_CELL_SIZE: f32 = 4.0;

    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            Self::DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            cells: FxHashMap::default(),
            max_radius: 0.0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of enemies indexed at the last rebuild.
    pub fn indexed(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    fn cell_of(&self, point: Vec2) -> Cell {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
        )
    }

    /// Ids in every cell touched by the square around `center` with half-extent `reach`.
    fn candidates(&self, center: Vec2, reach: f32) -> impl Iterator<Item = EnemyId> + '_ {
        let (min_x, min_y) = self.cell_of(Vec2::new(center.x - reach, center.y - reach));
        let (max_x, max_y) = self.cell_of(Vec2::new(center.x + reach, center.y + reach));
        (min_x..=max_x)
            .flat_map(move |x| (min_y..=max_y).map(move |y| (x, y)))
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .copied()
    }
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CELL_SIZE)
    }
}

impl TargetQuery for SpatialGrid {
    fn rebuild(&mut self, enemies: &EnemyRoster) {
        self.cells.clear();
        self.max_radius = 0.0;
        for enemy in enemies.iter().filter(|e| e.is_alive()) {
            let cell = self.cell_of(enemy.position);
            self.cells.entry(cell).or_default().push(enemy.id);
            self.max_radius = self.max_radius.max(enemy.radius);
        }
    }

    fn within(&self, enemies: &EnemyRoster, center: Vec2, radius: f32) -> Vec<EnemyId> {
        let mut hits: Vec<EnemyId> = self
            .candidates(center, radius + self.max_radius)
            .filter(|&id| {
                enemies
                    .alive(id)
                    .is_some_and(|enemy| intersects(enemy, center, radius))
            })
            .collect();
        hits.sort_unstable();
        hits
    }

    fn nearest(&self, enemies: &EnemyRoster, center: Vec2, range: f32) -> Option<EnemyId> {
        closest(
            self.candidates(center, range)
                .filter_map(|id| enemies.alive(id))
                .filter(|enemy| enemy.position.distance(center) <= range),
            center,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{EnemyTemplate, LinearScan};

    fn roster(points: &[(f32, f32)]) -> EnemyRoster {
        let template = EnemyTemplate::new("dummy");
        let mut roster = EnemyRoster::new();
        for &(x, y) in points {
            roster.spawn(&template, Vec2::new(x, y));
        }
        roster
    }

    #[test]
    fn matches_linear_scan() {
        let enemies = roster(&[
            (0.5, 0.5),
            (-3.9, 2.0),
            (7.5, -7.5),
            (12.0, 0.0),
            (-0.1, -0.1),
            (3.9, 4.1),
        ]);
        let mut grid = SpatialGrid::new(2.0);
        grid.rebuild(&enemies);
        assert_eq!(grid.indexed(), 6);

        for (center, radius) in [
            (Vec2::ZERO, 1.0),
            (Vec2::ZERO, 5.0),
            (Vec2::new(6.0, -6.0), 3.0),
            (Vec2::new(-20.0, 0.0), 4.0),
        ] {
            assert_eq!(
                grid.within(&enemies, center, radius),
                LinearScan.within(&enemies, center, radius)
            );
            assert_eq!(
                grid.nearest(&enemies, center, radius),
                LinearScan.nearest(&enemies, center, radius)
            );
        }
    }

    #[test]
    fn dead_enemies_are_skipped() {
        let mut enemies = roster(&[(1.0, 0.0), (2.0, 0.0)]);
        let mut grid = SpatialGrid::default();
        grid.rebuild(&enemies);

        if let Some(first) = enemies.get_mut(EnemyId(0)) {
            first.health = 0.0;
        }
        assert_eq!(grid.nearest(&enemies, Vec2::ZERO, 5.0), Some(EnemyId(1)));
        assert_eq!(grid.within(&enemies, Vec2::ZERO, 5.0), vec![EnemyId(1)]);
    }

    #[test]
    fn invalid_cell_size_falls_back() {
        assert_eq!(SpatialGrid::new(0.0).cell_size(), SpatialGrid::DEFAULT_CELL_SIZE);
        assert_eq!(SpatialGrid::new(f32::NAN).cell_size(), SpatialGrid::DEFAULT_CELL_SIZE);
    }
}
