use crate::skill::SkillLoadout;
use crate::stats::CharacterStats;
use crate::world::{OwnerView, Vec2};

/// The controllable character: stats, held skills and kinematics.
#[derive(Clone, Debug)]
pub struct Player {
    pub stats: CharacterStats,
    pub loadout: SkillLoadout,
    position: Vec2,
    facing: Vec2,
    movement: Vec2,
}

impl Player {
    pub fn new(stats: CharacterStats, loadout: SkillLoadout) -> Self {
        Self {
            stats,
            loadout,
            position: Vec2::ZERO,
            facing: Vec2::RIGHT,
            movement: Vec2::ZERO,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Unit direction of the last non-zero movement.
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    /// Sets the movement direction. Returns false for non-finite input.
    pub fn set_movement(&mut self, direction: Vec2) -> bool {
        if !direction.x.is_finite() || !direction.y.is_finite() {
            return false;
        }
        match direction.normalized() {
            Some(unit) => {
                self.movement = unit;
                self.facing = unit;
            }
            None => self.movement = Vec2::ZERO,
        }
        true
    }

    /// Moves along the current direction at the effective speed.
    pub fn advance(&mut self, dt: f32) {
        if self.movement != Vec2::ZERO && !self.stats.is_dead() {
            self.position += self.movement * (self.stats.speed() * dt);
        }
    }

    pub fn view(&self) -> OwnerView {
        OwnerView {
            position: self.position,
            facing: self.facing,
            element: self.stats.element(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::BaseStats;

    fn player() -> Player {
        Player::new(
            CharacterStats::new(BaseStats::default(), 100.0),
            SkillLoadout::new(0.1),
        )
    }

    #[test]
    fn movement_is_normalized_and_updates_facing() {
        let mut player = player();
        assert!(player.set_movement(Vec2::new(0.0, 3.0)));
        assert_eq!(player.movement(), Vec2::new(0.0, 1.0));
        assert_eq!(player.facing(), Vec2::new(0.0, 1.0));

        player.advance(2.0);
        assert_eq!(player.position(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn stopping_keeps_facing() {
        let mut player = player();
        player.set_movement(Vec2::new(0.0, -1.0));
        player.set_movement(Vec2::ZERO);
        assert_eq!(player.movement(), Vec2::ZERO);
        assert_eq!(player.facing(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn non_finite_movement_is_rejected() {
        let mut player = player();
        assert!(!player.set_movement(Vec2::new(f32::NAN, 0.0)));
        assert_eq!(player.movement(), Vec2::ZERO);
    }
}
