use crate::projectile::{BoomerangController, OrbitController};

use super::definition::SkillBehavior;

/// Runtime half of a [`SkillBehavior`], built once when the skill is acquired.
#[derive(Clone, Debug)]
pub enum BehaviorController {
    None,
    HealthRegen { heal: f32 },
    CriticalStrike { chance: f32 },
    Orbit(OrbitController),
    Boomerang(BoomerangController),
}

impl BehaviorController {
    pub fn build(skill: &str, behavior: &SkillBehavior) -> Self {
        match behavior {
            SkillBehavior::None => Self::None,
            SkillBehavior::HealthRegen { heal } => Self::HealthRegen { heal: *heal },
            SkillBehavior::CriticalStrike { chance } => Self::CriticalStrike { chance: *chance },
            SkillBehavior::OrbitingProjectile(params) => {
                Self::Orbit(OrbitController::new(skill, params.clone()))
            }
            SkillBehavior::Boomerang(params) => {
                Self::Boomerang(BoomerangController::new(skill, params.clone()))
            }
        }
    }

    /// Passive crit chance this behavior contributes.
    pub fn crit_chance(&self) -> f32 {
        match self {
            Self::CriticalStrike { chance } => *chance,
            _ => 0.0,
        }
    }

    /// Live projectiles owned by this behavior.
    pub fn live_projectiles(&self) -> usize {
        match self {
            Self::Orbit(orbit) => orbit.len(),
            Self::Boomerang(boomerang) => boomerang.len(),
            _ => 0,
        }
    }

    /// Destroys owned projectiles.
    pub fn clear(&mut self) {
        match self {
            Self::Orbit(orbit) => orbit.clear(),
            Self::Boomerang(boomerang) => boomerang.clear(),
            _ => {}
        }
    }
}
