//! Skills held by the character and the acquisition rules that gate them.

use std::sync::Arc;

use crate::stats::CharacterStats;
use crate::ultimate::UltimateState;

use super::acquired::AcquiredSkill;
use super::behavior::BehaviorController;
use super::definition::{SkillCategory, SkillDefinition};
use super::error::AcquireError;
use super::modifier::SkillModifier;

/// Successful acquisition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acquired {
    pub skill: String,
    pub category: SkillCategory,
}

/// Attack skills, defense skills and the optional ultimate.
#[derive(Clone, Debug, Default)]
pub struct SkillLoadout {
    attack: Vec<AcquiredSkill>,
    defense: Vec<AcquiredSkill>,
    ultimate: Option<UltimateState>,
    min_cooldown: f32,
    next_slot: u32,
}

impl SkillLoadout {
    pub fn new(min_cooldown: f32) -> Self {
        Self {
            min_cooldown,
            ..Self::default()
        }
    }

    pub fn attack(&self) -> &[AcquiredSkill] {
        &self.attack
    }

    pub fn defense(&self) -> &[AcquiredSkill] {
        &self.defense
    }

    pub fn attack_mut(&mut self) -> &mut [AcquiredSkill] {
        &mut self.attack
    }

    pub fn defense_mut(&mut self) -> &mut [AcquiredSkill] {
        &mut self.defense
    }

    pub fn ultimate(&self) -> Option<&UltimateState> {
        self.ultimate.as_ref()
    }

    pub fn ultimate_mut(&mut self) -> Option<&mut UltimateState> {
        self.ultimate.as_mut()
    }

    /// Attack skills followed by defense skills.
    pub fn skills(&self) -> impl Iterator<Item = &AcquiredSkill> {
        self.attack.iter().chain(self.defense.iter())
    }

    pub fn skills_mut(&mut self) -> impl Iterator<Item = &mut AcquiredSkill> {
        self.attack.iter_mut().chain(self.defense.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.attack.len() + self.defense.len() + usize::from(self.ultimate.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any held skill (ultimate included) carries this name.
    pub fn holds(&self, name: &str) -> bool {
        self.skills().any(|s| s.name() == name)
            || self.ultimate.as_ref().is_some_and(|u| u.name() == name)
    }

    /// Checks the acquisition rules without changing anything.
    pub fn can_acquire(&self, definition: &SkillDefinition, level: u32) -> Result<(), AcquireError> {
        if definition.is_unique && self.holds(&definition.name) {
            return Err(AcquireError::AlreadyHeld {
                skill: definition.name.clone(),
            });
        }
        if level < definition.required_level {
            return Err(AcquireError::LevelTooLow {
                skill: definition.name.clone(),
                required: definition.required_level,
                level,
            });
        }
        if let Some(missing) = definition
            .required_skills
            .iter()
            .find(|required| !self.holds(required))
        {
            return Err(AcquireError::MissingRequirement {
                skill: definition.name.clone(),
                missing: missing.clone(),
            });
        }
        if definition.is_ultimate() && definition.ultimate.is_none() {
            return Err(AcquireError::MissingUltimateParams {
                skill: definition.name.clone(),
            });
        }
        Ok(())
    }

    /// Acquires a skill, applying its stat bonuses to the owner's base stats.
    ///
    /// On rejection nothing changes. An ultimate replaces the equipped one.
    pub fn try_acquire(
        &mut self,
        definition: Arc<SkillDefinition>,
        stats: &mut CharacterStats,
    ) -> Result<Acquired, AcquireError> {
        if let Err(err) = self.can_acquire(&definition, stats.level()) {
            tracing::warn!(skill = %definition.name, %err, "skill acquisition rejected");
            return Err(err);
        }

        let acquired = Acquired {
            skill: definition.name.clone(),
            category: definition.category,
        };
        match definition.category {
            SkillCategory::Ultimate => {
                let state = UltimateState::from_definition(&definition, self.min_cooldown)
                    .ok_or_else(|| AcquireError::MissingUltimateParams {
                        skill: definition.name.clone(),
                    })?;
                if let Some(previous) = self.ultimate.replace(state) {
                    tracing::debug!(previous = previous.name(), "ultimate replaced");
                }
            }
            SkillCategory::Attack => {
                stats.apply_bonuses(&definition.bonuses);
                let skill = AcquiredSkill::new(definition).with_slot(self.take_slot());
                self.attack.push(skill);
            }
            SkillCategory::Defense => {
                stats.apply_bonuses(&definition.bonuses);
                let skill = AcquiredSkill::new(definition).with_slot(self.take_slot());
                self.defense.push(skill);
            }
        }
        tracing::info!(skill = %acquired.skill, category = ?acquired.category, "skill acquired");
        Ok(acquired)
    }

    fn take_slot(&mut self) -> u32 {
        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    /// Attaches a modifier to every held skill named by its target.
    ///
    /// Returns the number of skills it newly attached to.
    pub fn add_modifier(&mut self, modifier: &SkillModifier, now: f32) -> usize {
        let min_cooldown = self.min_cooldown;
        let mut affected = self
            .attack
            .iter_mut()
            .chain(self.defense.iter_mut())
            .filter(|s| s.name() == modifier.target)
            .map(|s| s.attach(modifier, now, min_cooldown))
            .filter(|attached| *attached)
            .count();
        if let Some(ultimate) = self.ultimate.as_mut()
            && ultimate.name() == modifier.target
            && ultimate.attach(modifier, now)
        {
            affected += 1;
        }

        if affected == 0 {
            tracing::debug!(modifier = %modifier.name, target = %modifier.target, "modifier had no effect");
        } else {
            tracing::info!(modifier = %modifier.name, target = %modifier.target, affected, "modifier applied");
        }
        affected
    }

    /// Flips the active flag of the `index`-th skill, counting attack skills
    /// first, then defense skills, then the ultimate. Returns the new flag.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let attack = self.attack.len();
        let passive = attack + self.defense.len();
        let (name, active) = if index < passive {
            let skill = if index < attack {
                &mut self.attack[index]
            } else {
                &mut self.defense[index - attack]
            };
            let active = !skill.is_active();
            skill.set_active(active);
            (skill.name().to_owned(), active)
        } else if index == passive {
            let ultimate = self.ultimate.as_mut()?;
            let active = !ultimate.is_active();
            ultimate.set_active(active);
            (ultimate.name().to_owned(), active)
        } else {
            return None;
        };
        tracing::debug!(skill = %name, active, "skill toggled");
        Some(active)
    }

    /// Extra crit chance granted by active critical-strike skills.
    pub fn crit_bonus(&self) -> f32 {
        self.skills()
            .filter(|s| s.is_active())
            .map(|s| s.controller().crit_chance())
            .sum()
    }

    pub fn tick_cooldowns(&mut self, dt: f32) {
        for skill in self.skills_mut() {
            skill.tick_cooldown(dt);
        }
    }

    /// Drops timed modifiers that expired at or before `now`.
    pub fn expire_modifiers(&mut self, now: f32) -> usize {
        let mut expired = 0;
        for skill in self.skills_mut() {
            expired += skill.expire_modifiers(now);
        }
        if let Some(ultimate) = self.ultimate.as_mut() {
            expired += ultimate.expire_modifiers(now);
        }
        expired
    }

    /// Live projectiles across every behavior.
    pub fn live_projectiles(&self) -> usize {
        self.skills()
            .map(|s| s.controller().live_projectiles())
            .sum()
    }

    /// Destroys every live projectile.
    pub fn clear_projectiles(&mut self) {
        for skill in self.skills_mut() {
            skill.controller_mut().clear();
        }
    }

    /// Whether any held skill runs a projectile behavior.
    pub fn has_projectile_behaviors(&self) -> bool {
        self.skills().any(|s| {
            matches!(
                s.controller(),
                BehaviorController::Orbit(_) | BehaviorController::Boomerang(_)
            )
        })
    }
}
