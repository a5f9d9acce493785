//! Immutable skill definition records.
//!
//! Definitions are supplied by the content loader and shared behind `Arc`.
//! The skill `name` doubles as its id: requirements, modifier targets and the
//! progress profile all refer to skills by name.

use std::collections::BTreeSet;

use crate::element::Element;
use crate::env::DefinitionError;
use crate::stats::StatBonuses;

/// Which scheduler slot a skill occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillCategory {
    Attack,
    Defense,
    Ultimate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// How a projectile picks its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingMode {
    /// No target; projectiles fly along a fallback direction.
    None,
    /// Closest enemy within range.
    #[default]
    Nearest,
    /// Uniformly random enemy within range.
    Random,
    /// Closest enemy within range and inside the owner's facing cone.
    Facing,
}

/// When an orbiting-projectile skill creates projectiles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnMode {
    /// One projectile per activation.
    #[default]
    Single,
    /// One projectile every `interval` seconds while the skill is active.
    Continuous { interval: f32 },
}

/// Tuning of an orbit-then-launch projectile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrbitParams {
    pub orbit_radius: f32,
    /// Degrees per second. Negative values orbit clockwise.
    pub orbit_speed: f32,
    /// Full revolutions before launching.
    pub orbits: u32,
    pub launch_speed: f32,
    /// Contact radius while orbiting.
    pub orbital_damage_radius: f32,
    /// Minimum seconds between two orbital hits on the same enemy.
    pub orbital_damage_interval: f32,
    /// Contact radius after launch.
    pub hit_radius: f32,
    pub targeting: TargetingMode,
    pub targeting_range: f32,
    pub spawn: SpawnMode,
    pub max_projectiles: u32,
    /// Seconds before a projectile is destroyed regardless of phase.
    pub lifetime: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            orbit_radius: 2.0,
            orbit_speed: 180.0,
            orbits: 1,
            launch_speed: 12.0,
            orbital_damage_radius: 0.5,
            orbital_damage_interval: 0.5,
            hit_radius: 0.4,
            targeting: TargetingMode::Nearest,
            targeting_range: 10.0,
            spawn: SpawnMode::Single,
            max_projectiles: 3,
            lifetime: 8.0,
        }
    }
}

/// Tuning of a throw-then-return projectile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoomerangParams {
    pub throw_speed: f32,
    pub return_speed: f32,
    pub max_range: f32,
    /// Distinct enemies hit before the flight turns around.
    pub max_targets: u32,
    pub collision_radius: f32,
    pub heal_on_return: bool,
    /// Fraction of the flight damage healed per enemy hit.
    pub heal_percent: f32,
    pub targeting: TargetingMode,
    pub targeting_range: f32,
    pub max_concurrent: u32,
    pub lifetime: f32,
}

impl Default for BoomerangParams {
    fn default() -> Self {
        Self {
            throw_speed: 10.0,
            return_speed: 12.0,
            max_range: 6.0,
            max_targets: 3,
            collision_radius: 0.5,
            heal_on_return: false,
            heal_percent: 0.1,
            targeting: TargetingMode::Nearest,
            targeting_range: 8.0,
            max_concurrent: 1,
            lifetime: 6.0,
        }
    }
}

/// Runtime behavior attached to a skill on acquisition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillBehavior {
    /// Attack skills hit the nearest enemy directly; defense skills only buff.
    #[default]
    None,
    /// Heals the owner on every activation.
    HealthRegen { heal: f32 },
    /// Passive crit-chance contribution while active.
    CriticalStrike { chance: f32 },
    OrbitingProjectile(OrbitParams),
    Boomerang(BoomerangParams),
}

/// Extra data carried by ultimate-category skills.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UltimateParams {
    pub area_of_effect: f32,
    /// Seconds the elemental buff lasts after activation.
    pub duration: f32,
}

/// Immutable skill record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub category: SkillCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_damage: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_defense: f32,
    /// Seconds between two activations of this skill. For ultimates this is
    /// the charge time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: StatBonuses,
    #[cfg_attr(feature = "serde", serde(default = "default_required_level"))]
    pub required_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_skills: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_unique: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: SkillBehavior,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ultimate: Option<UltimateParams>,
    /// Profile unlock level needed before the skill shows up in offers. 0 = always.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlock_tier: u32,
}

#[cfg(feature = "serde")]
fn default_required_level() -> u32 {
    1
}

impl SkillDefinition {
    pub fn builder(name: impl Into<String>, category: SkillCategory) -> SkillDefinitionBuilder {
        SkillDefinitionBuilder::new(name, category)
    }

    pub fn is_ultimate(&self) -> bool {
        self.category == SkillCategory::Ultimate
    }

    /// Checks value ranges. Cross-references are checked by the definition set.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        const KIND: &str = "skill";
        let id = self.name.as_str();
        if id.trim().is_empty() {
            return Err(DefinitionError::EmptyId { kind: KIND });
        }
        non_negative(KIND, id, "base_damage", self.base_damage)?;
        non_negative(KIND, id, "base_defense", self.base_defense)?;
        non_negative(KIND, id, "cooldown", self.cooldown)?;
        if self.bonuses.attack_speed_multiplier <= 0.0 {
            return Err(DefinitionError::out_of_range(
                KIND,
                id,
                "bonuses.attack_speed_multiplier",
                "> 0",
                self.bonuses.attack_speed_multiplier,
            ));
        }
        if self.required_skills.contains(&self.name) {
            return Err(DefinitionError::SelfRequirement(self.name.clone()));
        }

        match &self.behavior {
            SkillBehavior::None => {}
            SkillBehavior::HealthRegen { heal } => non_negative(KIND, id, "heal", *heal)?,
            SkillBehavior::CriticalStrike { chance } => unit_interval(KIND, id, "chance", *chance)?,
            SkillBehavior::OrbitingProjectile(p) => {
                positive(KIND, id, "orbit_radius", p.orbit_radius)?;
                if p.orbit_speed == 0.0 || !p.orbit_speed.is_finite() {
                    return Err(DefinitionError::out_of_range(
                        KIND,
                        id,
                        "orbit_speed",
                        "non-zero",
                        p.orbit_speed,
                    ));
                }
                if p.orbits == 0 {
                    return Err(DefinitionError::out_of_range(KIND, id, "orbits", ">= 1", 0.0));
                }
                positive(KIND, id, "launch_speed", p.launch_speed)?;
                non_negative(KIND, id, "orbital_damage_radius", p.orbital_damage_radius)?;
                positive(KIND, id, "orbital_damage_interval", p.orbital_damage_interval)?;
                non_negative(KIND, id, "hit_radius", p.hit_radius)?;
                non_negative(KIND, id, "targeting_range", p.targeting_range)?;
                positive(KIND, id, "lifetime", p.lifetime)?;
                if let SpawnMode::Continuous { interval } = p.spawn {
                    positive(KIND, id, "spawn.interval", interval)?;
                }
                if p.max_projectiles == 0 {
                    return Err(DefinitionError::out_of_range(
                        KIND,
                        id,
                        "max_projectiles",
                        ">= 1",
                        0.0,
                    ));
                }
            }
            SkillBehavior::Boomerang(p) => {
                positive(KIND, id, "throw_speed", p.throw_speed)?;
                positive(KIND, id, "return_speed", p.return_speed)?;
                positive(KIND, id, "max_range", p.max_range)?;
                if p.max_targets == 0 {
                    return Err(DefinitionError::out_of_range(KIND, id, "max_targets", ">= 1", 0.0));
                }
                non_negative(KIND, id, "collision_radius", p.collision_radius)?;
                unit_interval(KIND, id, "heal_percent", p.heal_percent)?;
                non_negative(KIND, id, "targeting_range", p.targeting_range)?;
                positive(KIND, id, "lifetime", p.lifetime)?;
                if p.max_concurrent == 0 {
                    return Err(DefinitionError::out_of_range(
                        KIND,
                        id,
                        "max_concurrent",
                        ">= 1",
                        0.0,
                    ));
                }
            }
        }

        if self.is_ultimate() {
            let params = self
                .ultimate
                .ok_or_else(|| DefinitionError::MissingUltimateParams(self.name.clone()))?;
            non_negative(KIND, id, "area_of_effect", params.area_of_effect)?;
            non_negative(KIND, id, "duration", params.duration)?;
        }
        Ok(())
    }
}

pub(crate) fn non_negative(
    kind: &'static str,
    id: &str,
    field: &'static str,
    value: f32,
) -> Result<(), DefinitionError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DefinitionError::out_of_range(kind, id, field, ">= 0", value))
    }
}

pub(crate) fn positive(
    kind: &'static str,
    id: &str,
    field: &'static str,
    value: f32,
) -> Result<(), DefinitionError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DefinitionError::out_of_range(kind, id, field, "> 0", value))
    }
}

fn unit_interval(
    kind: &'static str,
    id: &str,
    field: &'static str,
    value: f32,
) -> Result<(), DefinitionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DefinitionError::out_of_range(kind, id, field, "in [0, 1]", value))
    }
}

/// Builder for constructing skill definitions in code and tests.
pub struct SkillDefinitionBuilder {
    def: SkillDefinition,
}

impl SkillDefinitionBuilder {
    fn new(name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            def: SkillDefinition {
                name: name.into(),
                description: String::new(),
                category,
                rarity: Rarity::Common,
                element: Element::None,
                base_damage: 0.0,
                base_defense: 0.0,
                cooldown: 0.0,
                bonuses: StatBonuses::default(),
                required_level: 1,
                required_skills: BTreeSet::new(),
                is_unique: false,
                behavior: SkillBehavior::None,
                ultimate: None,
                unlock_tier: 0,
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.def.description = description.into();
        self
    }

    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.def.rarity = rarity;
        self
    }

    pub fn element(mut self, element: Element) -> Self {
        self.def.element = element;
        self
    }

    pub fn damage(mut self, base_damage: f32) -> Self {
        self.def.base_damage = base_damage;
        self
    }

    pub fn defense(mut self, base_defense: f32) -> Self {
        self.def.base_defense = base_defense;
        self
    }

    pub fn cooldown(mut self, cooldown: f32) -> Self {
        self.def.cooldown = cooldown;
        self
    }

    pub fn bonuses(mut self, bonuses: StatBonuses) -> Self {
        self.def.bonuses = bonuses;
        self
    }

    pub fn required_level(mut self, level: u32) -> Self {
        self.def.required_level = level;
        self
    }

    pub fn requires(mut self, skill: impl Into<String>) -> Self {
        self.def.required_skills.insert(skill.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.def.is_unique = true;
        self
    }

    pub fn behavior(mut self, behavior: SkillBehavior) -> Self {
        self.def.behavior = behavior;
        self
    }

    pub fn ultimate(mut self, area_of_effect: f32, duration: f32) -> Self {
        self.def.ultimate = Some(UltimateParams {
            area_of_effect,
            duration,
        });
        self
    }

    pub fn unlock_tier(mut self, tier: u32) -> Self {
        self.def.unlock_tier = tier;
        self
    }

    pub fn build(self) -> SkillDefinition {
        self.def
    }
}
