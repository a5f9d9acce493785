//! Character, enemy and stage records supplied by the content loader.
//!
//! Skill and modifier records live in [`crate::skill`]. Everything here is
//! immutable once loaded; runs copy what they need.

use crate::element::Element;
use crate::env::DefinitionError;
use crate::skill::definition::{non_negative, positive};
use crate::stats::BaseStats;

/// A playable character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: BaseStats,
    /// Skills granted at run start, in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_skills: Vec<String>,
}

impl CharacterDefinition {
    pub fn new(id: impl Into<String>, stats: BaseStats) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            stats,
            starting_skills: Vec::new(),
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.starting_skills.push(skill.into());
        self
    }

    pub fn element(&self) -> Element {
        self.stats.element
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        const KIND: &str = "character";
        if self.id.trim().is_empty() {
            return Err(DefinitionError::EmptyId { kind: KIND });
        }
        let s = &self.stats;
        positive(KIND, &self.id, "max_health", s.max_health)?;
        non_negative(KIND, &self.id, "attack", s.attack)?;
        non_negative(KIND, &self.id, "defense", s.defense)?;
        non_negative(KIND, &self.id, "speed", s.speed)?;
        non_negative(KIND, &self.id, "health_regen_rate", s.health_regen_rate)?;
        non_negative(KIND, &self.id, "health_regen_delay", s.health_regen_delay)?;
        positive(
            KIND,
            &self.id,
            "attack_activation_interval",
            s.attack_activation_interval,
        )?;
        positive(
            KIND,
            &self.id,
            "defense_activation_interval",
            s.defense_activation_interval,
        )?;
        Ok(())
    }
}

/// Blueprint for spawning enemies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyTemplate {
    pub id: String,
    pub max_health: f32,
    pub defense: f32,
    pub speed: f32,
    pub contact_damage: f32,
    /// Seconds between two contact hits from the same enemy.
    pub contact_cooldown: f32,
    pub element: Element,
    pub radius: f32,
    pub xp_reward: f32,
    pub coin_reward: u32,
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            id: String::new(),
            max_health: 20.0,
            defense: 0.0,
            speed: 2.0,
            contact_damage: 8.0,
            contact_cooldown: 1.0,
            element: Element::None,
            radius: 0.5,
            xp_reward: 10.0,
            coin_reward: 1,
        }
    }
}

impl EnemyTemplate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        const KIND: &str = "enemy";
        if self.id.trim().is_empty() {
            return Err(DefinitionError::EmptyId { kind: KIND });
        }
        positive(KIND, &self.id, "max_health", self.max_health)?;
        non_negative(KIND, &self.id, "defense", self.defense)?;
        non_negative(KIND, &self.id, "speed", self.speed)?;
        non_negative(KIND, &self.id, "contact_damage", self.contact_damage)?;
        positive(KIND, &self.id, "contact_cooldown", self.contact_cooldown)?;
        non_negative(KIND, &self.id, "radius", self.radius)?;
        non_negative(KIND, &self.id, "xp_reward", self.xp_reward)?;
        Ok(())
    }
}

/// A group of enemies that enters the stage at `start_time`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveDefinition {
    pub start_time: f32,
    pub enemy: String,
    pub count: u32,
    /// Distance from the player at which the wave spawns.
    pub spawn_radius: f32,
    /// Seconds between repeats. `None` spawns the wave once.
    #[cfg_attr(feature = "serde", serde(default))]
    pub repeat_every: Option<f32>,
}

impl WaveDefinition {
    pub fn new(start_time: f32, enemy: impl Into<String>, count: u32, spawn_radius: f32) -> Self {
        Self {
            start_time,
            enemy: enemy.into(),
            count,
            spawn_radius,
            repeat_every: None,
        }
    }

    pub fn repeating(mut self, every: f32) -> Self {
        self.repeat_every = Some(every);
        self
    }
}

/// A timed stage: survive `duration` seconds to clear it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub waves: Vec<WaveDefinition>,
    /// Stage unlocked by clearing this one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next_stage: Option<String>,
}

impl StageDefinition {
    pub fn new(id: impl Into<String>, duration: f32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            duration,
            waves: Vec::new(),
            next_stage: None,
        }
    }

    pub fn with_wave(mut self, wave: WaveDefinition) -> Self {
        self.waves.push(wave);
        self
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next_stage = Some(next.into());
        self
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        const KIND: &str = "stage";
        if self.id.trim().is_empty() {
            return Err(DefinitionError::EmptyId { kind: KIND });
        }
        positive(KIND, &self.id, "duration", self.duration)?;
        for wave in &self.waves {
            non_negative(KIND, &self.id, "waves.start_time", wave.start_time)?;
            non_negative(KIND, &self.id, "waves.spawn_radius", wave.spawn_radius)?;
            if let Some(every) = wave.repeat_every {
                positive(KIND, &self.id, "waves.repeat_every", every)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_character_stats_are_valid() {
        assert!(CharacterDefinition::new("knight", BaseStats::default())
            .validate()
            .is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let stats = BaseStats {
            attack_activation_interval: 0.0,
            ..BaseStats::default()
        };
        let err = CharacterDefinition::new("broken", stats)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::OutOfRange {
                field: "attack_activation_interval",
                ..
            }
        ));
    }

    #[test]
    fn repeating_wave_needs_positive_interval() {
        let stage = StageDefinition::new("meadow", 60.0)
            .with_wave(WaveDefinition::new(0.0, "slime", 4, 8.0).repeating(0.0));
        assert!(stage.validate().is_err());
    }

    #[test]
    fn enemy_without_id_is_rejected() {
        assert_eq!(
            EnemyTemplate::default().validate(),
            Err(DefinitionError::EmptyId { kind: "enemy" })
        );
    }
}
