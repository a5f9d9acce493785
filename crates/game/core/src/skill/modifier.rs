//! Skill modifiers (cards).

use crate::element::Element;
use crate::env::DefinitionError;

use super::definition::non_negative;

/// Upgrade card that targets held skills by name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillModifier {
    pub name: String,
    /// Name of the skill(s) this modifier applies to.
    pub target: String,
    pub damage_multiplier: f32,
    pub defense_multiplier: f32,
    pub element_override: Option<Element>,
    /// Fraction removed from the target's cooldown, in `[0, 1)`.
    pub cooldown_reduction: f32,
    /// Seconds the modifier stays attached. `0` means permanent.
    pub duration: f32,
}

impl Default for SkillModifier {
    fn default() -> Self {
        Self {
            name: String::new(),
            target: String::new(),
            damage_multiplier: 1.0,
            defense_multiplier: 1.0,
            element_override: None,
            cooldown_reduction: 0.0,
            duration: 0.0,
        }
    }
}

impl SkillModifier {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_damage(mut self, multiplier: f32) -> Self {
        self.damage_multiplier = multiplier;
        self
    }

    pub fn with_defense(mut self, multiplier: f32) -> Self {
        self.defense_multiplier = multiplier;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element_override = Some(element);
        self
    }

    pub fn with_cooldown_reduction(mut self, reduction: f32) -> Self {
        self.cooldown_reduction = reduction;
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Two modifiers are the same card when name and target match.
    pub fn same_card(&self, other: &SkillModifier) -> bool {
        self.name == other.name && self.target == other.target
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        const KIND: &str = "modifier";
        if self.name.trim().is_empty() {
            return Err(DefinitionError::EmptyId { kind: KIND });
        }
        non_negative(KIND, &self.name, "damage_multiplier", self.damage_multiplier)?;
        non_negative(KIND, &self.name, "defense_multiplier", self.defense_multiplier)?;
        non_negative(KIND, &self.name, "duration", self.duration)?;
        if !(0.0..1.0).contains(&self.cooldown_reduction) {
            return Err(DefinitionError::out_of_range(
                KIND,
                &self.name,
                "cooldown_reduction",
                "in [0, 1)",
                self.cooldown_reduction,
            ));
        }
        Ok(())
    }
}

/// A modifier attached to a held skill.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedModifier {
    pub modifier: SkillModifier,
    /// Simulation time at which a timed modifier detaches.
    pub expires_at: Option<f32>,
}

impl AppliedModifier {
    pub fn new(modifier: SkillModifier, now: f32) -> Self {
        let expires_at = (modifier.duration > 0.0).then(|| now + modifier.duration);
        Self {
            modifier,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: f32) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}
