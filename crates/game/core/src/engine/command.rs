use crate::element::Element;
use crate::skill::SkillModifier;
use crate::world::Vec2;

/// Player input delivered to [`Simulation::handle`](super::Simulation::handle).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    ActivateUltimate,
    /// Flips the active flag of a held skill (attack skills, then defense
    /// skills, then the ultimate).
    ToggleSkill(usize),
    ChangeElement(Element),
    /// Acquires a skill by name, typically one from the latest offer.
    AcquireSkill(String),
    ApplyModifier(SkillModifier),
    /// Movement direction; normalized, zero stops the player.
    SetMovement(Vec2),
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActivateUltimate => "activate_ultimate",
            Self::ToggleSkill(_) => "toggle_skill",
            Self::ChangeElement(_) => "change_element",
            Self::AcquireSkill(_) => "acquire_skill",
            Self::ApplyModifier(_) => "apply_modifier",
            Self::SetMovement(_) => "set_movement",
        }
    }
}
