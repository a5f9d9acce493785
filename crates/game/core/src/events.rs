//! Events emitted by the simulation for presentation and persistence observers.

use crate::combat::StatusEffectKind;
use crate::element::Element;
use crate::skill::SkillCategory;
use crate::world::EnemyId;

/// Something observable happened during a tick or command.
///
/// Events are returned in the order the effects were applied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    LevelUp {
        level: u32,
    },
    SkillAcquired {
        skill: String,
        category: SkillCategory,
    },
    /// An acquisition request was refused; nothing changed.
    AcquisitionRejected {
        skill: String,
        reason: String,
    },
    ModifierAcquired {
        modifier: String,
        target: String,
        /// Number of held skills the modifier attached to.
        affected: usize,
    },
    UltimateReady {
        skill: String,
    },
    UltimateActivated {
        skill: String,
        element: Element,
        targets: usize,
    },
    DamageDealt {
        source: String,
        target: EnemyId,
        /// Damage removed from the target after mitigation.
        amount: f32,
        is_crit: bool,
        element: Element,
    },
    /// The player took damage from an enemy.
    PlayerDamaged {
        source: EnemyId,
        amount: f32,
        health: f32,
    },
    Heal {
        source: String,
        amount: f32,
    },
    StatusApplied {
        target: EnemyId,
        status: StatusEffectKind,
    },
    EnemyKilled {
        target: EnemyId,
        template: String,
        xp: f32,
        coins: u32,
    },
    /// Skill choices presented after a level-up.
    SkillOffer {
        choices: Vec<String>,
    },
    PlayerDied {
        level: u32,
        time: f32,
    },
    StageCleared {
        stage: String,
        next_stage: Option<String>,
    },
}

impl CombatEvent {
    /// Short stable name, used for logging and routing.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LevelUp { .. } => "level_up",
            Self::SkillAcquired { .. } => "skill_acquired",
            Self::AcquisitionRejected { .. } => "acquisition_rejected",
            Self::ModifierAcquired { .. } => "modifier_acquired",
            Self::UltimateReady { .. } => "ultimate_ready",
            Self::UltimateActivated { .. } => "ultimate_activated",
            Self::DamageDealt { .. } => "damage_dealt",
            Self::PlayerDamaged { .. } => "player_damaged",
            Self::Heal { .. } => "heal",
            Self::StatusApplied { .. } => "status_applied",
            Self::EnemyKilled { .. } => "enemy_killed",
            Self::SkillOffer { .. } => "skill_offer",
            Self::PlayerDied { .. } => "player_died",
            Self::StageCleared { .. } => "stage_cleared",
        }
    }

    /// True for events that end the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PlayerDied { .. } | Self::StageCleared { .. })
    }
}
