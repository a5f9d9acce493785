//! Damage calculation.

use crate::element::{AffinityTable, Element};

use super::status::StatusEffectKind;

/// Chance and multiplier of a critical hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CritProfile {
    /// Probability in `[0, 1]`.
    pub chance: f32,
    pub multiplier: f32,
}

impl CritProfile {
    pub const fn new(chance: f32, multiplier: f32) -> Self {
        Self { chance, multiplier }
    }

    /// Same multiplier with extra chance (e.g. from critical-strike skills), capped at 1.
    pub fn with_bonus_chance(self, bonus: f32) -> Self {
        Self {
            chance: (self.chance + bonus).clamp(0.0, 1.0),
            multiplier: self.multiplier,
        }
    }
}

/// Attacker-side output of a single hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedHit {
    /// Final damage before receiver mitigation.
    pub amount: f32,
    /// Damage after affinity scaling, before the crit multiplier.
    pub pre_crit: f32,
    pub is_crit: bool,
    /// Elemental status the receiver should apply.
    pub status: Option<StatusEffectKind>,
}

/// Resolve a hit.
///
/// # Formula
///
/// ```text
/// pre_crit = base × affinity(attacker, target)
/// amount   = pre_crit × (crit_multiplier if roll < crit_chance else 1)
/// ```
///
/// # Arguments
///
/// * `roll` - Uniform random value in `[0, 1)` for the crit check
pub fn resolve_hit(
    base: f32,
    attacker: Element,
    target: Element,
    crit: CritProfile,
    roll: f32,
    affinity: &AffinityTable,
) -> ResolvedHit {
    let pre_crit = base.max(0.0) * affinity.multiplier(attacker, target);
    let is_crit = roll < crit.chance;
    let amount = if is_crit {
        pre_crit * crit.multiplier
    } else {
        pre_crit
    };

    ResolvedHit {
        amount,
        pre_crit,
        is_crit,
        status: StatusEffectKind::for_element(attacker),
    }
}

/// Receiver-side reduction: `max(0, raw - defense × mitigation)`.
pub fn mitigate(raw: f32, defense: f32, mitigation: f32) -> f32 {
    (raw - defense * mitigation).max(0.0)
}
