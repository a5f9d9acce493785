//! Elemental status effects carried by enemies.
//!
//! Hits return the status matching the attacker's element; the receiver stores
//! it with an expiry time. Effects are removed when `now >= expires_at`.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::element::Element;

/// Active status effects on an enemy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with expiration time (simulation seconds).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub expires_at: f32,
}

/// Types of elemental status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Fire. Cosmetic.
    Burning,
    /// Ice. Cannot move.
    Frozen,
    /// Lightning. Cosmetic.
    Shocked,
    /// Poison. Cosmetic.
    Poisoned,
    /// Wind. Moves at half speed.
    Slowed,
    /// Earth. Pushed away from the attacker once.
    KnockedBack,
}

impl StatusEffectKind {
    pub fn for_element(element: Element) -> Option<Self> {
        match element {
            Element::None => None,
            Element::Fire => Some(Self::Burning),
            Element::Ice => Some(Self::Frozen),
            Element::Lightning => Some(Self::Shocked),
            Element::Poison => Some(Self::Poisoned),
            Element::Wind => Some(Self::Slowed),
            Element::Earth => Some(Self::KnockedBack),
        }
    }
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active at `now`.
    pub fn has(&self, kind: StatusEffectKind, now: f32) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind == kind && e.expires_at > now)
    }

    /// Adds a status effect, extending an existing one to the later expiry.
    pub fn add(&mut self, kind: StatusEffectKind, expires_at: f32) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.expires_at = existing.expires_at.max(expires_at);
            return;
        }

        if !self.effects.is_full() {
            self.effects.push(StatusEffect { kind, expires_at });
        }
    }

    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    pub fn remove_expired(&mut self, now: f32) {
        self.effects.retain(|e| e.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplying_extends_expiry() {
        let mut effects = StatusEffects::empty();
        effects.add(StatusEffectKind::Frozen, 2.0);
        effects.add(StatusEffectKind::Frozen, 1.0);
        assert!(effects.has(StatusEffectKind::Frozen, 1.5));
        effects.add(StatusEffectKind::Frozen, 3.0);
        assert!(effects.has(StatusEffectKind::Frozen, 2.5));
        assert_eq!(effects.iter().count(), 1);
    }

    #[test]
    fn expired_effects_are_removed() {
        let mut effects = StatusEffects::empty();
        effects.add(StatusEffectKind::Burning, 1.0);
        effects.add(StatusEffectKind::Slowed, 4.0);
        effects.remove_expired(1.0);
        assert!(!effects.has(StatusEffectKind::Burning, 0.0));
        assert!(effects.has(StatusEffectKind::Slowed, 1.0));
    }

    #[test]
    fn every_element_but_none_maps_to_a_status() {
        assert_eq!(StatusEffectKind::for_element(Element::None), None);
        assert_eq!(
            StatusEffectKind::for_element(Element::Earth),
            Some(StatusEffectKind::KnockedBack)
        );
    }
}
