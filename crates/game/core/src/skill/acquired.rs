//! A skill held by the character.

use std::sync::Arc;

use crate::combat::CritProfile;
use crate::element::Element;
use crate::projectile::Payload;

use super::behavior::BehaviorController;
use super::definition::{SkillCategory, SkillDefinition};
use super::modifier::{AppliedModifier, SkillModifier};

/// Held skill: shared definition plus per-run state.
///
/// Totals are never cached; they are recomputed from the definition and the
/// attached modifiers so expiring a timed modifier needs no bookkeeping.
#[derive(Clone, Debug)]
pub struct AcquiredSkill {
    definition: Arc<SkillDefinition>,
    slot: u32,
    modifiers: Vec<AppliedModifier>,
    cooldown_remaining: f32,
    active: bool,
    controller: BehaviorController,
}

impl AcquiredSkill {
    pub fn new(definition: Arc<SkillDefinition>) -> Self {
        let controller = BehaviorController::build(&definition.name, &definition.behavior);
        Self {
            definition,
            slot: 0,
            modifiers: Vec::new(),
            cooldown_remaining: 0.0,
            active: true,
            controller,
        }
    }

    /// Tags this copy with a loadout-unique slot.
    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = slot;
        self
    }

    /// Identifies this copy among held skills, even when names repeat.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn definition(&self) -> &SkillDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn category(&self) -> SkillCategory {
        self.definition.category
    }

    /// `base_damage × Π damage multipliers`.
    pub fn total_damage(&self) -> f32 {
        self.modifiers
            .iter()
            .fold(self.definition.base_damage, |acc, m| {
                acc * m.modifier.damage_multiplier
            })
    }

    /// `base_defense × Π defense multipliers`.
    pub fn total_defense(&self) -> f32 {
        self.modifiers
            .iter()
            .fold(self.definition.base_defense, |acc, m| {
                acc * m.modifier.defense_multiplier
            })
    }

    /// Most recent element override, else the definition's element, else the
    /// owner's current element.
    pub fn element(&self, owner: Element) -> Element {
        let element = self
            .modifiers
            .iter()
            .rev()
            .find_map(|m| m.modifier.element_override)
            .unwrap_or(self.definition.element);
        if element == Element::None {
            owner
        } else {
            element
        }
    }

    /// Cooldown after reductions; every reduction multiplies by `1 - r` and
    /// is floored at `min_cooldown`.
    pub fn cooldown(&self, min_cooldown: f32) -> f32 {
        self.modifiers
            .iter()
            .map(|m| m.modifier.cooldown_reduction)
            .filter(|r| *r > 0.0)
            .fold(self.definition.cooldown, |cd, r| {
                (cd * (1.0 - r)).max(min_cooldown)
            })
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
    }

    pub fn start_cooldown(&mut self, min_cooldown: f32) {
        self.cooldown_remaining = self.cooldown(min_cooldown);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn modifiers(&self) -> &[AppliedModifier] {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: &SkillModifier) -> bool {
        self.modifiers.iter().any(|m| m.modifier.same_card(modifier))
    }

    /// Attaches a modifier unless the same card is already attached.
    ///
    /// A pending cooldown is shortened to the new cooldown if it now exceeds it.
    pub fn attach(&mut self, modifier: &SkillModifier, now: f32, min_cooldown: f32) -> bool {
        if self.has_modifier(modifier) {
            return false;
        }
        self.modifiers
            .push(AppliedModifier::new(modifier.clone(), now));
        self.cooldown_remaining = self.cooldown_remaining.min(self.cooldown(min_cooldown));
        true
    }

    /// Detaches timed modifiers that expired at or before `now`.
    pub fn expire_modifiers(&mut self, now: f32) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| !m.is_expired(now));
        before - self.modifiers.len()
    }

    pub fn controller(&self) -> &BehaviorController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut BehaviorController {
        &mut self.controller
    }

    /// Damage snapshot for a hit or projectile spawned now.
    pub fn payload(&self, owner_attack: f32, owner_element: Element, crit: CritProfile) -> Payload {
        Payload {
            damage: self.total_damage() + owner_attack,
            element: self.element(owner_element),
            crit,
        }
    }
}
