//! Ultimate skill state machine.
//!
//! ```text
//! Charging ──charge_time ≥ cooldown──► Ready ──activate──► Charging
//! ```
//!
//! Activation strikes every enemy in the area around the owner, then grants a
//! timed buff picked by the ultimate's element. The buff is a
//! [`TimedBuff`] keyed by [`BuffSource::Ultimate`], so a second activation
//! replaces the first instead of stacking.

use crate::combat::CritProfile;
use crate::element::Element;
use crate::error::{CombatError, ErrorSeverity};
use crate::events::CombatEvent;
use crate::skill::{AppliedModifier, SkillDefinition, SkillModifier};
use crate::stats::{Bonus, BuffSource, CharacterStats, StatKind, TimedBuff};
use crate::world::{HitContext, OwnerView, Strike};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UltimatePhase {
    Charging,
    Ready,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum UltimateError {
    #[error("ultimate '{skill}' is charging ({charge_time:.2}/{cooldown:.2}s)")]
    NotReady {
        skill: String,
        charge_time: f32,
        cooldown: f32,
    },

    #[error("no ultimate equipped")]
    NotEquipped,

    #[error("ultimate '{0}' is toggled off")]
    Inactive(String),

    #[error("owner is dead")]
    OwnerDead,
}

impl CombatError for UltimateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotReady { .. } => "ULTIMATE_NOT_READY",
            Self::NotEquipped => "ULTIMATE_NOT_EQUIPPED",
            Self::Inactive(_) => "ULTIMATE_INACTIVE",
            Self::OwnerDead => "ULTIMATE_OWNER_DEAD",
        }
    }
}

/// Outcome of a successful activation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UltimateActivation {
    pub element: Element,
    pub targets: usize,
    pub buff_expires_at: f32,
}

/// Buffs granted per element for the activation window.
pub fn element_buffs(element: Element) -> &'static [(StatKind, f32)] {
    match element {
        Element::Fire => &[(StatKind::Attack, 1.5)],
        Element::Ice => &[(StatKind::Defense, 1.3)],
        Element::Lightning => &[(StatKind::AttackInterval, 0.7)],
        Element::Wind => &[(StatKind::Speed, 1.3)],
        _ => &[(StatKind::Attack, 1.5), (StatKind::Speed, 1.2)],
    }
}

/// The equipped ultimate.
#[derive(Clone, Debug)]
pub struct UltimateState {
    name: String,
    base_damage: f32,
    area_of_effect: f32,
    duration: f32,
    element: Element,
    modifiers: Vec<AppliedModifier>,
    charge_time: f32,
    base_cooldown: f32,
    min_cooldown: f32,
    phase: UltimatePhase,
    active: bool,
}

impl UltimateState {
    /// Builds the state from an ultimate-category definition.
    ///
    /// Returns `None` when the definition carries no ultimate parameters.
    pub fn from_definition(definition: &SkillDefinition, min_cooldown: f32) -> Option<Self> {
        let params = definition.ultimate.as_ref()?;
        Some(Self {
            name: definition.name.clone(),
            base_damage: definition.base_damage,
            area_of_effect: params.area_of_effect,
            duration: params.duration,
            element: definition.element,
            modifiers: Vec::new(),
            charge_time: 0.0,
            base_cooldown: definition.cooldown,
            min_cooldown,
            phase: UltimatePhase::Charging,
            active: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> UltimatePhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == UltimatePhase::Ready
    }

    pub fn charge_time(&self) -> f32 {
        self.charge_time
    }

    /// Charge requirement after cooldown-reduction modifiers, each floored at
    /// the minimum cooldown.
    pub fn cooldown(&self) -> f32 {
        self.modifiers
            .iter()
            .map(|m| m.modifier.cooldown_reduction)
            .filter(|r| *r > 0.0)
            .fold(self.base_cooldown, |cd, r| {
                (cd * (1.0 - r)).max(self.min_cooldown)
            })
    }

    /// Charge progress in `[0, 1]`.
    pub fn charge_fraction(&self) -> f32 {
        let cooldown = self.cooldown();
        if cooldown <= 0.0 {
            1.0
        } else {
            (self.charge_time / cooldown).min(1.0)
        }
    }

    pub fn area_of_effect(&self) -> f32 {
        self.area_of_effect
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn total_damage(&self) -> f32 {
        self.modifiers
            .iter()
            .fold(self.base_damage, |acc, m| acc * m.modifier.damage_multiplier)
    }

    /// Latest element override, else the definition's element.
    ///
    /// Picks the activation buff; the owner's element never enters here.
    pub fn own_element(&self) -> Element {
        self.modifiers
            .iter()
            .rev()
            .find_map(|m| m.modifier.element_override)
            .unwrap_or(self.element)
    }

    /// Element carried by the strike: the ultimate's own, else the owner's.
    pub fn element(&self, owner: Element) -> Element {
        match self.own_element() {
            Element::None => owner,
            element => element,
        }
    }

    pub fn modifiers(&self) -> &[AppliedModifier] {
        &self.modifiers
    }

    /// Attaches a modifier unless the same card is already attached.
    pub fn attach(&mut self, modifier: &SkillModifier, now: f32) -> bool {
        if self.modifiers.iter().any(|m| m.modifier.same_card(modifier)) {
            return false;
        }
        self.modifiers
            .push(AppliedModifier::new(modifier.clone(), now));
        true
    }

    pub fn expire_modifiers(&mut self, now: f32) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| !m.is_expired(now));
        before - self.modifiers.len()
    }

    /// Accumulates charge. Returns true on the tick the ultimate becomes ready.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active || self.phase == UltimatePhase::Ready {
            return false;
        }
        self.charge_time += dt;
        if self.charge_time >= self.cooldown() {
            self.phase = UltimatePhase::Ready;
            tracing::debug!(skill = %self.name, "ultimate ready");
            return true;
        }
        false
    }

    /// Fires the ultimate. Fails without touching any state unless ready.
    pub fn activate(
        &mut self,
        owner: &mut CharacterStats,
        view: &OwnerView,
        ctx: &mut HitContext<'_>,
    ) -> Result<UltimateActivation, UltimateError> {
        if owner.is_dead() {
            return Err(UltimateError::OwnerDead);
        }
        if !self.active {
            return Err(UltimateError::Inactive(self.name.clone()));
        }
        if !self.is_ready() {
            return Err(UltimateError::NotReady {
                skill: self.name.clone(),
                charge_time: self.charge_time,
                cooldown: self.cooldown(),
            });
        }

        let element = self.element(owner.element());
        let strike = Strike {
            source: &self.name,
            base: self.total_damage() + owner.attack(),
            element,
            crit: CritProfile::new(
                ctx.config.ultimate_crit_chance,
                ctx.config.ultimate_crit_multiplier,
            ),
            origin: view.position,
        };
        let targets = ctx
            .within(view.position, self.area_of_effect)
            .into_iter()
            .filter(|id| ctx.strike(*id, &strike).is_some())
            .count();

        let expires_at = ctx.now + self.duration;
        for &(stat, factor) in element_buffs(self.own_element()) {
            owner.apply_buff(TimedBuff::new(
                BuffSource::Ultimate,
                stat,
                Bonus::more(factor),
                expires_at,
            ));
        }

        self.charge_time = 0.0;
        self.phase = UltimatePhase::Charging;
        ctx.events.push(CombatEvent::UltimateActivated {
            skill: self.name.clone(),
            element,
            targets,
        });
        tracing::info!(skill = %self.name, %element, targets, "ultimate activated");

        Ok(UltimateActivation {
            element,
            targets,
            buff_expires_at: expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SkillCategory;
    use crate::stats::BaseStats;
    use crate::world::Vec2;
    use crate::world::fixtures::Arena;

    fn nova(element: Element) -> UltimateState {
        let def = SkillDefinition::builder("nova", SkillCategory::Ultimate)
            .element(element)
            .damage(50.0)
            .cooldown(10.0)
            .ultimate(3.0, 5.0)
            .build();
        UltimateState::from_definition(&def, 0.1).expect("ultimate params")
    }

    fn owner() -> CharacterStats {
        CharacterStats::new(BaseStats::default(), 100.0)
    }

    #[test]
    fn becomes_ready_exactly_once() {
        let mut ult = nova(Element::Fire);
        assert!(!ult.tick(9.9));
        assert!(ult.tick(0.1));
        assert!(ult.is_ready());
        assert!(!ult.tick(1.0));
    }

    #[test]
    fn inactive_ultimate_does_not_charge() {
        let mut ult = nova(Element::Fire);
        ult.set_active(false);
        assert!(!ult.tick(20.0));
        assert_eq!(ult.charge_time(), 0.0);
    }

    #[test]
    fn activation_before_ready_changes_nothing() {
        let mut arena = Arena::new();
        let target = arena.spawn(1.0, 0.0);
        let mut ult = nova(Element::Fire);
        let mut stats = owner();
        ult.tick(4.0);

        let err = ult
            .activate(&mut stats, &OwnerView::at(Vec2::ZERO), &mut arena.ctx())
            .unwrap_err();
        assert!(matches!(err, UltimateError::NotReady { .. }));
        assert_eq!(ult.charge_time(), 4.0);
        assert!(stats.buffs().is_empty());
        assert_eq!(arena.health(target), 20.0);
    }

    #[test]
    fn activation_hits_area_and_resets_charge() {
        let mut arena = Arena::new();
        let near = arena.spawn(2.0, 0.0);
        let far = arena.spawn(10.0, 0.0);
        let mut ult = nova(Element::None);
        let mut stats = owner();
        ult.tick(10.0);

        let activation = ult
            .activate(&mut stats, &OwnerView::at(Vec2::ZERO), &mut arena.ctx())
            .expect("ready");
        assert_eq!(activation.targets, 1);
        assert_eq!(arena.damage_events(), vec![near]);
        assert_eq!(arena.health(far), 20.0);
        assert_eq!(ult.charge_time(), 0.0);
        assert!(!ult.is_ready());
    }

    #[test]
    fn buff_reverts_bit_for_bit() {
        for element in [
            Element::Fire,
            Element::Ice,
            Element::Lightning,
            Element::Wind,
            Element::Earth,
        ] {
            let mut arena = Arena::new();
            let mut ult = nova(element);
            let mut stats = owner();
            let before = [
                stats.attack(),
                stats.defense(),
                stats.speed(),
                stats.attack_interval(),
            ];
            ult.tick(10.0);
            let activation = ult
                .activate(&mut stats, &OwnerView::at(Vec2::ZERO), &mut arena.ctx())
                .expect("ready");
            assert!(!stats.buffs().is_empty());

            stats.expire_buffs(activation.buff_expires_at);
            let after = [
                stats.attack(),
                stats.defense(),
                stats.speed(),
                stats.attack_interval(),
            ];
            assert_eq!(before.map(f32::to_bits), after.map(f32::to_bits));
        }
    }

    #[test]
    fn fire_buff_scales_attack() {
        let mut arena = Arena::new();
        let mut ult = nova(Element::Fire);
        let mut stats = owner();
        let attack = stats.attack();
        ult.tick(10.0);
        ult.activate(&mut stats, &OwnerView::at(Vec2::ZERO), &mut arena.ctx())
            .expect("ready");
        assert_eq!(stats.attack(), attack * 1.5);
    }

    #[test]
    fn neutral_ultimate_buff_ignores_owner_element() {
        let mut arena = Arena::new();
        let mut ult = nova(Element::None);
        let mut stats = owner();
        stats.set_element(Element::Ice);
        let (attack, speed, defense) = (stats.attack(), stats.speed(), stats.defense());
        ult.tick(10.0);

        let activation = ult
            .activate(&mut stats, &OwnerView::at(Vec2::ZERO), &mut arena.ctx())
            .expect("ready");
        // the strike still takes the owner's element
        assert_eq!(activation.element, Element::Ice);
        assert_eq!(stats.attack(), attack * 1.5);
        assert_eq!(stats.speed(), speed * 1.2);
        assert_eq!(stats.defense(), defense);
    }

    #[test]
    fn element_override_picks_the_buff() {
        let mut arena = Arena::new();
        let mut ult = nova(Element::None);
        assert!(ult.attach(&SkillModifier::new("ember", "nova").with_element(Element::Fire), 0.0));
        let mut stats = owner();
        stats.set_element(Element::Ice);
        let (attack, speed) = (stats.attack(), stats.speed());
        ult.tick(10.0);

        ult.activate(&mut stats, &OwnerView::at(Vec2::ZERO), &mut arena.ctx())
            .expect("ready");
        assert_eq!(ult.own_element(), Element::Fire);
        assert_eq!(stats.attack(), attack * 1.5);
        assert_eq!(stats.speed(), speed);
    }

    #[test]
    fn cooldown_modifier_is_floored() {
        let mut ult = nova(Element::Fire);
        assert!(ult.attach(
            &SkillModifier::new("focus", "nova").with_cooldown_reduction(0.5),
            0.0
        ));
        assert_eq!(ult.cooldown(), 5.0);
        assert!(!ult.attach(
            &SkillModifier::new("focus", "nova").with_cooldown_reduction(0.5),
            0.0
        ));
        assert_eq!(ult.cooldown(), 5.0);
    }
}
