//! Per-combatant stat aggregate.
//!
//! Base values are the single source of truth and only change through level-ups
//! and skill acquisition. Effective values layer the active timed buffs on top
//! (`Flat → %Inc → More → Clamp`) and are never stored.

use crate::element::Element;

use super::bonus::StatBounds;
use super::buffs::{ActiveBuffs, BuffSource, StatKind, TimedBuff};

/// Starting values supplied by a character definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub max_health: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
    pub health_regen_rate: f32,
    /// Seconds without damage before regeneration starts.
    pub health_regen_delay: f32,
    pub attack_activation_interval: f32,
    pub defense_activation_interval: f32,
    pub element: Element,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            attack: 10.0,
            defense: 5.0,
            speed: 5.0,
            health_regen_rate: 1.0,
            health_regen_delay: 3.0,
            attack_activation_interval: 1.0,
            defense_activation_interval: 5.0,
            element: Element::None,
        }
    }
}

/// Numeric bonuses a skill grants on acquisition.
///
/// Flat fields add to base stats; `attack_speed_multiplier` scales the attack
/// activation interval (0.9 = 10% faster, 1.0 = unchanged).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBonuses {
    pub health: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
    pub regen: f32,
    pub attack_speed_multiplier: f32,
}

impl Default for StatBonuses {
    fn default() -> Self {
        Self {
            health: 0.0,
            attack: 0.0,
            defense: 0.0,
            speed: 0.0,
            regen: 0.0,
            attack_speed_multiplier: 1.0,
        }
    }
}

/// Result of a [`CharacterStats::take_damage`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageTaken {
    /// Damage actually removed from health after mitigation.
    pub applied: f32,
    pub health_after: f32,
    /// True only on the call that brought health to zero.
    pub died: bool,
}

/// Mutable stat aggregate of the controllable character.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterStats {
    base: BaseStats,
    health: f32,
    pub(super) level: u32,
    pub(super) current_xp: f32,
    pub(super) xp_to_next_level: f32,
    current_element: Element,
    time_since_damage: f32,
    damaged_this_tick: bool,
    dead: bool,
    buffs: ActiveBuffs,
}

impl CharacterStats {
    /// Creates level-1 stats at full health.
    pub fn new(base: BaseStats, xp_to_next_level: f32) -> Self {
        let health = base.max_health;
        let current_element = base.element;
        Self {
            base,
            health,
            level: 1,
            current_xp: 0.0,
            xp_to_next_level,
            current_element,
            time_since_damage: 0.0,
            damaged_this_tick: false,
            dead: false,
            buffs: ActiveBuffs::new(),
        }
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub(super) fn base_mut(&mut self) -> &mut BaseStats {
        &mut self.base
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.base.max_health
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_xp(&self) -> f32 {
        self.current_xp
    }

    pub fn xp_to_next_level(&self) -> f32 {
        self.xp_to_next_level
    }

    pub fn element(&self) -> Element {
        self.current_element
    }

    pub fn set_element(&mut self, element: Element) {
        self.current_element = element;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn time_since_damage(&self) -> f32 {
        self.time_since_damage
    }

    /// Effective value of a buffable stat.
    pub fn stat(&self, stat: StatKind) -> f32 {
        let (base, bounds) = match stat {
            StatKind::Attack => (self.base.attack, StatBounds::NON_NEGATIVE),
            StatKind::Defense => (self.base.defense, StatBounds::NON_NEGATIVE),
            StatKind::Speed => (self.base.speed, StatBounds::NON_NEGATIVE),
            StatKind::RegenRate => (self.base.health_regen_rate, StatBounds::NON_NEGATIVE),
            StatKind::AttackInterval => (self.base.attack_activation_interval, StatBounds::INTERVAL),
            StatKind::DefenseInterval => {
                (self.base.defense_activation_interval, StatBounds::INTERVAL)
            }
        };
        self.buffs.stack_for(stat).apply(base, bounds.min, bounds.max)
    }

    pub fn attack(&self) -> f32 {
        self.stat(StatKind::Attack)
    }

    pub fn defense(&self) -> f32 {
        self.stat(StatKind::Defense)
    }

    pub fn speed(&self) -> f32 {
        self.stat(StatKind::Speed)
    }

    pub fn attack_interval(&self) -> f32 {
        self.stat(StatKind::AttackInterval)
    }

    pub fn defense_interval(&self) -> f32 {
        self.stat(StatKind::DefenseInterval)
    }

    /// Applies mitigated damage: `max(0, raw - defense * mitigation)`.
    ///
    /// Any damage that gets through resets the regeneration counter and cancels
    /// regeneration for the current tick. Dead combatants ignore further hits.
    pub fn take_damage(&mut self, raw: f32, mitigation: f32) -> DamageTaken {
        if self.dead {
            return DamageTaken {
                applied: 0.0,
                health_after: self.health,
                died: false,
            };
        }

        let applied = (raw - self.defense() * mitigation).max(0.0).min(self.health);
        if applied > 0.0 {
            self.health -= applied;
            self.time_since_damage = 0.0;
            self.damaged_this_tick = true;
        }

        let died = self.health <= 0.0;
        if died {
            self.health = 0.0;
            self.dead = true;
            self.buffs.clear();
            tracing::debug!("character died at level {}", self.level);
        }

        DamageTaken {
            applied,
            health_after: self.health,
            died,
        }
    }

    /// Restores health up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.dead || amount <= 0.0 {
            return 0.0;
        }
        let healed = amount.min(self.base.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Advances regeneration by `dt` seconds.
    ///
    /// Returns the health regenerated this tick.
    pub fn tick_regen(&mut self, dt: f32) -> f32 {
        if self.dead {
            return 0.0;
        }
        if self.damaged_this_tick {
            self.damaged_this_tick = false;
            return 0.0;
        }

        self.time_since_damage += dt;
        if self.time_since_damage < self.base.health_regen_delay
            || self.health >= self.base.max_health
        {
            return 0.0;
        }

        let regen = self.stat(StatKind::RegenRate) * dt;
        let healed = regen.min(self.base.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Applies a skill's acquisition bonuses to base stats.
    ///
    /// Health bonuses raise both the maximum and current health.
    pub fn apply_bonuses(&mut self, bonuses: &StatBonuses) {
        self.base.max_health = (self.base.max_health + bonuses.health).max(1.0);
        self.health = (self.health + bonuses.health).clamp(0.0, self.base.max_health);
        self.base.attack = (self.base.attack + bonuses.attack).max(0.0);
        self.base.defense = (self.base.defense + bonuses.defense).max(0.0);
        self.base.speed = (self.base.speed + bonuses.speed).max(0.0);
        self.base.health_regen_rate = (self.base.health_regen_rate + bonuses.regen).max(0.0);
        if bonuses.attack_speed_multiplier > 0.0 {
            self.base.attack_activation_interval = (self.base.attack_activation_interval
                * bonuses.attack_speed_multiplier)
                .max(StatBounds::INTERVAL.min);
        }
    }

    /// Adds a timed buff, replacing the previous one from the same source and stat.
    pub fn apply_buff(&mut self, buff: TimedBuff) {
        if self.dead {
            return;
        }
        self.buffs.insert(buff);
    }

    /// Retracts buffs that expired at or before `now`.
    pub fn expire_buffs(&mut self, now: f32) -> usize {
        self.buffs.expire(now)
    }

    pub fn remove_buffs_from(&mut self, source: &BuffSource) {
        self.buffs.remove_source(source);
    }

    /// Cancels every pending revert without applying it.
    pub fn clear_buffs(&mut self) {
        self.buffs.clear();
    }

    pub fn buffs(&self) -> &ActiveBuffs {
        &self.buffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::bonus::Bonus;

    fn stats() -> CharacterStats {
        CharacterStats::new(BaseStats::default(), 100.0)
    }

    #[test]
    fn damage_is_mitigated_by_half_defense() {
        let mut s = stats();
        let taken = s.take_damage(20.0, 0.5);
        assert_eq!(taken.applied, 17.5);
        assert_eq!(s.health(), 82.5);
    }

    #[test]
    fn weak_hits_are_fully_mitigated() {
        let mut s = stats();
        let taken = s.take_damage(2.0, 0.5);
        assert_eq!(taken.applied, 0.0);
        assert_eq!(s.health(), 100.0);
    }

    #[test]
    fn death_fires_exactly_once() {
        let mut s = stats();
        assert!(s.take_damage(500.0, 0.5).died);
        assert!(s.is_dead());
        assert_eq!(s.health(), 0.0);
        assert!(!s.take_damage(500.0, 0.5).died);
        assert_eq!(s.heal(50.0), 0.0);
    }

    #[test]
    fn regen_waits_for_delay_and_stops_at_max() {
        let mut s = stats();
        s.take_damage(12.5, 0.5); // 10 applied
        assert_eq!(s.tick_regen(1.0), 0.0, "cancelled on the damage tick");

        // 3s delay after the damage tick.
        assert_eq!(s.tick_regen(1.0), 0.0);
        assert_eq!(s.tick_regen(1.0), 0.0);
        assert_eq!(s.tick_regen(1.0), 1.0);

        for _ in 0..100 {
            s.tick_regen(1.0);
            assert!(s.health() <= s.max_health());
        }
        assert_eq!(s.health(), s.max_health());
    }

    #[test]
    fn damage_resets_regen_counter() {
        let mut s = stats();
        s.take_damage(20.0, 0.5);
        s.tick_regen(1.0);
        for _ in 0..5 {
            s.tick_regen(1.0);
        }
        assert!(s.time_since_damage() >= 3.0);

        s.take_damage(20.0, 0.5);
        assert_eq!(s.time_since_damage(), 0.0);
        let before = s.health();
        assert_eq!(s.tick_regen(1.0), 0.0);
        assert_eq!(s.health(), before);
    }

    #[test]
    fn buff_retraction_restores_exact_value() {
        let mut s = stats();
        let attack_before = s.attack();
        let interval_before = s.attack_interval();

        s.apply_buff(TimedBuff::new(
            BuffSource::Ultimate,
            StatKind::Attack,
            Bonus::more(1.5),
            4.0,
        ));
        s.apply_buff(TimedBuff::new(
            BuffSource::Ultimate,
            StatKind::AttackInterval,
            Bonus::more(0.7),
            4.0,
        ));
        assert_eq!(s.attack(), attack_before * 1.5);

        s.expire_buffs(4.0);
        assert_eq!(s.attack().to_bits(), attack_before.to_bits());
        assert_eq!(s.attack_interval().to_bits(), interval_before.to_bits());
    }

    #[test]
    fn acquisition_bonuses_apply_to_base() {
        let mut s = stats();
        s.apply_bonuses(&StatBonuses {
            health: 20.0,
            attack: 3.0,
            attack_speed_multiplier: 0.5,
            ..StatBonuses::default()
        });
        assert_eq!(s.max_health(), 120.0);
        assert_eq!(s.health(), 120.0);
        assert_eq!(s.attack(), 13.0);
        assert_eq!(s.attack_interval(), 0.5);
    }
}
