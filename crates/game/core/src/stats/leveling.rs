//! XP curve and level-up growth.

use crate::config::CombatConfig;

use super::character::CharacterStats;

impl CharacterStats {
    /// Adds XP and levels up as many times as the accumulated XP allows.
    ///
    /// Each level-up subtracts the current threshold, recomputes the next one as
    /// `xp_base * xp_multiplier^(level-1)`, and grants the configured growth
    /// (max health with a full heal, attack, defense, speed, regen).
    ///
    /// Returns the levels reached, in order. Dead characters gain nothing.
    pub fn gain_xp(&mut self, amount: f32, config: &CombatConfig) -> Vec<u32> {
        let mut reached = Vec::new();
        if self.is_dead() || amount <= 0.0 || !amount.is_finite() {
            return reached;
        }

        self.current_xp += amount;
        while self.current_xp >= self.xp_to_next_level {
            self.current_xp -= self.xp_to_next_level;
            self.level += 1;
            self.xp_to_next_level = config.xp_threshold(self.level);
            self.grow(config);
            reached.push(self.level);
        }

        if !reached.is_empty() {
            tracing::debug!(
                "gained {} level(s), now level {} ({}/{} xp)",
                reached.len(),
                self.level,
                self.current_xp,
                self.xp_to_next_level
            );
        }
        reached
    }

    fn grow(&mut self, config: &CombatConfig) {
        let growth = config.level_growth;
        let base = self.base_mut();
        base.max_health += growth.max_health;
        base.attack += growth.attack;
        base.defense += growth.defense;
        base.speed += growth.speed;
        base.health_regen_rate += growth.regen_rate;
        let max = base.max_health;
        self.heal(max);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CombatConfig;
    use crate::stats::{BaseStats, CharacterStats};

    fn level_one(config: &CombatConfig) -> CharacterStats {
        CharacterStats::new(BaseStats::default(), config.xp_threshold(1))
    }

    #[test]
    fn two_level_ups_from_250_xp() {
        let config = CombatConfig::default();
        let mut stats = level_one(&config);
        let base = stats.base().clone();

        let reached = stats.gain_xp(250.0, &config);

        assert_eq!(reached, vec![2, 3]);
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.current_xp(), 0.0);
        assert_eq!(stats.xp_to_next_level(), 225.0);
        assert_eq!(stats.max_health(), base.max_health + 20.0);
        assert_eq!(stats.health(), stats.max_health());
        assert_eq!(stats.attack(), base.attack + 4.0);
        assert_eq!(stats.defense(), base.defense + 2.0);
        assert_eq!(stats.speed(), base.speed + 1.0);
    }

    #[test]
    fn below_threshold_keeps_level() {
        let config = CombatConfig::default();
        let mut stats = level_one(&config);

        assert!(stats.gain_xp(99.0, &config).is_empty());
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.current_xp(), 99.0);

        assert_eq!(stats.gain_xp(1.0, &config), vec![2]);
        assert_eq!(stats.current_xp(), 0.0);
    }

    #[test]
    fn level_up_heals_to_full() {
        let config = CombatConfig::default();
        let mut stats = level_one(&config);
        stats.take_damage(60.0, config.defense_mitigation);
        assert!(stats.health() < stats.max_health());

        stats.gain_xp(100.0, &config);
        assert_eq!(stats.health(), stats.max_health());
    }

    #[test]
    fn health_never_exceeds_max_over_xp_sequences() {
        let config = CombatConfig::default();
        let amounts = [0.0, 1.0, 37.5, 99.9, 100.0, 250.0, 1_000.0, 12.0, 5_000.0, -10.0];
        let mut stats = level_one(&config);
        let mut last_level = stats.level();

        for (i, amount) in amounts.iter().cycle().take(60).enumerate() {
            if i % 7 == 0 {
                stats.take_damage(15.0, config.defense_mitigation);
            }
            stats.gain_xp(*amount, &config);
            assert!(stats.health() <= stats.max_health());
            assert!(stats.health() >= 0.0);
            assert!(stats.level() >= last_level);
            last_level = stats.level();
        }
    }
}
