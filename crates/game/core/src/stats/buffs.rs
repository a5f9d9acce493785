//! Timed stat buffs.
//!
//! A buff is a pending-revert record: the bonus stays in the list until the
//! simulation clock reaches `expires_at`, at which point [`ActiveBuffs::expire`]
//! drops it. Effective stats are recomputed from base values on demand, so
//! dropping a buff retracts exactly its own contribution and nothing else.

use super::bonus::{Bonus, BonusStack};

/// Stats that timed buffs may target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    RegenRate,
    AttackInterval,
    DefenseInterval,
}

/// Who applied a buff. A source holds at most one buff per stat.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffSource {
    /// Periodic defense skill, keyed by the held skill's loadout slot so
    /// copies of the same skill keep separate buffs.
    Skill(u32),
    /// Ultimate activation window.
    Ultimate,
}

/// A bonus on one stat that reverts at `expires_at` (simulation seconds).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedBuff {
    pub source: BuffSource,
    pub stat: StatKind,
    pub bonus: Bonus,
    pub expires_at: f32,
}

impl TimedBuff {
    pub fn new(source: BuffSource, stat: StatKind, bonus: Bonus, expires_at: f32) -> Self {
        Self {
            source,
            stat,
            bonus,
            expires_at,
        }
    }
}

/// Buffs currently applied to a combatant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveBuffs {
    buffs: Vec<TimedBuff>,
}

impl ActiveBuffs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a buff, first retracting any buff from the same source on the same stat.
    pub fn insert(&mut self, buff: TimedBuff) {
        self.buffs
            .retain(|b| !(b.source == buff.source && b.stat == buff.stat));
        self.buffs.push(buff);
    }

    /// Drops every buff whose expiry is at or before `now`. Returns how many were retracted.
    pub fn expire(&mut self, now: f32) -> usize {
        let before = self.buffs.len();
        self.buffs.retain(|b| b.expires_at > now);
        before - self.buffs.len()
    }

    /// Drops every buff applied by `source`.
    pub fn remove_source(&mut self, source: &BuffSource) {
        self.buffs.retain(|b| &b.source != source);
    }

    /// Cancels all pending reverts.
    pub fn clear(&mut self) {
        self.buffs.clear();
    }

    /// Bonus stack for a single stat.
    pub fn stack_for(&self, stat: StatKind) -> BonusStack {
        self.buffs
            .iter()
            .filter(|b| b.stat == stat)
            .map(|b| b.bonus)
            .collect()
    }

    pub fn has_source(&self, source: &BuffSource) -> bool {
        self.buffs.iter().any(|b| &b.source == source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedBuff> {
        self.buffs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shield(amount: f32, expires_at: f32) -> TimedBuff {
        TimedBuff::new(
            BuffSource::Skill(0),
            StatKind::Defense,
            Bonus::flat(amount),
            expires_at,
        )
    }

    #[test]
    fn same_source_replaces_instead_of_compounding() {
        let mut buffs = ActiveBuffs::new();
        buffs.insert(shield(5.0, 1.0));
        buffs.insert(shield(7.0, 2.0));

        assert_eq!(buffs.len(), 1);
        assert_eq!(buffs.stack_for(StatKind::Defense).apply_unclamped(10.0), 17.0);
    }

    #[test]
    fn different_sources_stack() {
        let mut buffs = ActiveBuffs::new();
        buffs.insert(shield(5.0, 1.0));
        buffs.insert(TimedBuff::new(
            BuffSource::Ultimate,
            StatKind::Defense,
            Bonus::more(1.3),
            3.0,
        ));

        assert_eq!(buffs.len(), 2);
        assert!((buffs.stack_for(StatKind::Defense).apply_unclamped(10.0) - 19.5).abs() < 1e-4);
    }

    #[test]
    fn expire_is_inclusive_of_now() {
        let mut buffs = ActiveBuffs::new();
        buffs.insert(shield(5.0, 1.0));

        assert_eq!(buffs.expire(0.999), 0);
        assert_eq!(buffs.expire(1.0), 1);
        assert!(buffs.is_empty());
    }
}
