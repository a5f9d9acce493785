//! Bonus application system following the layered stack architecture.
//!
//! This module implements the bonus calculation stack:
//! Flat → %Inc → More → Clamp
//!
//! Every effective stat (attack, defense, speed, regen, activation intervals)
//! is computed with this order from its base value and the currently active
//! buffs. Nothing is cached, so retracting a buff restores the exact base.

/// A single bonus that can be applied to a stat value.
///
/// - **Flat**: additive bonus applied first (e.g. +5 defense from a shield skill)
/// - **Increased**: fractional increase, summed with other increases (0.2 = +20%)
/// - **More**: sequential multiplier applied individually (1.5 = ×1.5, 0.7 = ×0.7)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(f32),

    /// Fractional increase (summed with other increases, then multiplied)
    Increased(f32),

    /// Multiplicative factor (applied sequentially)
    More(f32),
}

impl Bonus {
    /// Create a flat bonus
    pub fn flat(value: f32) -> Self {
        Bonus::Flat(value)
    }

    /// Create a fractional increase (0.2 = +20%)
    pub fn increased(fraction: f32) -> Self {
        Bonus::Increased(fraction)
    }

    /// Create a "more" multiplier (1.5 = ×1.5)
    pub fn more(factor: f32) -> Self {
        Bonus::More(factor)
    }
}

/// A collection of bonuses that will be applied in the correct order.
///
/// The stack guarantees the following application order:
/// 1. Flat bonuses (summed)
/// 2. Increased bonuses (summed, then multiplied)
/// 3. More multipliers (applied sequentially)
/// 4. Clamp to bounds
///
/// An empty stack returns `base` unchanged.
///
/// # Example
/// ```
/// # use skirmish_core::stats::bonus::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5.0));
/// stack.add(Bonus::increased(0.5));
/// stack.add(Bonus::more(2.0));
///
/// // (10 + 5) × 1.5 × 2
/// assert_eq!(stack.apply(10.0, 0.0, 100.0), 45.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    /// Create a new empty bonus stack
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    /// Add a bonus to the stack
    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Add multiple bonuses at once
    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Apply all bonuses to a base value with clamping
    ///
    /// # Formula
    /// ```text
    /// result = clamp((base + flat_sum) × (1 + inc_sum) × more_product, min, max)
    /// ```
    pub fn apply(&self, base: f32, min: f32, max: f32) -> f32 {
        if self.bonuses.is_empty() {
            return base;
        }

        let flat_sum: f32 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum();

        let inc_sum: f32 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(f) => Some(*f),
                _ => None,
            })
            .sum();

        let after_flat = if flat_sum == 0.0 { base } else { base + flat_sum };
        let after_inc = if inc_sum == 0.0 {
            after_flat
        } else {
            after_flat * (1.0 + inc_sum)
        };

        let after_more = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(f) => Some(*f),
                _ => None,
            })
            .fold(after_inc, |acc, factor| acc * factor);

        after_more.clamp(min, max)
    }

    /// Apply bonuses without clamping
    pub fn apply_unclamped(&self, base: f32) -> f32 {
        self.apply(base, f32::MIN, f32::MAX)
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// Get the number of bonuses in the stack
    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

impl FromIterator<Bonus> for BonusStack {
    fn from_iter<T: IntoIterator<Item = Bonus>>(iter: T) -> Self {
        Self {
            bonuses: iter.into_iter().collect(),
        }
    }
}

/// Bounds configuration for a specific stat calculation.
#[derive(Clone, Copy, Debug)]
pub struct StatBounds {
    pub min: f32,
    pub max: f32,
}

impl StatBounds {
    /// Non-negative combat stats (attack, defense, speed, regen).
    pub const NON_NEGATIVE: Self = Self {
        min: 0.0,
        max: f32::MAX,
    };

    /// Activation intervals must stay strictly positive.
    pub const INTERVAL: Self = Self {
        min: 0.05,
        max: f32::MAX,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_is_identity() {
        let stack = BonusStack::new();
        let base = 12.345_f32;
        assert_eq!(stack.apply(base, 0.0, 100.0).to_bits(), base.to_bits());
    }

    #[test]
    fn increases_are_summed_before_multiplying() {
        let stack: BonusStack = [Bonus::increased(0.25), Bonus::increased(0.25)]
            .into_iter()
            .collect();
        assert_eq!(stack.apply_unclamped(10.0), 15.0);
    }

    #[test]
    fn more_multipliers_compound() {
        let stack = BonusStack::from_iter([Bonus::more(2.0), Bonus::more(0.5), Bonus::flat(2.0)]);
        assert_eq!(stack.apply_unclamped(8.0), 10.0);
    }

    #[test]
    fn clamps_to_bounds() {
        let stack = BonusStack::from_iter([Bonus::flat(-50.0)]);
        let bounds = StatBounds::NON_NEGATIVE;
        assert_eq!(stack.apply(10.0, bounds.min, bounds.max), 0.0);
    }
}
