//! Elemental affinity table.
//!
//! The six elements form a fixed ring
//! `Fire → Ice → Wind → Earth → Lightning → Poison → Fire`. Every element is
//! strong against the next two elements in the ring, weak against the previous
//! two, and neutral to the one directly opposite. This is the single source of
//! truth for elemental damage scaling.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Elemental alignment of a combatant, skill or hit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    #[default]
    None,
    Fire,
    Ice,
    Lightning,
    Poison,
    Earth,
    Wind,
}

/// Position of each element on the advantage ring. `None` is off the ring.
const RING: [Element; 6] = [
    Element::Fire,
    Element::Ice,
    Element::Wind,
    Element::Earth,
    Element::Lightning,
    Element::Poison,
];

impl Element {
    fn ring_index(self) -> Option<usize> {
        RING.iter().position(|e| *e == self)
    }

    /// The two elements this element deals bonus damage to.
    pub fn strong_against(self) -> Option<[Element; 2]> {
        let i = self.ring_index()?;
        Some([RING[(i + 1) % 6], RING[(i + 2) % 6]])
    }

    /// The two elements that deal bonus damage to this element.
    pub fn weak_against(self) -> Option<[Element; 2]> {
        let i = self.ring_index()?;
        Some([RING[(i + 5) % 6], RING[(i + 4) % 6]])
    }

    /// The single element with no advantage either way.
    pub fn neutral_to(self) -> Option<Element> {
        let i = self.ring_index()?;
        Some(RING[(i + 3) % 6])
    }

    pub fn is_strong_against(self, other: Element) -> bool {
        self.strong_against().is_some_and(|s| s.contains(&other))
    }
}

/// Advantage lookup parameterised by the bonus multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffinityTable {
    bonus: f32,
}

impl AffinityTable {
    pub const fn new(bonus: f32) -> Self {
        Self { bonus }
    }

    pub fn bonus(&self) -> f32 {
        self.bonus
    }

    /// Damage multiplier for `attack` hitting `target`.
    ///
    /// `bonus` if strong, `1 / bonus` if weak, `1.0` otherwise (including any
    /// `None` side and same-element hits).
    pub fn multiplier(&self, attack: Element, target: Element) -> f32 {
        if attack == Element::None || target == Element::None {
            return 1.0;
        }
        if attack.is_strong_against(target) {
            self.bonus
        } else if target.is_strong_against(attack) {
            1.0 / self.bonus
        } else {
            1.0
        }
    }
}

impl Default for AffinityTable {
    fn default() -> Self {
        Self::new(crate::config::CombatConfig::DEFAULT_ELEMENT_BONUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn elemental() -> impl Iterator<Item = Element> {
        Element::iter().filter(|e| *e != Element::None)
    }

    #[test]
    fn every_element_has_two_strong_two_weak_one_neutral() {
        for e in elemental() {
            let strong = e.strong_against().unwrap();
            let weak = e.weak_against().unwrap();
            let neutral = e.neutral_to().unwrap();

            let mut seen = vec![e, neutral];
            seen.extend(strong);
            seen.extend(weak);
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 6, "{e} relations overlap");
        }
    }

    #[test]
    fn strong_and_weak_are_mirrored() {
        let table = AffinityTable::default();
        for attacker in elemental() {
            for target in attacker.strong_against().unwrap() {
                assert_eq!(table.multiplier(attacker, target), table.bonus());
                assert_eq!(table.multiplier(target, attacker), 1.0 / table.bonus());
            }
        }
    }

    #[test]
    fn same_element_and_none_are_neutral() {
        let table = AffinityTable::default();
        for e in Element::iter() {
            assert_eq!(table.multiplier(e, e), 1.0);
            assert_eq!(table.multiplier(e, Element::None), 1.0);
            assert_eq!(table.multiplier(Element::None, e), 1.0);
        }
    }

    #[test]
    fn opposite_elements_are_neutral() {
        let table = AffinityTable::default();
        assert_eq!(table.multiplier(Element::Fire, Element::Earth), 1.0);
        assert_eq!(table.multiplier(Element::Ice, Element::Lightning), 1.0);
        assert_eq!(table.multiplier(Element::Wind, Element::Poison), 1.0);
    }

    #[test]
    fn fire_beats_ice() {
        let table = AffinityTable::new(1.2);
        let damage = 100.0 * table.multiplier(Element::Fire, Element::Ice);
        assert!((damage - 120.0).abs() < 1e-4, "got {damage}");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Lightning".parse::<Element>().unwrap(), Element::Lightning);
        assert_eq!("wind".parse::<Element>().unwrap(), Element::Wind);
        assert_eq!(Element::Poison.to_string(), "poison");
    }
}
