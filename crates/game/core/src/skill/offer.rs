//! Level-up skill offers.

use crate::env::{DefinitionOracle, Dice, ProgressProfile};
use crate::stats::CharacterStats;

use super::definition::SkillDefinition;
use super::loadout::SkillLoadout;

/// Whether a definition may appear in an offer right now.
pub fn is_eligible(
    definition: &SkillDefinition,
    loadout: &SkillLoadout,
    stats: &CharacterStats,
    profile: &ProgressProfile,
) -> bool {
    definition.unlock_tier <= profile.skill_unlock(&definition.name)
        && loadout.can_acquire(definition, stats.level()).is_ok()
}

/// Picks up to `n` distinct eligible skill names.
///
/// Candidates are visited in catalog order and shuffled with `dice`, so the
/// same seed always yields the same offer.
pub fn build_offer(
    catalog: &dyn DefinitionOracle,
    loadout: &SkillLoadout,
    stats: &CharacterStats,
    profile: &ProgressProfile,
    dice: &mut Dice,
    n: usize,
) -> Vec<String> {
    let mut candidates: Vec<String> = catalog
        .skills()
        .into_iter()
        .filter(|def| is_eligible(def, loadout, stats, profile))
        .map(|def| def.name.clone())
        .collect();

    let picks = n.min(candidates.len());
    for i in 0..picks {
        if let Some(offset) = dice.index(candidates.len() - i) {
            candidates.swap(i, i + offset);
        }
    }
    candidates.truncate(picks);
    candidates
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::*;
    use crate::config::CombatConfig;
    use crate::env::DefinitionSet;
    use crate::skill::SkillCategory;
    use crate::stats::BaseStats;

    fn catalog() -> DefinitionSet {
        let mut set = DefinitionSet::new(CombatConfig::default());
        for name in ["bolt", "ward", "spark", "ember"] {
            set.insert_skill(
                SkillDefinition::builder(name, SkillCategory::Attack)
                    .unique()
                    .build(),
            )
            .expect("unique name");
        }
        set.insert_skill(
            SkillDefinition::builder("meteor", SkillCategory::Attack)
                .required_level(10)
                .build(),
        )
        .expect("unique name");
        set.insert_skill(
            SkillDefinition::builder("secret", SkillCategory::Attack)
                .unlock_tier(2)
                .build(),
        )
        .expect("unique name");
        set
    }

    fn stats() -> CharacterStats {
        CharacterStats::new(BaseStats::default(), 100.0)
    }

    #[test]
    fn offers_distinct_eligible_skills() {
        let catalog = catalog();
        let mut loadout = SkillLoadout::new(0.1);
        let mut stats = stats();
        let bolt = catalog.skill("bolt").expect("bolt");
        loadout.try_acquire(bolt, &mut stats).expect("acquire");

        let mut dice = Dice::pcg(3);
        let offer = build_offer(
            &catalog,
            &loadout,
            &stats,
            &ProgressProfile::default(),
            &mut dice,
            3,
        );

        assert_eq!(offer.len(), 3);
        let unique: BTreeSet<_> = offer.iter().collect();
        assert_eq!(unique.len(), 3);
        for name in &offer {
            assert!(["ward", "spark", "ember"].contains(&name.as_str()));
        }
    }

    #[test]
    fn unlock_tier_is_read_from_profile() {
        let catalog = catalog();
        let loadout = SkillLoadout::new(0.1);
        let stats = stats();
        let mut profile = ProgressProfile::default();
        let secret = catalog.skill("secret").expect("secret");

        assert!(!is_eligible(&secret, &loadout, &stats, &profile));
        profile.unlock_skill("secret", 2);
        assert!(is_eligible(&secret, &loadout, &stats, &profile));
    }

    #[test]
    fn short_pool_returns_everything_eligible() {
        let catalog = catalog();
        let loadout = SkillLoadout::new(0.1);
        let mut dice = Dice::pcg(9);
        let offer = build_offer(
            &catalog,
            &loadout,
            &stats(),
            &ProgressProfile::default(),
            &mut dice,
            10,
        );
        assert_eq!(offer.len(), 4);
    }

    #[test]
    fn same_seed_same_offer() {
        let catalog = Arc::new(catalog());
        let loadout = SkillLoadout::new(0.1);
        let stats = stats();
        let profile = ProgressProfile::default();
        let a = build_offer(&*catalog, &loadout, &stats, &profile, &mut Dice::pcg(42), 2);
        let b = build_offer(&*catalog, &loadout, &stats, &profile, &mut Dice::pcg(42), 2);
        assert_eq!(a, b);
    }
}
