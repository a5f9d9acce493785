//! Definition oracle: read-only access to content records.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::CombatConfig;
use crate::definitions::{CharacterDefinition, EnemyTemplate, StageDefinition};
use crate::skill::{SkillDefinition, SkillModifier};

use super::error::DefinitionError;

/// Read-only catalog of every definition a run may reference.
///
/// Implementations are never mutated by the simulation.
pub trait DefinitionOracle: Send + Sync {
    fn skill(&self, name: &str) -> Option<Arc<SkillDefinition>>;

    /// All skills, ordered by name.
    fn skills(&self) -> Vec<Arc<SkillDefinition>>;

    fn modifier(&self, name: &str) -> Option<&SkillModifier>;

    fn character(&self, id: &str) -> Option<&CharacterDefinition>;

    fn enemy(&self, id: &str) -> Option<&EnemyTemplate>;

    fn stage(&self, id: &str) -> Option<&StageDefinition>;

    /// Stage ids, ordered.
    fn stage_ids(&self) -> Vec<String>;

    fn config(&self) -> &CombatConfig;
}

/// In-memory [`DefinitionOracle`] keyed by name/id.
#[derive(Clone, Debug, Default)]
pub struct DefinitionSet {
    config: CombatConfig,
    skills: BTreeMap<String, Arc<SkillDefinition>>,
    modifiers: BTreeMap<String, SkillModifier>,
    characters: BTreeMap<String, CharacterDefinition>,
    enemies: BTreeMap<String, EnemyTemplate>,
    stages: BTreeMap<String, StageDefinition>,
}

impl DefinitionSet {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn set_config(&mut self, config: CombatConfig) {
        self.config = config;
    }

    /// Inserts a skill. Returns an error if the name is already taken.
    pub fn insert_skill(&mut self, skill: SkillDefinition) -> Result<(), DefinitionError> {
        insert_unique(&mut self.skills, "skill", skill.name.clone(), Arc::new(skill))
    }

    pub fn insert_modifier(&mut self, modifier: SkillModifier) -> Result<(), DefinitionError> {
        insert_unique(
            &mut self.modifiers,
            "modifier",
            modifier.name.clone(),
            modifier,
        )
    }

    pub fn insert_character(
        &mut self,
        character: CharacterDefinition,
    ) -> Result<(), DefinitionError> {
        insert_unique(
            &mut self.characters,
            "character",
            character.id.clone(),
            character,
        )
    }

    pub fn insert_enemy(&mut self, enemy: EnemyTemplate) -> Result<(), DefinitionError> {
        insert_unique(&mut self.enemies, "enemy", enemy.id.clone(), enemy)
    }

    pub fn insert_stage(&mut self, stage: StageDefinition) -> Result<(), DefinitionError> {
        insert_unique(&mut self.stages, "stage", stage.id.clone(), stage)
    }

    pub fn with_skill(mut self, skill: SkillDefinition) -> Result<Self, DefinitionError> {
        self.insert_skill(skill)?;
        Ok(self)
    }

    pub fn with_modifier(mut self, modifier: SkillModifier) -> Result<Self, DefinitionError> {
        self.insert_modifier(modifier)?;
        Ok(self)
    }

    pub fn with_character(
        mut self,
        character: CharacterDefinition,
    ) -> Result<Self, DefinitionError> {
        self.insert_character(character)?;
        Ok(self)
    }

    pub fn with_enemy(mut self, enemy: EnemyTemplate) -> Result<Self, DefinitionError> {
        self.insert_enemy(enemy)?;
        Ok(self)
    }

    pub fn with_stage(mut self, stage: StageDefinition) -> Result<Self, DefinitionError> {
        self.insert_stage(stage)?;
        Ok(self)
    }

    /// Validates every record and every cross-reference.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        for skill in self.skills.values() {
            skill.validate()?;
            for required in &skill.required_skills {
                if !self.skills.contains_key(required) {
                    return Err(DefinitionError::unknown(
                        "skill",
                        &skill.name,
                        "skill",
                        required,
                    ));
                }
            }
        }
        for modifier in self.modifiers.values() {
            modifier.validate()?;
            if !self.skills.contains_key(&modifier.target) {
                return Err(DefinitionError::unknown(
                    "modifier",
                    &modifier.name,
                    "skill",
                    &modifier.target,
                ));
            }
        }
        for character in self.characters.values() {
            character.validate()?;
            for skill in &character.starting_skills {
                if !self.skills.contains_key(skill) {
                    return Err(DefinitionError::unknown(
                        "character",
                        &character.id,
                        "skill",
                        skill,
                    ));
                }
            }
        }
        for enemy in self.enemies.values() {
            enemy.validate()?;
        }
        for stage in self.stages.values() {
            stage.validate()?;
            for wave in &stage.waves {
                if !self.enemies.contains_key(&wave.enemy) {
                    return Err(DefinitionError::unknown(
                        "stage",
                        &stage.id,
                        "enemy",
                        &wave.enemy,
                    ));
                }
            }
            if let Some(next) = &stage.next_stage
                && !self.stages.contains_key(next)
            {
                return Err(DefinitionError::unknown("stage", &stage.id, "stage", next));
            }
        }
        Ok(())
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn modifiers(&self) -> impl Iterator<Item = &SkillModifier> {
        self.modifiers.values()
    }

    pub fn characters(&self) -> impl Iterator<Item = &CharacterDefinition> {
        self.characters.values()
    }
}

fn insert_unique<V>(
    map: &mut BTreeMap<String, V>,
    kind: &'static str,
    id: String,
    value: V,
) -> Result<(), DefinitionError> {
    if map.contains_key(&id) {
        return Err(DefinitionError::Duplicate { kind, id });
    }
    map.insert(id, value);
    Ok(())
}

impl DefinitionOracle for DefinitionSet {
    fn skill(&self, name: &str) -> Option<Arc<SkillDefinition>> {
        self.skills.get(name).cloned()
    }

    fn skills(&self) -> Vec<Arc<SkillDefinition>> {
        self.skills.values().cloned().collect()
    }

    fn modifier(&self, name: &str) -> Option<&SkillModifier> {
        self.modifiers.get(name)
    }

    fn character(&self, id: &str) -> Option<&CharacterDefinition> {
        self.characters.get(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    fn stage(&self, id: &str) -> Option<&StageDefinition> {
        self.stages.get(id)
    }

    fn stage_ids(&self) -> Vec<String> {
        self.stages.keys().cloned().collect()
    }

    fn config(&self) -> &CombatConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::WaveDefinition;
    use crate::skill::SkillCategory;
    use crate::stats::BaseStats;

    fn slash() -> SkillDefinition {
        SkillDefinition::builder("slash", SkillCategory::Attack)
            .damage(10.0)
            .cooldown(1.0)
            .build()
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let set = DefinitionSet::default().with_skill(slash()).unwrap();
        let err = set.with_skill(slash()).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::Duplicate {
                kind: "skill",
                id: "slash".into()
            }
        );
    }

    #[test]
    fn dangling_requirement_fails_validation() {
        let cleave = SkillDefinition::builder("cleave", SkillCategory::Attack)
            .requires("slash")
            .build();
        let set = DefinitionSet::default().with_skill(cleave).unwrap();
        assert!(matches!(
            set.validate(),
            Err(DefinitionError::UnknownReference { target_kind: "skill", .. })
        ));
    }

    #[test]
    fn stage_must_reference_known_enemies() {
        let set = DefinitionSet::default()
            .with_stage(
                StageDefinition::new("meadow", 30.0)
                    .with_wave(WaveDefinition::new(0.0, "ghost", 2, 6.0)),
            )
            .unwrap();
        assert!(set.validate().is_err());

        let set = set.with_enemy(EnemyTemplate::new("ghost")).unwrap();
        assert!(set.validate().is_ok());
    }

    #[test]
    fn lookups_return_inserted_records() {
        let set = DefinitionSet::default()
            .with_skill(slash())
            .unwrap()
            .with_character(CharacterDefinition::new("knight", BaseStats::default()).with_skill("slash"))
            .unwrap();
        assert!(set.validate().is_ok());
        assert_eq!(set.skill("slash").map(|s| s.base_damage), Some(10.0));
        assert_eq!(set.character("knight").map(|c| c.starting_skills.len()), Some(1));
        assert!(set.skill("missing").is_none());
    }
}
