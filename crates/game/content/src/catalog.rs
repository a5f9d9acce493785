//! Validated definition catalog.

use std::sync::Arc;

use skirmish_core::{
    CharacterDefinition, CombatConfig, DefinitionError, DefinitionOracle, DefinitionSet,
    EnemyTemplate, SkillDefinition, SkillModifier, StageDefinition,
};

/// A [`DefinitionSet`] that passed cross-reference validation.
///
/// Only constructible through [`ContentCatalog::new`], so holding one means
/// every starting skill, wave enemy and next stage resolves.
#[derive(Clone, Debug)]
pub struct ContentCatalog {
    definitions: DefinitionSet,
}

impl ContentCatalog {
    pub fn new(definitions: DefinitionSet) -> Result<Self, DefinitionError> {
        definitions.validate()?;
        Ok(Self { definitions })
    }

    pub fn definitions(&self) -> &DefinitionSet {
        &self.definitions
    }

    /// Shares the catalog as the oracle a simulation runs against.
    pub fn into_oracle(self) -> Arc<dyn DefinitionOracle> {
        Arc::new(self)
    }

    /// First character by id, used when no character is picked explicitly.
    pub fn default_character(&self) -> Option<&CharacterDefinition> {
        self.definitions.characters().next()
    }

    /// A stage no other stage unlocks, i.e. the start of the progression.
    pub fn first_stage(&self) -> Option<&StageDefinition> {
        let ids = self.definitions.stage_ids();
        ids.iter()
            .find(|id| {
                !ids.iter().any(|other| {
                    self.definitions
                        .stage(other)
                        .and_then(|stage| stage.next_stage.as_deref())
                        == Some(id.as_str())
                })
            })
            .or_else(|| ids.first())
            .and_then(|id| self.definitions.stage(id))
    }
}

impl DefinitionOracle for ContentCatalog {
    fn skill(&self, name: &str) -> Option<Arc<SkillDefinition>> {
        self.definitions.skill(name)
    }

    fn skills(&self) -> Vec<Arc<SkillDefinition>> {
        self.definitions.skills()
    }

    fn modifier(&self, name: &str) -> Option<&SkillModifier> {
        self.definitions.modifier(name)
    }

    fn character(&self, id: &str) -> Option<&CharacterDefinition> {
        self.definitions.character(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.definitions.enemy(id)
    }

    fn stage(&self, id: &str) -> Option<&StageDefinition> {
        self.definitions.stage(id)
    }

    fn stage_ids(&self) -> Vec<String> {
        self.definitions.stage_ids()
    }

    fn config(&self) -> &CombatConfig {
        self.definitions.config()
    }
}
