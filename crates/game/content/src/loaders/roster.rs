//! Character and enemy catalog loaders.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::{CharacterDefinition, EnemyTemplate};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<CharacterDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for playable characters.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load characters from a RON file.
    ///
    /// A character without a display name takes its id.
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterDefinition>> {
        let catalog: CharacterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;
        Ok(catalog
            .characters
            .into_iter()
            .map(|mut character| {
                if character.name.is_empty() {
                    character.name = character.id.clone();
                }
                character
            })
            .collect())
    }
}

/// Loader for enemy templates.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyTemplate>> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;
        Ok(catalog.enemies)
    }
}
