//! Skill and modifier catalog loaders.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::{SkillDefinition, SkillModifier};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Modifier (card) catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierCatalog {
    pub modifiers: Vec<SkillModifier>,
}

/// Loader for the skill catalog.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;
        Ok(catalog.skills)
    }
}

/// Loader for the modifier catalog.
pub struct ModifierLoader;

impl ModifierLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillModifier>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillModifier>> {
        let catalog: ModifierCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse modifier catalog RON: {}", e))?;
        Ok(catalog.modifiers)
    }
}
