//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use skirmish_core::{
    CharacterDefinition, CombatConfig, DefinitionSet, EnemyTemplate, SkillDefinition,
    SkillModifier, StageDefinition,
};
use tracing::{debug, info};

use crate::catalog::ContentCatalog;
use crate::loaders::{
    CharacterLoader, ConfigLoader, EnemyLoader, LoadResult, ModifierLoader, SkillLoader,
    StageLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional, defaults otherwise)
/// ├── skills.ron
/// ├── modifiers.ron    (optional)
/// ├── characters.ron
/// ├── enemies.ron
/// └── stages.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat configuration from `config.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load modifier cards from `modifiers.ron`. A missing file means no cards.
    pub fn load_modifiers(&self) -> LoadResult<Vec<SkillModifier>> {
        let path = self.data_dir.join("modifiers.ron");
        if !path.exists() {
            return Ok(Vec::new());
        }
        ModifierLoader::load(&path)
    }

    pub fn load_characters(&self) -> LoadResult<Vec<CharacterDefinition>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    pub fn load_stages(&self) -> LoadResult<Vec<StageDefinition>> {
        StageLoader::load(&self.data_dir.join("stages.ron"))
    }

    /// Load every file and validate the assembled catalog.
    ///
    /// Duplicate ids, out-of-range values and dangling references are all
    /// reported as errors naming the offending record.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let mut set = DefinitionSet::new(self.load_config()?);

        let skills = self.load_skills()?;
        let modifiers = self.load_modifiers()?;
        let characters = self.load_characters()?;
        let enemies = self.load_enemies()?;
        let stages = self.load_stages()?;
        let counts = (
            skills.len(),
            modifiers.len(),
            characters.len(),
            enemies.len(),
            stages.len(),
        );

        for skill in skills {
            set.insert_skill(skill)?;
        }
        for modifier in modifiers {
            set.insert_modifier(modifier)?;
        }
        for character in characters {
            set.insert_character(character)?;
        }
        for enemy in enemies {
            set.insert_enemy(enemy)?;
        }
        for stage in stages {
            set.insert_stage(stage)?;
        }

        let catalog = ContentCatalog::new(set)
            .with_context(|| format!("invalid content in {}", self.data_dir.display()))?;
        info!(
            skills = counts.0,
            modifiers = counts.1,
            characters = counts.2,
            enemies = counts.3,
            stages = counts.4,
            "content catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
