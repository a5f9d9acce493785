//! Stage catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::StageDefinition;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageCatalog {
    pub stages: Vec<StageDefinition>,
}

/// Loader for stages and their wave schedules.
pub struct StageLoader;

impl StageLoader {
    /// Load stages from a RON file. Waves are sorted by start time.
    pub fn load(path: &Path) -> LoadResult<Vec<StageDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<StageDefinition>> {
        let catalog: StageCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stage catalog RON: {}", e))?;
        Ok(catalog
            .stages
            .into_iter()
            .map(|mut stage| {
                if stage.name.is_empty() {
                    stage.name = stage.id.clone();
                }
                stage
                    .waves
                    .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
                stage
            })
            .collect())
    }
}
