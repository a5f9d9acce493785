//! Content loaders for reading game data from files.
//!
//! Each loader parses one file into core definition records. Range checks and
//! cross-references are validated once the whole catalog is assembled by
//! [`ContentFactory`].

pub mod config;
pub mod factory;
pub mod roster;
pub mod skills;
pub mod stages;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::{CharacterLoader, EnemyLoader};
pub use skills::{ModifierLoader, SkillLoader};
pub use stages::StageLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
