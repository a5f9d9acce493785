//! Data-driven content definitions and loaders.
//!
//! This crate turns the RON/TOML files under a data directory into a validated
//! [`ContentCatalog`]:
//! - Combat balance (`config.toml`)
//! - Skills and modifier cards (`skills.ron`, `modifiers.ron`)
//! - Playable characters (`characters.ron`)
//! - Enemy templates (`enemies.ron`)
//! - Stages and their waves (`stages.ron`)
//!
//! Content is consumed through the core's `DefinitionOracle` and never mutated
//! by a run.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ContentCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterLoader, ConfigLoader, ContentFactory, EnemyLoader, ModifierLoader, SkillLoader,
    StageLoader,
};
