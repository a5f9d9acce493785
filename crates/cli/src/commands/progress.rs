//! Saved progress inspection.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skirmish_core::ProgressStore;
use skirmish_runtime::FileProgressStore;

use super::save_path;

/// Show or reset saved progress
#[derive(Parser, Debug)]
pub struct Progress {
    /// Progress file (default: platform data directory)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Delete the progress file
    #[arg(long)]
    pub reset: bool,
}

impl Progress {
    pub fn execute(self) -> Result<()> {
        let path = save_path(self.save)?;

        if self.reset {
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
                println!("removed {}", path.display());
            } else {
                println!("nothing to reset at {}", path.display());
            }
            return Ok(());
        }

        let store = FileProgressStore::open(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        println!("file       : {}", path.display());
        println!("coins      : {}", store.get_int("coins").unwrap_or(0));
        println!("last level : {}", store.get_int("level").unwrap_or(0));
        println!("best level : {}", store.get_int("best_level").unwrap_or(0));
        println!(
            "last stage : {}",
            store.get_string("last_stage").as_deref().unwrap_or("-")
        );
        Ok(())
    }
}
