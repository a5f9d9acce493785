//! Catalog listing.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use skirmish_content::ContentFactory;
use skirmish_core::DefinitionOracle;

use super::data_dir;

/// List content in a data directory
#[derive(Parser, Debug)]
pub struct Content {
    /// Content directory (default: bundled data)
    #[arg(long)]
    pub data: Option<PathBuf>,
}

impl Content {
    pub fn execute(self) -> Result<()> {
        let catalog = ContentFactory::new(data_dir(self.data)).load_catalog()?;

        println!("characters:");
        for character in catalog.definitions().characters() {
            println!(
                "  {:<12} {:<14} element={} skills=[{}]",
                character.id,
                character.name,
                character.element(),
                character.starting_skills.join(", ")
            );
        }

        println!("stages:");
        for id in catalog.stage_ids() {
            if let Some(stage) = catalog.stage(&id) {
                println!(
                    "  {:<12} {:<16} {:>5.0}s waves={} next={}",
                    stage.id,
                    stage.name,
                    stage.duration,
                    stage.waves.len(),
                    stage.next_stage.as_deref().unwrap_or("-")
                );
            }
        }

        println!("skills:");
        for skill in catalog.skills() {
            println!(
                "  {:<12} {:<9} {:<10} element={} level>={}",
                skill.name,
                format!("{:?}", skill.category),
                format!("{:?}", skill.rarity),
                skill.element,
                skill.required_level
            );
        }
        Ok(())
    }
}
