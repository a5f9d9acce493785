//! Autopilot run.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use skirmish_runtime::{Autopilot, IdlePilot, Pilot, Runtime, RuntimeConfig, Topic};

use super::{data_dir, save_path};

/// Play one run headless
#[derive(Parser, Debug)]
pub struct Play {
    /// Character id (default: first character in the catalog)
    #[arg(short, long)]
    pub character: Option<String>,

    /// Stage id (default: first stage of the progression)
    #[arg(short, long)]
    pub stage: Option<String>,

    /// Base seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Simulated seconds per step
    #[arg(long, default_value_t = 1.0 / 30.0)]
    pub step: f32,

    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 600.0)]
    pub time_limit: f32,

    /// Content directory (default: bundled data)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Progress file (default: platform data directory)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Keep progress in memory only
    #[arg(long)]
    pub no_save: bool,

    /// Stand still and never pick skills
    #[arg(long)]
    pub idle: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Play {
    pub fn execute(self) -> Result<()> {
        let save_path = if self.no_save {
            None
        } else {
            Some(save_path(self.save)?)
        };
        let config = RuntimeConfig {
            data_dir: data_dir(self.data),
            fixed_step: self.step,
            seed: self.seed,
            save_path,
            ..RuntimeConfig::default()
        };

        let mut runtime = Runtime::builder().config(config).build()?;
        let mut milestones = runtime.subscribe(Topic::Progression);

        runtime.start_run(self.character.as_deref(), self.stage.as_deref())?;
        let mut pilot: Box<dyn Pilot> = if self.idle {
            Box::new(IdlePilot)
        } else {
            Box::new(Autopilot::default())
        };
        let summary = runtime.play(pilot.as_mut(), self.time_limit)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        while let Ok(event) = milestones.try_recv() {
            tracing::debug!(time = event.time, kind = event.event.kind(), "milestone");
        }
        println!("character : {}", summary.character);
        println!("stage     : {}", summary.stage);
        println!("outcome   : {:?}", summary.outcome);
        println!("time      : {:.1}s", summary.time);
        println!("level     : {}", summary.level);
        println!("kills     : {}", summary.kills);
        println!("coins     : {}", summary.coins);
        println!("damage    : {:.0}", summary.damage_dealt);
        println!("skills    : {}", summary.skills.join(", "));
        Ok(())
    }
}
