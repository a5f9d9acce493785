//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation, advances it in fixed steps and publishes
//! every resulting event on the [`EventBus`]. A builder wires up content,
//! persistence and the spatial query.

use std::path::PathBuf;

use directories::ProjectDirs;
use skirmish_content::{ContentCatalog, ContentFactory};
use skirmish_core::{
    CombatEvent, Command, MemoryProgressStore, ProgressStore, RunSummary, Simulation,
    SimulationContext, TargetQuery,
};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::pilot::Pilot;
use crate::query::SpatialGrid;
use crate::store::FileProgressStore;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory holding the content files.
    pub data_dir: PathBuf,
    /// Seconds simulated per step.
    pub fixed_step: f32,
    /// Base seed; each run derives its own.
    pub seed: u64,
    /// Progress file. `None` keeps progress in memory.
    pub save_path: Option<PathBuf>,
    /// Buffered events per topic before slow subscribers start lagging.
    pub event_buffer_size: usize,
    pub grid_cell_size: f32,
}

impl RuntimeConfig {
    /// `progress.json` under the platform data directory, if one exists.
    pub fn default_save_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "skirmish", "skirmish")
            .map(|dirs| dirs.data_dir().join("progress.json"))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: ContentFactory::bundled().data_dir().to_path_buf(),
            fixed_step: 1.0 / 30.0,
            seed: 0,
            save_path: Self::default_save_path(),
            event_buffer_size: 256,
            grid_cell_size: SpatialGrid::DEFAULT_CELL_SIZE,
        }
    }
}

/// Main runtime that drives one simulation.
pub struct Runtime {
    simulation: Simulation,
    bus: EventBus,
    config: RuntimeConfig,
    default_character: Option<String>,
    first_stage: Option<String>,
    accumulator: f32,
    steps: u64,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Handle to the event bus; clones share the same channels.
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Fixed steps taken since the runtime was built.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Starts a run. Missing ids fall back to the first character and the
    /// start of the stage progression.
    pub fn start_run(&mut self, character: Option<&str>, stage: Option<&str>) -> Result<()> {
        let character = character
            .map(str::to_owned)
            .or_else(|| self.default_character.clone())
            .ok_or(RuntimeError::NoCharacter)?;
        let stage = stage
            .map(str::to_owned)
            .or_else(|| self.first_stage.clone())
            .ok_or(RuntimeError::NoStage)?;

        let events = self.simulation.start_run(&character, &stage)?;
        self.accumulator = 0.0;
        info!(%character, %stage, seed = ?self.simulation.run_seed(), "run started");
        self.publish(events);
        Ok(())
    }

    /// Advances the simulation by exactly one fixed step.
    pub fn step(&mut self) -> Result<Vec<CombatEvent>> {
        let events = self.simulation.tick(self.config.fixed_step)?;
        self.steps += 1;
        self.publish(events.clone());
        Ok(events)
    }

    /// Accumulates wall time and runs as many fixed steps as fit.
    ///
    /// Leftover time carries over to the next call. Returns the number of
    /// steps taken; stepping stops early once the run finishes.
    pub fn advance(&mut self, elapsed: f32) -> Result<usize> {
        if !(elapsed.is_finite() && elapsed >= 0.0) {
            return Err(RuntimeError::InvalidStep(elapsed));
        }
        self.accumulator += elapsed;
        let mut taken = 0;
        while self.accumulator >= self.config.fixed_step && self.simulation.is_running() {
            self.accumulator -= self.config.fixed_step;
            self.step()?;
            taken += 1;
        }
        Ok(taken)
    }

    /// Applies a player command and publishes its events.
    pub fn command(&mut self, command: Command) -> Result<Vec<CombatEvent>> {
        let kind = command.as_str();
        let events = self.simulation.handle(command)?;
        debug!(command = kind, events = events.len(), "command applied");
        self.publish(events.clone());
        Ok(events)
    }

    /// Plays the current run with `pilot` until it finishes or `time_limit`
    /// seconds of simulated time pass, then ends it.
    ///
    /// Commands the simulation refuses are logged and skipped.
    pub fn play(&mut self, pilot: &mut dyn Pilot, time_limit: f32) -> Result<RunSummary> {
        while self.simulation.is_running() && self.simulation.time() < time_limit {
            for command in pilot.commands(&self.simulation) {
                match self.command(command) {
                    Ok(_) => {}
                    Err(RuntimeError::Command(err)) => {
                        debug!(error = %err, "pilot command refused");
                    }
                    Err(err) => return Err(err),
                }
            }
            self.step()?;
        }
        self.end_run()
    }

    /// Ends the current run and saves progress.
    pub fn end_run(&mut self) -> Result<RunSummary> {
        let summary = self.simulation.end_run()?;
        info!(
            outcome = ?summary.outcome,
            level = summary.level,
            kills = summary.kills,
            time = summary.time,
            "run ended"
        );
        Ok(summary)
    }

    fn publish(&self, events: Vec<CombatEvent>) {
        let time = self.simulation.time();
        for event in events {
            self.bus.publish(Event {
                step: self.steps,
                time,
                event,
            });
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<ContentCatalog>,
    store: Option<Box<dyn ProgressStore>>,
    query: Option<Box<dyn TargetQuery>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            store: None,
            query: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already loaded catalog instead of reading `data_dir`.
    pub fn catalog(mut self, catalog: ContentCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Override the progress store chosen from `save_path`.
    pub fn store(mut self, store: impl ProgressStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Override the spatial grid.
    pub fn query(mut self, query: impl TargetQuery + 'static) -> Self {
        self.query = Some(Box::new(query));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let config = self.config;
        if !(config.fixed_step.is_finite() && config.fixed_step > 0.0) {
            return Err(RuntimeError::InvalidStep(config.fixed_step));
        }

        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => ContentFactory::new(&config.data_dir).load_catalog()?,
        };
        let default_character = catalog.default_character().map(|c| c.id.clone());
        let first_stage = catalog.first_stage().map(|s| s.id.clone());

        let store: Box<dyn ProgressStore> = match (self.store, &config.save_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Box::new(FileProgressStore::new(path)),
            (None, None) => Box::new(MemoryProgressStore::new()),
        };
        let query: Box<dyn TargetQuery> = match self.query {
            Some(query) => query,
            None => Box::new(SpatialGrid::new(config.grid_cell_size)),
        };

        let context = SimulationContext::new(catalog.into_oracle())
            .with_store(store)
            .with_query(query)
            .with_seed(config.seed);

        info!(
            data_dir = %config.data_dir.display(),
            save_path = ?config.save_path,
            step = config.fixed_step,
            seed = config.seed,
            "runtime built"
        );

        Ok(Runtime {
            simulation: Simulation::new(context),
            bus: EventBus::with_capacity(config.event_buffer_size),
            config,
            default_character,
            first_stage,
            accumulator: 0.0,
            steps: 0,
        })
    }
}
