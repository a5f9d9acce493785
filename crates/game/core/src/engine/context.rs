use std::sync::Arc;

use crate::env::{
    DefinitionOracle, LinearScan, MemoryProgressStore, PcgRng, ProgressStore, RngOracle,
    TargetQuery,
};

/// Collaborators a [`Simulation`](super::Simulation) runs against.
///
/// Everything the simulation reads from or writes to outside its own state
/// goes through one of these.
pub struct SimulationContext {
    pub definitions: Arc<dyn DefinitionOracle>,
    pub query: Box<dyn TargetQuery>,
    pub store: Box<dyn ProgressStore>,
    pub rng: Box<dyn RngOracle>,
    /// Base seed; each run derives its own seed from it.
    pub seed: u64,
}

impl SimulationContext {
    /// Context with a linear-scan query, an in-memory store and PCG randomness.
    pub fn new(definitions: Arc<dyn DefinitionOracle>) -> Self {
        Self {
            definitions,
            query: Box::new(LinearScan),
            store: Box::new(MemoryProgressStore::new()),
            rng: Box::new(PcgRng),
            seed: 0,
        }
    }

    pub fn with_query(mut self, query: Box<dyn TargetQuery>) -> Self {
        self.query = query;
        self
    }

    pub fn with_store(mut self, store: Box<dyn ProgressStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_rng(mut self, rng: Box<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
