//! Traits describing the simulation's external collaborators.
//!
//! Oracles expose definition records, randomness, spatial queries and
//! persistence. The simulation receives implementations through
//! [`SimulationContext`](crate::engine::SimulationContext) so it never reaches
//! for globals or performs I/O itself.
mod definitions;
mod error;
mod query;
mod rng;
mod store;

pub use definitions::{DefinitionOracle, DefinitionSet};
pub use error::{DefinitionError, StoreError};
pub use query::{LinearScan, TargetQuery, closest, intersects};
pub use rng::{Dice, PcgRng, RngOracle, compute_seed};
pub use store::{MemoryProgressStore, ProgressProfile, ProgressStore};
