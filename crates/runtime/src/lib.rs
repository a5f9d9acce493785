//! Runtime orchestration for the combat simulation.
//!
//! This crate wires content loading, persistence, spatial queries and an event
//! bus around a [`skirmish_core::Simulation`]. Consumers build a [`Runtime`],
//! start a run, and drive it with fixed steps or a [`Pilot`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`events`] provides the topic-based event bus
//! - [`pilot`] sources player commands
//! - [`store`] and [`query`] provide collaborator adapters reused by other crates
pub mod error;
pub mod events;
pub mod pilot;
pub mod query;
pub mod runtime;
pub mod store;

pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, Topic};
pub use pilot::{Autopilot, IdlePilot, Pilot, ScriptedPilot};
pub use query::SpatialGrid;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use store::FileProgressStore;
