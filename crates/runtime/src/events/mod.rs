//! Topic-based event bus for simulation events.
//!
//! Combat events are published to a topic derived from their kind, and
//! consumers subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
