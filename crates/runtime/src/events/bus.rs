//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use skirmish_core::CombatEvent;
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Hits, heals, status effects and kills
    Combat,
    /// Level-ups, offers, acquisitions and modifiers
    Progression,
    /// Ultimate charge and activation
    Ultimate,
    /// Run lifecycle (death, stage clear)
    Run,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Combat, Topic::Progression, Topic::Ultimate, Topic::Run];

    /// Topic a combat event is routed to.
    pub fn of(event: &CombatEvent) -> Self {
        match event {
            CombatEvent::DamageDealt { .. }
            | CombatEvent::PlayerDamaged { .. }
            | CombatEvent::Heal { .. }
            | CombatEvent::StatusApplied { .. }
            | CombatEvent::EnemyKilled { .. } => Topic::Combat,
            CombatEvent::LevelUp { .. }
            | CombatEvent::SkillAcquired { .. }
            | CombatEvent::AcquisitionRejected { .. }
            | CombatEvent::ModifierAcquired { .. }
            | CombatEvent::SkillOffer { .. } => Topic::Progression,
            CombatEvent::UltimateReady { .. } | CombatEvent::UltimateActivated { .. } => {
                Topic::Ultimate
            }
            CombatEvent::PlayerDied { .. } | CombatEvent::StageCleared { .. } => Topic::Run,
        }
    }
}

/// A combat event stamped with the simulation time it happened at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Fixed steps taken since the runtime was built.
    pub step: u64,
    pub time: f32,
    pub event: CombatEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }
}

/// Topic-based event bus
///
/// Publishing never blocks. Slow subscribers lag and lose the oldest events
/// rather than stalling the simulation.
#[derive(Clone)]
pub struct EventBus {
    combat: broadcast::Sender<Event>,
    progression: broadcast::Sender<Event>,
    ultimate: broadcast::Sender<Event>,
    run: broadcast::Sender<Event>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            combat: broadcast::channel(capacity).0,
            progression: broadcast::channel(capacity).0,
            ultimate: broadcast::channel(capacity).0,
            run: broadcast::channel(capacity).0,
            capacity,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Progression => &self.progression,
            Topic::Ultimate => &self.ultimate,
            Topic::Run => &self.run,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        let tx = self.sender(topic);

        if tx.len() >= self.capacity {
            tracing::debug!(?topic, "event backlog full, lagging subscribers drop oldest");
        }
        if tx.send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
