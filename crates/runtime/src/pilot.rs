//! Abstraction for sourcing player intent.
//!
//! Runtime users plug in [`Pilot`] implementations so a run can be driven by
//! human input, scripted fixtures, or the built-in [`Autopilot`].
use skirmish_core::{Command, Simulation, Vec2};

/// Produces the commands to apply before the next fixed step.
///
/// Implementations only read the simulation; the runtime applies the returned
/// commands in order.
pub trait Pilot {
    fn commands(&mut self, simulation: &Simulation) -> Vec<Command>;
}

/// A pilot that never issues commands. Passive skills still fire.
pub struct IdlePilot;

impl Pilot for IdlePilot {
    fn commands(&mut self, _simulation: &Simulation) -> Vec<Command> {
        Vec::new()
    }
}

/// Replays a fixed list of `(time, command)` pairs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPilot {
    script: Vec<(f32, Command)>,
    cursor: usize,
}

impl ScriptedPilot {
    /// Commands are issued at the first step whose time is at or past theirs.
    pub fn new(mut script: Vec<(f32, Command)>) -> Self {
        script.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { script, cursor: 0 }
    }
}

impl Pilot for ScriptedPilot {
    fn commands(&mut self, simulation: &Simulation) -> Vec<Command> {
        let now = simulation.time();
        let due = self.script[self.cursor..]
            .iter()
            .take_while(|(at, _)| *at <= now)
            .count();
        let commands = self.script[self.cursor..self.cursor + due]
            .iter()
            .map(|(_, command)| command.clone())
            .collect();
        self.cursor += due;
        commands
    }
}

/// Headless policy: kites away from nearby enemies, takes the rarest offered
/// skill and fires the ultimate as soon as something is in range.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Enemies closer than this push the pilot away.
    pub threat_radius: f32,
    last_offer: Vec<String>,
    heading: Vec2,
}

impl Autopilot {
    pub fn new(threat_radius: f32) -> Self {
        Self {
            threat_radius,
            last_offer: Vec::new(),
            heading: Vec2::ZERO,
        }
    }

    fn pick_offer(&mut self, simulation: &Simulation) -> Option<Command> {
        let offer = simulation.offer();
        if offer.is_empty() || offer == self.last_offer.as_slice() {
            return None;
        }
        self.last_offer = offer.to_vec();
        let definitions = simulation.definitions();
        offer
            .iter()
            .filter_map(|name| definitions.skill(name))
            .max_by(|a, b| a.rarity.cmp(&b.rarity).then_with(|| b.name.cmp(&a.name)))
            .map(|skill| Command::AcquireSkill(skill.name.clone()))
    }

    fn steer(&mut self, simulation: &Simulation) -> Option<Command> {
        let (player, enemies) = simulation.player().zip(simulation.enemies())?;
        let position = player.position();

        let mut push = Vec2::ZERO;
        for enemy in enemies.iter().filter(|e| e.is_alive()) {
            let away = position - enemy.position;
            let distance = away.length();
            if distance < self.threat_radius {
                // Closer enemies push harder; overlapping ones push along +x.
                let direction = away.normalized().unwrap_or(Vec2::RIGHT);
                push += direction * (self.threat_radius - distance);
            }
        }
        let heading = push.normalized().unwrap_or(Vec2::ZERO);
        if heading == self.heading {
            return None;
        }
        self.heading = heading;
        Some(Command::SetMovement(heading))
    }

    fn fire_ultimate(&self, simulation: &Simulation) -> Option<Command> {
        let player = simulation.player()?;
        let ultimate = player.loadout.ultimate()?;
        if !ultimate.is_ready() || !ultimate.is_active() {
            return None;
        }
        let in_range = simulation.enemies()?.iter().any(|enemy| {
            enemy.is_alive()
                && enemy.position.distance(player.position()) <= ultimate.area_of_effect()
        });
        in_range.then_some(Command::ActivateUltimate)
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl Pilot for Autopilot {
    fn commands(&mut self, simulation: &Simulation) -> Vec<Command> {
        if !simulation.is_running() {
            return Vec::new();
        }
        [
            self.pick_offer(simulation),
            self.fire_ultimate(simulation),
            self.steer(simulation),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
