//! Simulation loop.
//!
//! [`Simulation`] owns one run at a time and advances it in fixed order on
//! every [`Simulation::tick`]:
//!
//! ```text
//! clock → buff/modifier expiry → cooldowns → ultimate charge → passive fire
//!       → projectiles → waves → enemy movement/contact
//!       → deaths → XP/coins → level-ups/offers/save → regen → stage clear
//! ```
//!
//! Player input arrives through [`Simulation::handle`] between ticks. Both
//! return the [`CombatEvent`]s produced, in the order the effects applied.

mod command;
mod context;
mod errors;
mod player;

pub use command::Command;
pub use context::SimulationContext;
pub use errors::{CommandError, EngineError};
pub use player::Player;

use std::sync::Arc;

use crate::config::CombatConfig;
use crate::definitions::StageDefinition;
use crate::element::AffinityTable;
use crate::env::{
    DefinitionOracle, Dice, ProgressProfile, ProgressStore, TargetQuery, compute_seed,
};
use crate::events::CombatEvent;
use crate::scheduler::{self, PassiveScheduler};
use crate::skill::{SkillCategory, SkillLoadout, build_offer};
use crate::stats::CharacterStats;
use crate::ultimate::UltimateError;
use crate::world::{EnemyRoster, HitContext, Vec2, WaveSchedule, chase, contact_hits};

/// How a run ended, if it has.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    InProgress,
    Died,
    Cleared { next_stage: Option<String> },
    /// Ended by the caller before finishing.
    Abandoned,
}

impl RunOutcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Totals reported by [`Simulation::end_run`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub character: String,
    pub stage: String,
    pub outcome: RunOutcome,
    pub level: u32,
    pub time: f32,
    pub kills: u32,
    pub coins: u32,
    pub damage_dealt: f32,
    pub skills: Vec<String>,
}

struct Run {
    character: String,
    stage: StageDefinition,
    seed: u64,
    time: f32,
    player: Player,
    enemies: EnemyRoster,
    waves: WaveSchedule,
    scheduler: PassiveScheduler,
    profile: ProgressProfile,
    outcome: RunOutcome,
    offer: Vec<String>,
    kills: u32,
    coins: u32,
    damage_dealt: f32,
}

impl Run {
    fn tally(&mut self, events: &[CombatEvent]) {
        self.damage_dealt += events
            .iter()
            .filter_map(|e| match e {
                CombatEvent::DamageDealt { amount, .. } => Some(*amount),
                _ => None,
            })
            .sum::<f32>();
    }

    fn spawn_waves(&mut self, definitions: &dyn DefinitionOracle, dice: &mut Dice) {
        for wave in self.waves.due(self.time, self.stage.duration) {
            let Some(template) = definitions.enemy(&wave.enemy) else {
                tracing::warn!(enemy = %wave.enemy, stage = %self.stage.id, "wave references unknown enemy");
                continue;
            };
            let center = self.player.position();
            for _ in 0..wave.count {
                let angle = dice.range(0.0, 360.0);
                let position = center + Vec2::from_angle_deg(angle) * wave.spawn_radius;
                self.enemies.spawn(template, position);
            }
            tracing::debug!(
                enemy = %wave.enemy,
                count = wave.count,
                time = self.time,
                alive = self.enemies.len(),
                "wave spawned"
            );
        }
    }

    fn summary(&self) -> RunSummary {
        let loadout = &self.player.loadout;
        RunSummary {
            character: self.character.clone(),
            stage: self.stage.id.clone(),
            outcome: self.outcome.clone(),
            level: self.player.stats.level(),
            time: self.time,
            kills: self.kills,
            coins: self.coins,
            damage_dealt: self.damage_dealt,
            skills: loadout
                .skills()
                .map(|s| s.name().to_owned())
                .chain(loadout.ultimate().map(|u| u.name().to_owned()))
                .collect(),
        }
    }
}

/// Writes the profile and flushes the store. A failed flush is logged and the
/// run continues.
fn persist(profile: &ProgressProfile, store: &mut dyn ProgressStore) {
    profile.write(store);
    if let Err(err) = store.save() {
        tracing::warn!(%err, "failed to save progress");
    }
}

/// Real-time combat simulation over one run at a time.
pub struct Simulation {
    definitions: Arc<dyn DefinitionOracle>,
    query: Box<dyn TargetQuery>,
    store: Box<dyn ProgressStore>,
    dice: Dice,
    base_seed: u64,
    runs_started: u64,
    config: CombatConfig,
    affinity: AffinityTable,
    run: Option<Run>,
}

impl Simulation {
    pub fn new(context: SimulationContext) -> Self {
        let SimulationContext {
            definitions,
            query,
            store,
            rng,
            seed,
        } = context;
        let config = definitions.config().clone();
        Self {
            affinity: AffinityTable::new(config.element_bonus),
            dice: Dice::new(rng, seed),
            base_seed: seed,
            runs_started: 0,
            definitions,
            query,
            store,
            config,
            run: None,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn definitions(&self) -> &Arc<dyn DefinitionOracle> {
        &self.definitions
    }

    pub fn store(&self) -> &dyn ProgressStore {
        &*self.store
    }

    /// True while a run exists and has not finished.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| !r.outcome.is_finished())
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.run.as_ref().map(|r| &r.outcome)
    }

    pub fn time(&self) -> f32 {
        self.run.as_ref().map_or(0.0, |r| r.time)
    }

    /// Seed of the current run.
    pub fn run_seed(&self) -> Option<u64> {
        self.run.as_ref().map(|r| r.seed)
    }

    pub fn player(&self) -> Option<&Player> {
        self.run.as_ref().map(|r| &r.player)
    }

    pub fn enemies(&self) -> Option<&EnemyRoster> {
        self.run.as_ref().map(|r| &r.enemies)
    }

    pub fn stage(&self) -> Option<&StageDefinition> {
        self.run.as_ref().map(|r| &r.stage)
    }

    /// Choices from the most recent level-up, cleared once a skill is acquired.
    pub fn offer(&self) -> &[String] {
        self.run
            .as_ref()
            .map(|r| r.offer.as_slice())
            .unwrap_or(&[])
    }

    pub fn profile(&self) -> Option<&ProgressProfile> {
        self.run.as_ref().map(|r| &r.profile)
    }

    /// Starts a run: builds the player, grants starting skills and loads the
    /// progress profile.
    ///
    /// A finished run that was never ended is discarded.
    pub fn start_run(
        &mut self,
        character_id: &str,
        stage_id: &str,
    ) -> Result<Vec<CombatEvent>, EngineError> {
        if self.is_running() {
            return Err(EngineError::RunInProgress);
        }
        let character = self
            .definitions
            .character(character_id)
            .ok_or_else(|| EngineError::UnknownCharacter(character_id.to_owned()))?
            .clone();
        let stage = self
            .definitions
            .stage(stage_id)
            .ok_or_else(|| EngineError::UnknownStage(stage_id.to_owned()))?
            .clone();

        let mut stats = CharacterStats::new(character.stats.clone(), self.config.xp_threshold(1));
        let mut loadout = SkillLoadout::new(self.config.min_cooldown);
        let mut events = Vec::new();
        for name in &character.starting_skills {
            let definition =
                self.definitions
                    .skill(name)
                    .ok_or_else(|| EngineError::UnknownStartingSkill {
                        character: character.id.clone(),
                        skill: name.clone(),
                    })?;
            let acquired = loadout
                .try_acquire(definition, &mut stats)
                .map_err(EngineError::StartingSkill)?;
            events.push(CombatEvent::SkillAcquired {
                skill: acquired.skill,
                category: acquired.category,
            });
        }

        self.store.load()?;
        let skills = self.definitions.skills();
        let stages = self.definitions.stage_ids();
        let profile = ProgressProfile::read(
            &*self.store,
            skills.iter().map(|s| s.name.as_str()),
            stages.iter().map(String::as_str),
        );

        let seed = compute_seed(self.base_seed, self.runs_started, 0, 0);
        self.runs_started += 1;
        self.dice.reseed(seed);

        tracing::info!(
            character = %character.id,
            stage = %stage.id,
            seed,
            coins = profile.coins,
            "run started"
        );
        self.run = Some(Run {
            character: character.id,
            waves: WaveSchedule::new(&stage.waves),
            stage,
            seed,
            time: 0.0,
            player: Player::new(stats, loadout),
            enemies: EnemyRoster::new(),
            scheduler: PassiveScheduler::new(),
            profile,
            outcome: RunOutcome::InProgress,
            offer: Vec::new(),
            kills: 0,
            coins: 0,
            damage_dealt: 0.0,
        });
        Ok(events)
    }

    /// Advances the run by `dt` seconds.
    ///
    /// A finished run no longer changes; its ticks return no events.
    pub fn tick(&mut self, dt: f32) -> Result<Vec<CombatEvent>, EngineError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(EngineError::InvalidDelta(dt));
        }
        let Self {
            definitions,
            query,
            store,
            dice,
            config,
            affinity,
            run,
            ..
        } = self;
        let run = run.as_mut().ok_or(EngineError::NoActiveRun)?;
        if run.outcome.is_finished() {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        run.time += dt;
        let now = run.time;
        run.player.advance(dt);

        run.player.stats.expire_buffs(now);
        run.player.loadout.expire_modifiers(now);
        for enemy in run.enemies.iter_mut() {
            enemy.status.remove_expired(now);
        }

        run.player.loadout.tick_cooldowns(dt);

        if let Some(ultimate) = run.player.loadout.ultimate_mut()
            && ultimate.tick(dt)
        {
            events.push(CombatEvent::UltimateReady {
                skill: ultimate.name().to_owned(),
            });
        }

        query.rebuild(&run.enemies);
        let fired = run.scheduler.tick(
            dt,
            run.player.stats.attack_interval(),
            run.player.stats.defense_interval(),
        );
        let view = run.player.view();
        {
            let player = &mut run.player;
            let mut ctx = HitContext {
                now,
                config: &*config,
                affinity: *affinity,
                enemies: &mut run.enemies,
                query: &**query,
                dice: &mut *dice,
                events: &mut events,
            };
            if fired.attack {
                scheduler::fire(
                    SkillCategory::Attack,
                    &mut player.loadout,
                    &mut player.stats,
                    &view,
                    &mut ctx,
                );
            }
            if fired.defense {
                scheduler::fire(
                    SkillCategory::Defense,
                    &mut player.loadout,
                    &mut player.stats,
                    &view,
                    &mut ctx,
                );
            }
            scheduler::tick_projectiles(
                dt,
                &mut player.loadout,
                &mut player.stats,
                &view,
                &mut ctx,
            );
        }

        run.spawn_waves(&**definitions, dice);

        chase(&mut run.enemies, run.player.position(), dt, now);
        for hit in contact_hits(
            &mut run.enemies,
            run.player.position(),
            config.player_radius,
            dt,
        ) {
            let taken = run
                .player
                .stats
                .take_damage(hit.damage, config.defense_mitigation);
            if taken.applied > 0.0 {
                events.push(CombatEvent::PlayerDamaged {
                    source: hit.enemy,
                    amount: taken.applied,
                    health: taken.health_after,
                });
            }
            if taken.died {
                let level = run.player.stats.level();
                run.player.loadout.clear_projectiles();
                run.outcome = RunOutcome::Died;
                events.push(CombatEvent::PlayerDied { level, time: now });
                tracing::info!(level, time = now, kills = run.kills, "player died");
                break;
            }
        }
        if run.outcome.is_finished() {
            run.tally(&events);
            return Ok(events);
        }

        let mut xp = 0.0;
        for enemy in run.enemies.remove_dead() {
            run.kills += 1;
            run.coins += enemy.coin_reward;
            run.profile.coins += i64::from(enemy.coin_reward);
            xp += enemy.xp_reward;
            events.push(CombatEvent::EnemyKilled {
                target: enemy.id,
                template: enemy.template,
                xp: enemy.xp_reward,
                coins: enemy.coin_reward,
            });
        }
        if xp > 0.0 {
            let levels = run.player.stats.gain_xp(xp, config);
            if let Some(&level) = levels.last() {
                events.extend(levels.iter().map(|&level| CombatEvent::LevelUp { level }));
                run.offer = build_offer(
                    &**definitions,
                    &run.player.loadout,
                    &run.player.stats,
                    &run.profile,
                    dice,
                    config.offer_size,
                );
                if !run.offer.is_empty() {
                    events.push(CombatEvent::SkillOffer {
                        choices: run.offer.clone(),
                    });
                }
                run.profile.record_level(level);
                persist(&run.profile, &mut **store);
                tracing::info!(level, offer = ?run.offer, "level up");
            }
        }

        run.player.stats.tick_regen(dt);

        if now >= run.stage.duration {
            let next_stage = run.stage.next_stage.clone();
            run.enemies.clear();
            run.player.loadout.clear_projectiles();
            run.profile.unlock_stage(&run.stage.id);
            if let Some(next) = &next_stage {
                run.profile.unlock_stage(next);
            }
            run.profile.last_stage = Some(run.stage.id.clone());
            run.profile.record_level(run.player.stats.level());
            persist(&run.profile, &mut **store);
            events.push(CombatEvent::StageCleared {
                stage: run.stage.id.clone(),
                next_stage: next_stage.clone(),
            });
            tracing::info!(stage = %run.stage.id, next = ?next_stage, kills = run.kills, "stage cleared");
            run.outcome = RunOutcome::Cleared { next_stage };
        }

        run.tally(&events);
        Ok(events)
    }

    /// Applies one player command. A failed command changes nothing.
    ///
    /// A refused skill acquisition is not an error: it yields an
    /// [`CombatEvent::AcquisitionRejected`] event instead.
    pub fn handle(&mut self, command: Command) -> Result<Vec<CombatEvent>, CommandError> {
        let Self {
            definitions,
            query,
            dice,
            config,
            affinity,
            run,
            ..
        } = self;
        let run = run.as_mut().ok_or(CommandError::NoActiveRun)?;
        if run.outcome.is_finished() {
            return Err(CommandError::RunFinished);
        }
        tracing::debug!(command = command.as_str(), time = run.time, "command");

        let mut events = Vec::new();
        match command {
            Command::ActivateUltimate => {
                let player = &mut run.player;
                let view = player.view();
                let ultimate = player
                    .loadout
                    .ultimate_mut()
                    .ok_or(UltimateError::NotEquipped)?;
                query.rebuild(&run.enemies);
                let mut ctx = HitContext {
                    now: run.time,
                    config: &*config,
                    affinity: *affinity,
                    enemies: &mut run.enemies,
                    query: &**query,
                    dice: &mut *dice,
                    events: &mut events,
                };
                ultimate.activate(&mut player.stats, &view, &mut ctx)?;
            }
            Command::ToggleSkill(index) => {
                let loadout = &mut run.player.loadout;
                let count = loadout.len();
                loadout
                    .toggle(index)
                    .ok_or(CommandError::InvalidSkillIndex { index, count })?;
            }
            Command::ChangeElement(element) => {
                run.player.stats.set_element(element);
                tracing::debug!(%element, "element changed");
            }
            Command::AcquireSkill(name) => {
                let definition = definitions
                    .skill(&name)
                    .ok_or_else(|| CommandError::UnknownSkill(name.clone()))?;
                match run
                    .player
                    .loadout
                    .try_acquire(definition, &mut run.player.stats)
                {
                    Ok(acquired) => {
                        run.offer.clear();
                        events.push(CombatEvent::SkillAcquired {
                            skill: acquired.skill,
                            category: acquired.category,
                        });
                    }
                    Err(err) => events.push(CombatEvent::AcquisitionRejected {
                        skill: name,
                        reason: err.to_string(),
                    }),
                }
            }
            Command::ApplyModifier(modifier) => {
                modifier.validate()?;
                let affected = run.player.loadout.add_modifier(&modifier, run.time);
                events.push(CombatEvent::ModifierAcquired {
                    modifier: modifier.name,
                    target: modifier.target,
                    affected,
                });
            }
            Command::SetMovement(direction) => {
                if !run.player.set_movement(direction) {
                    return Err(CommandError::InvalidMovement);
                }
            }
        }

        run.tally(&events);
        Ok(events)
    }

    /// Ends the run: cancels pending buff reverts, destroys live projectiles
    /// and saves the profile.
    pub fn end_run(&mut self) -> Result<RunSummary, EngineError> {
        let mut run = self.run.take().ok_or(EngineError::NoActiveRun)?;
        if !run.outcome.is_finished() {
            run.outcome = RunOutcome::Abandoned;
        }
        run.player.stats.clear_buffs();
        run.player.loadout.clear_projectiles();
        run.enemies.clear();

        run.profile.record_level(run.player.stats.level());
        run.profile.write(&mut *self.store);
        self.store.save()?;

        let summary = run.summary();
        tracing::info!(
            outcome = ?summary.outcome,
            level = summary.level,
            kills = summary.kills,
            coins = summary.coins,
            "run ended"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests;
