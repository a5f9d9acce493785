//! Deterministic combat and skill simulation for an action-survival game.
//!
//! `skirmish-core` defines the canonical rules (elements, stats, skills,
//! ultimate, damage, projectiles, enemies) and exposes pure APIs driven by
//! explicit `tick(dt)` calls. All run state lives in [`engine::Simulation`];
//! external collaborators (content, persistence, spatial queries, randomness)
//! are reached only through the traits in [`env`].
pub mod combat;
pub mod config;
pub mod definitions;
pub mod element;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod projectile;
pub mod scheduler;
pub mod skill;
pub mod stats;
pub mod ultimate;
pub mod world;

pub use combat::{CritProfile, ResolvedHit, StatusEffectKind, mitigate, resolve_hit};
pub use config::{CombatConfig, LevelGrowth};
pub use definitions::{CharacterDefinition, EnemyTemplate, StageDefinition, WaveDefinition};
pub use element::{AffinityTable, Element};
pub use engine::{
    Command, CommandError, EngineError, Player, RunOutcome, RunSummary, Simulation,
    SimulationContext,
};
pub use env::{
    DefinitionError, DefinitionOracle, DefinitionSet, Dice, LinearScan, MemoryProgressStore,
    PcgRng, ProgressProfile, ProgressStore, RngOracle, StoreError, TargetQuery, compute_seed,
};
pub use error::{CombatError, ErrorSeverity};
pub use events::CombatEvent;
pub use projectile::{BoomerangController, OrbitController, Payload};
pub use scheduler::{Fired, PassiveScheduler};
pub use skill::{
    AcquireError, Acquired, AcquiredSkill, BehaviorController, BoomerangParams, OrbitParams,
    Rarity, SkillBehavior, SkillCategory, SkillDefinition, SkillLoadout, SkillModifier, SpawnMode,
    TargetingMode, UltimateParams,
};
pub use stats::{BaseStats, Bonus, BuffSource, CharacterStats, StatBonuses, StatKind, TimedBuff};
pub use ultimate::{UltimateError, UltimatePhase, UltimateState};
pub use world::{Enemy, EnemyId, EnemyRoster, HitContext, OwnerView, Vec2};
