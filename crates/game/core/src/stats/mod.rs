//! Stat system for the controllable character.
//!
//! # Architecture
//!
//! ```text
//! [ BaseStats ]  ← level-ups, skill acquisition
//!      ↓
//! [ ActiveBuffs ] ← timed buffs (defense skills, ultimate)
//!      ↓
//! [ Effective stats ] = Flat → %Inc → More → Clamp
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: base stats, level, XP and current health only
//! 2. **No stale caches**: effective values are recomputed on every read
//! 3. **Exact reverts**: a timed buff removes exactly its own contribution

pub mod bonus;
pub mod buffs;
pub mod character;
mod leveling;

pub use bonus::{Bonus, BonusStack, StatBounds};
pub use buffs::{ActiveBuffs, BuffSource, StatKind, TimedBuff};
pub use character::{BaseStats, CharacterStats, DamageTaken, StatBonuses};
