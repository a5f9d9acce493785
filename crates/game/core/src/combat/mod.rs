//! Damage resolution.
//!
//! Pure functions that turn an attacker-side base value into the final damage
//! a hit carries. The receiver applies its own defense mitigation afterwards.
//!
//! # Core Functions
//!
//! - `resolve_hit`: affinity scaling + crit roll + elemental status
//! - `mitigate`: receiver-side defense reduction
//! - `StatusEffects`: timed elemental statuses carried by enemies

pub mod damage;
pub mod status;

pub use damage::{CritProfile, ResolvedHit, mitigate, resolve_hit};
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
