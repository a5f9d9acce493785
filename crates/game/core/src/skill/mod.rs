//! Skills: immutable definitions, modifiers, held state and acquisition.
//!
//! ```text
//! SkillDefinition (Arc, shared) ──try_acquire──► AcquiredSkill ─┬─ modifiers
//!                                                               ├─ cooldown / active flag
//!                                                               └─ BehaviorController
//! ```

pub mod definition;
pub mod modifier;
pub mod offer;

mod acquired;
mod behavior;
mod error;
mod loadout;

pub use acquired::AcquiredSkill;
pub use behavior::BehaviorController;
pub use definition::{
    BoomerangParams, OrbitParams, Rarity, SkillBehavior, SkillCategory, SkillDefinition,
    SkillDefinitionBuilder, SpawnMode, TargetingMode, UltimateParams,
};
pub use error::AcquireError;
pub use loadout::{Acquired, SkillLoadout};
pub use modifier::{AppliedModifier, SkillModifier};
pub use offer::build_offer;
