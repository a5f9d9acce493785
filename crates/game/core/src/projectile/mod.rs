//! Projectile behaviors.
//!
//! Each controller exclusively owns its projectile instances. Controllers read
//! the owner through an [`OwnerView`](crate::world::OwnerView) snapshot and
//! reach enemies only through the [`HitContext`](crate::world::HitContext)
//! passed to each call.

pub mod boomerang;
pub mod orbit;
pub mod targeting;

pub use boomerang::{Boomerang, BoomerangController, BoomerangPhase, Catch};
pub use orbit::{OrbitController, OrbitPhase, OrbitingProjectile};

use crate::combat::CritProfile;
use crate::element::Element;

/// Damage snapshot a projectile carries from the moment it was spawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Payload {
    pub damage: f32,
    pub element: Element,
    pub crit: CritProfile,
}
