//! Enemies, waves and the spatial vocabulary shared by every combat system.
mod common;
mod enemy;
mod movement;
mod strike;
mod wave;

pub use common::{EnemyId, Vec2};
pub use enemy::{Enemy, EnemyRoster};
pub use movement::{ContactHit, chase, contact_hits};
pub use strike::{HitContext, OwnerView, Strike};
pub use wave::WaveSchedule;

#[cfg(test)]
pub(crate) use strike::fixtures;
