//! Rigid-body simulation for loose props, using Rapier3D.
//!
//! The character controller never reads from this world; props only share the
//! frame loop with it.

pub mod collision;
pub mod physics_world;
pub mod props;

pub use collision::*;
pub use physics_world::*;
pub use props::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
