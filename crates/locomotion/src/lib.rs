//! Character locomotion and pose controller.
//!
//! [`PlayerController`] turns held actions and a frame delta into a moving,
//! jumping, crouching character with a procedurally animated skeleton. The
//! resulting pose is projected onto any number of rigs through
//! [`project_pose`] and [`RigDescriptor`].

pub mod config;
pub mod controller;
pub mod gait;
pub mod intent;
pub mod movement;
pub mod rig;
pub mod state;
pub mod yaw;

pub use config::*;
pub use controller::*;
pub use gait::*;
pub use intent::*;
pub use movement::*;
pub use rig::*;
pub use state::*;
pub use yaw::*;
