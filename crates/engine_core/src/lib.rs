//! Core engine types and utilities for Strider.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial components
//! - Wraparound-safe angle math
//! - Frame timing
//! - The terrain query seam shared by the controller and world providers

pub mod angle;
pub mod terrain;
pub mod time;
pub mod transform;

pub use angle::*;
pub use terrain::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
