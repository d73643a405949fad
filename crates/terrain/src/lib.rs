//! Ground height and obstacle providers for the character controller.

pub mod heightmap;
pub mod map;
pub mod obstacles;

pub use heightmap::*;
pub use map::*;
pub use obstacles::*;
