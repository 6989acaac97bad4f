//! # Hellgate Gameplay
//!
//! Per-tick simulation of mobile objects:
//! - Movement integration (friction, stop speed, gravity, ceiling clamp)
//! - Damage resolution (armor absorption, knockback, death transition)
//! - Sound distance attenuation
//! - Arena storage and the event queue
//! - Simulation context tying the above together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod damage;
pub mod entity;
pub mod events;
pub mod movement;
pub mod simulation;
pub mod sound;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::damage::*;
    pub use crate::entity::*;
    pub use crate::events::*;
    pub use crate::movement::*;
    pub use crate::simulation::*;
    pub use crate::sound::*;
}

pub use prelude::*;
