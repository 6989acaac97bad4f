//! # Hellgate Common
//!
//! Shared types for the Hellgate simulation crates:
//! - 16.16 fixed-point numbers
//! - ID types (EntityId, SoundId)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod fixed;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::fixed::*;
    pub use crate::ids::*;
}

pub use prelude::*;
