//! Simulation constants.
//!
//! Friction, stop speed, gravity and the sound clipping distance are fixed
//! for the lifetime of a [`crate::simulation::Simulation`]. They can be
//! loaded from and saved to a TOML file; fixed-point fields are stored as
//! raw integers.

use std::fs;
use std::io;
use std::path::Path;

use hellgate_common::{ConfigError, Fixed};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "hellgate.toml";

/// Per-tick multiplicative friction, ~0.906.
pub const FRICTION: Fixed = Fixed::from_raw(0xE800);

/// Momentum below this on both axes is snapped to zero.
pub const STOPSPEED: Fixed = Fixed::from_raw(0x1000);

/// Subtracted from momz each tick while airborne.
pub const GRAVITY: Fixed = Fixed::ONE;

/// Sounds at or beyond this many map units are inaudible.
pub const CLIPPING_DISTANCE: u32 = 1200;

/// Knockback multiplier applied to `damage * ONE/8 / mass`.
pub const KNOCKBACK_SCALE: i32 = 100;

/// Simulation constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Horizontal friction factor
    pub friction: Fixed,
    /// Stop-speed threshold (per axis, strict less-than)
    pub stop_speed: Fixed,
    /// Gravity decrement per tick
    pub gravity: Fixed,
    /// Maximum audible distance in map units
    pub max_sound_distance: u32,
    /// Knockback multiplier
    pub knockback_scale: i32,
    /// Seed for the pain-roll RNG
    pub rng_seed: u64,
    /// Capacity of the event queue
    pub event_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            stop_speed: STOPSPEED,
            gravity: GRAVITY,
            max_sound_distance: CLIPPING_DISTANCE,
            knockback_scale: KNOCKBACK_SCALE,
            rng_seed: 0,
            event_capacity: 1024,
        }
    }
}

impl SimConfig {
    /// Checks that every constant is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.friction <= Fixed::ZERO || self.friction > Fixed::ONE {
            return Err(ConfigError::FrictionOutOfRange {
                raw: self.friction.raw(),
            });
        }
        if self.stop_speed < Fixed::ZERO {
            return Err(ConfigError::Negative {
                name: "stop_speed",
                raw: self.stop_speed.raw(),
            });
        }
        if self.gravity < Fixed::ZERO {
            return Err(ConfigError::Negative {
                name: "gravity",
                raw: self.gravity.raw(),
            });
        }
        if self.knockback_scale < 0 {
            return Err(ConfigError::Negative {
                name: "knockback_scale",
                raw: self.knockback_scale,
            });
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        Ok(())
    }

    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a specific path.
    /// Returns defaults if the file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match Self::from_toml(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("{e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }
}
