//! Per-tick movement integration.
//!
//! Friction is a fixed multiplicative factor applied once per tick and
//! gravity a single subtraction per tick. Neither is scaled by elapsed
//! time; the tick is the unit of time.

use hellgate_common::Fixed;

use crate::config::SimConfig;
use crate::entity::MobileObject;

/// Applies friction to horizontal momentum.
///
/// Projectiles keep their momentum. Otherwise both axes are scaled by
/// `config.friction`, and if both land strictly below `config.stop_speed`
/// in magnitude both are zeroed.
pub fn xy_movement(mobj: &mut MobileObject, config: &SimConfig) {
    if mobj.is_missile() {
        return;
    }

    mobj.momx = mobj.momx.fixed_mul(config.friction);
    mobj.momy = mobj.momy.fixed_mul(config.friction);

    if mobj.momx.abs() < config.stop_speed && mobj.momy.abs() < config.stop_speed {
        mobj.momx = Fixed::ZERO;
        mobj.momy = Fixed::ZERO;
    }
}

/// Applies gravity, or lands the object on its floor.
pub fn z_movement(mobj: &mut MobileObject, config: &SimConfig) {
    if mobj.z > mobj.floorz {
        mobj.momz -= config.gravity;
    } else {
        mobj.z = mobj.floorz;
        mobj.momz = Fixed::ZERO;
    }
}

/// Moves the object by its momentum.
///
/// A position above `ceilingz` is clamped to it and upward momentum is
/// dropped. Floor contact is left to [`z_movement`].
pub fn advance_position(mobj: &mut MobileObject) {
    mobj.x += mobj.momx;
    mobj.y += mobj.momy;
    mobj.z += mobj.momz;

    if mobj.z > mobj.ceilingz {
        mobj.z = mobj.ceilingz;
        if mobj.momz > Fixed::ZERO {
            mobj.momz = Fixed::ZERO;
        }
    }
}

/// One full tick for a single object: position, friction, gravity.
pub fn step(mobj: &mut MobileObject, config: &SimConfig) {
    advance_position(mobj);
    xy_movement(mobj, config);
    z_movement(mobj, config);
}
