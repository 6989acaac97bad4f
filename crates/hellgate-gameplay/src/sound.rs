//! Distance attenuation for positioned sounds.
//!
//! Distance is approximated without a square root (larger delta plus half
//! the smaller) and mapped to a linear volume falloff. The result is a
//! [`SoundRequest`] value handed to a [`SoundOutput`]; channel allocation
//! and mixing live behind that trait.

use hellgate_common::{Fixed, SoundId};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entity::MobileObject;

/// Volume of a sound at zero distance.
pub const MAX_VOLUME: u8 = 127;

/// Centered stereo separation.
pub const NORM_SEPARATION: u8 = 128;

/// Unshifted pitch.
pub const NORM_PITCH: u8 = 128;

/// Approximate planar distance between two points given their deltas.
///
/// Returns `max(|dx|, |dy|) + min(|dx|, |dy|) / 2`, halving by right shift.
#[must_use]
pub const fn approximate_distance(dx: i32, dy: i32) -> u32 {
    let dx = dx.unsigned_abs();
    let dy = dy.unsigned_abs();

    if dx < dy {
        dy + (dx >> 1)
    } else {
        dx + (dy >> 1)
    }
}

/// Linear volume falloff. `None` when `distance >= max_distance`.
#[must_use]
pub fn volume_for_distance(distance: u32, max_distance: u32) -> Option<u8> {
    if distance >= max_distance {
        return None;
    }

    let remaining = u64::from(max_distance - distance);
    let volume = u64::from(MAX_VOLUME) * remaining / u64::from(max_distance);
    Some(volume as u8)
}

/// A point on the map plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPoint {
    /// X position
    pub x: Fixed,
    /// Y position
    pub y: Fixed,
}

impl MapPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Approximate distance to another point in whole map units.
    ///
    /// Deltas saturate, so points more than 32767 units apart read as at
    /// least 32767 apart instead of wrapping close.
    #[must_use]
    pub fn approx_distance_to(self, other: Self) -> u32 {
        let dx = Fixed::from_raw(self.x.raw().saturating_sub(other.x.raw()));
        let dy = Fixed::from_raw(self.y.raw().saturating_sub(other.y.raw()));
        approximate_distance(dx.to_int(), dy.to_int())
    }
}

impl From<&MobileObject> for MapPoint {
    fn from(mobj: &MobileObject) -> Self {
        Self::new(mobj.x, mobj.y)
    }
}

/// Caller-supplied parameters of a sound trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundParams {
    /// Sound effect to play
    pub sound_id: SoundId,
    /// Stereo separation, 128 = centered
    pub separation: u8,
    /// Pitch, 128 = unshifted
    pub pitch: u8,
    /// Channel priority
    pub priority: i32,
}

impl SoundParams {
    /// Centered, unshifted sound with the given priority.
    #[must_use]
    pub const fn new(sound_id: SoundId, priority: i32) -> Self {
        Self {
            sound_id,
            separation: NORM_SEPARATION,
            pitch: NORM_PITCH,
            priority,
        }
    }
}

/// A sound ready for the low-level output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundRequest {
    /// Sound effect to play
    pub sound_id: SoundId,
    /// Volume, 0..=127
    pub volume: u8,
    /// Stereo separation
    pub separation: u8,
    /// Pitch
    pub pitch: u8,
    /// Channel priority
    pub priority: i32,
}

/// Consumer of sound requests, implemented by the platform audio layer.
pub trait SoundOutput {
    /// Starts playing a sound.
    fn start_sound(&mut self, request: &SoundRequest);
}

/// Records requests, for tests and replays.
impl SoundOutput for Vec<SoundRequest> {
    fn start_sound(&mut self, request: &SoundRequest) {
        self.push(*request);
    }
}

/// Builds the request for a sound at `origin` heard from `listener`.
#[must_use]
pub fn attenuate(
    listener: MapPoint,
    origin: MapPoint,
    params: &SoundParams,
    max_distance: u32,
) -> Option<SoundRequest> {
    let distance = listener.approx_distance_to(origin);
    let Some(volume) = volume_for_distance(distance, max_distance) else {
        trace!(
            sound = params.sound_id.raw(),
            distance,
            max_distance,
            "sound out of range"
        );
        return None;
    };

    Some(SoundRequest {
        sound_id: params.sound_id,
        volume,
        separation: params.separation,
        pitch: params.pitch,
        priority: params.priority,
    })
}

/// Attenuates and dispatches a sound. Returns the dispatched request.
pub fn start_positional_sound<O: SoundOutput + ?Sized>(
    listener: MapPoint,
    origin: MapPoint,
    params: &SoundParams,
    max_distance: u32,
    output: &mut O,
) -> Option<SoundRequest> {
    let request = attenuate(listener, origin, params, max_distance)?;
    output.start_sound(&request);
    Some(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: i32, y: i32) -> MapPoint {
        MapPoint::new(Fixed::from_int(x), Fixed::from_int(y))
    }

    #[test]
    fn test_approximate_distance() {
        assert_eq!(approximate_distance(3, 4), 5);
        assert_eq!(approximate_distance(4, 3), 5);
        assert_eq!(approximate_distance(0, 0), 0);
        assert_eq!(approximate_distance(-10, 0), 10);
        assert_eq!(approximate_distance(-7, -7), 10);
        assert_eq!(approximate_distance(1, 1), 1);
    }

    #[test]
    fn test_approximate_distance_extremes() {
        assert_eq!(approximate_distance(i32::MIN, 0), 1 << 31);
        assert_eq!(approximate_distance(i32::MIN, i32::MIN), 3 << 30);
    }

    #[test]
    fn test_volume_for_distance() {
        assert_eq!(volume_for_distance(0, 1000), Some(127));
        assert_eq!(volume_for_distance(500, 1000), Some(63));
        assert_eq!(volume_for_distance(999, 1000), Some(0));
        assert_eq!(volume_for_distance(1000, 1000), None);
        assert_eq!(volume_for_distance(5000, 1000), None);
        assert_eq!(volume_for_distance(0, 0), None);
    }

    #[test]
    fn test_volume_large_range() {
        assert_eq!(volume_for_distance(0, u32::MAX), Some(127));
    }

    #[test]
    fn test_attenuate_builds_request() {
        let params = SoundParams {
            sound_id: SoundId::new(12),
            separation: 64,
            pitch: 140,
            priority: 70,
        };
        let request =
            attenuate(point(0, 0), point(300, 400), &params, 1200).expect("should be audible");

        // 400 + 150 = 550; 127 * 650 / 1200 = 68
        assert_eq!(request.volume, 68);
        assert_eq!(request.sound_id, SoundId::new(12));
        assert_eq!(request.separation, 64);
        assert_eq!(request.pitch, 140);
        assert_eq!(request.priority, 70);
    }

    #[test]
    fn test_fractional_deltas_truncate() {
        let listener = MapPoint::new(Fixed::from_raw(0x18000), Fixed::ZERO);
        let origin = MapPoint::default();
        assert_eq!(listener.approx_distance_to(origin), 1);
    }

    #[test]
    fn test_far_points_do_not_wrap() {
        let params = SoundParams::new(SoundId::new(4), 64);
        let west = point(-20_000, 0);
        let east = point(20_000, 0);

        assert_eq!(west.approx_distance_to(east), 32_768);
        assert_eq!(east.approx_distance_to(west), 32_767);
        assert!(attenuate(west, east, &params, 1200).is_none());
        assert!(attenuate(east, west, &params, 1200).is_none());
    }

    #[test]
    fn test_start_positional_sound_dispatches() {
        let mut output: Vec<SoundRequest> = Vec::new();
        let params = SoundParams::new(SoundId::new(1), 64);

        let near = start_positional_sound(point(0, 0), point(0, 0), &params, 1200, &mut output);
        assert_eq!(near.map(|r| r.volume), Some(127));

        let far = start_positional_sound(point(0, 0), point(1200, 0), &params, 1200, &mut output);
        assert!(far.is_none());

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].separation, NORM_SEPARATION);
    }
}
