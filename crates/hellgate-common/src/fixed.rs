//! 16.16 fixed-point numbers.
//!
//! Every fractional quantity in the simulation (positions, momentum, the
//! friction factor) is a [`Fixed`]. Products must go through
//! [`Fixed::fixed_mul`]; a plain integer product of two raw values would be
//! scaled by `ONE` twice.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Signed 16.16 fixed-point value.
///
/// Serializes as its raw `i32` so config files carry exact bit patterns.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 16;

    /// 1.0
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);

    /// 0.0
    pub const ZERO: Self = Self(0);

    /// Largest representable value.
    pub const MAX: Self = Self(i32::MAX);

    /// Smallest representable value.
    pub const MIN: Self = Self(i32::MIN);

    /// Wraps a raw scaled integer.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw scaled integer.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Converts a whole number of map units.
    #[must_use]
    pub const fn from_int(value: i32) -> Self {
        Self(value.wrapping_shl(Self::FRAC_BITS))
    }

    /// Whole map units, truncated toward zero.
    #[must_use]
    pub const fn to_int(self) -> i32 {
        self.0 / Self::ONE.0
    }

    /// Absolute value. `MIN` wraps to itself.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }

    /// Fixed-point product: 64-bit intermediate, shifted back by
    /// `FRAC_BITS`, truncated to 32 bits. No rounding.
    #[must_use]
    pub const fn fixed_mul(self, rhs: Self) -> Self {
        Self(((self.0 as i64 * rhs.0 as i64) >> Self::FRAC_BITS) as i32)
    }

    /// Fixed-point quotient, saturating to `MAX`/`MIN` when the result
    /// does not fit (including division by zero).
    #[must_use]
    pub const fn fixed_div(self, rhs: Self) -> Self {
        if (self.0.unsigned_abs() >> 14) >= rhs.0.unsigned_abs() {
            if (self.0 ^ rhs.0) < 0 {
                Self::MIN
            } else {
                Self::MAX
            }
        } else {
            Self((((self.0 as i64) << Self::FRAC_BITS) / rhs.0 as i64) as i32)
        }
    }

    /// Like [`Fixed::fixed_div`] but `None` for a zero divisor.
    #[must_use]
    pub const fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.0 == 0 {
            None
        } else {
            Some(self.fixed_div(rhs))
        }
    }
}

impl Add for Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fixed {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}
