// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for light level control.
//!
//! The bridge accepts brightness values between 1 and 254. Zero is not a
//! valid level; turning a light off is a power command, not a brightness
//! of zero.

use std::fmt;

use crate::error::ValueError;

/// Brightness level (1-254).
///
/// # Examples
///
/// ```
/// use huelink::types::Brightness;
///
/// let bri = Brightness::new(200).unwrap();
/// assert_eq!(bri.value(), 200);
///
/// let dim = Brightness::MIN;
/// let full = Brightness::MAX;
/// assert_eq!(dim.value(), 1);
/// assert_eq!(full.value(), 254);
///
/// // Invalid values return error
/// assert!(Brightness::new(0).is_err());
/// assert!(Brightness::new(255).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness the bridge accepts.
    pub const MIN: Self = Self(1);

    /// Maximum brightness the bridge accepts.
    pub const MAX: Self = Self(254);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is 0 or 255.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value == 0 || value > 254 {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: 254,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a brightness value, clamping to the valid range.
    ///
    /// 0 becomes 1, 255 becomes 254.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value == 0 {
            Self(1)
        } else if value > 254 {
            Self(254)
        } else {
            Self(value)
        }
    }

    /// Creates a brightness from a percentage (1-100).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the percentage is 0 or above 100.
    ///
    /// # Examples
    ///
    /// ```
    /// use huelink::types::Brightness;
    ///
    /// assert_eq!(Brightness::from_percent(100).unwrap().value(), 254);
    /// assert_eq!(Brightness::from_percent(50).unwrap().value(), 127);
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_percent(percent: u8) -> Result<Self, ValueError> {
        if percent == 0 || percent > 100 {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: 100,
                actual: u16::from(percent),
            });
        }
        // Safe: (100 * 254 + 50) / 100 == 254, which fits in u8
        let value = ((u16::from(percent) * 254 + 50) / 100) as u8;
        Ok(Self::clamped(value))
    }

    /// Returns the raw bridge value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the level as a percentage (0-100), rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_percent(&self) -> u8 {
        // Safe: (254 * 100 + 127) / 254 == 100, which fits in u8
        ((u16::from(self.0) * 100 + 127) / 254) as u8
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/254", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_valid_values() {
        for v in 1..=254 {
            let bri = Brightness::new(v).unwrap();
            assert_eq!(bri.value(), v);
        }
    }

    #[test]
    fn brightness_invalid_values() {
        assert!(Brightness::new(0).is_err());
        assert!(Brightness::new(255).is_err());
    }

    #[test]
    fn brightness_clamped() {
        assert_eq!(Brightness::clamped(0).value(), 1);
        assert_eq!(Brightness::clamped(120).value(), 120);
        assert_eq!(Brightness::clamped(255).value(), 254);
    }

    #[test]
    fn brightness_from_percent() {
        assert_eq!(Brightness::from_percent(1).unwrap().value(), 3);
        assert_eq!(Brightness::from_percent(50).unwrap().value(), 127);
        assert_eq!(Brightness::from_percent(100).unwrap().value(), 254);
    }

    #[test]
    fn brightness_from_percent_invalid() {
        assert!(Brightness::from_percent(0).is_err());
        assert!(Brightness::from_percent(101).is_err());
    }

    #[test]
    fn brightness_as_percent() {
        assert_eq!(Brightness::MAX.as_percent(), 100);
        assert_eq!(Brightness::new(127).unwrap().as_percent(), 50);
    }

    #[test]
    fn brightness_display() {
        assert_eq!(Brightness::new(200).unwrap().to_string(), "200/254");
    }

    #[test]
    fn brightness_ordering() {
        assert!(Brightness::MIN < Brightness::MAX);
        assert!(Brightness::new(100).unwrap() < Brightness::new(200).unwrap());
    }
}
