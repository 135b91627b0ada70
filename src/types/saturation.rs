// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Saturation type for color control.

use std::fmt;

use crate::error::ValueError;

/// Color saturation (0-254).
///
/// 0 is white, 254 is the most saturated color the lamp can produce.
///
/// # Examples
///
/// ```
/// use huelink::types::Saturation;
///
/// let sat = Saturation::new(200).unwrap();
/// assert_eq!(sat.value(), 200);
///
/// assert!(Saturation::new(255).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Saturation(u8);

impl Saturation {
    /// Fully desaturated (white).
    pub const MIN: Self = Self(0);

    /// Fully saturated.
    pub const MAX: Self = Self(254);

    /// Creates a new saturation value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is 255.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 254 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 254,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a saturation value, clamping 255 down to 254.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 254 { Self(254) } else { Self(value) }
    }

    /// Returns the raw bridge value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Saturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/254", self.0)
    }
}

impl TryFrom<u8> for Saturation {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
