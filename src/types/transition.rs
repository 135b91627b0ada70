// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transition time type.
//!
//! The bridge expresses transition times in multiples of 100 ms
//! ("deciseconds"). Any `u16` is accepted, so construction is infallible;
//! the type exists for the unit conversion.

use std::fmt;
use std::time::Duration;

/// Transition time for a state change, in 100 ms steps.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use huelink::types::Transition;
///
/// // The bridge default: 400 ms
/// assert_eq!(Transition::DEFAULT.deciseconds(), 4);
///
/// let slow = Transition::from_duration(Duration::from_secs(3));
/// assert_eq!(slow.deciseconds(), 30);
/// assert_eq!(slow.as_duration(), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition(u16);

impl Transition {
    /// Instant change, no fade.
    pub const INSTANT: Self = Self(0);

    /// The bridge's default transition of 400 ms.
    pub const DEFAULT: Self = Self(4);

    /// Creates a transition time from a raw decisecond count.
    #[must_use]
    pub const fn new(deciseconds: u16) -> Self {
        Self(deciseconds)
    }

    /// Creates a transition time from a `Duration`, rounded to the nearest
    /// 100 ms and saturating at the bridge's maximum (a little under two
    /// hours).
    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        let deciseconds = (duration.as_millis() + 50) / 100;
        Self(u16::try_from(deciseconds).unwrap_or(u16::MAX))
    }

    /// Returns the raw decisecond count.
    #[must_use]
    pub const fn deciseconds(&self) -> u16 {
        self.0
    }

    /// Returns the transition time as a `Duration`.
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.0) * 100)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", u32::from(self.0) * 100)
    }
}

impl From<u16> for Transition {
    fn from(deciseconds: u16) -> Self {
        Self(deciseconds)
    }
}
