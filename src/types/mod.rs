// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Hue light control.
//!
//! This module provides type-safe representations of values used in bridge
//! commands. Each type ensures values are within their valid ranges at
//! construction time, preventing rejected writes.
//!
//! # Types
//!
//! - [`Brightness`] - brightness level (1-254)
//! - [`Saturation`] - color saturation (0-254)
//! - [`Transition`] - transition time in 100 ms steps
//!
//! The hue angle itself spans the full `u16` range (0-65535 maps to
//! 0-360 degrees) and needs no constrained wrapper.

mod brightness;
mod saturation;
mod transition;

pub use brightness::Brightness;
pub use saturation::Saturation;
pub use transition::Transition;
