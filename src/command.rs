// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change commands.
//!
//! A [`StateCommand`] is the JSON body of a PUT to a light's `state`
//! endpoint or a group's `action` endpoint. Only the populated fields are
//! serialized, so the same type covers everything from a bare power flip
//! (`{"on": true}`) to a full color program with a fade.
//!
//! Commands are ephemeral: built per call, serialized, and discarded.
//!
//! # Examples
//!
//! ```
//! use huelink::command::StateCommand;
//! use huelink::types::{Brightness, Saturation, Transition};
//!
//! // A full write: power, saturation, brightness and hue
//! let cmd = StateCommand::new(
//!     true,
//!     Saturation::new(50).unwrap(),
//!     Brightness::new(200).unwrap(),
//!     10_000,
//! );
//! let body = serde_json::to_value(&cmd).unwrap();
//! assert_eq!(
//!     body,
//!     serde_json::json!({"sat": 50, "on": true, "bri": 200, "hue": 10_000})
//! );
//!
//! // A bare power flip
//! let off = StateCommand::power(false);
//! assert_eq!(serde_json::to_value(&off).unwrap(), serde_json::json!({"on": false}));
//!
//! // Optional fade
//! let faded = cmd.with_transition(Transition::new(10));
//! assert_eq!(faded.transition_time(), Some(10));
//! ```

use serde::Serialize;

use crate::types::{Brightness, Saturation, Transition};

/// The JSON payload of a state or action write.
///
/// Fields left unset are omitted from the serialized body entirely; the
/// bridge treats absent fields as "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    sat: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transitiontime: Option<u16>,
}

impl StateCommand {
    /// Creates a full state write with power, saturation, brightness and
    /// hue.
    ///
    /// The hue angle spans the full `u16` range (0-65535 for 0-360
    /// degrees).
    #[must_use]
    pub fn new(on: bool, sat: Saturation, bri: Brightness, hue: u16) -> Self {
        Self {
            sat: Some(sat.value()),
            on: Some(on),
            bri: Some(bri.value()),
            hue: Some(hue),
            transitiontime: None,
        }
    }

    /// Creates a power-only command (`{"on": ...}`).
    #[must_use]
    pub fn power(on: bool) -> Self {
        Self {
            on: Some(on),
            ..Self::default()
        }
    }

    /// Creates a brightness-only command (`{"bri": ...}`).
    #[must_use]
    pub fn brightness(bri: Brightness) -> Self {
        Self {
            bri: Some(bri.value()),
            ..Self::default()
        }
    }

    /// Sets the power field.
    #[must_use]
    pub fn with_on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Sets the brightness field.
    #[must_use]
    pub fn with_brightness(mut self, bri: Brightness) -> Self {
        self.bri = Some(bri.value());
        self
    }

    /// Sets the saturation field.
    #[must_use]
    pub fn with_saturation(mut self, sat: Saturation) -> Self {
        self.sat = Some(sat.value());
        self
    }

    /// Sets the hue field.
    #[must_use]
    pub fn with_hue(mut self, hue: u16) -> Self {
        self.hue = Some(hue);
        self
    }

    /// Sets the transition time for this change.
    #[must_use]
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitiontime = Some(transition.deciseconds());
        self
    }

    /// Returns the power field, if set.
    #[must_use]
    pub fn on(&self) -> Option<bool> {
        self.on
    }

    /// Returns the raw brightness field, if set.
    #[must_use]
    pub fn bri(&self) -> Option<u8> {
        self.bri
    }

    /// Returns the raw saturation field, if set.
    #[must_use]
    pub fn sat(&self) -> Option<u8> {
        self.sat
    }

    /// Returns the hue field, if set.
    #[must_use]
    pub fn hue(&self) -> Option<u16> {
        self.hue
    }

    /// Returns the transition time in deciseconds, if set.
    #[must_use]
    pub fn transition_time(&self) -> Option<u16> {
        self.transitiontime
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sat.is_none()
            && self.on.is_none()
            && self.bri.is_none()
            && self.hue.is_none()
            && self.transitiontime.is_none()
    }
}
