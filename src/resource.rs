// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed snapshots of bridge resources.
//!
//! These structs deserialize the documents returned by `/lights/{id}` and
//! `/groups/{id}`. Parsing is deliberately lenient: bridges of different
//! firmware generations include different fields, so everything beyond
//! the core state is optional and unknown fields are ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// A light as reported by the bridge.
///
/// # Examples
///
/// ```
/// use huelink::Light;
///
/// let json = r#"{
///     "state": {"on": true, "sat": 120, "hue": 10000, "reachable": true},
///     "type": "Extended color light",
///     "name": "Desk",
///     "modelid": "LCT007",
///     "bri": 200
/// }"#;
/// let light: Light = serde_json::from_str(json).unwrap();
/// assert!(light.is_on());
/// assert_eq!(light.name(), Some("Desk"));
/// assert_eq!(light.brightness(), Some(200));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Light {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    light_type: Option<String>,
    #[serde(default)]
    modelid: Option<String>,
    #[serde(default)]
    uniqueid: Option<String>,
    #[serde(default)]
    state: LightState,
    #[serde(default)]
    bri: Option<u8>,
}

impl Light {
    /// Returns the user-assigned name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the light type, e.g. `"Extended color light"`.
    #[must_use]
    pub fn light_type(&self) -> Option<&str> {
        self.light_type.as_deref()
    }

    /// Returns the hardware model id.
    #[must_use]
    pub fn modelid(&self) -> Option<&str> {
        self.modelid.as_deref()
    }

    /// Returns the unique id (usually the Zigbee MAC plus endpoint).
    #[must_use]
    pub fn uniqueid(&self) -> Option<&str> {
        self.uniqueid.as_deref()
    }

    /// Returns the reported state.
    #[must_use]
    pub fn state(&self) -> &LightState {
        &self.state
    }

    /// Returns whether the light is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.on
    }

    /// Returns the brightness, if reported.
    ///
    /// Some firmware versions report brightness at the document root, the
    /// rest inside `state`; the root value wins when both are present.
    #[must_use]
    pub fn brightness(&self) -> Option<u8> {
        self.bri.or(self.state.bri)
    }
}

/// The `state` object of a light document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LightState {
    #[serde(default)]
    on: bool,
    #[serde(default)]
    bri: Option<u8>,
    #[serde(default)]
    hue: Option<u16>,
    #[serde(default)]
    sat: Option<u8>,
    #[serde(default)]
    reachable: Option<bool>,
}

impl LightState {
    /// Returns whether the light is on.
    #[must_use]
    pub fn on(&self) -> bool {
        self.on
    }

    /// Returns the brightness (1-254), if reported.
    #[must_use]
    pub fn bri(&self) -> Option<u8> {
        self.bri
    }

    /// Returns the hue (0-65535), if reported.
    #[must_use]
    pub fn hue(&self) -> Option<u16> {
        self.hue
    }

    /// Returns the saturation (0-254), if reported.
    #[must_use]
    pub fn sat(&self) -> Option<u8> {
        self.sat
    }

    /// Returns whether the bridge can currently reach the light.
    #[must_use]
    pub fn reachable(&self) -> Option<bool> {
        self.reachable
    }
}

/// A group of lights as reported by the bridge.
///
/// # Examples
///
/// ```
/// use huelink::Group;
///
/// let json = r#"{
///     "name": "Kitchen",
///     "lights": ["1", "4"],
///     "type": "Room",
///     "state": {"any_on": true, "all_on": false},
///     "action": {"on": true, "bri": 180}
/// }"#;
/// let group: Group = serde_json::from_str(json).unwrap();
/// assert!(group.any_on());
/// assert_eq!(group.lights(), ["1", "4"]);
/// assert_eq!(group.brightness(), Some(180));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    lights: Vec<String>,
    #[serde(rename = "type", default)]
    group_type: Option<String>,
    #[serde(default)]
    state: GroupState,
    #[serde(default)]
    action: Option<GroupAction>,
}

impl Group {
    /// Returns the user-assigned name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the ids of the member lights.
    #[must_use]
    pub fn lights(&self) -> &[String] {
        &self.lights
    }

    /// Returns the group type, e.g. `"Room"`.
    #[must_use]
    pub fn group_type(&self) -> Option<&str> {
        self.group_type.as_deref()
    }

    /// Returns the aggregated state.
    #[must_use]
    pub fn state(&self) -> &GroupState {
        &self.state
    }

    /// Returns the last action applied to the group, if reported.
    #[must_use]
    pub fn action(&self) -> Option<&GroupAction> {
        self.action.as_ref()
    }

    /// Returns whether any member light is on.
    #[must_use]
    pub fn any_on(&self) -> bool {
        self.state.any_on
    }

    /// Returns the brightness of the last group action, if reported.
    #[must_use]
    pub fn brightness(&self) -> Option<u8> {
        self.action.as_ref().and_then(|action| action.bri)
    }
}

/// The aggregated `state` object of a group document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupState {
    #[serde(default)]
    any_on: bool,
    #[serde(default)]
    all_on: Option<bool>,
}

impl GroupState {
    /// Returns whether any member light is on.
    #[must_use]
    pub fn any_on(&self) -> bool {
        self.any_on
    }

    /// Returns whether all member lights are on, if reported.
    #[must_use]
    pub fn all_on(&self) -> Option<bool> {
        self.all_on
    }
}

/// The `action` object of a group document, the state last written to
/// the group as a whole.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupAction {
    #[serde(default)]
    on: Option<bool>,
    #[serde(default)]
    bri: Option<u8>,
    #[serde(default)]
    hue: Option<u16>,
    #[serde(default)]
    sat: Option<u8>,
}

impl GroupAction {
    /// Returns the power value of the last action.
    #[must_use]
    pub fn on(&self) -> Option<bool> {
        self.on
    }

    /// Returns the brightness of the last action.
    #[must_use]
    pub fn bri(&self) -> Option<u8> {
        self.bri
    }

    /// Returns the hue of the last action.
    #[must_use]
    pub fn hue(&self) -> Option<u16> {
        self.hue
    }

    /// Returns the saturation of the last action.
    #[must_use]
    pub fn sat(&self) -> Option<u8> {
        self.sat
    }
}

#[derive(Debug, Deserialize)]
struct BridgeError {
    #[serde(rename = "type", default)]
    kind: u16,
    #[serde(default)]
    address: String,
    #[serde(default)]
    description: String,
}

/// Extracts the first error from a bridge response body.
///
/// The bridge reports failures inside an HTTP 200 as an array of
/// `{"error": {...}}` objects, e.g. when an id does not exist:
///
/// ```json
/// [{"error": {"type": 3, "address": "/lights/99", "description": "resource, /lights/99, not available"}}]
/// ```
///
/// Returns `None` for entity documents and for all-success arrays.
pub(crate) fn first_bridge_error(body: &Value) -> Option<ApiError> {
    let items = body.as_array()?;
    items.iter().find_map(|item| {
        let error = item.get("error")?;
        let parsed: BridgeError = serde_json::from_value(error.clone()).ok()?;
        Some(ApiError {
            kind: parsed.kind,
            address: parsed.address,
            description: parsed.description,
        })
    })
}
