// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The blocking Hue bridge client.

use reqwest::blocking::Client;
use serde_json::{Value, json};

use crate::cache::{EntityKind, ResponseCache};
use crate::command::StateCommand;
use crate::config::BridgeConfig;
use crate::error::{Error, ParseError, Result};
use crate::resource::{Group, Light, first_bridge_error};
use crate::types::Brightness;

/// A blocking client for one Hue bridge.
///
/// All calls run on the caller's thread and block until the bridge
/// answers or the configured timeout expires. Reads go through a
/// single-slot response cache: fetching a light or group keeps its
/// document for the configured time-to-live, and the simple getters
/// answer from that document without another request. Single-field
/// writes patch the cached document optimistically after the bridge
/// acknowledges them, so a read right after a write reflects the write
/// without refetching.
///
/// # Examples
///
/// ```no_run
/// use huelink::{Bridge, BridgeConfig};
///
/// # fn main() -> huelink::Result<()> {
/// let mut bridge = Bridge::new(BridgeConfig::new("192.168.1.2", "A1b2C3d4"))?;
///
/// if !bridge.light_is_on(1)? {
///     bridge.set_light_power(1, true)?;
/// }
/// println!("brightness: {}", bridge.light_brightness(1)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bridge {
    config: BridgeConfig,
    client: Client,
    cache: ResponseCache,
}

impl Bridge {
    /// Creates a client for the configured bridge.
    ///
    /// No request is made yet; the bridge is contacted lazily on the
    /// first read or write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be created.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(Error::Http)?;
        let cache = ResponseCache::new(config.cache_ttl());

        Ok(Self {
            config,
            client,
            cache,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns the response cache for inspection.
    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Points the client at a different bridge host.
    ///
    /// The cache is cleared; documents from the previous bridge do not
    /// describe the new one.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.config.set_host(host);
        self.cache.invalidate();
    }

    /// Replaces the API key.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.set_api_key(api_key);
        self.cache.invalidate();
    }

    /// Changes the port.
    pub fn set_port(&mut self, port: u16) {
        self.config.set_port(port);
        self.cache.invalidate();
    }

    /// Drops the cached document; the next read fetches from the bridge.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Fetches a light, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure, [`Error::Status`] on
    /// a non-success HTTP status, [`Error::Parse`] if the body is not the
    /// expected JSON, and [`Error::Api`] if the bridge reports an error
    /// such as an unknown id.
    pub fn fetch_light(&mut self, id: u8) -> Result<Light> {
        let document = self.entity_document(id, EntityKind::Light)?;
        let light = serde_json::from_value(document.clone()).map_err(ParseError::Json)?;
        Ok(light)
    }

    /// Fetches a group, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_light`](Self::fetch_light).
    pub fn fetch_group(&mut self, id: u8) -> Result<Group> {
        let document = self.entity_document(id, EntityKind::Group)?;
        let group = serde_json::from_value(document.clone()).map_err(ParseError::Json)?;
        Ok(group)
    }

    /// Returns whether the light is on.
    ///
    /// # Errors
    ///
    /// Fetch errors as for [`fetch_light`](Self::fetch_light), plus
    /// [`ParseError::MissingField`] if the document lacks `state.on`.
    pub fn light_is_on(&mut self, id: u8) -> Result<bool> {
        self.power_value(id, EntityKind::Light)
    }

    /// Returns the light's brightness (1-254).
    ///
    /// # Errors
    ///
    /// Fetch errors as for [`fetch_light`](Self::fetch_light), plus a
    /// parse error if the document lacks a usable brightness field.
    pub fn light_brightness(&mut self, id: u8) -> Result<u8> {
        self.brightness_value(id, EntityKind::Light)
    }

    /// Returns whether any light in the group is on.
    ///
    /// # Errors
    ///
    /// Fetch errors as for [`fetch_group`](Self::fetch_group), plus
    /// [`ParseError::MissingField`] if the document lacks `state.any_on`.
    pub fn group_any_on(&mut self, id: u8) -> Result<bool> {
        self.power_value(id, EntityKind::Group)
    }

    /// Returns the brightness of the group's last action (1-254).
    ///
    /// # Errors
    ///
    /// Fetch errors as for [`fetch_group`](Self::fetch_group), plus a
    /// parse error if the document lacks a usable `action.bri` field.
    pub fn group_brightness(&mut self, id: u8) -> Result<u8> {
        self.brightness_value(id, EntityKind::Group)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Switches a light on or off.
    ///
    /// On success the cached document for this light, if fresh, is
    /// patched in place instead of being invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`], [`Error::Status`] or [`Error::Api`] when
    /// the bridge rejects the update.
    pub fn set_light_power(&mut self, id: u8, on: bool) -> Result<()> {
        self.send_put(id, EntityKind::Light, &StateCommand::power(on))?;
        self.cache
            .patch_field(id, EntityKind::Light, EntityKind::Light.power_pointer(), json!(on));
        Ok(())
    }

    /// Sets a light's brightness.
    ///
    /// On success the cached document for this light, if fresh, is
    /// patched in place.
    ///
    /// # Errors
    ///
    /// Same conditions as [`set_light_power`](Self::set_light_power).
    pub fn set_light_brightness(&mut self, id: u8, brightness: Brightness) -> Result<()> {
        self.send_put(id, EntityKind::Light, &StateCommand::brightness(brightness))?;
        self.cache.patch_field(
            id,
            EntityKind::Light,
            EntityKind::Light.brightness_pointer(),
            json!(brightness.value()),
        );
        Ok(())
    }

    /// Applies a full state command to a light.
    ///
    /// The cache is left untouched; only single-field writes are mirrored
    /// into it. Call [`invalidate_cache`](Self::invalidate_cache) for
    /// strict read-after-write behavior around a full write.
    ///
    /// # Errors
    ///
    /// Same conditions as [`set_light_power`](Self::set_light_power).
    pub fn set_light(&mut self, id: u8, command: &StateCommand) -> Result<()> {
        self.send_put(id, EntityKind::Light, command)
    }

    /// Switches every light in a group on or off.
    ///
    /// On success the cached document for this group, if fresh, is
    /// patched in place (`state.any_on` mirrors the written power value).
    ///
    /// # Errors
    ///
    /// Same conditions as [`set_light_power`](Self::set_light_power).
    pub fn set_group_power(&mut self, id: u8, on: bool) -> Result<()> {
        self.send_put(id, EntityKind::Group, &StateCommand::power(on))?;
        self.cache
            .patch_field(id, EntityKind::Group, EntityKind::Group.power_pointer(), json!(on));
        Ok(())
    }

    /// Sets the brightness of every light in a group.
    ///
    /// On success the cached document for this group, if fresh, is
    /// patched in place.
    ///
    /// # Errors
    ///
    /// Same conditions as [`set_light_power`](Self::set_light_power).
    pub fn set_group_brightness(&mut self, id: u8, brightness: Brightness) -> Result<()> {
        self.send_put(id, EntityKind::Group, &StateCommand::brightness(brightness))?;
        self.cache.patch_field(
            id,
            EntityKind::Group,
            EntityKind::Group.brightness_pointer(),
            json!(brightness.value()),
        );
        Ok(())
    }

    /// Applies a full state command to a group.
    ///
    /// The cache is left untouched, as for [`set_light`](Self::set_light).
    ///
    /// # Errors
    ///
    /// Same conditions as [`set_light_power`](Self::set_light_power).
    pub fn set_group(&mut self, id: u8, command: &StateCommand) -> Result<()> {
        self.send_put(id, EntityKind::Group, command)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// URL of an entity document, e.g. `http://host/api/key/lights/1`.
    fn entity_url(&self, id: u8, kind: EntityKind) -> String {
        format!(
            "{}/api/{}/{}/{id}",
            self.config.base_url(),
            urlencoding::encode(self.config.api_key()),
            kind.collection(),
        )
    }

    /// URL writes go to, e.g. `http://host/api/key/lights/1/state`.
    fn write_url(&self, id: u8, kind: EntityKind) -> String {
        format!("{}/{}", self.entity_url(id, kind), kind.write_segment())
    }

    /// Reads the power field of the entity's document.
    fn power_value(&mut self, id: u8, kind: EntityKind) -> Result<bool> {
        let pointer = kind.power_pointer();
        let document = self.entity_document(id, kind)?;
        document
            .pointer(pointer)
            .and_then(Value::as_bool)
            .ok_or_else(|| ParseError::MissingField(pointer.to_string()).into())
    }

    /// Reads the brightness field of the entity's document.
    fn brightness_value(&mut self, id: u8, kind: EntityKind) -> Result<u8> {
        let pointer = kind.brightness_pointer();
        let document = self.entity_document(id, kind)?;
        let raw = document
            .pointer(pointer)
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::from(ParseError::MissingField(pointer.to_string())))?;
        u8::try_from(raw).map_err(|_| {
            Error::from(ParseError::InvalidValue {
                field: pointer.to_string(),
                message: format!("{raw} does not fit in a u8"),
            })
        })
    }

    /// Returns the entity's document, fetching it only on a cache miss.
    fn entity_document(&mut self, id: u8, kind: EntityKind) -> Result<&Value> {
        if self.cache.get(id, kind).is_some() {
            tracing::debug!(id, kind = %kind, "serving cached document");
        } else {
            let document = self.fetch_document(id, kind)?;
            self.cache.put(id, kind, document);
        }
        match self.cache.peek() {
            Some(document) => Ok(document),
            None => Err(ParseError::MissingField("document".to_string()).into()),
        }
    }

    /// GETs the entity document from the bridge.
    ///
    /// A failed fetch never reaches the cache; the previous document, if
    /// any, stays as it was.
    fn fetch_document(&self, id: u8, kind: EntityKind) -> Result<Value> {
        let url = self.entity_url(id, kind);
        tracing::debug!(url = %url, "fetching document");

        let response = self.client.get(&url).send().map_err(Error::Http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let body = response.text().map_err(Error::Http)?;
        let document: Value = serde_json::from_str(&body).map_err(ParseError::Json)?;
        if let Some(error) = first_bridge_error(&document) {
            return Err(Error::Api(error));
        }

        Ok(document)
    }

    /// PUTs a state command and checks the bridge's acknowledgement.
    fn send_put(&self, id: u8, kind: EntityKind, command: &StateCommand) -> Result<()> {
        let url = self.write_url(id, kind);
        tracing::debug!(url = %url, ?command, "sending state update");

        let response = self
            .client
            .put(&url)
            .json(command)
            .send()
            .map_err(Error::Http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        // The acknowledgement is an array of success/error entries. An
        // unparsable body is tolerated; the write itself went through.
        let body = response.text().map_err(Error::Http)?;
        tracing::debug!(body = %body, "bridge acknowledged update");
        if let Ok(parsed) = serde_json::from_str::<Value>(&body) {
            if let Some(error) = first_bridge_error(&parsed) {
                return Err(Error::Api(error));
            }
        }

        Ok(())
    }
}
