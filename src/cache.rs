// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-slot response cache.
//!
//! The bridge client keeps the most recently fetched light or group
//! document and serves it for repeat reads within a time-to-live window,
//! skipping the network round trip entirely. The cache holds exactly one
//! entity: fetching a different id, or a group after a light, evicts the
//! previous document.
//!
//! Writes that can infer their own effect (a power flip, a brightness
//! change) patch the cached document in place instead of invalidating it;
//! see [`ResponseCache::patch_field`].

use std::fmt;
use std::time::{Duration, Instant};

use serde_json::Value;

/// The kind of entity a document describes.
///
/// The kind also carries the protocol facts that differ between lights
/// and groups: URL segments and the JSON pointers of the fields this
/// library consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A single addressable bulb.
    Light,
    /// A named collection of lights addressed as one resource.
    Group,
}

impl EntityKind {
    /// The URL collection segment (`lights` or `groups`).
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Light => "lights",
            Self::Group => "groups",
        }
    }

    /// The URL segment writes go to (`state` for lights, `action` for
    /// groups).
    #[must_use]
    pub const fn write_segment(self) -> &'static str {
        match self {
            Self::Light => "state",
            Self::Group => "action",
        }
    }

    /// JSON pointer of the power field in a fetched document.
    ///
    /// Lights report their own state; groups report whether any member
    /// is on.
    #[must_use]
    pub const fn power_pointer(self) -> &'static str {
        match self {
            Self::Light => "/state/on",
            Self::Group => "/state/any_on",
        }
    }

    /// JSON pointer of the brightness field in a fetched document.
    #[must_use]
    pub const fn brightness_pointer(self) -> &'static str {
        match self {
            Self::Light => "/bri",
            Self::Group => "/action/bri",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Group => f.write_str("group"),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedDocument {
    id: u8,
    kind: EntityKind,
    fetched_at: Instant,
    document: Value,
}

/// The single most-recently-fetched entity document, with a time-to-live.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use huelink::cache::{EntityKind, ResponseCache};
/// use serde_json::json;
///
/// let mut cache = ResponseCache::new(Duration::from_secs(600));
/// cache.put(5, EntityKind::Light, json!({"state": {"on": true}}));
///
/// assert!(cache.get(5, EntityKind::Light).is_some());
/// assert!(cache.get(5, EntityKind::Group).is_none());
/// assert!(cache.get(6, EntityKind::Light).is_none());
/// ```
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    slot: Option<CachedDocument>,
}

impl ResponseCache {
    /// Creates an empty cache with the given time-to-live.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    /// Returns the configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached document if the slot holds exactly this entity
    /// and the entry is younger than the time-to-live.
    ///
    /// Freshness is never revalidated against the bridge; within the
    /// window the document is served as-is.
    #[must_use]
    pub fn get(&self, id: u8, kind: EntityKind) -> Option<&Value> {
        let entry = self.slot.as_ref()?;
        if entry.id != id || entry.kind != kind {
            return None;
        }
        if entry.fetched_at.elapsed() >= self.ttl {
            return None;
        }
        Some(&entry.document)
    }

    /// Returns the slot's document regardless of age or entity.
    ///
    /// Useful for inspecting what the slot holds; reads that care about
    /// freshness go through [`get`](Self::get).
    #[must_use]
    pub fn peek(&self) -> Option<&Value> {
        self.slot.as_ref().map(|entry| &entry.document)
    }

    /// Replaces the slot with a freshly fetched document and stamps it.
    ///
    /// There is only one slot: storing a document for one entity evicts
    /// whatever was cached before, including an entity of the other kind.
    pub fn put(&mut self, id: u8, kind: EntityKind, document: Value) {
        tracing::debug!(id, kind = %kind, "caching document");
        self.slot = Some(CachedDocument {
            id,
            kind,
            fetched_at: Instant::now(),
            document,
        });
    }

    /// Patches one field of the cached document after a successful write,
    /// refreshing the entry's timestamp.
    ///
    /// The patch applies only when the slot holds exactly this entity and
    /// the entry is still fresh; a stale document is never resurrected by
    /// updating one field of it. Intermediate objects on the pointer path
    /// are created if missing. Returns whether a patch happened.
    pub fn patch_field(&mut self, id: u8, kind: EntityKind, pointer: &str, value: Value) -> bool {
        let ttl = self.ttl;
        let Some(entry) = self.slot.as_mut() else {
            return false;
        };
        if entry.id != id || entry.kind != kind || entry.fetched_at.elapsed() >= ttl {
            return false;
        }
        if !write_pointer(&mut entry.document, pointer, value) {
            return false;
        }
        entry.fetched_at = Instant::now();
        tracing::debug!(id, kind = %kind, pointer, "patched cached document");
        true
    }

    /// Clears the slot.
    pub fn invalidate(&mut self) {
        if self.slot.take().is_some() {
            tracing::debug!("cache invalidated");
        }
    }
}

/// Writes `value` at `pointer` ("/state/on" style), creating intermediate
/// objects along the way. Returns `false` if the pointer is empty or a
/// path segment lands on a non-object node.
fn write_pointer(document: &mut Value, pointer: &str, value: Value) -> bool {
    let path = pointer.trim_start_matches('/');
    if path.is_empty() {
        return false;
    }
    let mut segments: Vec<&str> = path.split('/').collect();
    let Some(leaf) = segments.pop() else {
        return false;
    };

    let mut current = document;
    for segment in segments {
        let Value::Object(map) = current else {
            return false;
        };
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }
    let Value::Object(map) = current else {
        return false;
    };
    map.insert(leaf.to_string(), value);
    true
}
