// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection configuration for a Hue bridge.

use std::time::Duration;

/// Configuration for a Hue bridge connection.
///
/// Holds the bridge address, the API key obtained by pressing the link
/// button, and the request and cache tuning knobs. The protocol is plain
/// HTTP; bridges do not serve the v1 API over TLS.
///
/// # Examples
///
/// ```
/// use huelink::BridgeConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = BridgeConfig::new("192.168.1.2", "A1b2C3d4");
///
/// // With all options
/// let config = BridgeConfig::new("192.168.1.2", "A1b2C3d4")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5))
///     .with_cache_ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    host: String,
    api_key: String,
    port: u16,
    timeout: Duration,
    cache_ttl: Duration,
}

impl BridgeConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default lifetime of a cached response (10 minutes).
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

    /// Creates a new configuration for the specified bridge.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the bridge
    /// * `api_key` - The authorized API key (username) for the bridge
    #[must_use]
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
            cache_ttl: Self::DEFAULT_CACHE_TTL,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how long a fetched response is served from cache.
    ///
    /// `Duration::ZERO` disables caching.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Points the configuration at a different bridge host.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    /// Replaces the API key.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Changes the port.
    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the cache time-to-live.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Builds the base URL from this configuration.
    ///
    /// The configured port is always honored; it is merely elided from
    /// the text when it is the default HTTP port.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.port == Self::DEFAULT_PORT {
            format!("http://{}", self.host)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}
