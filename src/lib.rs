// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Huelink - A Rust library to control Philips Hue lights and groups.
//!
//! This library provides a small blocking client for the Hue bridge's
//! HTTP API. Every call runs on the caller's thread; there is no async
//! runtime and no background task. Fetched responses are kept in a
//! single-slot cache so that the usual pattern of reading a few fields
//! of the same light in a row costs one request, not several.
//!
//! # Supported Features
//!
//! - **Power control**: Switch individual lights or whole groups on and off
//! - **Brightness control**: Dim lights and groups on the bridge's 1-254 scale
//! - **Full state writes**: Compose on/brightness/saturation/hue plus a
//!   transition time into one command
//! - **Typed snapshots**: Deserialize light and group documents into plain
//!   structs with lenient parsing
//! - **Response caching**: Repeat reads within a time-to-live window answer
//!   from the cached document; acknowledged writes patch it in place
//!
//! # Quick Start
//!
//! ## Reading state
//!
//! ```no_run
//! use huelink::{Bridge, BridgeConfig};
//!
//! fn main() -> huelink::Result<()> {
//!     let mut bridge = Bridge::new(BridgeConfig::new("192.168.1.2", "A1b2C3d4"))?;
//!
//!     let light = bridge.fetch_light(1)?;
//!     println!("{}: on={}", light.name().unwrap_or("?"), light.is_on());
//!
//!     // Served from the cache, no second request
//!     let bri = bridge.light_brightness(1)?;
//!     println!("brightness: {bri}");
//!     Ok(())
//! }
//! ```
//!
//! ## Switching and dimming
//!
//! ```no_run
//! use huelink::{Bridge, BridgeConfig, Brightness};
//!
//! fn main() -> huelink::Result<()> {
//!     let mut bridge = Bridge::new(BridgeConfig::new("192.168.1.2", "A1b2C3d4"))?;
//!
//!     bridge.set_light_power(1, true)?;
//!     bridge.set_light_brightness(1, Brightness::new(200)?)?;
//!
//!     // Groups work the same way, any_on/action instead of state
//!     bridge.set_group_power(2, false)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Full state command
//!
//! ```no_run
//! use huelink::{Bridge, BridgeConfig, Brightness, Saturation, StateCommand, Transition};
//!
//! fn main() -> huelink::Result<()> {
//!     let mut bridge = Bridge::new(BridgeConfig::new("192.168.1.2", "A1b2C3d4"))?;
//!
//!     let warm_dim = StateCommand::new(true, Saturation::new(140)?, Brightness::new(80)?, 8000)
//!         .with_transition(Transition::new(20));
//!     bridge.set_light(1, &warm_dim)?;
//!     Ok(())
//! }
//! ```

mod bridge;
pub mod cache;
pub mod command;
pub mod config;
pub mod error;
pub mod resource;
pub mod types;

pub use bridge::Bridge;
pub use cache::{EntityKind, ResponseCache};
pub use command::StateCommand;
pub use config::BridgeConfig;
pub use error::{ApiError, Error, ParseError, Result, ValueError};
pub use resource::{Group, GroupAction, GroupState, Light, LightState};
pub use types::{Brightness, Saturation, Transition};
