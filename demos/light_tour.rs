// SPDX-License-Identifier: MPL-2.0

//! Test program: inspect a light, toggle it, and walk the brightness up.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example light_tour -- <host> <api-key> <light-id>
//! ```
//!
//! # Example
//!
//! ```bash
//! cargo run --example light_tour -- 192.168.1.2 A1b2C3d4e5F6 1
//! ```

use std::env;
use std::thread::sleep;
use std::time::Duration;

use huelink::{Bridge, BridgeConfig, Brightness};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 4 {
        eprintln!("Usage: {} <host> <api-key> <light-id>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example light_tour -- 192.168.1.2 A1b2C3d4e5F6 1");
        std::process::exit(1);
    }

    let host = &args[1];
    let api_key = &args[2];
    let id: u8 = args[3].parse()?;

    println!("Connecting to bridge {host}...");
    let mut bridge = Bridge::new(BridgeConfig::new(host.clone(), api_key.clone()))?;

    let light = bridge.fetch_light(id)?;
    println!(
        "Light {id}: {} ({})",
        light.name().unwrap_or("unnamed"),
        light.light_type().unwrap_or("unknown type"),
    );
    println!("  on: {}", light.is_on());
    if let Some(bri) = light.brightness() {
        println!("  brightness: {bri}/254");
    }

    // These answer from the cached document, no further requests.
    let was_on = bridge.light_is_on(id)?;

    println!("Turning the light {}...", if was_on { "off" } else { "on" });
    bridge.set_light_power(id, !was_on)?;
    sleep(Duration::from_secs(2));

    if !was_on {
        println!("Walking brightness up...");
        for bri in [50_u8, 120, 200, 254] {
            bridge.set_light_brightness(id, Brightness::new(bri)?)?;
            println!("  set to {}", bridge.light_brightness(id)?);
            sleep(Duration::from_millis(800));
        }
    }

    println!("Restoring previous power state...");
    bridge.set_light_power(id, was_on)?;

    println!("Done!");
    Ok(())
}
