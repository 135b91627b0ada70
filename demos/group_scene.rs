// SPDX-License-Identifier: MPL-2.0

//! Test program: fade a whole group into a warm evening scene.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example group_scene -- <host> <api-key> <group-id>
//! ```
//!
//! # Example
//!
//! ```bash
//! cargo run --example group_scene -- 192.168.1.2 A1b2C3d4e5F6 2
//! ```

use std::env;
use std::thread::sleep;
use std::time::Duration;

use huelink::{Bridge, BridgeConfig, Brightness, Saturation, StateCommand, Transition};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 4 {
        eprintln!("Usage: {} <host> <api-key> <group-id>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example group_scene -- 192.168.1.2 A1b2C3d4e5F6 2");
        std::process::exit(1);
    }

    let host = &args[1];
    let api_key = &args[2];
    let id: u8 = args[3].parse()?;

    println!("Connecting to bridge {host}...");
    let mut bridge = Bridge::new(BridgeConfig::new(host.clone(), api_key.clone()))?;

    let group = bridge.fetch_group(id)?;
    println!(
        "Group {id}: {} with {} lights",
        group.name().unwrap_or("unnamed"),
        group.lights().len(),
    );
    println!("  any on: {}", group.any_on());

    // Warm orange, dimmed, fading in over three seconds.
    let evening = StateCommand::new(true, Saturation::new(200)?, Brightness::new(90)?, 6000)
        .with_transition(Transition::from_duration(Duration::from_secs(3)));

    println!("Fading to the evening scene...");
    bridge.set_group(id, &evening)?;
    sleep(Duration::from_secs(5));

    // The full write bypassed the cache; fetch the result explicitly.
    bridge.invalidate_cache();
    println!("Group brightness is now {}/254", bridge.group_brightness(id)?);

    println!("Switching the group off...");
    bridge.set_group_power(id, false)?;

    println!("Done!");
    Ok(())
}
