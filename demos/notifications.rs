//! Notification Triggers
//!
//! This example drives a widget purely from host notifications, the way a
//! voice assistant or a button board module would.
//!
//! Key concepts:
//! - Configuring a notification key and per-action `notify` keys
//! - Payload shapes: bare strings, numbers and objects
//! - The reserved `reset` target
//!
//! Run with: cargo run --example notifications

use chance::builder::WidgetBuilder;
use chance::config::Config;
use chance::notification::parse_target;
use chance::surface::MemorySurface;
use chance::ViewState;
use serde_json::json;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Notification Triggers ===\n");

    let config = Config::from_value(json!({
        "notification": "CHANCE_TRIGGER",
        "buttons": [
            { "id": "flip", "mode": "coin", "notify": "coin" },
            { "id": "d20", "sides": 20, "label": "Roll d20", "notify": "20" },
        ],
    }));

    let mut widget = WidgetBuilder::new()
        .identifier("module_5_chance")
        .config(config)
        .build::<MemorySurface>()?;
    widget.mount(MemorySurface::standard());

    let events = [
        ("CHANCE_TRIGGER", json!("coin")),
        ("CHANCE_TRIGGER", json!({ "button": "reset" })),
        ("CHANCE_TRIGGER", json!(20)),
        ("SOMETHING_ELSE", json!("coin")),
        ("CHANCE_TRIGGER", json!({ "name": "", "action": "coin" })),
        ("CHANCE_TRIGGER", json!({ "target": "coin" })),
    ];

    for (name, payload) in events {
        widget.notification_received(name, &payload);
        println!(
            "{name:<15} {:<32} target={:<16} -> {:?}",
            payload.to_string(),
            format!("{:?}", parse_target(&payload)),
            widget.phase()
        );
        widget.advance(Duration::from_millis(1_300));
        println!("{:>15} settles as {}", "", shown(widget.state()));
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

fn shown(state: &ViewState) -> String {
    match state.symbol {
        Some(face) => face.symbol_id().to_string(),
        None => state.overlay_text.clone(),
    }
}
