//! Coin and Dice Walkthrough
//!
//! This example steps a widget through a coin flip and a dice roll on the
//! virtual clock, printing the surface after each step.
//!
//! Key concepts:
//! - Building a widget and mounting a rendered surface
//! - Driving timers explicitly with `advance`
//! - Auto-reset back to the button view
//!
//! Run with: cargo run --example coin_and_dice

use chance::builder::WidgetBuilder;
use chance::config::Config;
use chance::surface::{MemorySurface, Slot};
use chance::Widget;
use rand::rngs::StdRng;
use std::time::Duration;

fn describe(widget: &Widget<MemorySurface, StdRng>) {
    let Some(surface) = widget.surface() else {
        println!("  (not mounted)");
        return;
    };
    let token = surface
        .element(Slot::TokenWrap)
        .map(|e| e.classes.iter().cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    println!(
        "  t={:>5}ms phase={:<9} token=[{}] die={:?} coin={:?}",
        widget.now_ms(),
        format!("{:?}", widget.phase()),
        token,
        surface.text(Slot::DieValue).unwrap_or(""),
        surface.attribute(Slot::CoinFace, "href").unwrap_or(""),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Coin and Dice Walkthrough ===\n");

    let config = Config::from_json(
        r#"{
            "animationDurationMs": 600,
            "animationFrameMs": 150,
            "autoResetMs": 1000
        }"#,
    )?;

    let mut widget = WidgetBuilder::new()
        .identifier("module_0_chance")
        .base_path("modules/chance")
        .config(config)
        .build::<MemorySurface>()?;

    let surface = MemorySurface::from_template(&widget.template_data());
    widget.mount(surface);

    println!("Buttons:");
    for action in widget.actions() {
        println!("  [{}] {}", action.id, action.label);
    }

    println!("\nFlipping the coin:");
    widget.click("coin");
    describe(&widget);
    while widget.pending_timers() > 0 {
        widget.advance_to_next_timer();
        describe(&widget);
    }

    println!("\nRolling a d100:");
    widget.click("d100");
    for _ in 0..8 {
        widget.advance(Duration::from_millis(100));
        describe(&widget);
    }
    widget.advance(Duration::from_millis(1_000));
    describe(&widget);

    println!("\nPhase history:");
    for transition in widget.history().transitions() {
        println!(
            "  {:>5}ms {:?} -> {:?} ({})",
            transition.clock_ms,
            transition.from,
            transition.to,
            transition.action.as_deref().unwrap_or("-")
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
