//! Live Dashboard
//!
//! This example runs a widget on real time: a tokio interval feeds elapsed
//! time into the widget clock while lines typed on stdin act as clicks.
//!
//! Key concepts:
//! - Bridging the virtual clock to a runtime timer
//! - Structured logging with tracing
//! - Tearing the widget down on exit
//!
//! Run with: RUST_LOG=chance=debug cargo run --example live_dashboard
//! Then type `coin`, `d6`, `d10`, `d100` or `reset`, and `quit` to exit.

use chance::builder::WidgetBuilder;
use chance::config::Config;
use chance::surface::{MemorySurface, Slot};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Instant};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_json(r#"{"autoResetMs": 4000}"#)?;
    let mut widget = WidgetBuilder::new()
        .identifier("live")
        .config(config)
        .build::<MemorySurface>()?;
    let surface = MemorySurface::from_template(&widget.template_data());
    widget.mount(surface);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(Duration::from_millis(20));
    let mut last = Instant::now();
    let mut last_shown = String::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                widget.advance(now - last);
                last = now;

                let shown = match widget.surface() {
                    Some(surface) if surface.has_class(Slot::Root, "is-result") => format!(
                        "{:?} {}{}",
                        widget.phase(),
                        surface.text(Slot::DieValue).unwrap_or(""),
                        widget.state().symbol.map(|f| f.symbol_id()).unwrap_or(""),
                    ),
                    _ => "buttons".to_string(),
                };
                if shown != last_shown {
                    println!("{shown}");
                    last_shown = shown;
                }
            }
            line = lines.next_line() => {
                match line?.as_deref().map(str::trim) {
                    None | Some("quit") => break,
                    Some(action) => widget.click(action),
                }
            }
        }
    }

    widget.teardown();
    Ok(())
}
