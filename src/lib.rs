//! Chance: the state machine behind a coin-flip / dice-roll dashboard widget.
//!
//! The widget shows a row of action buttons. Triggering one (by click or by
//! host notification) plays a short flip or roll animation, settles on a
//! random outcome and optionally returns to the buttons after a delay.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - **config**: lenient normalization of host settings and button specs
//! - **outcome**: coin and die randomness
//! - **core**: `ViewState` and its pure transitions, phase history
//! - **effects**: the timer-driven `Widget` controller
//! - **notification**: mapping of inbound payloads to commands
//! - **surface**: in-place synchronisation of an already-rendered display
//!
//! # Example
//!
//! ```rust
//! use chance::builder::WidgetBuilder;
//! use chance::config::Config;
//! use chance::core::{Mode, Phase};
//! use chance::surface::{MemorySurface, Slot};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::time::Duration;
//!
//! let config = Config::from_json(r#"{"autoResetMs": 5000}"#).unwrap();
//! let mut widget = WidgetBuilder::new()
//!     .identifier("module_4_chance")
//!     .config(config)
//!     .rng(StdRng::seed_from_u64(99))
//!     .build::<MemorySurface>()
//!     .unwrap();
//!
//! let surface = MemorySurface::from_template(&widget.template_data());
//! widget.mount(surface);
//!
//! widget.click("d6");
//! assert_eq!(widget.phase(), Phase::Animating);
//!
//! widget.advance(Duration::from_millis(1_250));
//! assert_eq!(widget.phase(), Phase::Settled);
//! assert_eq!(widget.state().mode, Mode::Dice);
//!
//! let shown = widget.surface().and_then(|s| s.text(Slot::DieValue)).unwrap();
//! assert_eq!(shown, widget.state().overlay_text);
//!
//! widget.advance(Duration::from_secs(5));
//! assert_eq!(widget.phase(), Phase::Idle);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod notification;
pub mod outcome;
pub mod surface;

// Re-export commonly used types
pub use builder::{BuildError, WidgetBuilder};
pub use config::{Action, ActionKind, Config, ConfigError};
pub use core::{CoinFace, Mode, Phase, State, ViewState};
pub use effects::Widget;
pub use notification::{Route, DOM_OBJECTS_CREATED};
pub use outcome::Outcome;
pub use surface::{MemorySurface, Slot, Surface};
