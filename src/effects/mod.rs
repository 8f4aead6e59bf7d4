//! Timer-driven side of the widget.
//!
//! This module is the imperative shell around the pure core: it owns the
//! timers, applies transitions, and pushes state onto the display surface.
//!
//! # Key Concepts
//!
//! - **Scheduler**: single-threaded timer queue on a virtual clock
//! - **Widget**: the animation controller driving one widget instance
//! - **Cancel before reschedule**: every new action clears all live timers
//!   first, so a superseded action can never settle

mod scheduler;
mod widget;

pub use scheduler::{Scheduler, Task, TimerId};
pub use widget::Widget;
