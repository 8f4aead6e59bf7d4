//! Core widget types and pure transition logic.
//!
//! This module contains the pure side of the widget:
//! - The `State` trait and the widget's `Phase`
//! - `ViewState` and its next-state functions
//! - Bounded phase history
//!
//! Nothing in here touches timers or the display surface.

mod history;
mod state;
mod view;

pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::State;
pub use view::{CoinFace, Mode, Phase, View, ViewState};
