//! View state of a single widget and its pure transitions.

use crate::config::{Action, ActionKind};
use crate::outcome::{roll_die, Outcome};
use rand::Rng;
use serde::{Deserialize, Serialize};

crate::state_enum! {
    /// Lifecycle phase derived from [`ViewState`].
    #[derive(Copy, Eq, Hash)]
    pub enum Phase {
        /// Buttons are shown.
        Idle,
        /// A flip or roll is in flight.
        Animating,
        /// The final outcome is shown.
        Settled,
    }
}

/// Which half of the widget is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Buttons,
    Result,
}

/// Kind of token shown in the result view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Coin,
    Dice,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Coin => "coin",
            Mode::Dice => "dice",
        }
    }
}

/// Coin face, named after its sprite symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinFace {
    #[serde(rename = "coin-heads")]
    Heads,
    #[serde(rename = "coin-tails")]
    Tails,
}

impl CoinFace {
    pub fn from_heads(heads: bool) -> Self {
        if heads {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        }
    }

    /// Sprite symbol id for this face.
    pub fn symbol_id(self) -> &'static str {
        match self {
            CoinFace::Heads => "coin-heads",
            CoinFace::Tails => "coin-tails",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            CoinFace::Heads => CoinFace::Tails,
            CoinFace::Tails => CoinFace::Heads,
        }
    }
}

/// Everything the display needs to know about the widget.
///
/// The transition methods are pure: they return the next state and leave
/// `self` untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub view: View,
    pub is_animating: bool,
    pub mode: Mode,
    #[serde(rename = "symbolId")]
    pub symbol: Option<CoinFace>,
    pub overlay_text: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            view: View::Buttons,
            is_animating: false,
            mode: Mode::Coin,
            symbol: Some(CoinFace::Heads),
            overlay_text: String::new(),
        }
    }
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        match (self.view, self.is_animating) {
            (View::Buttons, _) => Phase::Idle,
            (View::Result, true) => Phase::Animating,
            (View::Result, false) => Phase::Settled,
        }
    }

    pub fn is_result(&self) -> bool {
        self.view == View::Result
    }

    /// State right after `action` is triggered.
    ///
    /// Coins start on the heads placeholder; dice show an immediate roll so
    /// the token is never blank.
    pub fn animating<R: Rng + ?Sized>(&self, action: &Action, rng: &mut R) -> Self {
        let (symbol, overlay_text) = match action.kind {
            ActionKind::Coin => (Some(CoinFace::Heads), String::new()),
            ActionKind::Dice { sides } => (None, roll_die(rng, sides).to_string()),
        };

        Self {
            view: View::Result,
            is_animating: true,
            mode: action.mode(),
            symbol,
            overlay_text,
        }
    }

    /// State showing a resolved outcome.
    pub fn settled(&self, outcome: Outcome) -> Self {
        Self {
            view: View::Result,
            is_animating: false,
            mode: outcome.mode,
            symbol: outcome.symbol,
            overlay_text: outcome.overlay_text,
        }
    }

    /// Back to the button view. The last token is kept so the next render
    /// of the result view starts from it.
    pub fn idle(&self) -> Self {
        Self {
            view: View::Buttons,
            is_animating: false,
            ..self.clone()
        }
    }

    /// Frame update for an in-flight coin.
    pub fn with_symbol(&self, face: CoinFace) -> Self {
        Self {
            symbol: Some(face),
            ..self.clone()
        }
    }

    /// Frame update for an in-flight die.
    pub fn with_overlay(&self, text: String) -> Self {
        Self {
            overlay_text: text,
            ..self.clone()
        }
    }
}
