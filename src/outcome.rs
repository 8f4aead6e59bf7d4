//! Random outcomes for coins and dice.
//!
//! Any [`rand::Rng`] works; there is no cryptographic requirement. Callers
//! inject the generator so tests can use a seeded one.

use crate::config::{Action, ActionKind};
use crate::core::{CoinFace, Mode};
use rand::Rng;
use serde::Serialize;

/// Final token shown when an action settles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub mode: Mode,
    #[serde(rename = "symbolId")]
    pub symbol: Option<CoinFace>,
    pub overlay_text: String,
}

/// Roll a die, uniformly in `1..=sides`. A die with fewer than one side
/// always shows 1.
///
/// ```
/// use chance::outcome::roll_die;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let value = roll_die(&mut rng, 20);
/// assert!((1..=20).contains(&value));
/// ```
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R, sides: u32) -> u32 {
    rng.gen_range(1..=sides.max(1))
}

/// `true` for heads, with even odds.
pub fn flip_coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

/// Resolve the final outcome of `action`.
pub fn resolve_outcome<R: Rng + ?Sized>(action: &Action, rng: &mut R) -> Outcome {
    match action.kind {
        ActionKind::Coin => Outcome {
            mode: Mode::Coin,
            symbol: Some(CoinFace::from_heads(flip_coin(rng))),
            overlay_text: String::new(),
        },
        ActionKind::Dice { sides } => Outcome {
            mode: Mode::Dice,
            symbol: None,
            overlay_text: roll_die(rng, sides).to_string(),
        },
    }
}
