//! Display surface abstraction and in-place view synchronisation.
//!
//! The host renders the widget's markup once; afterwards the widget only
//! toggles classes, attributes and text on a handful of named elements.
//! A surface that is not mounted, or is missing an element, is skipped
//! silently.

mod memory;
mod template;

pub use memory::{Element, MemorySurface};
pub use template::{ButtonView, TemplateData, TemplateView, TokenView};

use crate::core::{Mode, ViewState};

pub const RESULT_CLASS: &str = "is-result";
pub const ANIMATING_CLASS: &str = "animating";
pub const COIN_MODE_CLASS: &str = "mode-coin";
pub const DICE_MODE_CLASS: &str = "mode-dice";

/// Sprite file, relative to the widget's base path.
pub const SPRITE_PATH: &str = "assets/sprite.svg";

/// Action id reserved for the reset control.
pub const RESET_ACTION: &str = "reset";

/// Named elements of the rendered widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Widget root, carries the `is-result` class.
    Root,
    /// Button returning to the button view.
    ResetButton,
    /// Container of the coin or die token.
    TokenWrap,
    /// Text of the die.
    DieValue,
    /// Sprite reference of the coin.
    CoinFace,
}

/// An already-rendered display the widget can mutate in place.
///
/// Mutations on a slot that does not exist must be no-ops.
pub trait Surface {
    fn has(&self, slot: Slot) -> bool;

    fn toggle_class(&mut self, slot: Slot, class: &str, on: bool);

    fn set_disabled(&mut self, slot: Slot, disabled: bool);

    fn set_text(&mut self, slot: Slot, text: &str);

    fn set_attribute(&mut self, slot: Slot, name: &str, value: &str);

    /// Start delivering clicks to the widget.
    fn attach_click_listener(&mut self);

    /// Stop delivering clicks to the widget.
    fn detach_click_listener(&mut self);
}

/// Sprite reference for a coin symbol.
pub fn sprite_href(sprite_url: &str, symbol_id: &str) -> String {
    format!("{sprite_url}#{symbol_id}")
}

/// Point the coin at `symbol_id`, using both the plain and the legacy
/// `xlink:` attribute.
pub fn set_coin_face<S: Surface + ?Sized>(surface: &mut S, sprite_url: &str, symbol_id: &str) {
    let href = sprite_href(sprite_url, symbol_id);
    surface.set_attribute(Slot::CoinFace, "href", &href);
    surface.set_attribute(Slot::CoinFace, "xlink:href", &href);
}

/// Mirror `state` onto `surface` without re-rendering anything.
pub fn sync_view<S: Surface + ?Sized>(surface: &mut S, state: &ViewState, sprite_url: &str) {
    if !surface.has(Slot::Root) {
        return;
    }

    let is_result = state.is_result();
    surface.toggle_class(Slot::Root, RESULT_CLASS, is_result);

    if surface.has(Slot::ResetButton) {
        surface.set_disabled(Slot::ResetButton, !is_result);
    }

    if surface.has(Slot::TokenWrap) {
        surface.toggle_class(Slot::TokenWrap, ANIMATING_CLASS, state.is_animating);
        surface.toggle_class(Slot::TokenWrap, COIN_MODE_CLASS, state.mode == Mode::Coin);
        surface.toggle_class(Slot::TokenWrap, DICE_MODE_CLASS, state.mode == Mode::Dice);
    }

    if surface.has(Slot::DieValue) {
        surface.set_text(Slot::DieValue, &state.overlay_text);
    }

    if let Some(face) = state.symbol {
        if surface.has(Slot::CoinFace) {
            set_coin_face(surface, sprite_url, face.symbol_id());
        }
    }
}
