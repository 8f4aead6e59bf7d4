//! In-memory surface for headless hosts, demos and tests.

use super::{
    set_coin_face, Slot, Surface, TemplateData, ANIMATING_CLASS, COIN_MODE_CLASS,
    DICE_MODE_CLASS, RESULT_CLASS,
};
use std::collections::{BTreeMap, BTreeSet};

/// One rendered element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub disabled: bool,
}

impl Element {
    pub fn with_class(class: &str) -> Self {
        let mut element = Self::default();
        element.classes.insert(class.to_string());
        element
    }
}

/// Surface kept entirely in memory.
///
/// Counts listeners and mutations so callers can check that a widget
/// cleaned up after itself.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    elements: BTreeMap<Slot, Element>,
    buttons: Vec<(String, String)>,
    listeners: usize,
    mutations: usize,
}

impl MemorySurface {
    /// Surface with no elements at all, as if the widget were hidden.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Surface with every slot present and no buttons.
    pub fn standard() -> Self {
        let mut surface = Self::default();
        surface.insert(Slot::Root, Element::with_class("chance"));
        surface.insert(Slot::ResetButton, Element {
            disabled: true,
            ..Element::with_class("btn-reset")
        });
        surface.insert(Slot::TokenWrap, Element::with_class("tokenWrap"));
        surface.insert(Slot::DieValue, Element::with_class("dieValue"));
        surface.insert(Slot::CoinFace, Element::default());
        surface
    }

    /// Build the surface a host would produce from `data`.
    pub fn from_template(data: &TemplateData) -> Self {
        let view = &data.view;
        let mut surface = Self::standard();
        surface.buttons = view
            .buttons
            .iter()
            .map(|button| (button.id.clone(), button.label.clone()))
            .collect();

        let root = surface.elements.entry(Slot::Root).or_default();
        for (class, on) in [
            ("compact", view.compact),
            ("flat-coin", view.flat_coin),
            (RESULT_CLASS, view.is_result),
        ] {
            if on {
                root.classes.insert(class.to_string());
            }
        }

        let token = &view.token;
        if let Some(reset) = surface.elements.get_mut(&Slot::ResetButton) {
            reset.disabled = !view.is_result;
        }
        if let Some(wrap) = surface.elements.get_mut(&Slot::TokenWrap) {
            let mode_class = match token.mode {
                crate::core::Mode::Coin => COIN_MODE_CLASS,
                crate::core::Mode::Dice => DICE_MODE_CLASS,
            };
            wrap.classes.insert(mode_class.to_string());
            if token.is_animating {
                wrap.classes.insert(ANIMATING_CLASS.to_string());
            }
        }
        if let Some(value) = surface.elements.get_mut(&Slot::DieValue) {
            value.text = token.overlay_text.clone();
        }
        if let Some(symbol) = token.symbol_id {
            set_coin_face(&mut surface, &token.sprite_url, symbol);
        }

        surface.mutations = 0;
        surface
    }

    pub fn insert(&mut self, slot: Slot, element: Element) {
        self.elements.insert(slot, element);
    }

    pub fn remove(&mut self, slot: Slot) -> Option<Element> {
        self.elements.remove(&slot)
    }

    pub fn element(&self, slot: Slot) -> Option<&Element> {
        self.elements.get(&slot)
    }

    pub fn has_class(&self, slot: Slot, class: &str) -> bool {
        self.element(slot)
            .is_some_and(|element| element.classes.contains(class))
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.element(slot).map(|element| element.text.as_str())
    }

    pub fn attribute(&self, slot: Slot, name: &str) -> Option<&str> {
        self.element(slot)?.attributes.get(name).map(String::as_str)
    }

    /// `(id, label)` of each rendered action button.
    pub fn buttons(&self) -> &[(String, String)] {
        &self.buttons
    }

    /// Number of attached click listeners.
    pub fn listeners(&self) -> usize {
        self.listeners
    }

    /// Number of in-place mutations applied since construction.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    fn element_mut(&mut self, slot: Slot) -> Option<&mut Element> {
        let element = self.elements.get_mut(&slot)?;
        self.mutations += 1;
        Some(element)
    }
}

impl Surface for MemorySurface {
    fn has(&self, slot: Slot) -> bool {
        self.elements.contains_key(&slot)
    }

    fn toggle_class(&mut self, slot: Slot, class: &str, on: bool) {
        if let Some(element) = self.element_mut(slot) {
            if on {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }

    fn set_disabled(&mut self, slot: Slot, disabled: bool) {
        if let Some(element) = self.element_mut(slot) {
            element.disabled = disabled;
        }
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        if let Some(element) = self.element_mut(slot) {
            element.text = text.to_string();
        }
    }

    fn set_attribute(&mut self, slot: Slot, name: &str, value: &str) {
        if let Some(element) = self.element_mut(slot) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn attach_click_listener(&mut self) {
        self.listeners += 1;
    }

    fn detach_click_listener(&mut self) {
        self.listeners = self.listeners.saturating_sub(1);
    }
}
