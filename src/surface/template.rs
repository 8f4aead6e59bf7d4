//! View-model handed to the host template for the first render.

use crate::config::Config;
use crate::core::{Mode, ViewState};
use serde::Serialize;

/// Template input, serialized as `{ "view": { ... } }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateData {
    pub view: TemplateView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateView {
    pub dom_id: String,
    pub compact: bool,
    pub flat_coin: bool,
    pub buttons: Vec<ButtonView>,
    pub token: TokenView,
    pub is_result: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonView {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenView {
    pub mode: Mode,
    pub symbol_id: Option<&'static str>,
    pub overlay_text: String,
    pub is_animating: bool,
    pub sprite_url: String,
    pub aria_label: &'static str,
}

impl TemplateData {
    pub fn new(dom_id: &str, config: &Config, state: &ViewState, sprite_url: &str) -> Self {
        let buttons = config
            .actions
            .iter()
            .map(|action| ButtonView {
                id: action.id.clone(),
                label: action.label.clone(),
                class_name: action.class_name.clone(),
            })
            .collect();

        let token = TokenView {
            mode: state.mode,
            symbol_id: state.symbol.map(|face| face.symbol_id()),
            overlay_text: state.overlay_text.clone(),
            is_animating: state.is_animating,
            sprite_url: sprite_url.to_string(),
            aria_label: match state.mode {
                Mode::Coin => "Coin",
                Mode::Dice => "Die",
            },
        };

        Self {
            view: TemplateView {
                dom_id: dom_id.to_string(),
                compact: config.compact,
                flat_coin: config.flat_coin,
                buttons,
                token,
                is_result: state.is_result(),
            },
        }
    }
}
