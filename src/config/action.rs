//! Canonical action records built from user button specs.

use super::parse::{bounded_int, trimmed_string};
use crate::core::Mode;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;

pub const MIN_SIDES: u64 = 2;
pub const MAX_SIDES: u64 = 10_000;
pub const DEFAULT_SIDES: u64 = 6;

/// What an action does when triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ActionKind {
    Coin,
    Dice { sides: u32 },
}

/// One user-triggerable flip or roll.
///
/// Serializes to the shape the host config uses:
/// `{id, label, mode, sides?, notify?, className?}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Action {
    pub fn mode(&self) -> Mode {
        match self.kind {
            ActionKind::Coin => Mode::Coin,
            ActionKind::Dice { .. } => Mode::Dice,
        }
    }

    pub fn sides(&self) -> Option<u32> {
        match self.kind {
            ActionKind::Coin => None,
            ActionKind::Dice { sides } => Some(sides),
        }
    }
}

/// Built-in buttons used when the config supplies none.
pub fn default_buttons() -> Vec<Value> {
    vec![
        json!({ "id": "coin", "label": "Flip Coin", "mode": "coin" }),
        json!({ "id": "d6", "label": "Roll d6", "mode": "dice", "sides": 6 }),
        json!({ "id": "d10", "label": "Roll d10", "mode": "dice", "sides": 10 }),
        json!({ "id": "d100", "label": "Roll d100", "mode": "dice", "sides": 100 }),
    ]
}

/// Normalize raw button specs into actions with unique ids.
///
/// Anything other than a non-empty list falls back to the default buttons.
/// Malformed entries degrade to defaults; this never fails.
///
/// ```
/// use chance::config::normalize_buttons;
/// use serde_json::json;
///
/// let actions = normalize_buttons(&json!([{ "id": "go" }, { "id": "go", "mode": "coin" }]));
/// let ids: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
/// assert_eq!(ids, ["go", "go-1"]);
/// ```
pub fn normalize_buttons(raw: &Value) -> Vec<Action> {
    let defaults;
    let source: &[Value] = match raw.as_array() {
        Some(buttons) if !buttons.is_empty() => buttons,
        _ => {
            defaults = default_buttons();
            &defaults
        }
    };

    let mut seen = HashSet::new();
    source
        .iter()
        .enumerate()
        .map(|(index, button)| {
            let mut action = normalize_button(button, index);
            action.id = make_unique_id(&action.id, &mut seen);
            action
        })
        .collect()
}

/// Normalize a single raw button. The id is not yet de-duplicated.
pub fn normalize_button(button: &Value, index: usize) -> Action {
    let field = |name: &str| button.get(name);

    let kind = if field("mode").and_then(Value::as_str) == Some("coin") {
        ActionKind::Coin
    } else {
        let sides = bounded_int(field("sides"), MIN_SIDES, MAX_SIDES, DEFAULT_SIDES);
        ActionKind::Dice {
            sides: u32::try_from(sides).unwrap_or(MAX_SIDES as u32),
        }
    };

    let mode = match kind {
        ActionKind::Coin => Mode::Coin,
        ActionKind::Dice { .. } => Mode::Dice,
    };

    let id = trimmed_string(field("id")).unwrap_or_else(|| format!("{}-{index}", mode.as_str()));
    let label = trimmed_string(field("label")).unwrap_or_else(|| match kind {
        ActionKind::Coin => "Flip Coin".to_string(),
        ActionKind::Dice { sides } => format!("Roll d{sides}"),
    });

    Action {
        id,
        label,
        kind,
        notify: trimmed_string(field("notify")),
        class_name: trimmed_string(field("className")),
    }
}

/// Return `base` or the first free `base-N`, and mark it as taken.
pub fn make_unique_id(base: &str, seen: &mut HashSet<String>) -> String {
    let base = if base.is_empty() { "action" } else { base };
    let mut id = base.to_string();
    let mut suffix = 1;

    while seen.contains(&id) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }

    seen.insert(id.clone());
    id
}
