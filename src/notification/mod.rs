//! Routing of inbound host notifications to widget commands.
//!
//! Payloads have no fixed shape: a bare string or number names the target
//! directly, an object names it through one of a few well-known fields.

use crate::config::Action;
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Notification the host sends once the widget's markup exists.
pub const DOM_OBJECTS_CREATED: &str = "DOM_OBJECTS_CREATED";

/// Target that resets the widget instead of triggering an action.
pub const RESET_TARGET: &str = "reset";

/// Object fields that may carry the target, in priority order.
pub const TARGET_FIELDS: [&str; 4] = ["name", "button", "action", "id"];

/// What a notification asks the widget to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Reset,
    /// Trigger the action with this id.
    Trigger(String),
    Ignore,
}

/// Extract the target name from a payload.
///
/// ```
/// use chance::notification::parse_target;
/// use serde_json::json;
///
/// assert_eq!(parse_target(&json!("d20")).as_deref(), Some("d20"));
/// assert_eq!(parse_target(&json!(6)).as_deref(), Some("6"));
/// assert_eq!(parse_target(&json!({ "button": "reset" })).as_deref(), Some("reset"));
/// assert_eq!(parse_target(&json!({ "target": "d20" })), None);
/// ```
pub fn parse_target(payload: &Value) -> Option<String> {
    let target = match payload {
        Value::String(text) => text.clone(),
        Value::Number(number) => number_string(number),
        Value::Object(fields) => {
            // The first field with a truthy value wins, whatever its type.
            let value = TARGET_FIELDS
                .iter()
                .filter_map(|name| fields.get(*name))
                .find(|value| crate::config::truthy(value))?;
            match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number_string(number),
                _ => return None,
            }
        }
        Value::Null | Value::Bool(_) | Value::Array(_) => return None,
    };

    (!target.is_empty()).then_some(target)
}

/// Number formatted the way a browser stringifies it: plain decimals for
/// magnitudes in `[1e-6, 1e21)`, otherwise exponent form such as `1e+21`.
fn number_string(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    let Some(float) = number.as_f64() else {
        return number.to_string();
    };

    if float == 0.0 {
        return "0".to_string();
    }
    let magnitude = float.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return float.to_string();
    }

    let exponent_form = format!("{float:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

/// Lookup from `notify` key to action id. When two actions share a key the
/// later one wins.
pub fn notify_index(actions: &[Action]) -> HashMap<String, String> {
    actions
        .iter()
        .filter_map(|action| Some((action.notify.clone()?, action.id.clone())))
        .collect()
}

/// Decide what a payload asks for.
pub fn route(payload: &Value, notify: &HashMap<String, String>) -> Route {
    let Some(target) = parse_target(payload) else {
        return Route::Ignore;
    };

    if target == RESET_TARGET {
        return Route::Reset;
    }

    notify
        .get(&target)
        .map_or(Route::Ignore, |id| Route::Trigger(id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::normalize_buttons;
    use serde_json::json;

    fn index() -> HashMap<String, String> {
        notify_index(&normalize_buttons(&json!([
            { "id": "flip", "mode": "coin", "notify": "coin" },
            { "id": "d20", "sides": 20, "notify": "20" },
            { "id": "plain", "sides": 4 },
        ])))
    }

    #[test]
    fn primitive_payloads_name_the_target() {
        assert_eq!(parse_target(&json!("coin")).as_deref(), Some("coin"));
        assert_eq!(parse_target(&json!(20)).as_deref(), Some("20"));
        assert_eq!(parse_target(&json!(-3)).as_deref(), Some("-3"));
        assert_eq!(parse_target(&json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(parse_target(&json!(20.0)).as_deref(), Some("20"));
        assert_eq!(parse_target(&json!(0)).as_deref(), Some("0"));
    }

    #[test]
    fn extreme_floats_use_exponent_form() {
        assert_eq!(parse_target(&json!(1e21)).as_deref(), Some("1e+21"));
        assert_eq!(parse_target(&json!(2.5e30)).as_deref(), Some("2.5e+30"));
        assert_eq!(parse_target(&json!(1e-7)).as_deref(), Some("1e-7"));
        assert_eq!(parse_target(&json!(-1.5e-7)).as_deref(), Some("-1.5e-7"));
        assert_eq!(parse_target(&json!(1e20)).as_deref(), Some("100000000000000000000"));
        assert_eq!(parse_target(&json!(0.000001)).as_deref(), Some("0.000001"));
        assert_eq!(parse_target(&json!(-0.0)).as_deref(), Some("0"));
    }

    #[test]
    fn empty_and_unsupported_payloads_have_no_target() {
        assert_eq!(parse_target(&json!(null)), None);
        assert_eq!(parse_target(&json!("")), None);
        assert_eq!(parse_target(&json!(true)), None);
        assert_eq!(parse_target(&json!(["coin"])), None);
        assert_eq!(parse_target(&json!({})), None);
    }

    #[test]
    fn object_fields_follow_priority() {
        let payload = json!({ "id": "d", "action": "c", "button": "b", "name": "a" });
        assert_eq!(parse_target(&payload).as_deref(), Some("a"));

        let payload = json!({ "id": "d", "action": "c" });
        assert_eq!(parse_target(&payload).as_deref(), Some("c"));
    }

    #[test]
    fn falsy_fields_are_skipped() {
        let payload = json!({ "name": "", "button": 0, "action": null, "id": "d6" });
        assert_eq!(parse_target(&payload).as_deref(), Some("d6"));
    }

    #[test]
    fn truthy_non_primitive_field_yields_nothing() {
        assert_eq!(parse_target(&json!({ "name": true, "id": "d6" })), None);
        assert_eq!(parse_target(&json!({ "name": { "x": 1 } })), None);
    }

    #[test]
    fn reset_target_routes_to_reset() {
        assert_eq!(route(&json!("reset"), &index()), Route::Reset);
        assert_eq!(route(&json!({ "button": "reset" }), &index()), Route::Reset);
    }

    #[test]
    fn notify_keys_route_to_action_ids() {
        assert_eq!(route(&json!("coin"), &index()), Route::Trigger("flip".to_string()));
        assert_eq!(route(&json!(20), &index()), Route::Trigger("d20".to_string()));
    }

    #[test]
    fn action_ids_without_notify_key_are_not_routable() {
        assert_eq!(route(&json!("plain"), &index()), Route::Ignore);
        assert_eq!(route(&json!("flip"), &index()), Route::Ignore);
        assert_eq!(route(&json!(null), &index()), Route::Ignore);
    }

    #[test]
    fn later_actions_win_shared_notify_keys() {
        let index = notify_index(&normalize_buttons(&json!([
            { "id": "first", "notify": "roll" },
            { "id": "second", "notify": "roll" },
        ])));
        assert_eq!(route(&json!("roll"), &index), Route::Trigger("second".to_string()));
    }
}
