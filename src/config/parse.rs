//! Lenient integer parsing for host-supplied settings.
//!
//! Dashboard configs are hand-written, so numeric settings arrive as
//! numbers, numeric strings, or junk. Parsing follows `parseInt(value, 10)`:
//! numbers truncate toward zero, strings contribute their leading signed
//! decimal digits, everything else is unparsable.

use serde_json::Value;

/// Parse a loosely typed value into an integer.
///
/// Returns `None` when the value has no leading integer.
///
/// ```
/// use chance::config::parse_int;
/// use serde_json::json;
///
/// assert_eq!(parse_int(&json!(90)), Some(90));
/// assert_eq!(parse_int(&json!(" 1500ms")), Some(1500));
/// assert_eq!(parse_int(&json!(-12.9)), Some(-12));
/// assert_eq!(parse_int(&json!("fast")), None);
/// assert_eq!(parse_int(&json!(null)), None);
/// ```
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Some(int);
            }
            if number.as_u64().is_some() {
                return Some(i64::MAX);
            }
            number.as_f64().and_then(parse_float)
        }
        Value::String(text) => parse_int_str(text),
        // A list stringifies as its comma-joined items, so only the first counts.
        Value::Array(items) => items.first().and_then(parse_int),
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

fn parse_float(float: f64) -> Option<i64> {
    if !float.is_finite() {
        return None;
    }
    let magnitude = float.abs();
    if float != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        // Exponent notation: only the leading digit survives.
        return parse_int_str(&format!("{float:e}"));
    }
    Some(float.trunc() as i64)
}

fn parse_int_str(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut seen = false;
    let mut total: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        total = total
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    seen.then_some(if negative { -total } else { total })
}

fn clamp(parsed: i64, min: u64, max: u64) -> u64 {
    u64::try_from(parsed).map_or(min, |value| value.clamp(min, max))
}

/// Parse and clamp into `[min, max]`, using `fallback` for unparsable input.
///
/// ```
/// use chance::config::bounded_int;
/// use serde_json::json;
///
/// assert_eq!(bounded_int(Some(&json!(50_000)), 200, 15_000, 1_200), 15_000);
/// assert_eq!(bounded_int(Some(&json!("abc")), 200, 15_000, 1_200), 1_200);
/// assert_eq!(bounded_int(None, 200, 15_000, 1_200), 1_200);
/// ```
pub fn bounded_int(value: Option<&Value>, min: u64, max: u64, fallback: u64) -> u64 {
    value
        .and_then(parse_int)
        .map_or(fallback, |parsed| clamp(parsed, min, max))
}

/// Parse and clamp an optional setting where "nothing" means disabled.
///
/// Missing, `null`, `false`, `""`, unparsable and non-positive values all
/// yield `None`.
///
/// ```
/// use chance::config::optional_bounded_int;
/// use serde_json::json;
///
/// assert_eq!(optional_bounded_int(Some(&json!("0")), 200, 3_600_000), None);
/// assert_eq!(optional_bounded_int(Some(&json!(false)), 200, 3_600_000), None);
/// assert_eq!(optional_bounded_int(Some(&json!(50)), 200, 3_600_000), Some(200));
/// ```
pub fn optional_bounded_int(value: Option<&Value>, min: u64, max: u64) -> Option<u64> {
    let parsed = parse_int(value?)?;
    (parsed > 0).then(|| clamp(parsed, min, max))
}

/// Host truthiness of a loosely typed flag.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Trimmed, non-empty string content of a value.
pub fn trimmed_string(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_pass_through() {
        assert_eq!(parse_int(&json!(0)), Some(0));
        assert_eq!(parse_int(&json!(-40)), Some(-40));
        assert_eq!(parse_int(&json!(u64::MAX)), Some(i64::MAX));
    }

    #[test]
    fn floats_truncate_toward_zero() {
        assert_eq!(parse_int(&json!(12.7)), Some(12));
        assert_eq!(parse_int(&json!(-0.5)), Some(0));
        assert_eq!(parse_int(&json!(0.000001)), Some(0));
    }

    #[test]
    fn exponent_floats_keep_leading_digit() {
        assert_eq!(parse_int(&json!(1.5e21)), Some(1));
        assert_eq!(parse_int(&json!(5e-7)), Some(5));
        assert_eq!(parse_int(&json!(-2e22)), Some(-2));
    }

    #[test]
    fn strings_use_leading_digits() {
        assert_eq!(parse_int(&json!("250")), Some(250));
        assert_eq!(parse_int(&json!("  +75px")), Some(75));
        assert_eq!(parse_int(&json!("-3.9")), Some(-3));
        assert_eq!(parse_int(&json!("1e3")), Some(1));
        assert_eq!(parse_int(&json!("0x10")), Some(0));
        assert_eq!(parse_int(&json!("99999999999999999999999")), Some(i64::MAX));
    }

    #[test]
    fn non_numeric_strings_are_unparsable() {
        assert_eq!(parse_int(&json!("")), None);
        assert_eq!(parse_int(&json!("   ")), None);
        assert_eq!(parse_int(&json!("-")), None);
        assert_eq!(parse_int(&json!("twelve")), None);
    }

    #[test]
    fn other_shapes() {
        assert_eq!(parse_int(&json!(true)), None);
        assert_eq!(parse_int(&json!({"ms": 10})), None);
        assert_eq!(parse_int(&json!([])), None);
        assert_eq!(parse_int(&json!(["300", 5])), Some(300));
        assert_eq!(parse_int(&json!([null])), None);
    }

    #[test]
    fn bounded_int_clamps_both_ends() {
        assert_eq!(bounded_int(Some(&json!(10)), 40, 1000, 90), 40);
        assert_eq!(bounded_int(Some(&json!(-10)), 40, 1000, 90), 40);
        assert_eq!(bounded_int(Some(&json!(5000)), 40, 1000, 90), 1000);
        assert_eq!(bounded_int(Some(&json!(120)), 40, 1000, 90), 120);
        assert_eq!(bounded_int(Some(&json!(null)), 40, 1000, 90), 90);
    }

    #[test]
    fn optional_bounded_int_disables_on_empty_values() {
        for value in [json!(null), json!(false), json!(""), json!("0"), json!(-5), json!("off")] {
            assert_eq!(optional_bounded_int(Some(&value), 200, 3_600_000), None, "{value}");
        }
        assert_eq!(optional_bounded_int(None, 200, 3_600_000), None);
    }

    #[test]
    fn optional_bounded_int_clamps_positive_values() {
        assert_eq!(optional_bounded_int(Some(&json!(1)), 200, 3_600_000), Some(200));
        assert_eq!(optional_bounded_int(Some(&json!("5000")), 200, 3_600_000), Some(5000));
        assert_eq!(
            optional_bounded_int(Some(&json!(10_000_000)), 200, 3_600_000),
            Some(3_600_000)
        );
    }

    #[test]
    fn truthiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("no")));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
    }

    #[test]
    fn trimmed_string_drops_blank_and_non_strings() {
        assert_eq!(trimmed_string(Some(&json!("  d20 "))), Some("d20".to_string()));
        assert_eq!(trimmed_string(Some(&json!("   "))), None);
        assert_eq!(trimmed_string(Some(&json!(20))), None);
        assert_eq!(trimmed_string(None), None);
    }
}
