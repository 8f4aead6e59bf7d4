//! Widget configuration.
//!
//! Raw host settings are captured as loosely typed JSON and normalized into
//! a [`Config`] whose values are always in range. Normalization never fails.

mod action;
mod error;
mod parse;

pub use action::{
    default_buttons, make_unique_id, normalize_button, normalize_buttons, Action, ActionKind,
    DEFAULT_SIDES, MAX_SIDES, MIN_SIDES,
};
pub use error::ConfigError;
pub use parse::{bounded_int, optional_bounded_int, parse_int, trimmed_string, truthy};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

pub const MIN_ANIMATION_DURATION_MS: u64 = 200;
pub const MAX_ANIMATION_DURATION_MS: u64 = 15_000;
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 1_200;

pub const MIN_ANIMATION_FRAME_MS: u64 = 40;
pub const MAX_ANIMATION_FRAME_MS: u64 = 1_000;
pub const DEFAULT_ANIMATION_FRAME_MS: u64 = 90;

pub const MIN_AUTO_RESET_MS: u64 = 200;
pub const MAX_AUTO_RESET_MS: u64 = 3_600_000;

/// Config exactly as the host supplied it.
///
/// A field is `None` when the key is missing and `Some(Value::Null)` when it
/// was given as `null`; the two normalize differently for flags.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConfig {
    #[serde(deserialize_with = "present")]
    pub animation_duration_ms: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub animation_frame_ms: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub auto_reset_ms: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub compact: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub flat_coin: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub notification: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub buttons: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Normalized widget configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub animation_duration_ms: u64,
    pub animation_frame_ms: u64,
    /// `None` disables auto-reset.
    pub auto_reset_ms: Option<u64>,
    pub compact: bool,
    pub flat_coin: bool,
    /// Notification name that may trigger actions or a reset.
    pub notification: Option<String>,
    #[serde(rename = "buttons")]
    pub actions: Vec<Action>,
}

impl Default for Config {
    fn default() -> Self {
        Self::normalize(RawConfig::default())
    }
}

impl Config {
    /// Normalize raw settings. Out-of-range or malformed values are clamped
    /// or replaced by defaults.
    ///
    /// ```
    /// use chance::config::{Config, RawConfig};
    /// use serde_json::json;
    ///
    /// let raw = RawConfig {
    ///     animation_frame_ms: Some(json!("5")),
    ///     auto_reset_ms: Some(json!("0")),
    ///     ..RawConfig::default()
    /// };
    /// let config = Config::normalize(raw);
    ///
    /// assert_eq!(config.animation_frame_ms, 40);
    /// assert_eq!(config.auto_reset_ms, None);
    /// assert_eq!(config.actions.len(), 4);
    /// ```
    pub fn normalize(raw: RawConfig) -> Self {
        Self {
            animation_duration_ms: bounded_int(
                raw.animation_duration_ms.as_ref(),
                MIN_ANIMATION_DURATION_MS,
                MAX_ANIMATION_DURATION_MS,
                DEFAULT_ANIMATION_DURATION_MS,
            ),
            animation_frame_ms: bounded_int(
                raw.animation_frame_ms.as_ref(),
                MIN_ANIMATION_FRAME_MS,
                MAX_ANIMATION_FRAME_MS,
                DEFAULT_ANIMATION_FRAME_MS,
            ),
            auto_reset_ms: optional_bounded_int(
                raw.auto_reset_ms.as_ref(),
                MIN_AUTO_RESET_MS,
                MAX_AUTO_RESET_MS,
            ),
            compact: raw.compact.as_ref().is_some_and(truthy),
            flat_coin: raw.flat_coin.as_ref().map_or(true, truthy),
            notification: raw
                .notification
                .as_ref()
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            actions: normalize_buttons(raw.buttons.as_ref().unwrap_or(&Value::Null)),
        }
    }

    /// Read and normalize a raw config object.
    ///
    /// Anything that is not an object carries no settings, so it yields the
    /// defaults.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            warn!(found = json_type_name(&value), "Config is not an object, using defaults");
            return Self::default();
        }
        let raw = serde_json::from_value::<RawConfig>(value).unwrap_or_default();
        Self::normalize(raw)
    }

    /// Parse JSON text and normalize it.
    ///
    /// ```
    /// use chance::config::Config;
    ///
    /// let config = Config::from_json(r#"{"autoResetMs": 4000, "notification": "CHANCE"}"#).unwrap();
    /// assert_eq!(config.auto_reset_ms, Some(4000));
    /// assert_eq!(config.notification.as_deref(), Some("CHANCE"));
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(ConfigError::Syntax)?;
        Ok(Self::from_value(value))
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn animation_frame(&self) -> Duration {
        Duration::from_millis(self.animation_frame_ms)
    }

    pub fn auto_reset(&self) -> Option<Duration> {
        self.auto_reset_ms.map(Duration::from_millis)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
