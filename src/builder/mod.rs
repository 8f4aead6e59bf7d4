//! Builder API for widget construction.
//!
//! Collects the host-provided pieces (module identifier, asset base path,
//! config, randomness) and produces a ready [`Widget`].

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::config::Config;
use crate::core::DEFAULT_HISTORY_LIMIT;
use crate::effects::Widget;
use crate::surface::{Surface, SPRITE_PATH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Delay between entering the animating phase and starting the frame and
/// end timers, giving the host time to attach the result markup.
pub const DEFAULT_ARM_DELAY: Duration = Duration::from_millis(50);

/// Fluent builder for [`Widget`].
///
/// # Example
///
/// ```
/// use chance::builder::WidgetBuilder;
/// use chance::config::Config;
/// use chance::core::Phase;
/// use chance::surface::MemorySurface;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use std::time::Duration;
///
/// let mut widget = WidgetBuilder::new()
///     .identifier("module_2_chance")
///     .base_path("modules/chance")
///     .config(Config::from_json(r#"{"animationDurationMs": 400}"#).unwrap())
///     .rng(StdRng::seed_from_u64(1))
///     .build::<MemorySurface>()
///     .unwrap();
///
/// widget.mount(MemorySurface::standard());
/// widget.trigger("d6");
/// widget.advance(Duration::from_millis(450));
/// assert_eq!(widget.phase(), Phase::Settled);
/// ```
pub struct WidgetBuilder<R: Rng = StdRng> {
    identifier: Option<String>,
    base_path: String,
    config: Option<Config>,
    arm_delay: Duration,
    history_limit: usize,
    rng: R,
}

impl WidgetBuilder<StdRng> {
    /// Create a builder seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            identifier: None,
            base_path: String::new(),
            config: None,
            arm_delay: DEFAULT_ARM_DELAY,
            history_limit: DEFAULT_HISTORY_LIMIT,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for WidgetBuilder<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WidgetBuilder<R> {
    /// Host-assigned module identifier (required). The surface id is
    /// `<identifier>-root`.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Directory the widget's assets are served from.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Normalized config. Defaults to [`Config::default`].
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Delay before the frame and end timers start. Zero starts them on the
    /// next clock advance.
    pub fn arm_delay(mut self, delay: Duration) -> Self {
        self.arm_delay = delay;
        self
    }

    /// Number of phase transitions kept in the widget history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Replace the random source.
    pub fn rng<R2: Rng>(self, rng: R2) -> WidgetBuilder<R2> {
        WidgetBuilder {
            identifier: self.identifier,
            base_path: self.base_path,
            config: self.config,
            arm_delay: self.arm_delay,
            history_limit: self.history_limit,
            rng,
        }
    }

    /// Build the widget.
    pub fn build<S: Surface>(self) -> Result<Widget<S, R>, BuildError> {
        let identifier = self.identifier.ok_or(BuildError::MissingIdentifier)?;
        let identifier = identifier.trim();
        if identifier.is_empty() || identifier.contains(char::is_whitespace) {
            return Err(BuildError::InvalidIdentifier(identifier.to_string()));
        }

        Ok(Widget::new(
            format!("{identifier}-root"),
            asset_url(&self.base_path, SPRITE_PATH),
            self.config.unwrap_or_default(),
            self.arm_delay,
            self.history_limit,
            self.rng,
        ))
    }
}

/// Resolve `relative` against the widget's asset base path.
pub fn asset_url(base_path: &str, relative: &str) -> String {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        relative.to_string()
    } else {
        format!("{base}/{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn builder_requires_identifier() {
        let result = WidgetBuilder::new().build::<MemorySurface>();
        assert!(matches!(result, Err(BuildError::MissingIdentifier)));
    }

    #[test]
    fn builder_rejects_blank_or_spaced_identifier() {
        let blank = WidgetBuilder::new().identifier("  ").build::<MemorySurface>();
        assert!(matches!(blank, Err(BuildError::InvalidIdentifier(_))));

        let spaced = WidgetBuilder::new().identifier("my widget").build::<MemorySurface>();
        assert!(matches!(spaced, Err(BuildError::InvalidIdentifier(id)) if id == "my widget"));
    }

    #[test]
    fn builder_derives_dom_id_and_sprite_url() {
        let widget = WidgetBuilder::new()
            .identifier("module_7_chance")
            .base_path("modules/chance/")
            .build::<MemorySurface>()
            .unwrap();

        assert_eq!(widget.dom_id(), "module_7_chance-root");
        assert_eq!(widget.sprite_url(), "modules/chance/assets/sprite.svg");
        assert_eq!(widget.config(), &Config::default());
    }

    #[test]
    fn asset_url_without_base_is_relative() {
        assert_eq!(asset_url("", "assets/sprite.svg"), "assets/sprite.svg");
        assert_eq!(asset_url("/", "assets/sprite.svg"), "assets/sprite.svg");
    }

    #[test]
    fn zero_arm_delay_arms_on_next_advance() {
        let mut widget = WidgetBuilder::new()
            .identifier("w")
            .arm_delay(Duration::ZERO)
            .rng(StdRng::seed_from_u64(4))
            .build::<MemorySurface>()
            .unwrap();
        widget.mount(MemorySurface::standard());

        widget.trigger("coin");
        widget.advance(Duration::ZERO);

        // Frame tick and end timer replace the arm timer.
        assert_eq!(widget.pending_timers(), 2);
    }

    #[test]
    fn history_limit_is_applied() {
        let widget = WidgetBuilder::new()
            .identifier("w")
            .history_limit(3)
            .build::<MemorySurface>()
            .unwrap();
        assert_eq!(widget.history().limit(), 3);
    }
}
