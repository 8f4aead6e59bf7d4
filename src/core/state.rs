//! Core State trait for widget phases.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A lifecycle phase that can be kept in [`StateHistory`](super::StateHistory).
///
/// Phases are small immutable values. `Clone` and `PartialEq` let the
/// history copy them and skip no-op transitions; the serde bounds let
/// history entries be dumped for diagnostics.
///
/// # Example
///
/// ```rust
/// use chance::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Spinner {
///     Stopped,
///     Spinning,
/// }
///
/// impl State for Spinner {
///     fn name(&self) -> &str {
///         match self {
///             Self::Stopped => "Stopped",
///             Self::Spinning => "Spinning",
///         }
///     }
/// }
///
/// assert_eq!(Spinner::Spinning.name(), "Spinning");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in log fields.
    fn name(&self) -> &str;
}
