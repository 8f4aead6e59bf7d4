//! Phase transition history.
//!
//! Keeps a bounded, immutable log of the phases a widget moved through.
//! A dashboard widget runs for days, so only the most recent transitions
//! are retained.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Number of transitions kept by [`StateHistory::new`].
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use chance::core::{Phase, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Phase::Idle,
///     to: Phase::Animating,
///     timestamp: Utc::now(),
///     clock_ms: 0,
///     action: Some("d6".to_string()),
/// };
/// assert_eq!(transition.action.as_deref(), Some("d6"));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Wall-clock time of the transition
    pub timestamp: DateTime<Utc>,
    /// Scheduler clock (milliseconds since widget start) of the transition
    pub clock_ms: u64,
    /// Action that caused the transition, if any
    pub action: Option<String>,
}

/// Ordered, bounded history of state transitions.
///
/// `record` returns a new history and leaves the receiver untouched. Once
/// the limit is reached the oldest transition is dropped.
///
/// # Example
///
/// ```rust
/// use chance::core::{Phase, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::with_limit(2);
/// let step = |from: Phase, to: Phase, clock_ms: u64| StateTransition {
///     from,
///     to,
///     timestamp: Utc::now(),
///     clock_ms,
///     action: None,
/// };
///
/// let history = history
///     .record(step(Phase::Idle, Phase::Animating, 0))
///     .record(step(Phase::Animating, Phase::Settled, 1250))
///     .record(step(Phase::Settled, Phase::Idle, 5000));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&Phase::Animating, &Phase::Settled, &Phase::Idle]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    limit: usize,
    transitions: VecDeque<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history holding at most [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history holding at most `limit` entries (minimum 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            transitions: VecDeque::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        if transitions.len() == self.limit {
            transitions.pop_front();
        }
        transitions.push_back(transition);
        Self {
            limit: self.limit,
            transitions,
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed by
    /// the `to` state of every retained transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Wall-clock duration between the oldest and newest retained transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
