//! Single-threaded timer queue on a virtual millisecond clock.
//!
//! The host advances the clock; due timers are handed back one at a time in
//! `(due, creation order)` order so the caller can run each task to
//! completion before the next one is considered.

use serde::Serialize;
use std::collections::BTreeMap;

/// Handle of a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimerId(u64);

/// Work a timer performs when it fires. Actions are referenced by their
/// index in the widget's action list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "task", rename_all = "camelCase")]
pub enum Task {
    /// Start the frame tick and the end timer for an action.
    Arm { action: usize },
    /// Advance the in-flight animation by one frame.
    Frame { action: usize },
    /// Settle the action with its final outcome.
    Finish { action: usize },
    /// Return to the button view.
    AutoReset,
}

#[derive(Clone, Debug)]
struct Entry {
    due: u64,
    period: Option<u64>,
    task: Task,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    entries: BTreeMap<TimerId, Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Fire `task` once after `delay_ms`.
    pub fn set_timeout(&mut self, delay_ms: u64, task: Task) -> TimerId {
        self.insert(delay_ms, None, task)
    }

    /// Fire `task` every `period_ms` (at least 1 ms) until cancelled.
    pub fn set_interval(&mut self, period_ms: u64, task: Task) -> TimerId {
        let period = period_ms.max(1);
        self.insert(period, Some(period), task)
    }

    fn insert(&mut self, delay_ms: u64, period: Option<u64>, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                due: self.now.saturating_add(delay_ms),
                period,
                task,
            },
        );
        id
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Earliest due time among live timers.
    pub fn next_due(&self) -> Option<u64> {
        self.entries.values().map(|entry| entry.due).min()
    }

    /// Pop the next timer due at or before `until`, moving the clock to its
    /// due time. Intervals are re-armed one period later; timeouts are
    /// removed.
    pub fn poll(&mut self, until: u64) -> Option<(TimerId, Task)> {
        let (id, due, period, task) = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.due <= until)
            .map(|(id, entry)| (*id, entry.due, entry.period, entry.task))
            .min_by_key(|(id, due, _, _)| (*due, *id))?;

        self.now = self.now.max(due);

        match period {
            Some(period) => {
                if let Some(entry) = self.entries.get_mut(&id) {
                    entry.due = due.saturating_add(period);
                }
            }
            None => {
                self.entries.remove(&id);
            }
        }

        Some((id, task))
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn advance_to(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    /// Drop every timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler, until: u64) -> Vec<(u64, Task)> {
        let mut fired = Vec::new();
        while let Some((_, task)) = scheduler.poll(until) {
            fired.push((scheduler.now(), task));
        }
        scheduler.advance_to(until);
        fired
    }

    #[test]
    fn timeout_fires_once_at_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.set_timeout(50, Task::AutoReset);

        assert!(drain(&mut scheduler, 49).is_empty());
        assert_eq!(drain(&mut scheduler, 50), vec![(50, Task::AutoReset)]);
        assert!(drain(&mut scheduler, 1_000).is_empty());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), 1_000);
    }

    #[test]
    fn interval_repeats_until_cancelled() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.set_interval(90, Task::Frame { action: 0 });

        let fired = drain(&mut scheduler, 300);
        let times: Vec<u64> = fired.iter().map(|(at, _)| *at).collect();
        assert_eq!(times, vec![90, 180, 270]);
        assert!(scheduler.is_pending(id));

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(drain(&mut scheduler, 10_000).is_empty());
    }

    #[test]
    fn ties_fire_in_creation_order() {
        let mut scheduler = Scheduler::new();
        scheduler.set_timeout(100, Task::Finish { action: 1 });
        scheduler.set_timeout(100, Task::AutoReset);
        scheduler.set_timeout(20, Task::Arm { action: 1 });

        let tasks: Vec<Task> = drain(&mut scheduler, 100).into_iter().map(|(_, t)| t).collect();
        assert_eq!(
            tasks,
            vec![Task::Arm { action: 1 }, Task::Finish { action: 1 }, Task::AutoReset]
        );
    }

    #[test]
    fn delays_are_relative_to_current_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(500);
        scheduler.set_timeout(0, Task::AutoReset);

        assert_eq!(scheduler.next_due(), Some(500));
        assert_eq!(drain(&mut scheduler, 500), vec![(500, Task::AutoReset)]);
    }

    #[test]
    fn zero_period_interval_is_bumped_to_one() {
        let mut scheduler = Scheduler::new();
        scheduler.set_interval(0, Task::Frame { action: 2 });

        assert_eq!(drain(&mut scheduler, 3).len(), 3);
    }

    #[test]
    fn clear_drops_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.set_timeout(10, Task::AutoReset);
        scheduler.set_interval(10, Task::Frame { action: 0 });

        scheduler.clear();

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.next_due(), None);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(100);
        scheduler.advance_to(40);
        assert_eq!(scheduler.now(), 100);
    }
}
