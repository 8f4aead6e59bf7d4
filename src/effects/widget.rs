//! The widget: owns the view state, its timers and the mounted surface.

use crate::config::{Action, ActionKind, Config};
use crate::core::{CoinFace, Phase, State, StateHistory, StateTransition, ViewState};
use crate::effects::scheduler::{Scheduler, Task, TimerId};
use crate::notification::{self, Route, DOM_OBJECTS_CREATED};
use crate::outcome::{resolve_outcome, roll_die};
use crate::surface::{set_coin_face, sync_view, Slot, Surface, TemplateData, RESET_ACTION};
use chrono::Utc;
use rand::Rng;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Live timer handles. Each slot holds at most one timer.
#[derive(Clone, Debug, Default)]
struct Timers {
    arm: Option<TimerId>,
    frame: Option<TimerId>,
    end: Option<TimerId>,
    auto_reset: Option<TimerId>,
}

impl Timers {
    fn clear(&mut self, scheduler: &mut Scheduler) {
        for id in [
            self.arm.take(),
            self.frame.take(),
            self.end.take(),
            self.auto_reset.take(),
        ]
        .into_iter()
        .flatten()
        {
            scheduler.cancel(id);
        }
    }
}

/// A coin-flip / dice-roll widget instance.
///
/// All methods run to completion synchronously; timers only fire from
/// [`Widget::advance`]. Nothing here returns an error: unknown actions,
/// unmatched notifications and missing display elements are ignored.
///
/// Build one with [`crate::builder::WidgetBuilder`].
pub struct Widget<S: Surface, R: Rng> {
    dom_id: String,
    sprite_url: String,
    config: Config,
    by_id: HashMap<String, usize>,
    by_notify: HashMap<String, String>,
    arm_delay_ms: u64,
    state: ViewState,
    history: StateHistory<Phase>,
    scheduler: Scheduler,
    timers: Timers,
    surface: Option<S>,
    bound: bool,
    rng: R,
}

impl<S: Surface, R: Rng> Widget<S, R> {
    pub(crate) fn new(
        dom_id: String,
        sprite_url: String,
        config: Config,
        arm_delay: Duration,
        history_limit: usize,
        rng: R,
    ) -> Self {
        let by_id = config
            .actions
            .iter()
            .enumerate()
            .map(|(index, action)| (action.id.clone(), index))
            .collect();
        let by_notify = notification::notify_index(&config.actions);

        info!(
            widget = %dom_id,
            actions = config.actions.len(),
            notification = ?config.notification,
            "Starting widget"
        );

        Self {
            dom_id,
            sprite_url,
            config,
            by_id,
            by_notify,
            arm_delay_ms: u64::try_from(arm_delay.as_millis()).unwrap_or(u64::MAX),
            state: ViewState::default(),
            history: StateHistory::with_limit(history_limit),
            scheduler: Scheduler::new(),
            timers: Timers::default(),
            surface: None,
            bound: false,
            rng,
        }
    }

    pub fn dom_id(&self) -> &str {
        &self.dom_id
    }

    pub fn sprite_url(&self) -> &str {
        &self.sprite_url
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn actions(&self) -> &[Action] {
        &self.config.actions
    }

    pub fn action(&self, id: &str) -> Option<&Action> {
        self.by_id.get(id).map(|&index| &self.config.actions[index])
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn history(&self) -> &StateHistory<Phase> {
        &self.history
    }

    /// Number of timers that may still fire.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Milliseconds the widget clock has advanced since construction.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Data for the host template's first render.
    pub fn template_data(&self) -> TemplateData {
        TemplateData::new(&self.dom_id, &self.config, &self.state, &self.sprite_url)
    }

    /// Install a freshly rendered surface, bind input and sync.
    ///
    /// Returns the previously mounted surface with its listener detached.
    pub fn mount(&mut self, surface: S) -> Option<S> {
        self.unbind_input();
        let previous = self.surface.replace(surface);
        self.bind_input();
        self.sync();
        previous
    }

    /// Tear down and hand the surface back to the host.
    pub fn unmount(&mut self) -> Option<S> {
        self.teardown();
        self.surface.take()
    }

    /// Handle a host notification.
    ///
    /// `DOM_OBJECTS_CREATED` binds input and syncs the view. Anything else is
    /// only considered when its name equals the configured notification key.
    pub fn notification_received(&mut self, name: &str, payload: &Value) {
        if name == DOM_OBJECTS_CREATED {
            self.bind_input();
            self.sync();
            return;
        }

        if self.config.notification.as_deref() != Some(name) {
            return;
        }

        match notification::route(payload, &self.by_notify) {
            Route::Reset => self.reset(),
            Route::Trigger(id) => {
                self.trigger(&id);
            }
            Route::Ignore => {
                debug!(widget = %self.dom_id, %payload, "Ignoring notification payload");
            }
        }
    }

    /// Handle a click on a rendered button. Ignored unless input is bound.
    pub fn click(&mut self, action_id: &str) {
        if !self.bound {
            return;
        }

        if action_id == RESET_ACTION {
            self.reset();
        } else {
            self.trigger(action_id);
        }
    }

    /// Start `action_id`, cancelling whatever was in flight.
    ///
    /// Returns `false` (and does nothing) for an unknown id.
    pub fn trigger(&mut self, action_id: &str) -> bool {
        let Some(&index) = self.by_id.get(action_id) else {
            debug!(widget = %self.dom_id, action = %action_id, "Unknown action");
            return false;
        };

        self.stop_timers();

        let action = &self.config.actions[index];
        let next = self.state.animating(action, &mut self.rng);
        debug!(
            widget = %self.dom_id,
            action = %action.id,
            mode = action.mode().as_str(),
            "Triggered"
        );
        self.transition(next, Some(index));
        self.sync();

        self.timers.arm = Some(
            self.scheduler
                .set_timeout(self.arm_delay_ms, Task::Arm { action: index }),
        );
        true
    }

    /// Return to the button view and cancel every timer.
    pub fn reset(&mut self) {
        self.stop_timers();
        let next = self.state.idle();
        self.transition(next, None);
        self.sync();
    }

    /// Cancel every timer and detach input. Safe to call in any state.
    pub fn teardown(&mut self) {
        self.stop_timers();
        self.unbind_input();
        debug!(widget = %self.dom_id, phase = ?self.phase(), "Torn down");
    }

    /// Advance the widget clock, firing every timer that comes due.
    pub fn advance(&mut self, elapsed: Duration) {
        let elapsed = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let until = self.scheduler.now().saturating_add(elapsed);

        while let Some((id, task)) = self.scheduler.poll(until) {
            trace!(widget = %self.dom_id, timer = ?id, ?task, at = self.scheduler.now(), "Timer fired");
            self.run(task);
        }

        self.scheduler.advance_to(until);
    }

    /// Advance the clock straight to the next due timer, if any, and fire it.
    /// Returns `false` when nothing is scheduled.
    pub fn advance_to_next_timer(&mut self) -> bool {
        let Some(due) = self.scheduler.next_due() else {
            return false;
        };
        let elapsed = due.saturating_sub(self.scheduler.now());
        self.advance(Duration::from_millis(elapsed));
        true
    }

    /// Bind input on the mounted surface. Idempotent.
    pub fn bind_input(&mut self) {
        if self.bound {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.attach_click_listener();
            self.bound = true;
        }
    }

    /// Detach input from the mounted surface. Idempotent.
    pub fn unbind_input(&mut self) {
        if !self.bound {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.detach_click_listener();
        }
        self.bound = false;
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Arm { action } => self.arm(action),
            Task::Frame { action } => self.frame(action),
            Task::Finish { action } => self.finish(action),
            Task::AutoReset => {
                self.timers.auto_reset = None;
                self.reset();
            }
        }
    }

    /// Start the frame tick (if its element exists) and the end timer.
    fn arm(&mut self, index: usize) {
        self.timers.arm = None;
        let Some(kind) = self.config.actions.get(index).map(|action| action.kind) else {
            return;
        };
        let frame_ms = self.config.animation_frame_ms;

        let target_ready = match kind {
            ActionKind::Coin => self.surface_has(Slot::CoinFace),
            ActionKind::Dice { .. } => {
                self.surface_has(Slot::TokenWrap) && self.surface_has(Slot::DieValue)
            }
        };

        if target_ready {
            match kind {
                ActionKind::Coin => {
                    self.state = self.state.with_symbol(CoinFace::Heads);
                }
                ActionKind::Dice { sides } => {
                    let text = roll_die(&mut self.rng, sides).to_string();
                    self.show_die(text);
                }
            }
            self.timers.frame = Some(
                self.scheduler
                    .set_interval(frame_ms, Task::Frame { action: index }),
            );
        }

        self.timers.end = Some(self.scheduler.set_timeout(
            self.config.animation_duration_ms,
            Task::Finish { action: index },
        ));
    }

    fn frame(&mut self, index: usize) {
        let Some(kind) = self.config.actions.get(index).map(|action| action.kind) else {
            return;
        };

        match kind {
            ActionKind::Coin => {
                let face = self.state.symbol.unwrap_or(CoinFace::Heads).flipped();
                self.state = self.state.with_symbol(face);
                if let Some(surface) = frame_target(&mut self.surface, Slot::CoinFace) {
                    set_coin_face(surface, &self.sprite_url, face.symbol_id());
                }
            }
            ActionKind::Dice { sides } => {
                let text = roll_die(&mut self.rng, sides).to_string();
                self.show_die(text);
            }
        }
    }

    fn finish(&mut self, index: usize) {
        self.stop_timers();
        let Some(action) = self.config.actions.get(index) else {
            return;
        };

        let outcome = resolve_outcome(action, &mut self.rng);
        debug!(
            widget = %self.dom_id,
            action = %action.id,
            symbol = ?outcome.symbol,
            value = %outcome.overlay_text,
            "Settled"
        );
        let next = self.state.settled(outcome);
        self.transition(next, Some(index));
        self.sync();

        if let Some(delay) = self.config.auto_reset_ms {
            self.timers.auto_reset = Some(self.scheduler.set_timeout(delay, Task::AutoReset));
        }
    }

    fn show_die(&mut self, text: String) {
        if let Some(surface) = frame_target(&mut self.surface, Slot::DieValue) {
            surface.set_text(Slot::DieValue, &text);
        }
        self.state = self.state.with_overlay(text);
    }

    fn stop_timers(&mut self) {
        self.timers.clear(&mut self.scheduler);
    }

    /// Elements are only reachable through the widget root.
    fn surface_has(&self, slot: Slot) -> bool {
        self.surface
            .as_ref()
            .is_some_and(|surface| surface.has(Slot::Root) && surface.has(slot))
    }


    fn transition(&mut self, next: ViewState, action: Option<usize>) {
        let from = self.state.phase();
        let to = next.phase();
        self.state = next;

        if from != to {
            debug!(widget = %self.dom_id, from = from.name(), to = to.name(), "Phase changed");
            self.history = self.history.record(StateTransition {
                from,
                to,
                timestamp: Utc::now(),
                clock_ms: self.scheduler.now(),
                action: action
                    .and_then(|index| self.config.actions.get(index))
                    .map(|action| action.id.clone()),
            });
        }
    }

    fn sync(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            sync_view(surface, &self.state, &self.sprite_url);
        }
    }
}

/// Mounted surface, if `slot` can be reached through its root.
fn frame_target<S: Surface>(surface: &mut Option<S>, slot: Slot) -> Option<&mut S> {
    surface
        .as_mut()
        .filter(|surface| surface.has(Slot::Root) && surface.has(slot))
}

impl<S: Surface, R: Rng> Drop for Widget<S, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
